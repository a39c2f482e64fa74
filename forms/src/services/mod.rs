pub mod export_client;

pub use export_client::{ExportApi, ExportClient, ExportSummary};
