// gRPC service layer. The bindings are generated from
// proto/payroll.proto by the build script and included here so both the
// server implementation and downstream clients can reach them.

pub mod export_service;

pub mod proto {
    tonic::include_proto!("payroll");
}

pub use proto::payroll_export_client::PayrollExportClient;
pub use proto::payroll_export_server::{PayrollExport, PayrollExportServer};
pub use proto::{
    ExportSummary, ExportedFile, LoadRosterRequest, LoadRosterResponse, MarkedExportRequest,
    SingleExportRequest,
};
