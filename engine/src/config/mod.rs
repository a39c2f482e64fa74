pub mod settings;

pub use settings::{CompanyClientMapping, EngineSettings, ExportRestriction, ExportSettings};
