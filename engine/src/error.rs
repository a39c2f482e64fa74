use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Roster CSV system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Roster data format error: {0}")]
    RosterFormatError(String),

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Export validation error: {0}")]
    ValidationError(String),

    #[error("File generation error: {0}")]
    FileBuildError(String),

    #[error("Delivery error: {0}")]
    DeliveryError(String),

    // Catch-all for anyhow errors when direct conversion is suitable
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err); // Log the error source
        match err {
            EngineError::ConfigError(msg) => {
                tonic::Status::failed_precondition(format!("Configuration error: {}", msg))
            }
            EngineError::CsvSystemError { source } => {
                tonic::Status::invalid_argument(format!("Roster CSV system error: {}", source))
            }
            EngineError::IoError { source } => {
                tonic::Status::internal(format!("I/O error: {}", source))
            }
            EngineError::RosterFormatError(msg) => {
                tonic::Status::invalid_argument(format!("Roster data format error: {}", msg))
            }
            EngineError::UnknownEmployee(msg) => tonic::Status::not_found(msg),
            EngineError::ValidationError(msg) => tonic::Status::failed_precondition(msg),
            EngineError::FileBuildError(msg) => {
                tonic::Status::internal(format!("File generation error: {}", msg))
            }
            EngineError::DeliveryError(msg) => {
                tonic::Status::internal(format!("Delivery error: {}", msg))
            }
            EngineError::AnyhowError(source) => {
                tonic::Status::internal(format!("An internal error occurred: {}", source))
            }
        }
    }
}
