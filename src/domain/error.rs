//! Domain error types.

/// Top-level error type for acftrader.
#[derive(Debug, thiserror::Error)]
pub enum AcfTraderError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient data: have {observations} observations, need {minimum}")]
    InsufficientData { observations: usize, minimum: usize },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for series {series}")]
    NoData { series: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AcfTraderError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        AcfTraderError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<&AcfTraderError> for std::process::ExitCode {
    fn from(err: &AcfTraderError) -> Self {
        let code: u8 = match err {
            AcfTraderError::Io(_) => 1,
            AcfTraderError::ConfigParse { .. }
            | AcfTraderError::ConfigMissing { .. }
            | AcfTraderError::ConfigInvalid { .. } => 2,
            AcfTraderError::DataSource { .. } => 3,
            AcfTraderError::InvalidInput { .. } => 4,
            AcfTraderError::NoData { .. } | AcfTraderError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
