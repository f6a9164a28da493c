//! Domain error types.

/// Top-level error type for pricelab.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricelabError {
    #[error("data error: {reason}")]
    Data { reason: String },

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

    /// A single product's series violates the input contract. Fatal to that
    /// product's pipeline only; the batch skips the product and continues.
    #[error("invalid input for {product_id}: {reason}")]
    InvalidInput { product_id: String, reason: String },

    /// An empty series reached a stage that requires observations. The
    /// catalog validation gate makes this unreachable for well-formed input,
    /// so hitting it means an upstream invariant was broken. Fatal to the
    /// whole batch.
    #[error("unfittable model for {product_id}: series has no observations")]
    UnfittableModel { product_id: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error("io error: {reason}")]
    Io { reason: String },
}

impl From<std::io::Error> for PricelabError {
    fn from(err: std::io::Error) -> Self {
        PricelabError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<&PricelabError> for std::process::ExitCode {
    fn from(err: &PricelabError) -> Self {
        let code: u8 = match err {
            PricelabError::Io { .. } => 1,
            PricelabError::ConfigParse { .. }
            | PricelabError::ConfigMissing { .. }
            | PricelabError::ConfigInvalid { .. } => 2,
            PricelabError::Data { .. } => 3,
            PricelabError::InvalidInput { .. } => 4,
            PricelabError::UnfittableModel { .. } => 5,
            PricelabError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
