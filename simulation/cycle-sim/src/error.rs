use thermo::GasError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Gas(#[from] GasError),
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid cycle: {reason}")]
    InvalidCycle { reason: String },
}

impl SimError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn invalid_cycle(reason: impl Into<String>) -> Self {
        Self::InvalidCycle {
            reason: reason.into(),
        }
    }
}
