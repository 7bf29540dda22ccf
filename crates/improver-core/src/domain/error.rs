//! Error taxonomy for the improver agent.

use std::path::PathBuf;

/// Fault raised while a run is in progress.
///
/// The runner logs the fault once at error severity and hands it back unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ProcessFault {
    #[error("progress sink rejected step {step}/{total}: {reason}")]
    Sink {
        step: usize,
        total: usize,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors produced while loading an improvement bundle.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("failed to read bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bundle: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for run operations.
pub type Result<T> = std::result::Result<T, ProcessFault>;
