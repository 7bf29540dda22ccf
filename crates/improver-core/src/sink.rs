//! Progress sinks: the logging collaborator the runner writes to.

use tracing::{error, info, warn};

use crate::domain::error::Result;
use crate::progress::{ProgressEntry, Severity};

/// Receives rendered progress entries from the runner.
///
/// An error returned from `emit` aborts the run.
pub trait ProgressSink {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()>;
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        (**self).emit(entry)
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for Box<S> {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        (**self).emit(entry)
    }
}

/// Sink that forwards each line to `tracing`.
///
/// Info and success lines are logged at `INFO`, warnings at `WARN`, errors at `ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        let severity = entry.severity.as_str();
        match entry.severity {
            Severity::Info | Severity::Success => {
                info!(step = entry.step, total = entry.total, severity, "{}", entry.line)
            }
            Severity::Warning => {
                warn!(step = entry.step, total = entry.total, severity, "{}", entry.line)
            }
            Severity::Error => {
                error!(step = entry.step, total = entry.total, severity, "{}", entry.line)
            }
        }
        Ok(())
    }
}
