//! Structured observability hooks for the agent run lifecycle.
//!
//! These events describe the run itself (start, finish, failure) and are separate
//! from the progress lines delivered to a [`ProgressSink`](crate::sink::ProgressSink).
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=improver_core=debug`.

use tracing::{debug, info, warn};

/// RAII guard that enters a run-scoped tracing span for the duration of a run.
pub struct RunSpan {
    _span: tracing::span::EnteredSpan,
}

impl RunSpan {
    /// Create and enter a span tagged with the run id and repository name.
    pub fn enter(run_id: &str, repository: &str) -> Self {
        let span = tracing::info_span!("improver.run", run_id = %run_id, repository = %repository);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: run started.
pub fn emit_run_started(run_id: &str, repository: &str, total_steps: usize) {
    info!(
        event = "run.started",
        run_id = %run_id,
        repository = %repository,
        total_steps = total_steps,
    );
}

/// Emit event: run finished.
pub fn emit_run_finished(run_id: &str, duration_ms: u64, steps_logged: usize, success: bool) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        steps_logged = steps_logged,
        success = success,
    );
}

/// Emit event: an area was skipped because it is not selected.
pub fn emit_area_skipped(area: &str) {
    debug!(event = "area.skipped", area = %area);
}

/// Emit event: the error line for a failed run could not be delivered to the sink.
pub fn emit_error_line_dropped(run_id: &str, error: &dyn std::fmt::Display) {
    warn!(event = "run.error_line_dropped", run_id = %run_id, error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_run_started_fields() {
        emit_run_started("run-1", "landing", 3);
        assert!(logs_contain("run.started"));
        assert!(logs_contain("total_steps=3"));
    }

    #[traced_test]
    #[test]
    fn test_run_span_wraps_events() {
        let _span = RunSpan::enter("run-2", "landing");
        emit_run_finished("run-2", 10, 6, true);
        assert!(logs_contain("improver.run"));
        assert!(logs_contain("success=true"));
    }

    #[traced_test]
    #[test]
    fn test_error_line_dropped_is_warning() {
        emit_error_line_dropped("run-3", &"pipe closed");
        assert!(logs_contain("WARN"));
        assert!(logs_contain("pipe closed"));
    }
}
