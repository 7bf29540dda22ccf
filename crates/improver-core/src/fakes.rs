//! In-memory sinks for tests and embedders.
//!
//! `MemorySink` records every entry; `FaultySink` rejects a chosen emit so the
//! runner's failure path can be driven without real I/O.

use crate::domain::error::{ProcessFault, Result};
use crate::progress::ProgressEntry;
use crate::sink::ProgressSink;

// ---------------------------------------------------------------------------
// MemorySink
// ---------------------------------------------------------------------------

/// Sink that keeps every entry it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Vec<ProgressEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }

    /// Rendered lines in emit order.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.line.clone()).collect()
    }

    /// Raw messages in emit order.
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressSink for MemorySink {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FaultySink
// ---------------------------------------------------------------------------

/// Sink that rejects the `fail_on`-th emit (1-based) and records everything else.
#[derive(Debug)]
pub struct FaultySink {
    fail_on: usize,
    reason: String,
    calls: usize,
    recorded: MemorySink,
}

impl FaultySink {
    pub fn new(fail_on: usize, reason: impl Into<String>) -> Self {
        Self {
            fail_on,
            reason: reason.into(),
            calls: 0,
            recorded: MemorySink::new(),
        }
    }

    /// Entries that were accepted.
    pub fn recorded(&self) -> &MemorySink {
        &self.recorded
    }

    /// Number of emit calls, including the rejected one.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl ProgressSink for FaultySink {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        self.calls += 1;
        if self.calls == self.fail_on {
            return Err(ProcessFault::Sink {
                step: entry.step,
                total: entry.total,
                reason: self.reason.clone(),
            });
        }
        self.recorded.emit(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressFormat, Severity};
    use chrono::Utc;

    fn entry(step: usize) -> ProgressEntry {
        ProgressEntry {
            step,
            total: 1,
            severity: Severity::Info,
            message: format!("m{}", step),
            line: ProgressFormat::default().render(step, 1, Severity::Info, &format!("m{}", step)),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_memory_sink_records_in_order() {
        let mut sink = MemorySink::new();
        sink.emit(&entry(1)).unwrap();
        sink.emit(&entry(2)).unwrap();
        assert_eq!(sink.messages(), vec!["m1", "m2"]);
        assert_eq!(sink.lines(), vec!["[1/1] m1", "[2/1] m2"]);
    }

    #[test]
    fn test_faulty_sink_rejects_only_chosen_call() {
        let mut sink = FaultySink::new(2, "disk full");
        assert!(sink.emit(&entry(1)).is_ok());
        let err = sink.emit(&entry(2)).unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(sink.emit(&entry(3)).is_ok());

        assert_eq!(sink.calls(), 3);
        assert_eq!(sink.recorded().messages(), vec!["m1", "m3"]);
    }
}
