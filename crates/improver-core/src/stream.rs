//! Newline-delimited JSON event stream.
//!
//! Every progress entry becomes a `log` event. Callers terminate the stream with a
//! `complete` or `error` event once the run has finished.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::progress::{ProgressEntry, Severity};
use crate::sink::ProgressSink;

/// One event in the stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A rendered progress line.
    Log {
        message: String,
        step: usize,
        total: usize,
        severity: Severity,
        timestamp: DateTime<Utc>,
    },

    /// The run finished successfully.
    Complete,

    /// The run failed.
    Error { message: String },
}

impl From<&ProgressEntry> for StreamEvent {
    fn from(entry: &ProgressEntry) -> Self {
        StreamEvent::Log {
            message: entry.line.clone(),
            step: entry.step,
            total: entry.total,
            severity: entry.severity,
            timestamp: entry.timestamp,
        }
    }
}

/// Sink writing one JSON object per line to `W`.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single event and flush.
    pub fn write_event(&mut self, event: &StreamEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn complete(&mut self) -> Result<()> {
        self.write_event(&StreamEvent::Complete)
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.write_event(&StreamEvent::Error {
            message: message.into(),
        })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressSink for JsonLinesSink<W> {
    fn emit(&mut self, entry: &ProgressEntry) -> Result<()> {
        self.write_event(&StreamEvent::from(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressFormat;
    use serde_json::Value;

    #[test]
    fn test_log_event_shape() {
        let entry = ProgressEntry {
            step: 1,
            total: 1,
            severity: Severity::Success,
            message: "done".to_string(),
            line: ProgressFormat::default().render(1, 1, Severity::Success, "done"),
            timestamp: Utc::now(),
        };

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(&entry).unwrap();
        sink.complete().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "log");
        assert_eq!(lines[0]["message"], "[1/1] ✓ done");
        assert_eq!(lines[0]["severity"], "success");
        assert_eq!(lines[1], serde_json::json!({ "type": "complete" }));
    }

    #[test]
    fn test_error_event() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.fail("pipe closed").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "{\"type\":\"error\",\"message\":\"pipe closed\"}\n");
    }
}
