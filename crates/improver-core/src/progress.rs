//! Step counting and progress line formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a progress entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Formatting policy: the marker prefixed to the message for each severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressFormat {
    pub info: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl ProgressFormat {
    /// Unicode markers: `✓ `, `⚠ `, `✕ `.
    pub fn unicode() -> Self {
        Self {
            info: String::new(),
            success: "✓ ".to_string(),
            warning: "⚠ ".to_string(),
            error: "✕ ".to_string(),
        }
    }

    /// Plain ASCII markers for terminals without Unicode support.
    pub fn ascii() -> Self {
        Self {
            info: String::new(),
            success: "[ok] ".to_string(),
            warning: "[warn] ".to_string(),
            error: "[error] ".to_string(),
        }
    }

    pub fn marker(&self, severity: Severity) -> &str {
        match severity {
            Severity::Info => &self.info,
            Severity::Success => &self.success,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
        }
    }

    /// Render `[step/total] {marker}{message}`.
    pub fn render(&self, step: usize, total: usize, severity: Severity, message: &str) -> String {
        format!("[{}/{}] {}{}", step, total, self.marker(severity), message)
    }
}

impl Default for ProgressFormat {
    fn default() -> Self {
        Self::unicode()
    }
}

/// One rendered progress entry handed to a sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    pub step: usize,
    pub total: usize,
    pub severity: Severity,

    /// Message without step prefix or marker.
    pub message: String,

    /// Fully rendered line.
    pub line: String,

    pub timestamp: DateTime<Utc>,
}

/// Runner step state. `current` only grows; `total` is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter {
    current: usize,
    total: usize,
}

impl StepCounter {
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Consume the next step and return its number.
    pub fn advance(&mut self) -> usize {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether more steps were logged than budgeted.
    pub fn overflowed(&self) -> bool {
        self.current > self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_markers() {
        let fmt = ProgressFormat::default();
        assert_eq!(fmt.render(1, 3, Severity::Info, "hello"), "[1/3] hello");
        assert_eq!(fmt.render(2, 3, Severity::Success, "done"), "[2/3] ✓ done");
        assert_eq!(fmt.render(3, 3, Severity::Error, "boom"), "[3/3] ✕ boom");
        assert_eq!(fmt.render(4, 3, Severity::Warning, "hmm"), "[4/3] ⚠ hmm");
    }

    #[test]
    fn test_ascii_markers() {
        let fmt = ProgressFormat::ascii();
        assert_eq!(fmt.render(1, 1, Severity::Success, "ok"), "[1/1] [ok] ok");
        assert_eq!(fmt.marker(Severity::Info), "");
    }

    #[test]
    fn test_step_counter_advances() {
        let mut counter = StepCounter::new(2);
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
        assert!(!counter.overflowed());
        assert_eq!(counter.advance(), 3);
        assert!(counter.overflowed());
        assert_eq!(counter.total(), 2);
    }

    #[test]
    fn test_severity_serializes_snake_case() {
        let json = serde_json::to_string(&Severity::Success).unwrap();
        assert_eq!(json, "\"success\"");
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}
