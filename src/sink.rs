//! Where matcher outcomes are reported.

use crate::detail::{deep_equal, Detail};
use pretty_assertions::{Comparison, StrComparison};

/// Outcome of a matcher. A failed match is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub pass: bool,
    pub message: String,
}

impl MatchResult {
    pub fn new(pass: bool, message: impl Into<String>) -> Self {
        Self {
            pass,
            message: message.into(),
        }
    }
}

/// Receives pass/fail reports from matchers.
pub trait AssertionSink {
    fn report(&mut self, passed: bool, message: &dyn Fn() -> String);

    /// Strict string equality, reported with a line diff on failure.
    fn expect_str_eq(&mut self, received: &str, expected: &str) {
        self.report(received == expected, &|| {
            format!(
                "expect(received).toBe(expected)\n\n{}",
                StrComparison::new(expected, received)
            )
        });
    }

    /// Deep equality of event details, reported with a structural diff on failure.
    fn expect_detail_eq(&mut self, received: &Detail, expected: &Detail) {
        self.report(deep_equal(received, expected), &|| {
            format!(
                "expect(received).toEqual(expected)\n\n{}",
                Comparison::new(expected, received)
            )
        });
    }
}

/// Panics on the first failed report, failing the surrounding test.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicSink;

impl AssertionSink for PanicSink {
    fn report(&mut self, passed: bool, message: &dyn Fn() -> String) {
        if !passed {
            panic!("\n{}", message());
        }
    }
}

/// A single report captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub passed: bool,
    pub message: String,
}

/// Keeps every report so a caller can inspect them.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    reports: Vec<Report>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn failures(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter().filter(|report| !report.passed)
    }

    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(|report| report.passed)
    }
}

impl AssertionSink for RecordingSink {
    fn report(&mut self, passed: bool, message: &dyn Fn() -> String) {
        self.reports.push(Report {
            passed,
            message: message(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.expect_str_eq("a", "a");
        sink.expect_str_eq("<p>\n  a\n</p>", "<p>\n  b\n</p>");
        assert_eq!(sink.reports().len(), 2);
        assert!(!sink.all_passed());
        let failure = sink.failures().next().unwrap();
        assert!(failure.message.starts_with("expect(received).toBe(expected)"));
    }

    #[test]
    fn test_detail_report() {
        let mut sink = RecordingSink::new();
        sink.expect_detail_eq(&Detail::from(f64::NAN), &Detail::from(f64::NAN));
        sink.expect_detail_eq(&Detail::from(1), &Detail::from("1"));
        assert!(sink.reports()[0].passed);
        assert!(!sink.reports()[1].passed);
    }

    #[test]
    #[should_panic(expected = "toBe")]
    fn test_panic_sink() {
        PanicSink.expect_str_eq("a", "b");
    }
}
