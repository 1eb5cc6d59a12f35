//! Run reports.
//!
//! A [`RunReport`] collects one [`SuiteReport`] per suite and one
//! [`CaseReport`] per case. Reports render as indented text or JSON.

use std::fmt::Write as _;

use serde::Serialize;

use super::failure::{Failure, FailureKind, Phase};
use super::state::CaseState;

/// A failure together with the phase that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub phase: Phase,
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl FailureRecord {
    pub fn new(phase: Phase, failure: &Failure) -> Self {
        let (expected, actual) = match failure {
            Failure::Assertion {
                expected, actual, ..
            } => (expected.clone(), actual.clone()),
            _ => (None, None),
        };
        Self {
            phase,
            kind: failure.kind(),
            message: failure.to_string(),
            expected,
            actual,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub suite: String,
    pub name: String,
    pub state: CaseState,
    pub failures: Vec<FailureRecord>,
    pub duration_ms: u64,
}

impl CaseReport {
    /// Suite and case name joined, e.g. "The Menu is hidden by default".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.suite, self.name)
    }

    pub fn passed(&self) -> bool {
        self.state == CaseState::Passed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub name: String,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn failed_count(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed()).count()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: String,
    pub duration_ms: u64,
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn cases(&self) -> impl Iterator<Item = &CaseReport> {
        self.suites.iter().flat_map(|s| s.cases.iter())
    }

    pub fn total(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    pub fn failed_count(&self) -> usize {
        self.suites.iter().map(SuiteReport::failed_count).sum()
    }

    /// True if every case passed.
    pub fn passed(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn find(&self, full_name: &str) -> Option<&CaseReport> {
        self.cases().find(|c| c.full_name() == full_name)
    }

    /// "4 specs, 0 failures".
    pub fn summary(&self) -> String {
        let total = self.total();
        let failed = self.failed_count();
        format!(
            "{total} {}, {failed} {}",
            if total == 1 { "spec" } else { "specs" },
            if failed == 1 { "failure" } else { "failures" },
        )
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for suite in &self.suites {
            let _ = writeln!(out, "{}", suite.name);
            for case in &suite.cases {
                let mark = if case.passed() { "✓" } else { "✗" };
                let _ = writeln!(out, "  {mark} {} ({}ms)", case.name, case.duration_ms);
                for failure in &case.failures {
                    let _ = writeln!(
                        out,
                        "      {} in {}: {}",
                        failure.kind, failure.phase, failure.message
                    );
                }
            }
        }
        let _ = writeln!(out, "\n{}", self.summary());
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
