//! Case failure types.
//!
//! A case fails for one of two reasons: an expectation did not hold, or a
//! completion token was never invoked. Reports keep the two apart so a reader
//! can tell "logic was wrong" from "the operation hung".

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Phase of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// `before_each` hooks.
    Setup,
    /// The case body.
    Body,
    /// `after_each` hooks.
    Teardown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Body => write!(f, "body"),
            Phase::Teardown => write!(f, "teardown"),
        }
    }
}

/// Coarse failure classification used by reports and the case state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    AssertionFailure,
    Timeout,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::AssertionFailure => write!(f, "AssertionFailure"),
            FailureKind::Timeout => write!(f, "Timeout"),
        }
    }
}

/// Why a phase failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// An expectation did not hold, a step failed its token explicitly, or a
    /// step panicked.
    #[error("{message}")]
    Assertion {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// The completion token was not invoked within the allotted interval.
    #[error("{phase} timed out after {}ms waiting for its completion token", .limit.as_millis())]
    Timeout { phase: Phase, limit: Duration },

    /// The completion token was dropped without ever being invoked.
    #[error("{phase} completion token was dropped without being invoked")]
    Abandoned { phase: Phase },
}

impl Failure {
    /// Failure carrying only a message.
    pub fn assertion(message: impl Into<String>) -> Self {
        Failure::Assertion {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Failure carrying an expected/actual pair.
    pub fn mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Failure::Assertion {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::Assertion { .. } => FailureKind::AssertionFailure,
            Failure::Timeout { .. } | Failure::Abandoned { .. } => FailureKind::Timeout,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == FailureKind::Timeout
    }

    /// Convert a captured panic payload into an assertion failure.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "step panicked with a non-string payload".to_string()
        };
        Failure::assertion(format!("panicked: {message}"))
    }
}
