//! Per-case lifecycle state machine.

use std::fmt;

use serde::Serialize;

use super::failure::FailureKind;

/// Lifecycle of one case.
///
/// `Pending → SettingUp → Running → TearingDown → Passed | Failed(kind)`.
/// A failed setup skips the body, so `SettingUp → TearingDown` is allowed
/// too. `Passed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaseState {
    Pending,
    SettingUp,
    Running,
    TearingDown,
    Passed,
    Failed(FailureKind),
}

/// Rejected state transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal case transition {from} -> {to}")]
pub struct TransitionError {
    pub from: CaseState,
    pub to: CaseState,
}

impl CaseState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseState::Passed | CaseState::Failed(_))
    }

    pub fn can_transition_to(&self, next: CaseState) -> bool {
        use CaseState::*;
        matches!(
            (*self, next),
            (Pending, SettingUp)
                | (SettingUp, Running)
                | (SettingUp, TearingDown)
                | (Running, TearingDown)
                | (TearingDown, Passed)
                | (TearingDown, Failed(_))
        )
    }

    /// Move to `next`, refusing anything the lifecycle does not allow.
    pub fn advance(&mut self, next: CaseState) -> Result<(), TransitionError> {
        if !self.can_transition_to(next) {
            return Err(TransitionError {
                from: *self,
                to: next,
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseState::Pending => write!(f, "Pending"),
            CaseState::SettingUp => write!(f, "SettingUp"),
            CaseState::Running => write!(f, "Running"),
            CaseState::TearingDown => write!(f, "TearingDown"),
            CaseState::Passed => write!(f, "Passed"),
            CaseState::Failed(kind) => write!(f, "Failed({kind})"),
        }
    }
}
