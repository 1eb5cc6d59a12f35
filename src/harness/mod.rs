//! Asynchronous test harness.
//!
//! Each case runs three phases in strict order:
//! - setup (`before_each` hooks)
//! - body
//! - teardown (`after_each` hooks, always run)
//!
//! Every phase gets a single-shot [`Done`] token and a deadline. The next
//! phase starts only after the token has fired. A token that never fires
//! fails the case with a `Timeout`; an unmet expectation fails it with an
//! `AssertionFailure`. Failures stay with their case and never stop the run.

pub mod done;
pub mod expect;
pub mod failure;
pub mod phase;
pub mod report;
pub mod runner;
pub mod state;
pub mod step;
pub mod suite;

#[cfg(test)]
mod tests;

pub use done::{Done, Signal};
pub use expect::{expect, Expectation, Not};
pub use failure::{Failure, FailureKind, Phase};
pub use phase::{run_case, run_phase, run_setup, run_teardown, DEFAULT_PHASE_TIMEOUT};
pub use report::{CaseReport, FailureRecord, RunReport, SuiteReport};
pub use runner::Harness;
pub use state::{CaseState, TransitionError};
pub use step::{done_step, sync_step, CaseContext, DoneStep, LoadFeed, Step, SyncStep};
pub use suite::{Case, RunnableSuite, Suite};
