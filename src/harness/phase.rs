//! Phase execution: one step, one token, one deadline.
//!
//! A phase is the race between "the step returned and its token fired" and a
//! timer. Whichever finishes first decides the outcome. Assertion failures
//! returned by the step and panics raised while it runs are both attributed
//! to the phase that produced them.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, warn};

use super::done::Done;
use super::failure::{Failure, Phase};
use super::step::{CaseContext, Step};

/// Default deadline for a single phase.
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `step` as the given phase and wait for its completion token.
pub async fn run_phase<S: Send>(
    phase: Phase,
    step: &dyn Step<S>,
    ctx: &mut CaseContext<S>,
    limit: Duration,
) -> Result<(), Failure> {
    ctx.enter(phase);
    let (done, signal) = Done::channel(phase);

    let work = async move {
        match AssertUnwindSafe(step.run(ctx, done)).catch_unwind().await {
            Ok(Ok(())) => {}
            Ok(Err(failure)) => return Err(failure),
            Err(payload) => return Err(Failure::from_panic(payload)),
        }
        signal.wait().await
    };

    let outcome = match tokio::time::timeout(limit, work).await {
        Ok(outcome) => outcome,
        Err(_) => Err(Failure::Timeout { phase, limit }),
    };

    match &outcome {
        Ok(()) => debug!(%phase, "Phase completed"),
        Err(failure) if failure.is_timeout() => warn!(%phase, error = %failure, "Phase hung"),
        Err(failure) => debug!(%phase, error = %failure, "Phase failed"),
    }
    outcome
}

/// Run a setup step; the body must not start until this returns `Ok`.
pub async fn run_setup<S: Send>(
    step: &dyn Step<S>,
    ctx: &mut CaseContext<S>,
    limit: Duration,
) -> Result<(), Failure> {
    run_phase(Phase::Setup, step, ctx, limit).await
}

/// Run a case body.
pub async fn run_case<S: Send>(
    step: &dyn Step<S>,
    ctx: &mut CaseContext<S>,
    limit: Duration,
) -> Result<(), Failure> {
    run_phase(Phase::Body, step, ctx, limit).await
}

/// Run a teardown step.
pub async fn run_teardown<S: Send>(
    step: &dyn Step<S>,
    ctx: &mut CaseContext<S>,
    limit: Duration,
) -> Result<(), Failure> {
    run_phase(Phase::Teardown, step, ctx, limit).await
}
