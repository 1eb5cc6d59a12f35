//! Suites and cases.
//!
//! A [`Suite`] groups cases that share `before_each` / `after_each` hooks
//! and a per-case state type `S`. Every case gets a fresh page and a fresh
//! `S::default()`; nothing leaks from one case to the next.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::done::Done;
use super::failure::{Failure, Phase};
use super::phase::{run_case, run_setup, run_teardown};
use super::report::{CaseReport, FailureRecord, SuiteReport};
use super::runner::Harness;
use super::state::CaseState;
use super::step::{done_step, sync_step, CaseContext, Step};

/// A named case (`it`).
pub struct Case<S> {
    name: String,
    body: Box<dyn Step<S>>,
    timeout: Option<Duration>,
}

impl<S: Send + 'static> Case<S> {
    pub fn new(name: impl Into<String>, body: impl Step<S> + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
            timeout: None,
        }
    }

    /// Override the harness deadline for this case's body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named group of cases (`describe`).
pub struct Suite<S> {
    name: String,
    before_each: Vec<Box<dyn Step<S>>>,
    after_each: Vec<Box<dyn Step<S>>>,
    cases: Vec<Case<S>>,
}

impl<S: Default + Send + 'static> Suite<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            before_each: Vec::new(),
            after_each: Vec::new(),
            cases: Vec::new(),
        }
    }

    pub fn before_each(mut self, step: impl Step<S> + 'static) -> Self {
        self.before_each.push(Box::new(step));
        self
    }

    pub fn after_each(mut self, step: impl Step<S> + 'static) -> Self {
        self.after_each.push(Box::new(step));
        self
    }

    /// Synchronous case.
    pub fn it(
        self,
        name: impl Into<String>,
        body: impl Fn(&mut CaseContext<S>) -> Result<(), Failure> + Send + Sync + 'static,
    ) -> Self {
        self.case(Case::new(name, sync_step(body)))
    }

    /// Case that completes through its `done` token.
    pub fn it_with_done(
        self,
        name: impl Into<String>,
        body: impl Fn(&mut CaseContext<S>, Done) -> Result<(), Failure> + Send + Sync + 'static,
    ) -> Self {
        self.case(Case::new(name, done_step(body)))
    }

    /// Case backed by a custom [`Step`].
    pub fn it_step(self, name: impl Into<String>, body: impl Step<S> + 'static) -> Self {
        self.case(Case::new(name, body))
    }

    pub fn case(mut self, case: Case<S>) -> Self {
        self.cases.push(case);
        self
    }

    async fn run_one(&self, case: &Case<S>, harness: &Harness) -> CaseReport {
        let started = Instant::now();
        let hook_limit = harness.phase_timeout();
        let body_limit = case.timeout.unwrap_or(hook_limit);
        let mut state = CaseState::Pending;
        let mut failures: Vec<FailureRecord> = Vec::new();
        let mut ctx = CaseContext::new(harness.app(), S::default());

        self.advance(&mut state, CaseState::SettingUp, case);
        let mut ready = true;
        for hook in &self.before_each {
            if let Err(failure) = run_setup(hook.as_ref(), &mut ctx, hook_limit).await {
                failures.push(FailureRecord::new(Phase::Setup, &failure));
                ready = false;
                break;
            }
        }

        if ready {
            self.advance(&mut state, CaseState::Running, case);
            if let Err(failure) = run_case(case.body.as_ref(), &mut ctx, body_limit).await {
                failures.push(FailureRecord::new(Phase::Body, &failure));
            }
        }

        // Teardown runs whatever happened before, and every hook gets its turn.
        self.advance(&mut state, CaseState::TearingDown, case);
        for hook in &self.after_each {
            if let Err(failure) = run_teardown(hook.as_ref(), &mut ctx, hook_limit).await {
                failures.push(FailureRecord::new(Phase::Teardown, &failure));
            }
        }

        let terminal = match failures.first() {
            None => CaseState::Passed,
            Some(first) => CaseState::Failed(first.kind),
        };
        self.advance(&mut state, terminal, case);

        let report = CaseReport {
            suite: self.name.clone(),
            name: case.name.clone(),
            state,
            failures,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            suite = %self.name,
            case = %case.name,
            state = %report.state,
            duration_ms = report.duration_ms,
            "Case finished"
        );
        report
    }

    fn advance(&self, state: &mut CaseState, next: CaseState, case: &Case<S>) {
        match state.advance(next) {
            Ok(()) => debug!(suite = %self.name, case = %case.name, state = %next, "Case transition"),
            Err(e) => error!(suite = %self.name, case = %case.name, error = %e, "Case transition rejected"),
        }
    }
}

/// Type-erased suite, so suites with different state types can run together.
#[async_trait]
pub trait RunnableSuite: Send + Sync {
    fn name(&self) -> &str;

    fn case_names(&self) -> Vec<String>;

    /// Run the cases selected by the harness, strictly one after another.
    async fn run(&self, harness: &Harness) -> SuiteReport;
}

#[async_trait]
impl<S: Default + Send + 'static> RunnableSuite for Suite<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn case_names(&self) -> Vec<String> {
        self.cases.iter().map(|c| c.name.clone()).collect()
    }

    async fn run(&self, harness: &Harness) -> SuiteReport {
        info!(suite = %self.name, cases = self.cases.len(), "Running suite");
        let mut cases = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            if !harness.selects(&self.name, &case.name) {
                debug!(suite = %self.name, case = %case.name, "Case filtered out");
                continue;
            }
            cases.push(self.run_one(case, harness).await);
        }
        SuiteReport {
            name: self.name.clone(),
            cases,
        }
    }
}
