//! Suite runner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use uuid::Uuid;

use super::phase::DEFAULT_PHASE_TIMEOUT;
use super::report::{RunReport, SuiteReport};
use super::suite::RunnableSuite;
use crate::app::FeedApp;
use crate::config::HarnessConfig;

/// Runs suites against one application, one case at a time.
#[derive(Clone)]
pub struct Harness {
    app: Arc<dyn FeedApp>,
    phase_timeout: Duration,
    filter: Option<String>,
}

impl Harness {
    pub fn new(app: Arc<dyn FeedApp>) -> Self {
        Self {
            app,
            phase_timeout: DEFAULT_PHASE_TIMEOUT,
            filter: None,
        }
    }

    pub fn from_config(app: Arc<dyn FeedApp>, config: &HarnessConfig) -> Self {
        Self {
            app,
            phase_timeout: config.phase_timeout(),
            filter: config.filter.clone().filter(|f| !f.is_empty()),
        }
    }

    pub fn with_phase_timeout(mut self, timeout: Duration) -> Self {
        self.phase_timeout = timeout;
        self
    }

    /// Only run cases whose full name contains `filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn app(&self) -> Arc<dyn FeedApp> {
        Arc::clone(&self.app)
    }

    pub fn phase_timeout(&self) -> Duration {
        self.phase_timeout
    }

    pub(crate) fn selects(&self, suite: &str, case: &str) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => format!("{suite} {case}").contains(filter.as_str()),
        }
    }

    pub async fn run_suite(&self, suite: &dyn RunnableSuite) -> SuiteReport {
        suite.run(self).await
    }

    /// Run every suite in order and collect the report.
    pub async fn run(&self, suites: &[Box<dyn RunnableSuite>]) -> RunReport {
        let run_id = Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();
        let started = Instant::now();
        info!(
            run_id = %run_id,
            suites = suites.len(),
            phase_timeout_ms = self.phase_timeout.as_millis() as u64,
            "Starting run"
        );

        let mut reports = Vec::with_capacity(suites.len());
        for suite in suites {
            reports.push(suite.run(self).await);
        }

        let report = RunReport {
            run_id,
            started_at,
            duration_ms: started.elapsed().as_millis() as u64,
            suites: reports,
        };
        if report.passed() {
            info!(run_id = %report.run_id, summary = %report.summary(), "Run finished");
        } else {
            warn!(run_id = %report.run_id, summary = %report.summary(), "Run finished with failures");
        }
        report
    }
}
