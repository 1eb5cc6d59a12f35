//! feedspec: run the feed reader suites
//!
//! Runs every built-in suite against the simulated feed reader and prints the
//! report to stdout. Exits non-zero if any case failed.
//!
//! ## Usage
//! ```text
//! feedspec [CONFIG_PATH]
//! ```
//!
//! ## Configuration
//! - FEEDSPEC_CONFIG: YAML configuration file (optional)
//! - FEEDSPEC__HARNESS__PHASE_TIMEOUT_MS: phase deadline (default: 5000)
//! - FEEDSPEC__HARNESS__FILTER: only run cases whose name contains this text
//! - FEEDSPEC__REPORT__FORMAT: `text` or `json` (default: text)
//! - FEEDSPEC_LOG: tracing filter (default: info)

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use feedspec::app::FeedReaderApp;
use feedspec::config::{Config, ReportFormat};
use feedspec::harness::Harness;
use feedspec::suites::feedreader_suites;
use feedspec::utils::bootstrap::init_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args().nth(1);
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::from(2);
        }
    };

    let app = match FeedReaderApp::from_config(&config.app) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Failed to build feed reader");
            return ExitCode::from(2);
        }
    };
    info!(feeds = app.catalog().len(), "feedspec started");

    let harness = Harness::from_config(Arc::new(app), &config.harness);
    let report = harness.run(&feedreader_suites()).await;

    match config.report.format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!(error = %e, "Failed to serialize report");
                return ExitCode::from(2);
            }
        },
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
