//! feedspec - asynchronous behavioural harness for an RSS feed reader.
//!
//! Runs describe/it style suites against a feed reader front-end. Cases wait
//! on callback-driven operations (loading a feed) through single-shot
//! completion tokens, with a deadline per phase and a fresh page per case.

pub mod app;
pub mod config;
pub mod feeds;
pub mod harness;
pub mod page;
pub mod suites;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod utils;
