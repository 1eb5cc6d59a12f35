//! Built-in suites.

pub mod feedreader;

pub use feedreader::{feedreader_suites, FeedSelection};
