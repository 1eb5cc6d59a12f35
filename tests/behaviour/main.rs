//! Behaviour tests for the feed reader front-end using Cucumber.
//!
//! ```bash
//! cargo test --test behaviour
//! ```

mod steps;

use cucumber::World;
use steps::FeedReaderWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Feed Reader Behaviour Tests ===\n");
    FeedReaderWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/behaviour/features/feedreader.feature")
        .await;
}
