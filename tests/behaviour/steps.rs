//! Feed reader step definitions.

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when, World};

use feedspec::app::{FeedApp, FeedReaderApp};
use feedspec::harness::{Done, Failure, Phase};
use feedspec::page::Page;

const LOAD_DEADLINE: Duration = Duration::from_secs(5);

/// Test context for feed reader scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct FeedReaderWorld {
    app: Arc<FeedReaderApp>,
    page: Page,
    titles: Vec<String>,
    last_load: Option<Result<(), Failure>>,
}

impl FeedReaderWorld {
    fn new() -> Self {
        let app = Arc::new(FeedReaderApp::with_defaults().with_latency(Duration::from_millis(1)));
        let page = app.mount();
        Self {
            app,
            page,
            titles: Vec::new(),
            last_load: None,
        }
    }

    async fn wait(signal: feedspec::harness::Signal) -> Result<(), Failure> {
        match tokio::time::timeout(LOAD_DEADLINE, signal.wait()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Failure::Timeout {
                phase: Phase::Body,
                limit: LOAD_DEADLINE,
            }),
        }
    }
}

// --- Background ---

#[given("the feed reader with its default feeds")]
async fn given_default_reader(world: &mut FeedReaderWorld) {
    world.page = world.app.mount();
}

// --- When steps ---

#[when("I click the menu icon")]
async fn when_click_menu_icon(world: &mut FeedReaderWorld) {
    world.page.click_menu_icon();
}

#[when(expr = "feed {int} finishes loading")]
async fn when_feed_loads(world: &mut FeedReaderWorld, index: usize) {
    let (done, signal) = Done::channel(Phase::Body);
    world.app.load_feed(index, &world.page, done);
    FeedReaderWorld::wait(signal)
        .await
        .expect("feed did not finish loading");
    world.titles.push(world.page.header_title());
}

#[when(expr = "I select feed {int} from the menu")]
async fn when_select_feed(world: &mut FeedReaderWorld, index: usize) {
    let (done, signal) = Done::channel(Phase::Body);
    world.app.select_feed(index, &world.page, done);
    FeedReaderWorld::wait(signal)
        .await
        .expect("selected feed did not finish loading");
}

#[when(expr = "I try to load feed {int}")]
async fn when_try_load(world: &mut FeedReaderWorld, index: usize) {
    let (done, signal) = Done::channel(Phase::Body);
    world.app.load_feed(index, &world.page, done);
    world.last_load = Some(FeedReaderWorld::wait(signal).await);
}

// --- Then steps ---

#[then("the feed catalog is not empty")]
async fn then_catalog_not_empty(world: &mut FeedReaderWorld) {
    let feeds = world.app.feeds().expect("catalog should be defined");
    assert!(!feeds.is_empty());
}

#[then("every feed has a url")]
async fn then_every_feed_has_url(world: &mut FeedReaderWorld) {
    for feed in world.app.catalog() {
        let url = feed.url.as_deref().expect("url should be defined");
        assert!(!url.is_empty(), "url should not be empty");
    }
}

#[then("every feed has a name")]
async fn then_every_feed_has_name(world: &mut FeedReaderWorld) {
    for feed in world.app.catalog() {
        let name = feed.name.as_deref().expect("name should be defined");
        assert!(!name.is_empty(), "name should not be empty");
    }
}

#[then(expr = "the body class is {string}")]
async fn then_body_class_is(world: &mut FeedReaderWorld, expected: String) {
    assert_eq!(world.page.body_class(), expected);
}

#[then("the menu is visible")]
async fn then_menu_visible(world: &mut FeedReaderWorld) {
    assert!(!world.page.is_menu_hidden());
    assert_ne!(world.page.body_class(), "menu-hidden");
}

#[then("the menu is hidden")]
async fn then_menu_hidden(world: &mut FeedReaderWorld) {
    assert!(world.page.is_menu_hidden());
}

#[then("the feed container has at least one entry")]
async fn then_has_entries(world: &mut FeedReaderWorld) {
    assert!(world.page.entry_count() > 0);
}

#[then(expr = "the header title is {string}")]
async fn then_header_title_is(world: &mut FeedReaderWorld, expected: String) {
    assert_eq!(world.page.header_title(), expected);
}

#[then("the header title changed")]
async fn then_header_title_changed(world: &mut FeedReaderWorld) {
    let [.., previous, latest] = world.titles.as_slice() else {
        panic!("expected at least two loaded feeds, got {:?}", world.titles);
    };
    assert_ne!(previous, latest);
}

#[then(expr = "the load fails with {string}")]
async fn then_load_fails_with(world: &mut FeedReaderWorld, message: String) {
    let outcome = world.last_load.clone().expect("no load attempted");
    let failure = outcome.expect_err("load should have failed");
    assert_eq!(failure.to_string(), message);
}
