//! Behavioural checks for the feed reader front-end.
//!
//! - "RSS Feeds": the catalog is non-empty and every feed has a name and url.
//! - "The Menu": hidden on load, toggled by the menu icon.
//! - "Initial Entries": loading the first feed renders entries.
//! - "New Feed Selection": loading another feed changes the header title.

use async_trait::async_trait;

use crate::harness::{expect, CaseContext, Done, Failure, LoadFeed, RunnableSuite, Step, Suite};
use crate::page::MENU_HIDDEN_CLASS;

pub fn rss_feeds() -> Suite<()> {
    Suite::new("RSS Feeds")
        .it("are defined", |ctx| {
            let feeds = expect(ctx.feeds()).to_be_defined()?;
            expect(feeds.len()).not().to_be(0)
        })
        .it("should have an URL for each feed", |ctx| {
            let feeds = expect(ctx.feeds()).to_be_defined()?;
            for feed in feeds {
                let url = expect(feed.url.as_deref()).to_be_defined()?;
                expect(url.trim()).not().to_be_empty()?;
            }
            Ok(())
        })
        .it("should have a name for each feed", |ctx| {
            let feeds = expect(ctx.feeds()).to_be_defined()?;
            for feed in feeds {
                let name = expect(feed.name.as_deref()).to_be_defined()?;
                expect(name.trim()).not().to_be_empty()?;
            }
            Ok(())
        })
}

pub fn the_menu() -> Suite<()> {
    Suite::new("The Menu")
        .it("is hidden by default", |ctx| {
            expect(ctx.page().body_class()).to_be(MENU_HIDDEN_CLASS)
        })
        .it("changes visibility on click", |ctx| {
            ctx.page().click_menu_icon();
            expect(ctx.page().body_class()).not().to_be(MENU_HIDDEN_CLASS)?;

            ctx.page().click_menu_icon();
            expect(ctx.page().body_class()).to_be(MENU_HIDDEN_CLASS)
        })
        .it_with_done("hides when a feed is selected", |ctx, done| {
            ctx.page().click_menu_icon();
            ctx.app().select_feed(1, ctx.page(), done);
            expect(ctx.page().is_menu_hidden()).to_be(true)
        })
}

pub fn initial_entries() -> Suite<()> {
    Suite::new("Initial Entries")
        .before_each(LoadFeed(0))
        .it_with_done(
            "should have at least a single entry element within the feed container",
            |ctx, done| {
                expect(ctx.page().entry_count()).to_be_greater_than(0)?;
                done.complete();
                Ok(())
            },
        )
}

/// Title seen after the first feed loaded, carried from setup to body.
#[derive(Debug, Default)]
pub struct FeedSelection {
    pub first_title: Option<String>,
}

/// Loads a feed and remembers the header title it produced.
struct RememberTitle(usize);

#[async_trait]
impl Step<FeedSelection> for RememberTitle {
    async fn run(&self, ctx: &mut CaseContext<FeedSelection>, done: Done) -> Result<(), Failure> {
        ctx.load_feed(self.0).await?;
        ctx.state.first_title = Some(ctx.page().header_title());
        done.complete();
        Ok(())
    }
}

/// Loads a feed and expects the header title to differ from the remembered one.
struct TitleChangesOnLoad(usize);

#[async_trait]
impl Step<FeedSelection> for TitleChangesOnLoad {
    async fn run(&self, ctx: &mut CaseContext<FeedSelection>, done: Done) -> Result<(), Failure> {
        let first = expect(ctx.state.first_title.clone()).to_be_defined()?;
        ctx.load_feed(self.0).await?;
        expect(ctx.page().header_title()).not().to_be(first)?;
        done.complete();
        Ok(())
    }
}

pub fn new_feed_selection() -> Suite<FeedSelection> {
    Suite::new("New Feed Selection")
        .before_each(RememberTitle(0))
        .after_each(LoadFeed(0))
        .it_step(
            "should change content when a new feed is loaded",
            TitleChangesOnLoad(1),
        )
}

/// All feed reader suites, in the order they run.
pub fn feedreader_suites() -> Vec<Box<dyn RunnableSuite>> {
    vec![
        Box::new(rss_feeds()),
        Box::new(the_menu()),
        Box::new(initial_entries()),
        Box::new(new_feed_selection()),
    ]
}
