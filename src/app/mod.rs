//! Feed reader application under test.
//!
//! [`FeedApp`] is the seam the harness drives: a feed source, a way to mount
//! a fresh page, and the callback-style `load_feed`. [`FeedReaderApp`] is the
//! in-memory implementation shipped with the crate; it behaves like the
//! browser application (title = feed name, entries replace the container,
//! callback fires once the page is stable) without any network I/O.

pub mod fetcher;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{AppConfig, ConfigError};
use crate::feeds::{FeedCatalog, FeedError};
use crate::harness::{Done, Failure};
use crate::page::{FeedLink, Page};

pub use fetcher::{EntryFetcher, StaticEntryFetcher, DEFAULT_ENTRIES_PER_FEED};

/// Default simulated fetch latency.
pub const DEFAULT_LOAD_LATENCY: Duration = Duration::from_millis(25);

/// Application collaborator exercised by the suites.
pub trait FeedApp: Send + Sync {
    /// The feed catalog, if the application defines one.
    fn feeds(&self) -> Option<&FeedCatalog>;

    /// Render a fresh page in its initial state.
    fn mount(&self) -> Page;

    /// Load feed `index` into `page` and invoke `on_complete` exactly once
    /// when the page is stable.
    ///
    /// Must be called from within a tokio runtime.
    fn load_feed(&self, index: usize, page: &Page, on_complete: Done);

    /// Click on a feed in the menu: hides the menu, then loads the feed.
    fn select_feed(&self, index: usize, page: &Page, on_complete: Done) {
        page.hide_menu();
        self.load_feed(index, page, on_complete);
    }
}

/// Simulated feed reader.
pub struct FeedReaderApp {
    catalog: Arc<FeedCatalog>,
    fetcher: Arc<dyn EntryFetcher>,
    latency: Duration,
}

impl FeedReaderApp {
    pub fn new(catalog: FeedCatalog, fetcher: Arc<dyn EntryFetcher>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            fetcher,
            latency: DEFAULT_LOAD_LATENCY,
        }
    }

    /// Default catalog with generated entries.
    pub fn with_defaults() -> Self {
        Self::new(
            FeedCatalog::default_feeds(),
            Arc::new(StaticEntryFetcher::default()),
        )
    }

    /// Build from the `app` configuration section.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let catalog = config.catalog()?;
        let fetcher = StaticEntryFetcher::generated(config.entries_per_feed);
        Ok(Self::new(catalog, Arc::new(fetcher)).with_latency(config.load_latency()))
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn catalog(&self) -> &FeedCatalog {
        &self.catalog
    }
}

impl fmt::Debug for FeedReaderApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedReaderApp")
            .field("feeds", &self.catalog.len())
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

impl FeedApp for FeedReaderApp {
    fn feeds(&self) -> Option<&FeedCatalog> {
        Some(&self.catalog)
    }

    fn mount(&self) -> Page {
        let page = Page::new();
        let links = self
            .catalog
            .iter()
            .enumerate()
            .map(|(id, feed)| FeedLink {
                id,
                name: feed.display_name().unwrap_or_default().to_string(),
            })
            .collect();
        page.render_feed_list(links);
        page
    }

    fn load_feed(&self, index: usize, page: &Page, on_complete: Done) {
        let feed = match self.catalog.get(index) {
            Ok(feed) if feed.feed_url().is_none() => {
                let err = FeedError::MissingUrl { index };
                warn!(index, error = %err, "Cannot load feed");
                on_complete.fail(Failure::assertion(format!("load_feed({index}): {err}")));
                return;
            }
            Ok(feed) => feed.clone(),
            Err(err) => {
                warn!(index, error = %err, "Cannot load feed");
                on_complete.fail(Failure::assertion(format!("load_feed({index}): {err}")));
                return;
            }
        };

        let fetcher = Arc::clone(&self.fetcher);
        let page = page.clone();
        let latency = self.latency;
        debug!(index, url = ?feed.url, "Loading feed");

        on_complete.spawn(move |done| async move {
            tokio::time::sleep(latency).await;
            match fetcher.fetch(&feed).await {
                Ok(entries) => {
                    page.render_feed(feed.display_name().unwrap_or_default(), entries);
                }
                // The page keeps its previous content; the callback still fires.
                Err(err) => warn!(index, error = %err, "Feed fetch failed"),
            }
            done.complete();
        });
    }
}
