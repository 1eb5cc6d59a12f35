//! Entry sources for the simulated reader.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::feeds::{FeedDescriptor, FeedError};
use crate::page::Entry;

/// Default number of generated entries per feed.
pub const DEFAULT_ENTRIES_PER_FEED: usize = 4;

/// Produces the entries of a feed.
#[async_trait]
pub trait EntryFetcher: Send + Sync {
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<Entry>, FeedError>;
}

/// In-memory fetcher.
///
/// Returns canned entries for urls registered with [`with_entries`], and
/// otherwise generates `entries_per_feed` entries from the feed's name.
/// Urls registered with [`failing`] return a fetch error.
///
/// [`with_entries`]: StaticEntryFetcher::with_entries
/// [`failing`]: StaticEntryFetcher::failing
#[derive(Debug, Clone)]
pub struct StaticEntryFetcher {
    entries_per_feed: usize,
    canned: HashMap<String, Vec<Entry>>,
    failing: Vec<String>,
}

impl Default for StaticEntryFetcher {
    fn default() -> Self {
        Self::generated(DEFAULT_ENTRIES_PER_FEED)
    }
}

impl StaticEntryFetcher {
    pub fn generated(entries_per_feed: usize) -> Self {
        Self {
            entries_per_feed,
            canned: HashMap::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_entries(mut self, url: impl Into<String>, entries: Vec<Entry>) -> Self {
        self.canned.insert(url.into(), entries);
        self
    }

    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.push(url.into());
        self
    }
}

#[async_trait]
impl EntryFetcher for StaticEntryFetcher {
    async fn fetch(&self, feed: &FeedDescriptor) -> Result<Vec<Entry>, FeedError> {
        let url = feed.feed_url().unwrap_or_default();
        if self.failing.iter().any(|u| u == url) {
            return Err(FeedError::Fetch {
                url: url.to_string(),
                message: "feed unavailable".to_string(),
            });
        }
        if let Some(entries) = self.canned.get(url) {
            return Ok(entries.clone());
        }

        let name = feed.display_name().unwrap_or("Untitled");
        Ok((1..=self.entries_per_feed)
            .map(|n| Entry {
                title: format!("{name} post {n}"),
                link: format!("{}#{n}", url.trim_end_matches('/')),
                snippet: format!("Entry {n} of {name}"),
            })
            .collect())
    }
}
