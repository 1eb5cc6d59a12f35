//! Feed catalog.
//!
//! The catalog is the ordered list of feeds the reader offers. It is owned by
//! the application and only read by the suites, so both descriptor fields
//! stay optional here: a broken catalog must be representable for the suites
//! to detect it.

use std::path::Path;

use serde::Deserialize;

/// Errors for catalog lookups and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("feed catalog is empty")]
    EmptyCatalog,

    #[error("feed {index} has no name")]
    MissingName { index: usize },

    #[error("feed {index} has no url")]
    MissingUrl { index: usize },

    #[error("no feed at index {index} (catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read feed catalog {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
}

/// A named, URL-bearing feed definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FeedDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }

    /// Name if defined and non-blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Url if defined and non-blank.
    pub fn feed_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }
}

/// Ordered collection of feed descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FeedCatalog {
    feeds: Vec<FeedDescriptor>,
}

impl FeedCatalog {
    pub fn new(feeds: Vec<FeedDescriptor>) -> Self {
        Self { feeds }
    }

    /// Read a YAML list of `{ name, url }` records.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let read_err = |message: String| FeedError::Read {
            path: path.display().to_string(),
            message,
        };
        let raw = std::fs::read_to_string(path).map_err(|e| read_err(e.to_string()))?;
        serde_yaml::from_str(&raw).map_err(|e| read_err(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&FeedDescriptor, FeedError> {
        self.feeds.get(index).ok_or(FeedError::IndexOutOfRange {
            index,
            len: self.feeds.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedDescriptor> {
        self.feeds.iter()
    }

    /// Check that the catalog is non-empty and every feed is complete.
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.feeds.is_empty() {
            return Err(FeedError::EmptyCatalog);
        }
        for (index, feed) in self.feeds.iter().enumerate() {
            if feed.display_name().is_none() {
                return Err(FeedError::MissingName { index });
            }
            if feed.feed_url().is_none() {
                return Err(FeedError::MissingUrl { index });
            }
        }
        Ok(())
    }

    /// The four feeds the reader ships with.
    pub fn default_feeds() -> Self {
        Self::new(vec![
            FeedDescriptor::new("Udacity Blog", "http://blog.udacity.com/feed"),
            FeedDescriptor::new("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
            FeedDescriptor::new("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
            FeedDescriptor::new(
                "Linear Digressions",
                "http://feeds.feedburner.com/udacity-linear-digressions",
            ),
        ])
    }
}

impl<'a> IntoIterator for &'a FeedCatalog {
    type Item = &'a FeedDescriptor;
    type IntoIter = std::slice::Iter<'a, FeedDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.feeds.iter()
    }
}
