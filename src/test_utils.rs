//! Test utilities and scripted applications.
//!
//! Used by unit tests and, behind the `test-utils` feature, by the
//! integration tests under `tests/`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::app::{FeedApp, FeedReaderApp};
use crate::feeds::FeedCatalog;
use crate::harness::Done;
use crate::page::Page;

/// Default reader with a 1ms load latency.
pub fn fast_app() -> FeedReaderApp {
    FeedReaderApp::with_defaults().with_latency(Duration::from_millis(1))
}

/// Application whose `load_feed` never invokes its callback.
///
/// Tokens are kept alive so the harness sees a hang rather than an
/// abandoned token.
#[derive(Default)]
pub struct HangingApp {
    catalog: FeedCatalog,
    held: Mutex<Vec<Done>>,
}

impl HangingApp {
    pub fn new(catalog: FeedCatalog) -> Self {
        Self {
            catalog,
            held: Mutex::new(Vec::new()),
        }
    }

    /// Number of callbacks that were handed over and never invoked.
    pub fn held_tokens(&self) -> usize {
        self.held.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl FeedApp for HangingApp {
    fn feeds(&self) -> Option<&FeedCatalog> {
        Some(&self.catalog)
    }

    fn mount(&self) -> Page {
        Page::new()
    }

    fn load_feed(&self, _index: usize, _page: &Page, on_complete: Done) {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(on_complete);
    }
}

/// Shared, ordered log of events for ordering assertions.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Wraps another application and journals every load start and completion.
pub struct JournalingApp<A> {
    inner: A,
    journal: Journal,
}

impl<A: FeedApp> JournalingApp<A> {
    pub fn new(inner: A, journal: Journal) -> Self {
        Self { inner, journal }
    }
}

impl<A: FeedApp> FeedApp for JournalingApp<A> {
    fn feeds(&self) -> Option<&FeedCatalog> {
        self.inner.feeds()
    }

    fn mount(&self) -> Page {
        self.journal.record("mount");
        self.inner.mount()
    }

    fn load_feed(&self, index: usize, page: &Page, on_complete: Done) {
        self.journal.record(format!("load:{index}:start"));
        let journal = self.journal.clone();
        let (inner_done, signal) = Done::channel(on_complete.phase());
        self.inner.load_feed(index, page, inner_done);
        tokio::spawn(async move {
            match signal.wait().await {
                Ok(()) => {
                    journal.record(format!("load:{index}:done"));
                    on_complete.complete();
                }
                Err(failure) => {
                    journal.record(format!("load:{index}:failed"));
                    on_complete.fail(failure);
                }
            }
        });
    }
}

/// Application without a feed catalog.
#[derive(Default)]
pub struct NoFeedsApp;

impl FeedApp for NoFeedsApp {
    fn feeds(&self) -> Option<&FeedCatalog> {
        None
    }

    fn mount(&self) -> Page {
        Page::new()
    }

    fn load_feed(&self, _index: usize, _page: &Page, on_complete: Done) {
        on_complete.complete();
    }
}
