//! Page fixture: the presentation state a feed reader renders into.
//!
//! Models the parts of the document the suites observe:
//! - body class list (`menu-hidden` toggled by the menu icon)
//! - header title
//! - feed container with its entries
//! - feed menu links
//!
//! [`Page`] is a cheap cloneable handle. The lock inside is never held
//! across an await point, so synchronous steps can query it directly.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body class that hides the slide-out menu.
pub const MENU_HIDDEN_CLASS: &str = "menu-hidden";

/// Ordered list of class names, as found in a `class` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    /// Parse a `class` attribute value.
    pub fn parse(attr: &str) -> Self {
        let mut list = Self::default();
        for class in attr.split_whitespace() {
            list.add(class);
        }
        list
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flip `class`. Returns true if the class is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    /// Space-joined attribute value.
    pub fn attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Link in the feed menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLink {
    /// Zero-based catalog index.
    pub id: usize,
    pub name: String,
}

#[derive(Debug)]
struct Document {
    body_class: ClassList,
    header_title: String,
    entries: Vec<Entry>,
    feed_links: Vec<FeedLink>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            body_class: ClassList::parse(MENU_HIDDEN_CLASS),
            header_title: String::new(),
            entries: Vec::new(),
            feed_links: Vec::new(),
        }
    }
}

/// Shared handle to one page's state.
#[derive(Debug, Clone, Default)]
pub struct Page {
    doc: Arc<RwLock<Document>>,
}

impl Page {
    /// A freshly loaded page: menu hidden, nothing rendered.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.doc.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Document> {
        self.doc.write().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Queries ---

    /// Value of the body `class` attribute.
    pub fn body_class(&self) -> String {
        self.read().body_class.attr()
    }

    pub fn is_menu_hidden(&self) -> bool {
        self.read().body_class.contains(MENU_HIDDEN_CLASS)
    }

    pub fn header_title(&self) -> String {
        self.read().header_title.clone()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.read().entries.clone()
    }

    /// Number of entries inside the feed container.
    pub fn entry_count(&self) -> usize {
        self.read().entries.len()
    }

    pub fn feed_links(&self) -> Vec<FeedLink> {
        self.read().feed_links.clone()
    }

    // --- Mutations ---

    /// Click on the menu icon: flips menu visibility.
    pub fn click_menu_icon(&self) {
        let hidden = self.write().body_class.toggle(MENU_HIDDEN_CLASS);
        debug!(menu_hidden = hidden, "Menu icon clicked");
    }

    pub fn hide_menu(&self) {
        self.write().body_class.add(MENU_HIDDEN_CLASS);
    }

    /// Replace the header title and the feed container contents.
    pub fn render_feed(&self, title: &str, entries: Vec<Entry>) {
        let mut doc = self.write();
        doc.header_title = title.to_string();
        doc.entries = entries;
        debug!(title = %title, entries = doc.entries.len(), "Feed rendered");
    }

    pub fn render_feed_list(&self, links: Vec<FeedLink>) {
        self.write().feed_links = links;
    }
}
