//! In-memory host implementations that record what happened to them.

use std::collections::BTreeMap;

use pokerroom_shared::ClientEvent;

use super::{GameView, Page, Region, SessionStore};
use crate::error::StorageError;
use crate::realtime::EventSink;

/// Session store kept in a map. Every `set_item` call is also appended to
/// `writes` so callers can count them.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    pub writes: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.push((key.to_string(), value.to_string()));
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A page that stores alerts and navigations instead of showing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingPage {
    pub alerts: Vec<String>,
    pub navigations: Vec<String>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }
}

impl Page for RecordingPage {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }
}

/// Content of one region as last written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionContent {
    Text(String),
    Html(String),
}

impl RegionContent {
    pub fn as_str(&self) -> &str {
        match self {
            RegionContent::Text(s) | RegionContent::Html(s) => s,
        }
    }
}

/// A view holding the current content of every region plus a count of writes.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    regions: BTreeMap<Region, RegionContent>,
    pub writes: usize,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, region: Region) -> Option<&RegionContent> {
        self.regions.get(&region)
    }

    /// Shortcut for tests: the region content as a string, empty if unset.
    pub fn shown(&self, region: Region) -> &str {
        self.regions.get(&region).map(RegionContent::as_str).unwrap_or("")
    }
}

impl GameView for RecordingView {
    fn set_text(&mut self, region: Region, text: &str) {
        self.writes += 1;
        self.regions
            .insert(region, RegionContent::Text(text.to_string()));
    }

    fn set_html(&mut self, region: Region, html: &str) {
        self.writes += 1;
        self.regions
            .insert(region, RegionContent::Html(html.to_string()));
    }
}

/// Collects every emitted event.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<ClientEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: ClientEvent) {
        self.sent.push(event);
    }
}
