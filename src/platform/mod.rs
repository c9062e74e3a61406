//! Host seams: everything the client touches outside its own state.
//!
//! The browser build binds these to the DOM, `localStorage` and
//! `window.location`; the terminal build binds them to stdout and a TOML
//! session file; tests use the recording implementations in [`memory`].

pub mod memory;

use crate::error::StorageError;

/// The page the user is looking at: blocking notices and navigation.
pub trait Page {
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, path: &str);
}

/// Persistent string storage that survives page loads.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Display regions of the table view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Pot,
    Bets,
    CommunityCards,
}

impl Region {
    /// Id of the element that shows this region in the HTML page.
    pub fn element_id(self) -> &'static str {
        match self {
            Region::Pot => "pot",
            Region::Bets => "bets",
            Region::CommunityCards => "community-cards",
        }
    }
}

/// Something that can show the table state.
pub trait GameView {
    /// Replace the region content with plain text.
    fn set_text(&mut self, region: Region, text: &str);
    /// Replace the region content with an HTML fragment.
    fn set_html(&mut self, region: Region, html: &str);
}

impl<P: Page + ?Sized> Page for &mut P {
    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn navigate(&mut self, path: &str) {
        (**self).navigate(path)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

impl<V: GameView + ?Sized> GameView for &mut V {
    fn set_text(&mut self, region: Region, text: &str) {
        (**self).set_text(region, text)
    }

    fn set_html(&mut self, region: Region, html: &str) {
        (**self).set_html(region, html)
    }
}
