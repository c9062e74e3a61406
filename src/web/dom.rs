//! DOM, `localStorage` and `window` bindings of the host traits.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement, Storage, Window};

use crate::error::StorageError;
use crate::platform::{GameView, Page, Region, SessionStore};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Current value of the `<input>` with the given id.
pub fn input_value(id: &str) -> Result<String, JsValue> {
    let element = document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?;
    let input: HtmlInputElement = element
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("element '{}' is not an input", id)))?;
    Ok(input.value())
}

/// Origin of the page, used as the API base so requests stay same-origin.
pub fn origin() -> Result<String, JsValue> {
    window()?.location().origin()
}

pub struct BrowserPage {
    window: Window,
}

impl BrowserPage {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self { window: window()? })
    }
}

impl Page for BrowserPage {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            tracing::warn!(error = ?e, "alert failed");
        }
    }

    fn navigate(&mut self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            tracing::error!(error = ?e, path, "navigation failed");
        }
    }
}

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = window().map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

impl SessionStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

/// Writes the table regions into the elements `#pot`, `#bets` and
/// `#community-cards`. A missing element is logged and skipped.
pub struct DomView {
    document: Document,
}

impl DomView {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            document: document()?,
        })
    }

    fn element(&self, region: Region) -> Option<web_sys::Element> {
        let element = self.document.get_element_by_id(region.element_id());
        if element.is_none() {
            tracing::warn!(id = region.element_id(), "table element missing");
        }
        element
    }
}

impl GameView for DomView {
    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(el) = self.element(region) {
            el.set_text_content(Some(text));
        }
    }

    fn set_html(&mut self, region: Region, html: &str) {
        if let Some(el) = self.element(region) {
            el.set_inner_html(html);
        }
    }
}
