//! Browser entry points.
//!
//! The page wires `login`/`register` to its forms' submit events and creates
//! a `TableSession` on the table page:
//!
//! ```text
//! import init, { login, register, TableSession } from "./pokerroom.js";
//! await init();
//! loginForm.addEventListener("submit", login);
//! const table = new TableSession("ws://localhost:5000/ws");
//! table.sendAction("call", 20);
//! ```

pub mod dom;
pub mod socket;

use wasm_bindgen::prelude::*;

use crate::auth::{AuthClient, HttpTransport};
use crate::realtime::{amount_from_f64, DEFAULT_ROOM, PLACEHOLDER_USERNAME};
use dom::{BrowserPage, DomView, LocalStorage};
use socket::RoomSocket;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Forward tracing events to the browser console.
    tracing_wasm::set_as_global_default();
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn auth_client() -> Result<AuthClient<HttpTransport, LocalStorage, BrowserPage>, JsValue> {
    let transport = HttpTransport::new(dom::origin()?);
    let store = LocalStorage::open().map_err(to_js)?;
    Ok(AuthClient::new(transport, store, BrowserPage::new()?))
}

/// Submit handler of the login form (`#username`, `#password`).
#[wasm_bindgen]
pub async fn login(event: web_sys::Event) -> Result<(), JsValue> {
    event.prevent_default();
    let identifier = dom::input_value("username")?;
    let secret = dom::input_value("password")?;
    auth_client()?
        .submit_login(&identifier, &secret)
        .await
        .map_err(to_js)?;
    Ok(())
}

/// Submit handler of the registration form (`#email`, `#password`).
#[wasm_bindgen]
pub async fn register(event: web_sys::Event) -> Result<(), JsValue> {
    event.prevent_default();
    let email = dom::input_value("email")?;
    let secret = dom::input_value("password")?;
    auth_client()?
        .submit_register(&email, &secret)
        .await
        .map_err(to_js)?;
    Ok(())
}

/// Live table bound to the page's `#pot`, `#bets` and `#community-cards`.
#[wasm_bindgen]
pub struct TableSession {
    socket: RoomSocket,
}

#[wasm_bindgen]
impl TableSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        url: &str,
        room: Option<String>,
        username: Option<String>,
    ) -> Result<TableSession, JsValue> {
        let room = room.unwrap_or_else(|| DEFAULT_ROOM.to_string());
        let username = username.unwrap_or_else(|| PLACEHOLDER_USERNAME.to_string());
        let socket = RoomSocket::connect(url, &room, &username, DomView::new()?).map_err(to_js)?;
        Ok(TableSession { socket })
    }

    #[wasm_bindgen(js_name = sendAction)]
    pub fn send_action(&self, action: &str, amount: Option<f64>) {
        let amount = match amount {
            Some(raw) => match amount_from_f64(raw) {
                Some(n) => Some(n),
                None => {
                    tracing::warn!(action, amount = raw, "amount is not a finite number, action dropped");
                    return;
                }
            },
            None => None,
        };
        self.socket.send_action(action, amount);
    }

    /// `"connecting"`, `"connected"` or `"disconnected"`.
    pub fn state(&self) -> String {
        self.socket.state().label().to_string()
    }

    pub fn close(&mut self) {
        self.socket.close();
    }
}
