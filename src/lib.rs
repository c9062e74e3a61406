//! pokerroom - login and live table client for the pokerroom service.
//!
//! The core is host independent:
//! - [`auth::AuthClient`] submits credentials to the authentication API and
//!   decides what to show and where to go next.
//! - [`realtime::RealtimeGameView`] joins a room and paints every pushed
//!   snapshot into the table regions.
//!
//! Both talk to the outside world only through the traits in [`platform`].
//! The browser build binds those to the DOM (`web`), the native build to the
//! terminal (`native`) and the `pokerroom-cli` binary.

pub mod auth;
pub mod error;
pub mod platform;
pub mod realtime;
pub mod render;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use auth::{AuthClient, AuthOutcome, HttpTransport, Routes};
pub use error::{AuthError, ChannelError, StorageError};
pub use platform::{GameView, Page, Region, SessionStore};
pub use realtime::{ConnectionState, EventSink, RealtimeGameView};
