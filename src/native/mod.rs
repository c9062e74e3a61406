//! Terminal host for the client: config file, session file, and the
//! stdout-backed page and table view.

pub mod config;
pub mod storage;
pub mod terminal;

pub use config::ClientConfig;
pub use storage::FileStore;
pub use terminal::{TerminalPage, TerminalView};
