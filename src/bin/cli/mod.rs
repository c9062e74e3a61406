pub mod args;
pub mod auth;
pub mod table;

// Re-export commonly used types/functions for convenience
pub use args::*;
pub use auth::*;
pub use table::*;
