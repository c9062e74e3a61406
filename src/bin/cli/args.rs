use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pokerroom::native::ClientConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "pokerroom-cli", version, about = "Terminal client for the pokerroom service", long_about = None)]
pub struct Cli {
    /// Path to config file (created with defaults when missing)
    #[arg(long, default_value = "pokerroom.toml")]
    pub config: PathBuf,

    /// Authentication API base URL (overrides config.api_base)
    #[arg(long)]
    pub api: Option<String>,

    /// Room channel address, ws(s):// URL or http base (overrides config.channel_url)
    #[arg(long)]
    pub channel: Option<String>,

    /// Room to join (overrides config.room)
    #[arg(long)]
    pub room: Option<String>,

    /// Name sent with the join request (overrides config.username)
    #[arg(long)]
    pub username: Option<String>,

    /// Persist CLI overrides back to the config file
    #[arg(long, default_value_t = false)]
    pub persist: bool,

    /// Output JSON instead of human-readable text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and keep the session token
    Login {
        /// Username or email
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check the stored session token with the server
    Verify,
    /// Join the room and print every table update until the channel closes
    Watch,
    /// Join the room, send one action and print updates for a while
    Action {
        #[arg(value_enum)]
        kind: ActionKind,
        /// Chips for bet/raise (0 when omitted)
        #[arg(long)]
        amount: Option<u64>,
        /// How long to keep listening after sending (ms)
        #[arg(long, default_value_t = 1200)]
        wait_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    /// Action name as sent to the room server.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
        }
    }
}

impl Cli {
    /// Apply command-line overrides to a loaded config (in memory only).
    pub fn apply_overrides(&self, cfg: &mut ClientConfig) {
        if let Some(api) = &self.api {
            cfg.api_base = api.clone();
        }
        if let Some(channel) = &self.channel {
            cfg.channel_url = channel.clone();
        }
        if let Some(room) = &self.room {
            cfg.room = room.clone();
        }
        if let Some(username) = &self.username {
            cfg.username = username.clone();
        }
    }
}
