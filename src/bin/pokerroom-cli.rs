mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use pokerroom::native::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info for this crate and warn for everything else.
    let log_filter = if cli.debug {
        "debug".to_string()
    } else {
        "pokerroom=info,pokerroom_cli=info,warn".to_string()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(cli.debug)
        .with_file(cli.debug)
        .with_line_number(cli.debug)
        .init();

    let mut cfg = ClientConfig::load_or_create(&cli.config)
        .with_context(|| format!("loading or creating config '{}'", cli.config.display()))?;
    cli.apply_overrides(&mut cfg);
    if cli.persist {
        cfg.save(&cli.config)
            .with_context(|| format!("saving updated config '{}'", cli.config.display()))?;
    }
    tracing::debug!(config = %cli.config.display(), api = %cfg.api_base, channel = %cfg.channel_url, room = %cfg.room);

    let ok = match &cli.command {
        Commands::Login { email, password } => {
            cli::run_login(&cfg, &cli.config, email, password, cli.json).await?
        }
        Commands::Register { email, password } => {
            cli::run_register(&cfg, &cli.config, email, password, cli.json).await?
        }
        Commands::Verify => cli::run_verify(&cfg, &cli.config, cli.json).await?,
        Commands::Watch => {
            cli::watch(&cfg, cli.json).await?;
            true
        }
        Commands::Action {
            kind,
            amount,
            wait_ms,
        } => {
            cli::send_action(&cfg, kind.as_str(), *amount, *wait_ms, cli.json).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
