use std::path::Path;

use anyhow::Context;

use pokerroom::native::{ClientConfig, FileStore, TerminalPage};
use pokerroom::{AuthClient, AuthOutcome, HttpTransport};

pub type CliAuthClient = AuthClient<HttpTransport, FileStore, TerminalPage>;

pub fn auth_client(cfg: &ClientConfig, config_path: &Path) -> anyhow::Result<CliAuthClient> {
    let session_path = cfg.session_path(config_path);
    let store = FileStore::open(&session_path)
        .with_context(|| format!("opening session file '{}'", session_path.display()))?;
    Ok(AuthClient::new(
        HttpTransport::new(cfg.api_base.clone()),
        store,
        TerminalPage::new(),
    ))
}

/// Print where the outcome sent the user. Returns whether the server accepted.
pub fn report_outcome(outcome: &AuthOutcome, json: bool) -> bool {
    if json {
        let line = serde_json::json!({
            "accepted": outcome.is_accepted(),
            "message": outcome.message(),
            "redirect": outcome.redirect(),
        });
        println!("{}", line);
    } else {
        println!("-> {}", outcome.redirect());
    }
    outcome.is_accepted()
}

pub async fn run_login(
    cfg: &ClientConfig,
    config_path: &Path,
    email: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<bool> {
    let mut client = auth_client(cfg, config_path)?;
    let outcome = client
        .submit_login(email, password)
        .await
        .with_context(|| format!("logging in at {}", cfg.api_base))?;
    Ok(report_outcome(&outcome, json))
}

pub async fn run_register(
    cfg: &ClientConfig,
    config_path: &Path,
    email: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<bool> {
    let mut client = auth_client(cfg, config_path)?;
    let outcome = client
        .submit_register(email, password)
        .await
        .with_context(|| format!("registering at {}", cfg.api_base))?;
    Ok(report_outcome(&outcome, json))
}

pub async fn run_verify(cfg: &ClientConfig, config_path: &Path, json: bool) -> anyhow::Result<bool> {
    let mut client = auth_client(cfg, config_path)?;
    let user = client
        .verify_session()
        .await
        .with_context(|| format!("verifying session at {}", cfg.api_base))?;
    if json {
        println!("{}", serde_json::json!({ "user_id": user }));
    } else {
        match &user {
            Some(id) => println!("session valid for user {}", id),
            None => println!("no valid session"),
        }
    }
    Ok(user.is_some())
}
