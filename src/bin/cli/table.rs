use std::time::Duration;

use anyhow::Context;

use pokerroom::native::{ClientConfig, TerminalView};
use pokerroom::realtime::ws::{build_ws_url, queue_sink, QueueSink, WsChannel};
use pokerroom::RealtimeGameView;

pub type CliGame = RealtimeGameView<TerminalView, QueueSink>;

/// Connect to the room channel and join. The returned view is `Connected`
/// and its join request is queued on the channel.
pub async fn join_table(cfg: &ClientConfig, json: bool) -> anyhow::Result<(CliGame, WsChannel)> {
    let url = build_ws_url(&cfg.channel_url)?;
    let (sink, outgoing) = queue_sink();
    let mut game = RealtimeGameView::new(
        cfg.room.clone(),
        cfg.username.clone(),
        TerminalView::new(json),
        sink,
    );
    let channel = WsChannel::connect(&url, outgoing)
        .await
        .with_context(|| format!("connecting to room channel {}", url))?;
    announce(json, &format!("Connected to {} (room {})", channel.url(), cfg.room));
    game.on_connect();
    Ok((game, channel))
}

/// Print table updates until the server closes the channel or Ctrl-C.
pub async fn watch(cfg: &ClientConfig, json: bool) -> anyhow::Result<()> {
    let (mut game, mut channel) = join_table(cfg, json).await?;
    tokio::select! {
        res = channel.pump(&mut game, None) => res?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }
    Ok(())
}

/// Send one action, then keep printing updates for `wait_ms`.
pub async fn send_action(
    cfg: &ClientConfig,
    action: &str,
    amount: Option<u64>,
    wait_ms: u64,
    json: bool,
) -> anyhow::Result<()> {
    let (mut game, mut channel) = join_table(cfg, json).await?;
    game.send_action(action, amount.map(serde_json::Number::from));
    channel
        .pump(&mut game, Some(Duration::from_millis(wait_ms)))
        .await?;
    Ok(())
}

fn announce(json: bool, message: &str) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}
