//! Room channel over a tokio websocket.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use url::Url;

use pokerroom_shared::{ClientEvent, ServerEvent};

use super::{EventSink, RealtimeGameView};
use crate::error::ChannelError;
use crate::platform::GameView;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the channel URL from a base such as `localhost:5000`,
/// `http://host:5000` or `ws://host:5000/ws`. HTTP schemes are mapped to their
/// websocket counterparts and a bare host gets the `/ws` path.
pub fn build_ws_url(base: &str) -> Result<Url, ChannelError> {
    let invalid = |reason: String| ChannelError::Url {
        url: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base)
        .ok()
        .filter(|u| u.has_host())
        .map_or_else(|| Url::parse(&format!("http://{}", base)), Ok)
        .map_err(|e| invalid(e.to_string()))?;

    let switched = match url.scheme() {
        "http" => url.set_scheme("ws"),
        "https" => url.set_scheme("wss"),
        "ws" | "wss" => Ok(()),
        other => return Err(invalid(format!("unsupported scheme '{}'", other))),
    };
    switched.map_err(|_| invalid("cannot switch to a websocket scheme".into()))?;

    if url.path().is_empty() || url.path() == "/" {
        url.set_path("/ws");
    }
    Ok(url)
}

/// [`EventSink`] feeding the outgoing queue of a [`WsChannel`].
#[derive(Clone, Debug)]
pub struct QueueSink {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

pub fn queue_sink() -> (QueueSink, mpsc::UnboundedReceiver<ClientEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueueSink { tx }, rx)
}

impl EventSink for QueueSink {
    fn emit(&mut self, event: ClientEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("outgoing queue closed, event dropped");
        }
    }
}

/// An open connection to the room server plus the queue of events waiting to
/// be written to it.
pub struct WsChannel {
    url: Url,
    socket: Socket,
    outgoing: mpsc::UnboundedReceiver<ClientEvent>,
}

impl WsChannel {
    pub async fn connect(
        url: &Url,
        outgoing: mpsc::UnboundedReceiver<ClientEvent>,
    ) -> Result<Self, ChannelError> {
        tracing::info!(%url, "connecting to room channel");
        let (socket, _resp) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|e| ChannelError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            url: url.clone(),
            socket,
            outgoing,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Move events both ways until the server closes the socket or, when
    /// `limit` is set, until that much time has passed.
    ///
    /// Queued outgoing events are written before the next incoming frame is
    /// handled. The view is told about the disconnect in every case.
    pub async fn pump<V, E>(
        &mut self,
        game: &mut RealtimeGameView<V, E>,
        limit: Option<Duration>,
    ) -> Result<(), ChannelError>
    where
        V: GameView,
        E: EventSink,
    {
        let deadline = limit.map(|d| Instant::now() + d);
        let result = loop {
            tokio::select! {
                biased;

                Some(event) = self.outgoing.recv() => {
                    if let Err(e) = self.send(&event).await {
                        break Err(e);
                    }
                }

                frame = self.socket.next() => {
                    match frame {
                        Some(Ok(Message::Text(txt))) => dispatch(game, &txt),
                        Some(Ok(Message::Close(_))) | None => break Ok(()),
                        Some(Ok(_other)) => { /* ignore non-text frames */ }
                        Some(Err(e)) => break Err(ChannelError::Socket(e.to_string())),
                    }
                }

                _ = wait_until(deadline) => {
                    if let Err(e) = self.socket.close(None).await {
                        tracing::debug!(error = %e, "closing channel");
                    }
                    break Ok(());
                }
            }
        };
        game.on_disconnect();
        result
    }

    async fn send(&mut self, event: &ClientEvent) -> Result<(), ChannelError> {
        let txt = serde_json::to_string(event)?;
        tracing::debug!(out = %txt, "emit");
        self.socket
            .send(Message::Text(txt))
            .await
            .map_err(|e| ChannelError::Socket(e.to_string()))
    }
}

fn dispatch<V: GameView, E: EventSink>(game: &mut RealtimeGameView<V, E>, txt: &str) {
    match serde_json::from_str::<ServerEvent>(txt) {
        Ok(event) => game.handle_event(event),
        Err(e) => tracing::debug!(error = %e, raw = %txt, "ignoring undecodable frame"),
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
