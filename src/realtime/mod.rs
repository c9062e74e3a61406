//! Live table view driven by the room channel.
//!
//! [`RealtimeGameView`] owns no socket. A transport (the tokio websocket in
//! [`ws`] or the browser socket in `web::socket`) calls `on_connect`,
//! `handle_event` and `on_disconnect` as things happen, and receives the
//! view's outgoing events through an [`EventSink`].

#[cfg(not(target_arch = "wasm32"))]
pub mod ws;

use pokerroom_shared::{ClientEvent, GameUpdate, JoinRoom, RoomAction, ServerEvent};
use serde_json::Number;

use crate::platform::GameView;
use crate::render;

/// Room joined when nothing else is configured.
pub const DEFAULT_ROOM: &str = "poker-room-1";
/// Name sent with the join request. It is a fixed placeholder, not the
/// logged-in identity.
pub const PLACEHOLDER_USERNAME: &str = "player";

/// Where outgoing channel events go. Emission is fire-and-forget.
pub trait EventSink {
    fn emit(&mut self, event: ClientEvent);
}

impl<E: EventSink + ?Sized> EventSink for &mut E {
    fn emit(&mut self, event: ClientEvent) {
        (**self).emit(event)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

/// Wire amount for a number coming from JavaScript. Whole numbers are sent
/// without a fraction (`20`, not `20.0`). NaN and infinities have no JSON
/// form and give `None`.
pub fn amount_from_f64(value: f64) -> Option<Number> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE {
        Some(Number::from(value as i64))
    } else {
        Number::from_f64(value)
    }
}

pub struct RealtimeGameView<V, E> {
    room: String,
    username: String,
    state: ConnectionState,
    view: V,
    sink: E,
}

impl<V: GameView, E: EventSink> RealtimeGameView<V, E> {
    pub fn new(room: impl Into<String>, username: impl Into<String>, view: V, sink: E) -> Self {
        Self {
            room: room.into(),
            username: username.into(),
            state: ConnectionState::Connecting,
            view,
            sink,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// The transport finished its handshake: join the room.
    pub fn on_connect(&mut self) {
        self.state = ConnectionState::Connected;
        tracing::info!(room = %self.room, username = %self.username, "joining room");
        self.sink.emit(ClientEvent::Join(JoinRoom {
            room: self.room.clone(),
            username: self.username.clone(),
        }));
    }

    pub fn on_disconnect(&mut self) {
        if self.state != ConnectionState::Disconnected {
            tracing::info!(room = %self.room, "channel disconnected");
        }
        self.state = ConnectionState::Disconnected;
    }

    pub fn handle_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::GameUpdate(update) => self.on_game_update(&update),
            ServerEvent::Message(m) => self.on_message(&m.msg),
        }
    }

    /// Replace everything on display with the snapshot.
    pub fn on_game_update(&mut self, update: &GameUpdate) {
        tracing::debug!(pot = %update.pot, players = update.bets.len(), "game update");
        render::paint(&mut self.view, update);
    }

    pub fn on_message(&mut self, payload: &str) {
        tracing::info!(room = %self.room, msg = %payload, "room message");
    }

    /// Emit one action into the room. `amount` defaults to 0 and is otherwise
    /// sent unchanged.
    ///
    /// Actions are neither acknowledged nor queued: while the channel is not
    /// connected they are dropped.
    pub fn send_action(&mut self, action: &str, amount: Option<Number>) {
        if self.state != ConnectionState::Connected {
            tracing::debug!(action, state = ?self.state, "dropping action, channel not connected");
            return;
        }
        self.sink.emit(ClientEvent::Action(RoomAction {
            room: self.room.clone(),
            action: action.to_string(),
            amount: amount.unwrap_or_else(|| Number::from(0u64)),
        }));
    }
}
