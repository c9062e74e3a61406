//! Event envelopes exchanged with the room server.
//!
//! Every frame is a JSON text frame of the form
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::game::GameUpdate;

/// Events the client emits into the room.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Join(JoinRoom),
    Action(RoomAction),
}

/// Events the room server pushes to subscribers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    GameUpdate(GameUpdate),
    Message(ChatMessage),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinRoom {
    pub room: String,
    pub username: String,
}

/// A player action. The action name is free-form, the server decides what it
/// accepts. The amount is passed through as given, fractions and signs
/// included.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomAction {
    pub room: String,
    pub action: String,
    #[serde(default = "no_amount")]
    pub amount: Number,
}

fn no_amount() -> Number {
    Number::from(0u64)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub msg: String,
}
