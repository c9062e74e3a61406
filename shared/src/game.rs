//! Game state snapshot pushed by the room server.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Complete public state of the table, sent wholesale on every update.
///
/// Numbers are kept as the server wrote them so `120` renders as `120` and
/// `12.5` as `12.5`. Bets keep the order they appear in on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameUpdate {
    pub pot: Number,
    #[serde(default)]
    pub bets: IndexMap<String, Number>,
    #[serde(default)]
    pub community_cards: Vec<String>,
}
