//! Formatting of a game snapshot into the three table regions.

use pokerroom_shared::GameUpdate;

use crate::platform::{GameView, Region};

pub fn format_pot(update: &GameUpdate) -> String {
    format!("Pot: {}", update.pot)
}

/// One `<player>: <bet>` line per player in snapshot order, joined with `<br>`.
pub fn format_bets(update: &GameUpdate) -> String {
    update
        .bets
        .iter()
        .map(|(player, bet)| format!("{}: {}", player, bet))
        .collect::<Vec<_>>()
        .join("<br>")
}

pub fn format_cards(update: &GameUpdate) -> String {
    format!("Cards: {}", update.community_cards.join(", "))
}

/// Overwrite all three regions with the snapshot. Nothing from the previous
/// snapshot survives.
pub fn paint<V: GameView + ?Sized>(view: &mut V, update: &GameUpdate) {
    view.set_text(Region::Pot, &format_pot(update));
    view.set_html(Region::Bets, &format_bets(update));
    view.set_text(Region::CommunityCards, &format_cards(update));
}
