//! Battle log messages.
//!
//! Arguments are `Display` so the HTML exporter can render the same
//! messages as script template literals with `${…}` placeholders.

use std::fmt::Display;

/// Logged when the player falls.
pub const DEFEAT: &str = "You were defeated! Game Over.";
/// Logged when the player defends.
pub const DEFEND: &str = "You take a defensive stance!";

/// First line of every battle log.
pub fn appears(enemy: impl Display) -> String {
    format!("A {enemy} appears!")
}

/// The player's attack landed.
pub fn player_attack(damage: impl Display) -> String {
    format!("You attack for {damage} damage!")
}

/// The enemy fell.
pub fn victory(enemy: impl Display) -> String {
    format!("You defeated the {enemy}!")
}

/// The enemy hit an undefended player.
pub fn enemy_attack(enemy: impl Display, damage: impl Display) -> String {
    format!("The {enemy} attacks for {damage} damage!")
}

/// The enemy hit a defending player.
pub fn enemy_attack_blocked(enemy: impl Display, base: impl Display, taken: impl Display) -> String {
    format!("The {enemy} attacks for {base} damage, but you block and only take {taken}!")
}
