//! Runtime battle state.

use serde::{Deserialize, Serialize};

/// Player health at the start of every battle and after a defeat.
pub const PLAYER_MAX_HEALTH: u32 = 100;

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Turn {
    /// Waiting for the player to attack or defend.
    #[default]
    Player,
    /// The enemy's reply is pending; player input is ignored.
    Enemy,
}

/// The state of one battle. Never persisted in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    /// Whether a battle is in progress.
    pub in_battle: bool,
    /// Player health in `0..=PLAYER_MAX_HEALTH`.
    pub player_health: u32,
    /// Enemy health at the start of the battle.
    pub enemy_max_health: u32,
    /// Enemy health in `0..=enemy_max_health`.
    pub enemy_health: u32,
    /// Enemy name captured when the battle started.
    pub enemy_name: String,
    /// Messages in order. Cleared when the battle ends.
    pub battle_log: Vec<String>,
    /// Whose move it is.
    pub turn: Turn,
}

impl Default for BattleState {
    fn default() -> Self {
        Self::idle()
    }
}

impl BattleState {
    /// No battle in progress, player at full health.
    pub fn idle() -> Self {
        Self {
            in_battle: false,
            player_health: PLAYER_MAX_HEALTH,
            enemy_max_health: 0,
            enemy_health: 0,
            enemy_name: String::new(),
            battle_log: Vec::new(),
            turn: Turn::Player,
        }
    }

    /// Whether the player may attack or defend right now.
    pub fn player_can_act(&self) -> bool {
        self.in_battle && self.turn == Turn::Player && self.enemy_health > 0 && self.player_health > 0
    }

    /// Whether the enemy has been beaten.
    pub fn enemy_defeated(&self) -> bool {
        self.in_battle && self.enemy_health == 0
    }

    /// Whether the player has been beaten.
    pub fn player_defeated(&self) -> bool {
        self.in_battle && self.player_health == 0
    }

    pub(crate) fn log(&mut self, message: String) {
        self.battle_log.push(message);
    }
}
