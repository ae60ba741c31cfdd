//! Configuration for a play session.

use cyoa_battle::{BATTLE_END_DELAY_MS, ENEMY_TURN_DELAY_MS};

/// Configuration for a play session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    /// RNG seed for reproducible damage rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Delay before the enemy replies, in milliseconds.
    pub enemy_turn_delay_ms: u64,
    /// Delay before a finished battle is left, in milliseconds.
    pub battle_end_delay_ms: u64,
    /// Scene to open instead of `start`, when it exists (deep link).
    pub initial_scene: Option<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            enemy_turn_delay_ms: ENEMY_TURN_DELAY_MS,
            battle_end_delay_ms: BATTLE_END_DELAY_MS,
            initial_scene: None,
        }
    }
}

impl PlayerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set both battle delays.
    pub fn with_delays(mut self, enemy_turn_ms: u64, battle_end_ms: u64) -> Self {
        self.enemy_turn_delay_ms = enemy_turn_ms;
        self.battle_end_delay_ms = battle_end_ms;
        self
    }

    /// Open this scene first when it exists.
    pub fn with_initial_scene(mut self, scene: impl Into<String>) -> Self {
        self.initial_scene = Some(scene.into());
        self
    }
}
