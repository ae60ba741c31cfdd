//! Damage rolls.

use cyoa_core::BattleConfig;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// The enemy's base damage roll.
pub const ENEMY_DAMAGE: DamageRange = DamageRange { min: 5, max: 15 };

/// An inclusive integer damage range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    min: u32,
    max: u32,
}

impl DamageRange {
    /// A range from `min` to `max`, raising `max` to `min` if needed.
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// The player's attack range for a battle.
    pub fn player_attack(config: &BattleConfig) -> Self {
        let (min, max) = config.attack_damage();
        Self::new(min, max)
    }

    /// Lower bound.
    pub fn min(self) -> u32 {
        self.min
    }

    /// Upper bound.
    pub fn max(self) -> u32 {
        self.max
    }

    /// Roll uniformly over the range.
    pub fn roll(self, rng: &mut StdRng) -> u32 {
        rng.random_range(self.min..=self.max)
    }
}

impl std::fmt::Display for DamageRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Damage taken while defending: half the base roll, rounded down.
pub fn defended_damage(base: u32) -> u32 {
    base / 2
}
