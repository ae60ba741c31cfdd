//! Turn-based battle rules for branching adventures.
//!
//! The engine holds no state of its own: every operation reads and updates a
//! caller-owned [`BattleState`]. Timing (the enemy's delayed retaliation and
//! the pause before a battle ends) is the caller's job; operations report
//! what should happen next through their outcome values.
//!
//! Out-of-turn calls are silent no-ops returning `None`, because they come
//! from races between input and scheduled continuations, not from bugs.

pub mod damage;
pub mod engine;
pub mod messages;
pub mod state;

pub use damage::{DamageRange, ENEMY_DAMAGE, defended_damage};
pub use engine::{
    BattleOutcome, EnemyOutcome, PlayerOutcome, enemy_attack, finish_battle, player_attack,
    player_defend, start_battle, start_battle_from,
};
pub use state::{BattleState, PLAYER_MAX_HEALTH, Turn};

/// Milliseconds between a player action and the enemy's reply.
pub const ENEMY_TURN_DELAY_MS: u64 = 1000;
/// Milliseconds between a defeat or victory and leaving the battle.
pub const BATTLE_END_DELAY_MS: u64 = 2000;
