//! Battle operations over a caller-owned [`BattleState`].

use cyoa_core::BattleConfig;
use log::debug;
use rand::rngs::StdRng;

use crate::damage::{DamageRange, ENEMY_DAMAGE, defended_damage};
use crate::messages;
use crate::state::{BattleState, PLAYER_MAX_HEALTH, Turn};

/// What follows a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerOutcome {
    /// The enemy replies after a delay.
    EnemyTurn {
        /// Whether the player is defending against that reply.
        defending: bool,
    },
    /// The enemy fell; the battle ends after a delay.
    Victory,
}

/// What follows the enemy's attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyOutcome {
    /// The player moves next.
    PlayerTurn,
    /// The player fell; the battle ends after a delay.
    Defeat,
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// The enemy was defeated.
    Victory,
    /// The player was defeated.
    Defeat,
}

/// Begin a battle: player at full health, enemy at `enemy_max_health`.
pub fn start_battle(enemy_name: &str, enemy_max_health: u32) -> BattleState {
    debug!("battle starts: {enemy_name} ({enemy_max_health} hp)");
    BattleState {
        in_battle: true,
        player_health: PLAYER_MAX_HEALTH,
        enemy_max_health,
        enemy_health: enemy_max_health,
        enemy_name: enemy_name.to_string(),
        battle_log: vec![messages::appears(enemy_name)],
        turn: Turn::Player,
    }
}

/// Begin the battle a scene describes, with its defaults applied.
pub fn start_battle_from(config: &BattleConfig) -> BattleState {
    start_battle(config.enemy_name(), config.enemy_health())
}

/// The player attacks.
///
/// Ignored unless it is the player's turn and both sides are standing. On a
/// kill the turn stays with the enemy, latching the battle until it ends.
pub fn player_attack(
    state: &mut BattleState,
    config: &BattleConfig,
    rng: &mut StdRng,
) -> Option<PlayerOutcome> {
    if !state.player_can_act() {
        return None;
    }

    let damage = DamageRange::player_attack(config).roll(rng);
    state.enemy_health = state.enemy_health.saturating_sub(damage);
    state.log(messages::player_attack(damage));
    state.turn = Turn::Enemy;

    if state.enemy_health == 0 {
        state.log(messages::victory(&state.enemy_name));
        debug!("{} defeated", state.enemy_name);
        Some(PlayerOutcome::Victory)
    } else {
        Some(PlayerOutcome::EnemyTurn { defending: false })
    }
}

/// The player braces for the enemy's next attack.
///
/// Same guard as [`player_attack`]. Whether defending is offered at all is
/// the caller's decision.
pub fn player_defend(state: &mut BattleState) -> Option<PlayerOutcome> {
    if !state.player_can_act() {
        return None;
    }

    state.log(messages::DEFEND.to_string());
    state.turn = Turn::Enemy;
    Some(PlayerOutcome::EnemyTurn { defending: true })
}

/// The enemy attacks. Defending halves the damage, rounding down.
///
/// Ignored unless it is the enemy's turn and both sides are standing.
pub fn enemy_attack(
    state: &mut BattleState,
    defending: bool,
    rng: &mut StdRng,
) -> Option<EnemyOutcome> {
    if !state.in_battle
        || state.turn != Turn::Enemy
        || state.enemy_health == 0
        || state.player_health == 0
    {
        return None;
    }

    let base = ENEMY_DAMAGE.roll(rng);
    let message = if defending {
        let taken = defended_damage(base);
        state.player_health = state.player_health.saturating_sub(taken);
        messages::enemy_attack_blocked(&state.enemy_name, base, taken)
    } else {
        state.player_health = state.player_health.saturating_sub(base);
        messages::enemy_attack(&state.enemy_name, base)
    };
    state.log(message);

    if state.player_health == 0 {
        state.log(messages::DEFEAT.to_string());
        debug!("player defeated by {}", state.enemy_name);
        Some(EnemyOutcome::Defeat)
    } else {
        state.turn = Turn::Player;
        Some(EnemyOutcome::PlayerTurn)
    }
}

/// Leave the battle: clear the log, and restore the player after a defeat.
pub fn finish_battle(state: &mut BattleState, outcome: BattleOutcome) {
    state.in_battle = false;
    state.battle_log.clear();
    state.turn = Turn::Player;
    if outcome == BattleOutcome::Defeat {
        state.player_health = PLAYER_MAX_HEALTH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn orc() -> BattleConfig {
        BattleConfig::new("Orc", 50).with_attack_damage(10, 10)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn start_battle_sets_up_state() {
        let state = start_battle("Giant Spider", 60);
        assert!(state.in_battle);
        assert_eq!(state.player_health, 100);
        assert_eq!(state.enemy_health, 60);
        assert_eq!(state.enemy_max_health, 60);
        assert_eq!(state.turn, Turn::Player);
        assert_eq!(state.battle_log, vec!["A Giant Spider appears!"]);
    }

    #[test]
    fn start_from_config_uses_defaults() {
        let state = start_battle_from(&BattleConfig {
            enabled: true,
            ..BattleConfig::default()
        });
        assert_eq!(state.enemy_name, "Enemy");
        assert_eq!(state.enemy_health, 50);
    }

    #[test]
    fn fixed_attack_hits_for_exact_damage() {
        let mut state = start_battle_from(&orc());
        let outcome = player_attack(&mut state, &orc(), &mut rng());
        assert_eq!(outcome, Some(PlayerOutcome::EnemyTurn { defending: false }));
        assert_eq!(state.enemy_health, 40);
        assert_eq!(state.turn, Turn::Enemy);
        assert_eq!(state.battle_log.last().unwrap(), "You attack for 10 damage!");
    }

    #[test]
    fn attack_out_of_turn_is_ignored() {
        let mut state = start_battle_from(&orc());
        state.turn = Turn::Enemy;
        let before = state.clone();
        assert_eq!(player_attack(&mut state, &orc(), &mut rng()), None);
        assert_eq!(player_defend(&mut state), None);
        assert_eq!(state, before);
    }

    #[test]
    fn killing_blow_latches_battle() {
        let config = BattleConfig::new("Rat", 5).with_attack_damage(10, 10);
        let mut state = start_battle_from(&config);
        let mut rng = rng();

        assert_eq!(
            player_attack(&mut state, &config, &mut rng),
            Some(PlayerOutcome::Victory)
        );
        assert_eq!(state.enemy_health, 0);
        assert_eq!(state.battle_log.last().unwrap(), "You defeated the Rat!");
        assert_eq!(state.battle_log.len(), 3);

        let latched = state.clone();
        assert_eq!(player_attack(&mut state, &config, &mut rng), None);
        assert_eq!(player_defend(&mut state), None);
        assert_eq!(enemy_attack(&mut state, false, &mut rng), None);
        assert_eq!(state, latched);
    }

    #[test]
    fn defend_then_enemy_attack_halves_damage() {
        let mut state = start_battle_from(&orc());
        let mut rng = rng();
        assert_eq!(
            player_defend(&mut state),
            Some(PlayerOutcome::EnemyTurn { defending: true })
        );
        assert_eq!(state.battle_log.last().unwrap(), "You take a defensive stance!");

        assert_eq!(
            enemy_attack(&mut state, true, &mut rng),
            Some(EnemyOutcome::PlayerTurn)
        );
        let taken = PLAYER_MAX_HEALTH - state.player_health;
        assert!(taken <= 7);
        assert!(state.battle_log.last().unwrap().contains("you block and only take"));
        assert_eq!(state.turn, Turn::Player);
    }

    #[test]
    fn enemy_attack_on_player_turn_is_ignored() {
        let mut state = start_battle_from(&orc());
        let before = state.clone();
        assert_eq!(enemy_attack(&mut state, false, &mut rng()), None);
        assert_eq!(state, before);
    }

    #[test]
    fn lethal_enemy_attack_defeats_player() {
        let mut state = start_battle_from(&orc());
        state.player_health = 3;
        state.turn = Turn::Enemy;
        assert_eq!(
            enemy_attack(&mut state, false, &mut rng()),
            Some(EnemyOutcome::Defeat)
        );
        assert_eq!(state.player_health, 0);
        assert_eq!(state.battle_log.last().unwrap(), "You were defeated! Game Over.");
        assert_eq!(state.turn, Turn::Enemy);
    }

    #[test]
    fn finish_battle_clears_and_restores() {
        let mut state = start_battle_from(&orc());
        state.player_health = 0;
        finish_battle(&mut state, BattleOutcome::Defeat);
        assert!(!state.in_battle);
        assert!(state.battle_log.is_empty());
        assert_eq!(state.player_health, PLAYER_MAX_HEALTH);

        let mut state = start_battle_from(&orc());
        state.player_health = 30;
        finish_battle(&mut state, BattleOutcome::Victory);
        assert_eq!(state.player_health, 30);
    }

    proptest! {
        #[test]
        fn attack_keeps_enemy_health_in_bounds(
            seed in any::<u64>(),
            max_health in 1u32..500,
            min in 0u32..60,
            spread in 0u32..60,
        ) {
            let config = BattleConfig::new("Orc", max_health).with_attack_damage(min, min + spread);
            let mut state = start_battle_from(&config);
            let mut rng = StdRng::seed_from_u64(seed);
            player_attack(&mut state, &config, &mut rng);
            prop_assert!(state.enemy_health <= state.enemy_max_health);
            let dealt = max_health - state.enemy_health;
            prop_assert!(dealt <= min + spread);
        }

        #[test]
        fn enemy_attack_keeps_player_health_in_bounds(
            seed in any::<u64>(),
            health in 0u32..=100,
            defending in any::<bool>(),
        ) {
            let mut state = start_battle("Orc", 50);
            state.player_health = health;
            state.turn = Turn::Enemy;
            let mut rng = StdRng::seed_from_u64(seed);
            enemy_attack(&mut state, defending, &mut rng);
            prop_assert!(state.player_health <= PLAYER_MAX_HEALTH);
            prop_assert!(state.player_health <= health);
        }

        #[test]
        fn defending_takes_floor_half(base in 5u32..=15) {
            let taken = defended_damage(base);
            prop_assert_eq!(taken, (f64::from(base) * 0.5).floor() as u32);
            prop_assert!(taken <= base);
        }

        #[test]
        fn defeated_enemy_stays_defeated(seed in any::<u64>(), tries in 1usize..10) {
            let config = BattleConfig::new("Rat", 1);
            let mut state = start_battle_from(&config);
            let mut rng = StdRng::seed_from_u64(seed);
            player_attack(&mut state, &config, &mut rng);
            prop_assert_eq!(state.enemy_health, 0);
            for _ in 0..tries {
                prop_assert_eq!(player_attack(&mut state, &config, &mut rng), None);
                prop_assert_eq!(player_defend(&mut state), None);
                prop_assert_eq!(state.enemy_health, 0);
            }
        }
    }
}
