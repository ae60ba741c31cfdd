//! The navigation state machine.
//!
//! One [`NavigationController`] is one playthrough. It moves between
//! exploring scenes, fighting battles, and showing error screens, and it is
//! the only owner of the battle state. Every transition goes through the
//! methods below; nothing else mutates the session.

use cyoa_battle::{
    BattleOutcome, BattleState, EnemyOutcome, PLAYER_MAX_HEALTH, PlayerOutcome, enemy_attack,
    finish_battle, player_attack, player_defend, start_battle_from,
};
use cyoa_core::{Adventure, BattleConfig, ControlToken, CoreError, START_SCENE, resolve};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PlayerConfig;
use crate::error::{PlayError, PlayerError, PlayerResult};
use crate::scheduler::{ScheduledTask, Scheduler, TaskKind};
use crate::view::{BattleAction, BattlePanel, View};

/// Where the session is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Waiting for the document.
    Loading,
    /// The document has no scenes.
    Empty,
    /// Showing the current scene and its choices.
    Exploration,
    /// Fighting the current scene's battle.
    InBattle,
    /// Showing an error screen.
    Error(PlayError),
    /// Left through a control token. Terminal.
    Exited(ControlToken),
}

/// One playthrough of an adventure.
pub struct NavigationController {
    adventure: Adventure,
    mode: Mode,
    current_scene: String,
    battle: BattleState,
    battle_config: Option<BattleConfig>,
    scheduler: Scheduler,
    generation: u64,
    rng: StdRng,
    config: PlayerConfig,
    live: bool,
}

impl NavigationController {
    /// A session waiting for its document.
    pub fn new(config: PlayerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            adventure: Adventure::new(),
            mode: Mode::Loading,
            current_scene: START_SCENE.to_string(),
            battle: BattleState::idle(),
            battle_config: None,
            scheduler: Scheduler::new(),
            generation: 0,
            rng,
            config,
            live: true,
        }
    }

    /// A session that starts playing `adventure` immediately.
    pub fn with_adventure(adventure: Adventure, config: PlayerConfig) -> Self {
        let mut controller = Self::new(config);
        controller.load(adventure);
        controller
    }

    /// Supply the document and enter the first scene.
    ///
    /// The first scene is the configured deep-link scene when it exists,
    /// otherwise `start`. Loading again restarts the session.
    pub fn load(&mut self, adventure: Adventure) {
        self.reset_battle();
        self.live = true;
        self.adventure = adventure;
        if self.adventure.is_empty() {
            info!("adventure has no scenes");
            self.mode = Mode::Empty;
            return;
        }

        info!("loaded adventure with {} scene(s)", self.adventure.len());
        let initial = self
            .config
            .initial_scene
            .as_deref()
            .filter(|id| self.adventure.contains(id))
            .unwrap_or(START_SCENE)
            .to_string();
        self.arrive(&initial, true);
    }

    /// Report that the document could not be decoded.
    pub fn fail_load(&mut self, error: &CoreError) {
        warn!("failed to load adventure: {error}");
        self.reset_battle();
        let detail = match error {
            CoreError::Decode(detail) => detail.clone(),
            other => other.to_string(),
        };
        self.mode = Mode::Error(PlayError::Decode(detail));
    }

    /// The document being played.
    pub fn adventure(&self) -> &Adventure {
        &self.adventure
    }

    /// Where the session is.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The last scene successfully entered.
    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    /// The battle state. Idle outside battles.
    pub fn battle(&self) -> &BattleState {
        &self.battle
    }

    /// Logical clock time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of pending timed continuations.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Milliseconds until the next timed continuation, if any.
    pub fn next_due_in_ms(&self) -> Option<u64> {
        self.scheduler
            .next_due_ms()
            .map(|due| due.saturating_sub(self.scheduler.now_ms()))
    }

    /// Whether the session still accepts input.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Pick the choice at zero-based `index` on the current scene.
    pub fn choose(&mut self, index: usize) -> PlayerResult<()> {
        self.ensure_live()?;
        if self.mode != Mode::Exploration {
            return Err(PlayerError::NotExploring);
        }
        let target = self
            .adventure
            .scene(&self.current_scene)
            .and_then(|scene| scene.choices.get(index))
            .map(|choice| choice.next_scene.clone())
            .ok_or(PlayerError::InvalidChoice(index))?;
        self.navigate(&target)
    }

    /// Follow a choice target from the current scene.
    ///
    /// Control tokens end the session without touching the current scene.
    /// Anything else is resolved as a scene id.
    pub fn navigate(&mut self, target: &str) -> PlayerResult<()> {
        self.ensure_live()?;
        if let Some(token) = ControlToken::parse(target) {
            self.leave(token);
            return Ok(());
        }
        if self.mode != Mode::Exploration {
            return Err(PlayerError::NotExploring);
        }
        self.arrive(target, true);
        Ok(())
    }

    /// Leave the session for the editor or the landing page.
    ///
    /// Pending continuations are cancelled and later input is refused.
    pub fn leave(&mut self, destination: ControlToken) {
        info!("leaving adventure for {destination}");
        self.shutdown();
        self.mode = Mode::Exited(destination);
    }

    /// Recover from the error screen by entering `start` again.
    ///
    /// If `start` is missing too, the session stays on the error screen.
    pub fn return_to_start(&mut self) -> PlayerResult<()> {
        self.ensure_live()?;
        if !matches!(self.mode, Mode::Error(_)) {
            return Err(PlayerError::NothingToRecover);
        }
        self.arrive(START_SCENE, true);
        Ok(())
    }

    /// Attack the enemy. Ignored while the enemy moves.
    pub fn attack(&mut self) -> PlayerResult<()> {
        self.ensure_live()?;
        let config = self.active_battle_config()?.clone();
        let outcome = player_attack(&mut self.battle, &config, &mut self.rng);
        self.after_player_action(outcome);
        Ok(())
    }

    /// Brace for the enemy's next hit. Ignored while the enemy moves.
    pub fn defend(&mut self) -> PlayerResult<()> {
        self.ensure_live()?;
        if !self.active_battle_config()?.defend_enabled() {
            return Err(PlayerError::ActionUnavailable("defend"));
        }
        let outcome = player_defend(&mut self.battle);
        self.after_player_action(outcome);
        Ok(())
    }

    /// Let `elapsed_ms` pass, firing every continuation that comes due.
    ///
    /// Continuations scheduled while firing run too if they fall inside the
    /// window. Returns how many fired.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let deadline = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due_by(deadline) {
            self.fire(task);
            fired += 1;
        }
        self.scheduler.advance_clock_to(deadline);
        fired
    }

    /// Fire every pending continuation regardless of its delay.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(wait) = self.next_due_in_ms() {
            fired += self.advance(wait);
        }
        fired
    }

    /// End the session: cancel pending continuations and refuse input.
    pub fn shutdown(&mut self) {
        if self.live {
            debug!("session shut down");
        }
        self.live = false;
        self.scheduler.cancel_all();
    }

    /// A snapshot of what to draw.
    pub fn view(&self) -> View {
        match &self.mode {
            Mode::Loading => View::Loading,
            Mode::Empty => View::Welcome {
                actions: vec![ControlToken::MakeYourOwn, ControlToken::GoHome],
            },
            Mode::Exploration => {
                let scene = self.adventure.scene(&self.current_scene);
                View::Scene {
                    id: self.current_scene.clone(),
                    text: scene.map(|s| s.text.clone()).unwrap_or_default(),
                    choices: scene
                        .map(|s| s.choices.iter().map(|c| c.text.clone()).collect())
                        .unwrap_or_default(),
                }
            }
            Mode::InBattle => View::Battle(self.battle_panel()),
            Mode::Error(error) => View::Error {
                message: error.to_string(),
            },
            Mode::Exited(destination) => View::Exited {
                destination: *destination,
            },
        }
    }

    fn battle_panel(&self) -> BattlePanel {
        let mut actions = Vec::new();
        if self.live && self.battle.player_can_act() {
            actions.push(BattleAction::Attack);
            if self
                .battle_config
                .as_ref()
                .is_some_and(BattleConfig::defend_enabled)
            {
                actions.push(BattleAction::Defend);
            }
        }
        BattlePanel {
            enemy_name: self.battle.enemy_name.clone(),
            player_health: self.battle.player_health,
            player_max_health: PLAYER_MAX_HEALTH,
            enemy_health: self.battle.enemy_health,
            enemy_max_health: self.battle.enemy_max_health,
            log: self.battle.battle_log.clone(),
            actions,
        }
    }

    /// Resolve `scene_id` and enter it, starting its battle when
    /// `trigger_battle` is set.
    fn arrive(&mut self, scene_id: &str, trigger_battle: bool) {
        let battle = match resolve(&self.adventure, scene_id) {
            Ok(scene) => scene.active_battle().cloned(),
            Err(not_found) => {
                warn!("{not_found}");
                self.mode = Mode::Error(PlayError::SceneNotFound(not_found.0));
                return;
            }
        };

        debug!("entering scene \"{scene_id}\"");
        self.current_scene = scene_id.to_string();
        match battle {
            Some(config) if trigger_battle => self.begin_battle(config),
            _ => self.mode = Mode::Exploration,
        }
    }

    fn begin_battle(&mut self, config: BattleConfig) {
        self.scheduler.cancel_all();
        self.generation += 1;
        self.battle = start_battle_from(&config);
        self.battle_config = Some(config);
        self.mode = Mode::InBattle;
        info!(
            "battle against {} in scene \"{}\"",
            self.battle.enemy_name, self.current_scene
        );
    }

    fn after_player_action(&mut self, outcome: Option<PlayerOutcome>) {
        match outcome {
            Some(PlayerOutcome::EnemyTurn { defending }) => self.scheduler.schedule_in(
                self.config.enemy_turn_delay_ms,
                self.generation,
                TaskKind::EnemyAttack { defending },
            ),
            Some(PlayerOutcome::Victory) => self.scheduler.schedule_in(
                self.config.battle_end_delay_ms,
                self.generation,
                TaskKind::EndBattle {
                    outcome: BattleOutcome::Victory,
                },
            ),
            None => debug!("battle action ignored: not the player's turn"),
        }
    }

    fn fire(&mut self, task: ScheduledTask) {
        if !self.live || task.generation != self.generation || self.mode != Mode::InBattle {
            debug!("dropping stale {:?}", task.kind);
            return;
        }

        match task.kind {
            TaskKind::EnemyAttack { defending } => {
                if enemy_attack(&mut self.battle, defending, &mut self.rng)
                    == Some(EnemyOutcome::Defeat)
                {
                    self.scheduler.schedule_in(
                        self.config.battle_end_delay_ms,
                        self.generation,
                        TaskKind::EndBattle {
                            outcome: BattleOutcome::Defeat,
                        },
                    );
                }
            }
            TaskKind::EndBattle { outcome } => self.end_battle(outcome),
        }
    }

    fn end_battle(&mut self, outcome: BattleOutcome) {
        finish_battle(&mut self.battle, outcome);
        self.generation += 1;
        let destination = match (outcome, self.battle_config.take()) {
            (BattleOutcome::Victory, Some(config)) => config.victory_scene().to_string(),
            _ => START_SCENE.to_string(),
        };
        info!("battle over ({outcome:?}); going to \"{destination}\"");
        self.arrive(&destination, false);
    }

    fn reset_battle(&mut self) {
        self.scheduler.cancel_all();
        self.generation += 1;
        self.battle = BattleState::idle();
        self.battle_config = None;
    }

    fn active_battle_config(&self) -> PlayerResult<&BattleConfig> {
        if self.mode != Mode::InBattle {
            return Err(PlayerError::NotInBattle);
        }
        self.battle_config.as_ref().ok_or(PlayerError::NotInBattle)
    }

    fn ensure_live(&self) -> PlayerResult<()> {
        if self.live {
            Ok(())
        } else {
            Err(PlayerError::SessionEnded)
        }
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
