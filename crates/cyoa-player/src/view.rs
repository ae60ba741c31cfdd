//! Render-ready snapshots of a play session.

use cyoa_core::ControlToken;

/// Label of the single action on the error screen.
pub const RETURN_TO_START: &str = "Return to Start";

/// An action offered during a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// Strike the enemy.
    Attack,
    /// Halve the enemy's next hit.
    Defend,
}

impl BattleAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Defend => "Defend",
        }
    }
}

/// Everything the battle screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattlePanel {
    /// Enemy display name.
    pub enemy_name: String,
    /// Current player health.
    pub player_health: u32,
    /// Player health ceiling.
    pub player_max_health: u32,
    /// Current enemy health.
    pub enemy_health: u32,
    /// Enemy health ceiling.
    pub enemy_max_health: u32,
    /// Battle log, oldest first.
    pub log: Vec<String>,
    /// Enabled actions. Empty while the enemy moves or the battle is over.
    pub actions: Vec<BattleAction>,
}

/// What a front end should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The document has not arrived yet.
    Loading,
    /// The document has no scenes; offer the editor or the landing page.
    Welcome {
        /// Destinations on offer.
        actions: Vec<ControlToken>,
    },
    /// A scene and its choices.
    Scene {
        /// Scene id.
        id: String,
        /// Scene text, verbatim.
        text: String,
        /// Choice labels in display order.
        choices: Vec<String>,
    },
    /// A battle in progress.
    Battle(BattlePanel),
    /// A not-found or decode problem. The only action returns to start.
    Error {
        /// Message to display.
        message: String,
    },
    /// The session was left through a control token.
    Exited {
        /// Where the player went.
        destination: ControlToken,
    },
}
