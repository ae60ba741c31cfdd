//! Authoring checks over an adventure document.
//!
//! Validation never rejects a document: authors edit incrementally, so most
//! findings are warnings. Only problems that make a scene permanently
//! unreachable are errors.

use crate::START_SCENE;
use crate::document::{
    Adventure, ControlToken, DEFAULT_ATTACK_DAMAGE_MAX, DEFAULT_ATTACK_DAMAGE_MIN,
};

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The scene where the issue was found.
    pub scene: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn warning(scene: &str, message: impl Into<String>) -> Self {
        Self {
            scene: scene.to_string(),
            message: message.into(),
            is_error: false,
        }
    }

    fn error(scene: &str, message: impl Into<String>) -> Self {
        Self {
            scene: scene.to_string(),
            message: message.into(),
            is_error: true,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.scene, self.message)
    }
}

/// Check an adventure for dangling targets and inconsistent battles.
///
/// An empty document yields no issues; players show it as a welcome screen.
pub fn validate(adventure: &Adventure) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if adventure.is_empty() {
        return issues;
    }

    if !adventure.contains(START_SCENE) {
        issues.push(ValidationIssue::warning(
            START_SCENE,
            "no \"start\" scene; players begin on a not-found screen",
        ));
    }

    for (id, scene) in adventure.iter() {
        if ControlToken::parse(id).is_some() {
            issues.push(ValidationIssue::error(
                id,
                "scene id is a control token and can never be reached",
            ));
        }

        for (index, choice) in scene.choices.iter().enumerate() {
            let target = choice.next_scene.as_str();
            if ControlToken::parse(target).is_some() {
                continue;
            }
            if target.is_empty() {
                issues.push(ValidationIssue::warning(
                    id,
                    format!("choice #{} (\"{}\") has no target", index + 1, choice.text),
                ));
            } else if !adventure.contains(target) {
                issues.push(ValidationIssue::warning(
                    id,
                    format!(
                        "choice #{} (\"{}\") leads to missing scene \"{target}\"",
                        index + 1,
                        choice.text
                    ),
                ));
            }
        }

        if let Some(battle) = scene.active_battle() {
            let min = battle
                .attack_damage_min
                .unwrap_or(DEFAULT_ATTACK_DAMAGE_MIN);
            let max = battle
                .attack_damage_max
                .unwrap_or(DEFAULT_ATTACK_DAMAGE_MAX);
            if min > max {
                issues.push(ValidationIssue::warning(
                    id,
                    format!("attack damage min ({min}) exceeds max ({max}); max is raised to {min}"),
                ));
            }
            if battle.enemy_health == Some(0) {
                issues.push(ValidationIssue::warning(
                    id,
                    "enemy health is 0; the enemy starts with 1",
                ));
            }
            let victory = battle.victory_scene();
            if !adventure.contains(victory) {
                issues.push(ValidationIssue::warning(
                    id,
                    format!("victory scene \"{victory}\" does not exist"),
                ));
            }
        }
    }

    issues
}
