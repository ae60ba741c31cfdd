use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreResult;

/// Enemy name used when a battle does not name its enemy.
pub const DEFAULT_ENEMY_NAME: &str = "Enemy";
/// Enemy health used when a battle does not set one.
pub const DEFAULT_ENEMY_HEALTH: u32 = 50;
/// Lower bound of the player's attack roll when unset.
pub const DEFAULT_ATTACK_DAMAGE_MIN: u32 = 10;
/// Upper bound of the player's attack roll when unset.
pub const DEFAULT_ATTACK_DAMAGE_MAX: u32 = 20;
/// Accent color of a freshly created adventure.
pub const DEFAULT_ACCENT_COLOR: &str = "#61dafb";
/// Title of a freshly created adventure.
pub const DEFAULT_TITLE: &str = "My Adventure";

// Authoring tools write `null` for untouched fields; read it as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A reserved `nextScene` value that leaves the adventure instead of
/// resolving a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlToken {
    /// `make_your_own`: open the editor.
    MakeYourOwn,
    /// `go_home`: open the landing page.
    GoHome,
}

impl ControlToken {
    /// Parse a choice target as a control token. Exact match only.
    pub fn parse(target: &str) -> Option<Self> {
        match target {
            "make_your_own" => Some(Self::MakeYourOwn),
            "go_home" => Some(Self::GoHome),
            _ => None,
        }
    }

    /// The wire spelling of this token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MakeYourOwn => "make_your_own",
            Self::GoHome => "go_home",
        }
    }
}

impl std::fmt::Display for ControlToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled transition to another scene or a control token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Button label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Target scene id or control token. May be empty while authoring.
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_scene: String,
}

impl Choice {
    /// Create a choice leading to `next_scene`.
    pub fn new(text: impl Into<String>, next_scene: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_scene: next_scene.into(),
        }
    }

    /// The control token this choice triggers, if any.
    pub fn control_token(&self) -> Option<ControlToken> {
        ControlToken::parse(&self.next_scene)
    }
}

/// Combat settings for a scene. Absent fields fall back to defaults when read
/// through the accessor methods, and stay absent when re-serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleConfig {
    /// Whether arriving at the scene starts a battle.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Display name of the enemy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_name: Option<String>,
    /// Starting and maximum enemy health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_health: Option<u32>,
    /// Whether the defend action is offered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defend_enabled: Option<bool>,
    /// Lower bound of the player's attack roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_damage_min: Option<u32>,
    /// Upper bound of the player's attack roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_damage_max: Option<u32>,
    /// Scene entered after a victory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub victory_scene: Option<String>,
}

impl BattleConfig {
    /// An enabled battle against `enemy_name` with `enemy_health` hit points.
    pub fn new(enemy_name: impl Into<String>, enemy_health: u32) -> Self {
        Self {
            enabled: true,
            enemy_name: Some(enemy_name.into()),
            enemy_health: Some(enemy_health),
            ..Self::default()
        }
    }

    /// Set the player's attack roll bounds.
    pub fn with_attack_damage(mut self, min: u32, max: u32) -> Self {
        self.attack_damage_min = Some(min);
        self.attack_damage_max = Some(max);
        self
    }

    /// Turn the defend action on or off.
    pub fn with_defend(mut self, enabled: bool) -> Self {
        self.defend_enabled = Some(enabled);
        self
    }

    /// Set the scene entered after a victory.
    pub fn with_victory_scene(mut self, scene: impl Into<String>) -> Self {
        self.victory_scene = Some(scene.into());
        self
    }

    /// The enemy name, or the placeholder when unset.
    pub fn enemy_name(&self) -> &str {
        self.enemy_name.as_deref().unwrap_or(DEFAULT_ENEMY_NAME)
    }

    /// The enemy's maximum health, never below 1.
    pub fn enemy_health(&self) -> u32 {
        self.enemy_health.unwrap_or(DEFAULT_ENEMY_HEALTH).max(1)
    }

    /// Whether the defend action is offered. Defaults to true.
    pub fn defend_enabled(&self) -> bool {
        self.defend_enabled.unwrap_or(true)
    }

    /// Inclusive attack roll bounds with `max` clamped up to `min`.
    pub fn attack_damage(&self) -> (u32, u32) {
        let min = self.attack_damage_min.unwrap_or(DEFAULT_ATTACK_DAMAGE_MIN);
        let max = self.attack_damage_max.unwrap_or(DEFAULT_ATTACK_DAMAGE_MAX);
        (min, max.max(min))
    }

    /// Scene entered after a victory. Defaults to `start`.
    pub fn victory_scene(&self) -> &str {
        self.victory_scene.as_deref().unwrap_or(crate::START_SCENE)
    }
}

/// One node of narrative content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Display text, rendered verbatim including line breaks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Choices in display order. Empty for a dead end.
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<Choice>,
    /// Battle entered on arrival, when present and enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battle: Option<BattleConfig>,
}

impl Scene {
    /// A scene with text and no choices.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
            battle: None,
        }
    }

    /// Append a choice.
    pub fn with_choice(mut self, text: impl Into<String>, next_scene: impl Into<String>) -> Self {
        self.choices.push(Choice::new(text, next_scene));
        self
    }

    /// Attach a battle.
    pub fn with_battle(mut self, battle: BattleConfig) -> Self {
        self.battle = Some(battle);
        self
    }

    /// The battle entered on arrival, if one is enabled.
    pub fn active_battle(&self) -> Option<&BattleConfig> {
        self.battle.as_ref().filter(|b| b.enabled)
    }
}

/// The complete mapping of scene ids to scenes.
///
/// Serializes as the bare `{ "id": scene, ... }` object used by every
/// transport. Keys are kept sorted so output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Adventure {
    /// Scenes keyed by case-sensitive id.
    pub scenes: BTreeMap<String, Scene>,
}

impl Adventure {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON scenes mapping.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as compact JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a scene, replacing any scene with the same id.
    pub fn with_scene(mut self, id: impl Into<String>, scene: Scene) -> Self {
        self.scenes.insert(id.into(), scene);
        self
    }

    /// Insert or replace a scene. Returns the previous scene with that id.
    pub fn insert_scene(&mut self, id: impl Into<String>, scene: Scene) -> Option<Scene> {
        self.scenes.insert(id.into(), scene)
    }

    /// Remove a scene by id.
    pub fn remove_scene(&mut self, id: &str) -> Option<Scene> {
        self.scenes.remove(id)
    }

    /// Look up a scene by exact id.
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Look up a scene mutably by exact id.
    pub fn scene_mut(&mut self, id: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Whether a scene with this exact id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the document has no scenes at all.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterate over `(id, scene)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scene)> {
        self.scenes.iter().map(|(id, scene)| (id.as_str(), scene))
    }
}

/// Presentation settings that travel with a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureMeta {
    /// Browser tab title.
    pub title: String,
    /// Accent color as a CSS hex string.
    pub accent_color: String,
    /// Whether the decorative spider layer is shown.
    pub spiders: bool,
}

impl Default for AdventureMeta {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            spiders: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bare_scene_mapping() {
        let json = r#"{
            "start": {"text": "Hi", "choices": [{"text": "Go", "nextScene": "forest"}]},
            "forest": {"text": "Trees", "choices": []}
        }"#;
        let adventure = Adventure::from_json(json).unwrap();
        assert_eq!(adventure.len(), 2);
        let start = adventure.scene("start").unwrap();
        assert_eq!(start.choices[0].next_scene, "forest");
        assert!(start.battle.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let adventure = Adventure::from_json(r#"{"a": {}}"#).unwrap();
        let scene = adventure.scene("a").unwrap();
        assert!(scene.text.is_empty());
        assert!(scene.choices.is_empty());
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let json = r#"{
            "start": {"text": "Hi", "choices": null},
            "blank": {
                "text": null,
                "choices": [{"text": null, "nextScene": null}],
                "battle": {"enabled": null, "enemyName": null}
            }
        }"#;
        let adventure = Adventure::from_json(json).unwrap();
        assert!(adventure.scene("start").unwrap().choices.is_empty());
        let blank = adventure.scene("blank").unwrap();
        assert!(blank.text.is_empty());
        assert_eq!(blank.choices, vec![Choice::default()]);
        assert!(blank.active_battle().is_none());
    }

    #[test]
    fn battle_defaults() {
        let battle: BattleConfig = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert_eq!(battle.enemy_name(), DEFAULT_ENEMY_NAME);
        assert_eq!(battle.enemy_health(), DEFAULT_ENEMY_HEALTH);
        assert!(battle.defend_enabled());
        assert_eq!(battle.attack_damage(), (10, 20));
        assert_eq!(battle.victory_scene(), "start");
    }

    #[test]
    fn battle_camel_case_fields() {
        let json = r#"{"enabled": true, "enemyName": "Orc", "enemyHealth": 50,
            "defendEnabled": false, "attackDamageMin": 12, "attackDamageMax": 7,
            "victoryScene": "door_appears"}"#;
        let battle: BattleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(battle.enemy_name(), "Orc");
        assert!(!battle.defend_enabled());
        assert_eq!(battle.attack_damage(), (12, 12));
        assert_eq!(battle.victory_scene(), "door_appears");
    }

    #[test]
    fn zero_enemy_health_clamped() {
        let battle = BattleConfig::new("Rat", 0);
        assert_eq!(battle.enemy_health(), 1);
    }

    #[test]
    fn disabled_battle_is_not_active() {
        let mut battle = BattleConfig::new("Orc", 50);
        battle.enabled = false;
        let scene = Scene::new("calm").with_battle(battle);
        assert!(scene.active_battle().is_none());
    }

    #[test]
    fn absent_battle_fields_stay_absent() {
        let adventure = Adventure::new().with_scene(
            "start",
            Scene::new("x").with_battle(BattleConfig {
                enabled: true,
                ..BattleConfig::default()
            }),
        );
        insta::assert_snapshot!(
            adventure.to_json().unwrap(),
            @r#"{"start":{"text":"x","choices":[],"battle":{"enabled":true}}}"#
        );
    }

    #[test]
    fn control_tokens() {
        assert_eq!(
            ControlToken::parse("make_your_own"),
            Some(ControlToken::MakeYourOwn)
        );
        assert_eq!(ControlToken::parse("go_home"), Some(ControlToken::GoHome));
        assert_eq!(ControlToken::parse("Go_Home"), None);
        assert_eq!(ControlToken::GoHome.to_string(), "go_home");
    }

    #[test]
    fn default_meta() {
        let meta = AdventureMeta::default();
        assert_eq!(meta.title, "My Adventure");
        assert_eq!(meta.accent_color, "#61dafb");
        assert!(!meta.spiders);
    }
}
