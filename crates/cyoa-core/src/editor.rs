//! Message-driven editing of an adventure document.
//!
//! Front ends never mutate the document directly. They emit [`EditorEvent`]s
//! and [`Editor::apply`] is the single reducer that updates the document and
//! its presentation settings.

use log::debug;

use crate::START_SCENE;
use crate::document::{Adventure, AdventureMeta, BattleConfig, Choice, ControlToken, Scene};
use crate::error::{CoreError, CoreResult};
use crate::resolve::SceneNotFound;

/// Text of a scene created with [`EditorEvent::AddScene`].
pub const NEW_SCENE_TEXT: &str = "New scene text...";
/// Label of a choice created with [`EditorEvent::AddChoice`].
pub const NEW_CHOICE_TEXT: &str = "New choice";

/// A partial update to one scene. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenePatch {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement choice list.
    pub choices: Option<Vec<Choice>>,
    /// Replacement battle; `Some(None)` removes the battle.
    pub battle: Option<Option<BattleConfig>>,
}

/// An edit requested by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Add an empty scene with the next free `scene{N}` id.
    AddScene,
    /// Add an empty scene with a chosen id.
    AddSceneWithId {
        /// The new scene id.
        id: String,
    },
    /// Delete a scene. Choices pointing at it are left dangling.
    RemoveScene {
        /// The scene to delete.
        id: String,
    },
    /// Change a scene id and retarget every choice that pointed at it.
    RenameScene {
        /// Current id.
        from: String,
        /// New id.
        to: String,
    },
    /// Apply a partial update to a scene.
    SceneEdited {
        /// The scene to update.
        id: String,
        /// Fields to replace.
        patch: ScenePatch,
    },
    /// Replace a scene's text.
    SetText {
        /// The scene to update.
        id: String,
        /// New text.
        text: String,
    },
    /// Append a placeholder choice with a blank target.
    AddChoice {
        /// The scene to update.
        id: String,
    },
    /// Relabel a choice.
    UpdateChoiceText {
        /// The scene to update.
        id: String,
        /// Zero-based choice index.
        index: usize,
        /// New label.
        text: String,
    },
    /// Point a choice at another scene or control token.
    UpdateChoiceTarget {
        /// The scene to update.
        id: String,
        /// Zero-based choice index.
        index: usize,
        /// New target.
        target: String,
    },
    /// Remove a choice.
    DeleteChoice {
        /// The scene to update.
        id: String,
        /// Zero-based choice index.
        index: usize,
    },
    /// Attach or replace a scene's battle.
    SetBattle {
        /// The scene to update.
        id: String,
        /// Battle settings; the damage range is normalized on write.
        battle: BattleConfig,
    },
    /// Remove a scene's battle.
    ClearBattle {
        /// The scene to update.
        id: String,
    },
    /// Change the player's attack roll bounds. `max` is raised to `min`.
    SetAttackDamage {
        /// The scene to update.
        id: String,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },
    /// Change the tab title.
    SetTitle(String),
    /// Change the accent color.
    SetAccentColor(String),
    /// Toggle the decorative spider layer.
    SetSpiders(bool),
}

/// Owns the document being authored plus its presentation settings.
#[derive(Debug, Clone)]
pub struct Editor {
    adventure: Adventure,
    meta: AdventureMeta,
    next_scene_number: u32,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// An editor seeded with [`starter_adventure`].
    pub fn new() -> Self {
        Self::from_parts(starter_adventure(), AdventureMeta::default())
    }

    /// An editor over an existing document.
    pub fn from_parts(adventure: Adventure, meta: AdventureMeta) -> Self {
        Self {
            adventure,
            meta,
            next_scene_number: 2,
        }
    }

    /// The document being edited.
    pub fn adventure(&self) -> &Adventure {
        &self.adventure
    }

    /// Presentation settings.
    pub fn meta(&self) -> &AdventureMeta {
        &self.meta
    }

    /// Consume the editor, returning its document and settings.
    pub fn into_parts(self) -> (Adventure, AdventureMeta) {
        (self.adventure, self.meta)
    }

    /// Apply one event to the document.
    ///
    /// Returns the id of the scene the event touched, if any.
    pub fn apply(&mut self, event: EditorEvent) -> CoreResult<Option<String>> {
        debug!("editor event: {event:?}");
        match event {
            EditorEvent::AddScene => {
                let id = self.next_free_id();
                self.adventure
                    .insert_scene(id.clone(), Scene::new(NEW_SCENE_TEXT));
                Ok(Some(id))
            }
            EditorEvent::AddSceneWithId { id } => {
                self.check_new_id(&id)?;
                self.adventure
                    .insert_scene(id.clone(), Scene::new(NEW_SCENE_TEXT));
                Ok(Some(id))
            }
            EditorEvent::RemoveScene { id } => {
                self.adventure
                    .remove_scene(&id)
                    .ok_or_else(|| SceneNotFound(id.clone()))?;
                Ok(Some(id))
            }
            EditorEvent::RenameScene { from, to } => {
                if from == to {
                    self.scene_mut(&from)?;
                    return Ok(Some(to));
                }
                self.check_new_id(&to)?;
                let scene = self
                    .adventure
                    .remove_scene(&from)
                    .ok_or_else(|| SceneNotFound(from.clone()))?;
                self.adventure.insert_scene(to.clone(), scene);
                for scene in self.adventure.scenes.values_mut() {
                    for choice in &mut scene.choices {
                        if choice.next_scene == from {
                            choice.next_scene = to.clone();
                        }
                    }
                }
                Ok(Some(to))
            }
            EditorEvent::SceneEdited { id, patch } => {
                let scene = self.scene_mut(&id)?;
                if let Some(text) = patch.text {
                    scene.text = text;
                }
                if let Some(choices) = patch.choices {
                    scene.choices = choices;
                }
                if let Some(battle) = patch.battle {
                    scene.battle = battle.map(normalize_battle);
                }
                Ok(Some(id))
            }
            EditorEvent::SetText { id, text } => {
                self.scene_mut(&id)?.text = text;
                Ok(Some(id))
            }
            EditorEvent::AddChoice { id } => {
                self.scene_mut(&id)?
                    .choices
                    .push(Choice::new(NEW_CHOICE_TEXT, ""));
                Ok(Some(id))
            }
            EditorEvent::UpdateChoiceText { id, index, text } => {
                self.choice_mut(&id, index)?.text = text;
                Ok(Some(id))
            }
            EditorEvent::UpdateChoiceTarget { id, index, target } => {
                self.choice_mut(&id, index)?.next_scene = target;
                Ok(Some(id))
            }
            EditorEvent::DeleteChoice { id, index } => {
                let scene = self.scene_mut(&id)?;
                if index >= scene.choices.len() {
                    return Err(CoreError::ChoiceOutOfRange { scene: id, index });
                }
                scene.choices.remove(index);
                Ok(Some(id))
            }
            EditorEvent::SetBattle { id, battle } => {
                self.scene_mut(&id)?.battle = Some(normalize_battle(battle));
                Ok(Some(id))
            }
            EditorEvent::ClearBattle { id } => {
                self.scene_mut(&id)?.battle = None;
                Ok(Some(id))
            }
            EditorEvent::SetAttackDamage { id, min, max } => {
                let scene = self.scene_mut(&id)?;
                let battle = scene
                    .battle
                    .as_mut()
                    .ok_or_else(|| CoreError::NoBattle(id.clone()))?;
                battle.attack_damage_min = Some(min);
                battle.attack_damage_max = Some(max.max(min));
                Ok(Some(id))
            }
            EditorEvent::SetTitle(title) => {
                self.meta.title = title;
                Ok(None)
            }
            EditorEvent::SetAccentColor(color) => {
                self.meta.accent_color = color;
                Ok(None)
            }
            EditorEvent::SetSpiders(enabled) => {
                self.meta.spiders = enabled;
                Ok(None)
            }
        }
    }

    fn scene_mut(&mut self, id: &str) -> CoreResult<&mut Scene> {
        self.adventure
            .scene_mut(id)
            .ok_or_else(|| SceneNotFound(id.to_string()).into())
    }

    fn choice_mut(&mut self, id: &str, index: usize) -> CoreResult<&mut Choice> {
        self.scene_mut(id)?
            .choices
            .get_mut(index)
            .ok_or_else(|| CoreError::ChoiceOutOfRange {
                scene: id.to_string(),
                index,
            })
    }

    fn check_new_id(&self, id: &str) -> CoreResult<()> {
        if id.is_empty() || ControlToken::parse(id).is_some() {
            return Err(CoreError::ReservedSceneId(id.to_string()));
        }
        if self.adventure.contains(id) {
            return Err(CoreError::DuplicateScene(id.to_string()));
        }
        Ok(())
    }

    fn next_free_id(&mut self) -> String {
        loop {
            let id = format!("scene{}", self.next_scene_number);
            self.next_scene_number += 1;
            if !self.adventure.contains(&id) {
                return id;
            }
        }
    }
}

/// Raise a battle's stored attack maximum to its minimum.
fn normalize_battle(mut battle: BattleConfig) -> BattleConfig {
    if let (Some(min), Some(max)) = (battle.attack_damage_min, battle.attack_damage_max) {
        battle.attack_damage_max = Some(max.max(min));
    }
    battle
}

/// The document a new editor starts with.
pub fn starter_adventure() -> Adventure {
    Adventure::new().with_scene(
        START_SCENE,
        Scene::new("Welcome to your adventure!\n\nWhat do you want to do?")
            .with_choice("Explore the forest", "forest")
            .with_choice("Enter the cave", "cave"),
    )
}
