use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::item::Item;

/// Prompt shown when a scene does not define its own.
pub const DEFAULT_PROMPT: &str = "What do you do?";

/// Identifier of a scene within a story.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneId(pub String);

impl SceneId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SceneId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Direction of an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Parse a direction name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "east" => Some(Self::East),
            "west" => Some(Self::West),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A one-way edge from a scene to another scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Direction the player travels.
    pub direction: Direction,
    /// The destination scene.
    pub scene_id: SceneId,
}

impl Exit {
    /// Create an exit.
    pub fn new(direction: Direction, scene_id: impl Into<SceneId>) -> Self {
        Self {
            direction,
            scene_id: scene_id.into(),
        }
    }
}

/// A location in the story graph.
///
/// Items are keyed by their normalized (lower-case) name as typed by the
/// player, e.g. `"gun"` for the "Ray Gun". The description is the only field
/// that changes during play, and only through [`Scene::remove_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    id: SceneId,
    name: String,
    description: String,
    prompt: String,
    exits: BTreeMap<Direction, Exit>,
    items: BTreeMap<String, Item>,
}

impl Scene {
    /// Create a scene with no exits or items and the default prompt.
    pub fn new(
        id: impl Into<SceneId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            prompt: DEFAULT_PROMPT.to_string(),
            exits: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Replace the default prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Add an exit. A second exit in the same direction replaces the first.
    pub fn with_exit(mut self, direction: Direction, target: impl Into<SceneId>) -> Self {
        self.exits.insert(direction, Exit::new(direction, target));
        self
    }

    /// Place an item under `key` (normalized to lower case).
    pub fn with_item(mut self, key: &str, item: Item) -> Self {
        self.items.insert(normalize_key(key), item);
        self
    }

    /// The scene identifier.
    pub fn id(&self) -> &SceneId {
        &self.id
    }

    /// The scene's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current description, minus any items already taken.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The prompt shown while waiting for input here.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// All exits, ordered by direction.
    pub fn exits(&self) -> &BTreeMap<Direction, Exit> {
        &self.exits
    }

    /// The exit in `direction`, if any.
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.get(&direction)
    }

    /// All items still lying in this scene.
    pub fn items(&self) -> &BTreeMap<String, Item> {
        &self.items
    }

    /// Look up an item by the name the player typed.
    pub fn item(&self, key: &str) -> Option<&Item> {
        self.items.get(&normalize_key(key))
    }

    /// A scene with no exits ends the game.
    pub fn is_terminal(&self) -> bool {
        self.exits.is_empty()
    }

    /// Lines written to the narrative when the scene is entered.
    pub fn entry_narrative(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            String::new(),
            self.description.clone(),
            String::new(),
        ]
    }

    /// Remove an item and cut its fragment out of the description.
    ///
    /// Returns `None` and leaves the scene untouched when no such item exists.
    pub fn remove_item(&mut self, key: &str) -> Option<Item> {
        let item = self.items.remove(&normalize_key(key))?;
        if !item.scene_fragment.is_empty() {
            self.description = self.description.replacen(&item.scene_fragment, "", 1);
        }
        Some(item)
    }

    /// Check every field is well-formed.
    pub fn validate(&self) -> CoreResult<()> {
        let context = || format!("scene \"{}\"", self.id);
        let required = [
            ("id", self.id.as_str()),
            ("name", self.name.as_str()),
            ("description", self.description.as_str()),
            ("prompt", self.prompt.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidField {
                    context: context(),
                    field,
                });
            }
        }
        for item in self.items.values() {
            item.validate()?;
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
