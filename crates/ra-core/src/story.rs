use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::scene::{DEFAULT_PROMPT, Direction, Scene, SceneId};

/// A titled, ordered scene graph. The first scene is where play begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    title: String,
    scenes: Vec<Scene>,
    index: HashMap<SceneId, usize>,
}

impl Story {
    /// Build a story from its scenes.
    ///
    /// Checks that the title and every scene are well-formed, that there is
    /// at least one scene and that scene ids are unique. Exit targets are
    /// *not* checked here; use [`Story::validate`] for that.
    pub fn new(title: impl Into<String>, scenes: Vec<Scene>) -> CoreResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CoreError::InvalidField {
                context: "story".to_string(),
                field: "title",
            });
        }
        if scenes.is_empty() {
            return Err(CoreError::EmptyStory(title));
        }

        let mut index = HashMap::with_capacity(scenes.len());
        for (i, scene) in scenes.iter().enumerate() {
            scene.validate()?;
            if index.insert(scene.id().clone(), i).is_some() {
                return Err(CoreError::DuplicateScene(scene.id().clone()));
            }
        }

        Ok(Self {
            title,
            scenes,
            index,
        })
    }

    /// Parse a story from its JSON form and fully validate it.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: StoryData = serde_json::from_str(json)?;
        let scenes = data
            .scenes
            .into_iter()
            .map(SceneData::into_scene)
            .collect::<CoreResult<Vec<_>>>()?;
        let story = Self::new(data.title, scenes)?;
        story.validate()?;
        Ok(story)
    }

    /// Check that every exit leads to a scene in this story.
    pub fn validate(&self) -> CoreResult<()> {
        for scene in &self.scenes {
            for exit in scene.exits().values() {
                if !self.index.contains_key(&exit.scene_id) {
                    return Err(CoreError::MissingScene {
                        from: scene.id().clone(),
                        direction: exit.direction,
                        target: exit.scene_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The story title, used when recording scores.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All scenes in declaration order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// The opening scene.
    pub fn first(&self) -> &Scene {
        &self.scenes[0]
    }

    /// Position of a scene in [`Story::scenes`].
    pub fn position(&self, id: &SceneId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: &SceneId) -> Option<&Scene> {
        self.position(id).map(|i| &self.scenes[i])
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always false: a story has at least one scene.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scenes with no exits, i.e. the endings.
    pub fn endings(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(|s| s.is_terminal())
    }
}

// ---------------------------------------------------------------------------
// JSON data format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StoryData {
    title: String,
    scenes: Vec<SceneData>,
}

#[derive(Debug, Deserialize)]
struct SceneData {
    id: SceneId,
    name: String,
    description: String,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    exits: BTreeMap<Direction, SceneId>,
    #[serde(default)]
    items: BTreeMap<String, Item>,
}

impl SceneData {
    fn into_scene(self) -> CoreResult<Scene> {
        let prompt = self.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
        let mut scene = Scene::new(self.id, self.name, self.description).with_prompt(prompt);
        for (direction, target) in self.exits {
            scene = scene.with_exit(direction, target);
        }
        for (key, mut item) in self.items {
            if scene.item(&key).is_some() {
                return Err(CoreError::DuplicateItem {
                    scene: scene.id().clone(),
                    key,
                });
            }
            if item.id.is_empty() {
                item.id = key.clone();
            }
            scene = scene.with_item(&key, item);
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"{
        "title": "Tiny",
        "scenes": [
            {
                "id": "start",
                "name": "Start",
                "description": "A room. A coin glints.",
                "exits": { "north": "end" },
                "items": {
                    "Coin": {
                        "name": "Coin",
                        "scene_fragment": " A coin glints.",
                        "is_takeable": true,
                        "taken_point_value": 5,
                        "quantity": 2
                    }
                }
            },
            {
                "id": "end",
                "name": "End",
                "description": "The end.",
                "prompt": "Game Over"
            }
        ]
    }"#;

    #[test]
    fn parse_story_json() {
        let story = Story::from_json(TINY).unwrap();
        assert_eq!(story.title(), "Tiny");
        assert_eq!(story.len(), 2);
        assert_eq!(story.first().id().as_str(), "start");
        assert_eq!(story.first().prompt(), DEFAULT_PROMPT);

        let coin = story.first().item("coin").unwrap();
        assert_eq!(coin.id, "Coin");
        assert_eq!(coin.quantity, 2);

        let end = story.scene(&SceneId::from("end")).unwrap();
        assert_eq!(end.prompt(), "Game Over");
        assert!(end.is_terminal());
    }

    #[test]
    fn endings_are_terminal_scenes() {
        let story = Story::from_json(TINY).unwrap();
        let endings: Vec<_> = story.endings().map(|s| s.id().as_str()).collect();
        assert_eq!(endings, vec!["end"]);
    }

    #[test]
    fn empty_story_rejected() {
        assert!(matches!(
            Story::new("Nothing", vec![]),
            Err(CoreError::EmptyStory(_))
        ));
    }

    #[test]
    fn blank_title_rejected() {
        let scenes = vec![Scene::new("a", "A", "a")];
        assert!(Story::new("  ", scenes).is_err());
    }

    #[test]
    fn duplicate_scene_rejected() {
        let scenes = vec![Scene::new("a", "A", "a"), Scene::new("a", "B", "b")];
        assert!(matches!(
            Story::new("Dup", scenes),
            Err(CoreError::DuplicateScene(_))
        ));
    }

    #[test]
    fn dangling_exit_found_by_validate() {
        let scenes = vec![Scene::new("a", "A", "a").with_exit(Direction::West, "nowhere")];
        let story = Story::new("Broken", scenes).unwrap();
        match story.validate() {
            Err(CoreError::MissingScene {
                from,
                direction,
                target,
            }) => {
                assert_eq!(from.as_str(), "a");
                assert_eq!(direction, Direction::West);
                assert_eq!(target.as_str(), "nowhere");
            }
            other => panic!("expected MissingScene, got {other:?}"),
        }
    }

    #[test]
    fn item_keys_differing_only_in_case_rejected() {
        let json = r#"{"title": "T", "scenes": [
            {"id": "a", "name": "A", "description": "a", "items": {
                "Coin": {"name": "Gold Coin"},
                "coin": {"name": "Copper Coin"}
            }}
        ]}"#;
        match Story::from_json(json) {
            Err(CoreError::DuplicateItem { scene, key }) => {
                assert_eq!(scene.as_str(), "a");
                assert_eq!(key.to_lowercase(), "coin");
            }
            other => panic!("expected DuplicateItem, got {other:?}"),
        }
    }

    #[test]
    fn from_json_rejects_dangling_exit() {
        let json = r#"{"title": "T", "scenes": [
            {"id": "a", "name": "A", "description": "a", "exits": {"east": "b"}}
        ]}"#;
        assert!(matches!(
            Story::from_json(json),
            Err(CoreError::MissingScene { .. })
        ));
    }

    #[test]
    fn from_json_rejects_unknown_direction() {
        let json = r#"{"title": "T", "scenes": [
            {"id": "a", "name": "A", "description": "a", "exits": {"up": "a"}}
        ]}"#;
        assert!(matches!(Story::from_json(json), Err(CoreError::Json(_))));
    }

    #[test]
    fn position_follows_declaration_order() {
        let story = Story::from_json(TINY).unwrap();
        assert_eq!(story.position(&SceneId::from("start")), Some(0));
        assert_eq!(story.position(&SceneId::from("end")), Some(1));
        assert_eq!(story.position(&SceneId::from("missing")), None);
    }
}
