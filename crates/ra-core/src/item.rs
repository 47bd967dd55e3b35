use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An interactable object in a scene or in the player's inventory.
///
/// Items carry their own point values and messages; the engine decides when
/// they are awarded. `scene_fragment` is the exact substring of the owning
/// scene's description that mentions the item, removed once it is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier. Story files may omit it; the item key is used.
    #[serde(default)]
    pub id: String,
    /// Display name, e.g. "Ray Gun".
    pub name: String,
    /// Substring of the scene description describing this item.
    #[serde(default)]
    pub scene_fragment: String,
    /// Whether `take` succeeds on this item.
    #[serde(default)]
    pub is_takeable: bool,
    /// Points awarded when taken. May be negative.
    #[serde(default)]
    pub taken_point_value: i64,
    /// Feedback shown when taken.
    #[serde(default)]
    pub taken_message: String,
    /// Whether `examine` succeeds on this item.
    #[serde(default)]
    pub is_examinable: bool,
    /// Points awarded each time the item is examined.
    #[serde(default)]
    pub examine_point_value: i64,
    /// Feedback shown when examined.
    #[serde(default)]
    pub examine_message: String,
    /// How many of this item there are. Always at least 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    /// Create an inert item: not takeable, not examinable, quantity 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scene_fragment: String::new(),
            is_takeable: false,
            taken_point_value: 0,
            taken_message: String::new(),
            is_examinable: false,
            examine_point_value: 0,
            examine_message: String::new(),
            quantity: 1,
        }
    }

    /// Make the item takeable for `points`, reporting `message` on pickup.
    pub fn takeable(mut self, points: i64, message: impl Into<String>) -> Self {
        self.is_takeable = true;
        self.taken_point_value = points;
        self.taken_message = message.into();
        self
    }

    /// Make the item examinable for `points`, reporting `message`.
    pub fn examinable(mut self, points: i64, message: impl Into<String>) -> Self {
        self.is_examinable = true;
        self.examine_point_value = points;
        self.examine_message = message.into();
        self
    }

    /// Set the scene description fragment excised on pickup.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.scene_fragment = fragment.into();
        self
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Check that identity fields are present and the quantity is positive.
    pub fn validate(&self) -> CoreResult<()> {
        let context = || format!("item \"{}\"", self.name);
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidField {
                context: context(),
                field: "id",
            });
        }
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidField {
                context: context(),
                field: "name",
            });
        }
        if self.quantity < 1 {
            return Err(CoreError::InvalidField {
                context: context(),
                field: "quantity",
            });
        }
        Ok(())
    }

    /// Inventory line: the name, with an `(xN)` suffix for stacks.
    pub fn inventory_line(&self) -> String {
        if self.quantity > 1 {
            format!("{} (x{})", self.name, self.quantity)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_inert() {
        let item = Item::new("rock", "Rock");
        assert!(!item.is_takeable);
        assert!(!item.is_examinable);
        assert_eq!(item.quantity, 1);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn builder_sets_interactions() {
        let item = Item::new("gun", "Ray Gun")
            .takeable(25, "You take the gun.")
            .examinable(5, "A retro ray gun.")
            .with_fragment(" A gun lies here.");
        assert!(item.is_takeable);
        assert_eq!(item.taken_point_value, 25);
        assert_eq!(item.examine_message, "A retro ray gun.");
        assert_eq!(item.scene_fragment, " A gun lies here.");
    }

    #[test]
    fn zero_quantity_rejected() {
        let item = Item::new("coin", "Coin").with_quantity(0);
        assert!(matches!(
            item.validate(),
            Err(CoreError::InvalidField {
                field: "quantity",
                ..
            })
        ));
    }

    #[test]
    fn empty_name_rejected() {
        assert!(Item::new("x", "  ").validate().is_err());
        assert!(Item::new("", "Thing").validate().is_err());
    }

    #[test]
    fn inventory_line_shows_stack_size() {
        assert_eq!(Item::new("coin", "Coin").inventory_line(), "Coin");
        assert_eq!(
            Item::new("coin", "Coin").with_quantity(3).inventory_line(),
            "Coin (x3)"
        );
    }

    #[test]
    fn deserialize_applies_defaults() {
        let item: Item = serde_json::from_str(r#"{"id": "orb", "name": "Glowing Orb"}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(!item.is_takeable);
        assert_eq!(item.taken_point_value, 0);
    }
}
