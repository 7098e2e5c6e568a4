//! Avatar item catalog.
//!
//! Cosmetic items are priced in XP and may carry an unlock condition. The
//! catalog is reference data; ownership lives in the progress document.

use super::lessons::LessonTier;
use serde::{Deserialize, Serialize};

/// Slot an item equips into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarItemType {
    /// Body color (always filled)
    Color,
    /// Eyes (always filled)
    Eyes,
    /// Optional headgear
    Headgear,
    /// Optional accessory
    Accessory,
    /// Optional effect
    Effect,
}

impl AvatarItemType {
    /// Slots that always hold a value.
    pub fn is_singleton(&self) -> bool {
        matches!(self, AvatarItemType::Color | AvatarItemType::Eyes)
    }
}

/// Item rarity, display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl AvatarRarity {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            AvatarRarity::Common => "Common",
            AvatarRarity::Rare => "Rare",
            AvatarRarity::Epic => "Epic",
            AvatarRarity::Legendary => "Legendary",
        }
    }
}

/// Condition gating purchase (and free equip) of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum UnlockCondition {
    /// Always met
    None,
    /// Every lesson of the tier is completed
    CompleteTier(LessonTier),
    /// Total XP at or above the value
    MinXp(u32),
    /// Current streak at or above the value
    StreakDays(u32),
}

/// A purchasable or earnable avatar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarItem {
    /// Stable item identifier (e.g. "color_blue")
    pub id: String,
    /// Slot the item equips into
    #[serde(rename = "type")]
    pub item_type: AvatarItemType,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Price in XP (0 for starter and earned items)
    pub xp_cost: u32,
    /// Rarity
    pub rarity: AvatarRarity,
    /// Unlock condition; absent means always eligible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<UnlockCondition>,
    /// Value written into the equipped slot (e.g. "blue")
    pub equip_value: String,
}

impl AvatarItem {
    fn new(
        id: &str,
        item_type: AvatarItemType,
        name: &str,
        description: &str,
        xp_cost: u32,
        rarity: AvatarRarity,
        equip_value: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            item_type,
            name: name.to_string(),
            description: description.to_string(),
            xp_cost,
            rarity,
            unlock: None,
            equip_value: equip_value.to_string(),
        }
    }

    /// Attach an unlock condition.
    fn unlocked_by(mut self, condition: UnlockCondition) -> Self {
        self.unlock = Some(condition);
        self
    }

    /// Free color or eyes item everybody starts with.
    pub fn is_starter(&self) -> bool {
        self.xp_cost == 0 && self.item_type.is_singleton()
    }
}

/// Ordered avatar item catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarCatalog {
    items: Vec<AvatarItem>,
}

impl AvatarCatalog {
    /// Build a catalog from an item list.
    pub fn new(items: Vec<AvatarItem>) -> Self {
        Self { items }
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[AvatarItem] {
        &self.items
    }

    /// Look an item up by id.
    pub fn get(&self, id: &str) -> Option<&AvatarItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items of one slot type.
    pub fn by_type(&self, item_type: AvatarItemType) -> Vec<&AvatarItem> {
        self.items
            .iter()
            .filter(|i| i.item_type == item_type)
            .collect()
    }

    /// The built-in shop.
    pub fn builtin() -> Self {
        use AvatarItemType::*;
        use AvatarRarity::*;

        Self::new(vec![
            AvatarItem::new("color_blue", Color, "Blue", "Classic blue robot", 0, Common, "blue"),
            AvatarItem::new("color_green", Color, "Green", "Fresh green style", 25, Common, "green"),
            AvatarItem::new("color_purple", Color, "Purple", "Royal purple", 40, Rare, "purple"),
            AvatarItem::new("color_gold", Color, "Gold", "Golden champion", 80, Epic, "gold"),
            AvatarItem::new("eyes_happy", Eyes, "Happy", "Friendly happy eyes", 0, Common, "happy"),
            AvatarItem::new("eyes_star", Eyes, "Star Eyes", "Sparkly star eyes", 30, Common, "star"),
            AvatarItem::new("eyes_pixel", Eyes, "Pixel", "Retro pixel eyes", 35, Rare, "pixel"),
            AvatarItem::new("eyes_sunglasses", Eyes, "Sunglasses", "Cool shades", 50, Rare, "sunglasses"),
            AvatarItem::new(
                "headgear_graduation",
                Headgear,
                "Graduation Cap",
                "Complete Beginner to unlock",
                0,
                Rare,
                "graduation",
            )
            .unlocked_by(UnlockCondition::CompleteTier(LessonTier::Beginner)),
            AvatarItem::new(
                "headgear_headset",
                Headgear,
                "Headset",
                "Complete Explorer to unlock",
                0,
                Rare,
                "headset",
            )
            .unlocked_by(UnlockCondition::CompleteTier(LessonTier::Explorer)),
            AvatarItem::new(
                "headgear_crown",
                Headgear,
                "Crown",
                "Complete Master to unlock",
                0,
                Epic,
                "crown",
            )
            .unlocked_by(UnlockCondition::CompleteTier(LessonTier::Master)),
            AvatarItem::new("headgear_rocket", Headgear, "Rocket Helmet", "Space-ready helmet", 60, Rare, "rocket"),
            AvatarItem::new("accessory_cape", Accessory, "Cape", "Hero cape", 45, Rare, "cape"),
            AvatarItem::new("accessory_backpack", Accessory, "Backpack", "Adventure backpack", 35, Common, "backpack"),
            AvatarItem::new("accessory_jetpack", Accessory, "Jetpack", "Jetpack for flying", 70, Epic, "jetpack"),
            AvatarItem::new("effect_sparkle", Effect, "Sparkle", "Reach 300 XP to unlock", 40, Rare, "sparkle")
                .unlocked_by(UnlockCondition::MinXp(300)),
            AvatarItem::new("effect_flame", Effect, "Flame Aura", "7-day streak to unlock", 50, Epic, "flame")
                .unlocked_by(UnlockCondition::StreakDays(7)),
            AvatarItem::new("effect_hologram", Effect, "Hologram", "Reach 500 XP to unlock", 80, Legendary, "hologram")
                .unlocked_by(UnlockCondition::MinXp(500)),
        ])
    }
}

impl Default for AvatarCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
