//! XP-priced avatar shop.
//!
//! Buying deducts XP and adds the item to the inventory; equipping writes the
//! item's value into its slot. Zero-cost items with a met unlock condition
//! are earned and can be equipped without buying.

use crate::catalog::{AvatarCatalog, AvatarItem, AvatarItemType, LessonCatalog, UnlockCondition};
use crate::progress::tiers::is_tier_complete;
use crate::progress::ProgressDocument;
use thiserror::Error;

/// Why a shop action was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    #[error("Unknown avatar item: {0}")]
    UnknownItem(String),

    #[error("Item already owned: {0}")]
    AlreadyOwned(String),

    #[error("Item {item} is locked: {requirement}")]
    Locked { item: String, requirement: String },

    #[error("Not enough XP: need {needed}, have {available}")]
    InsufficientXp { needed: u32, available: u32 },

    #[error("Item not owned: {0}")]
    NotOwned(String),
}

/// Whether the item's unlock condition holds for `doc`.
pub fn meets_unlock(lessons: &LessonCatalog, doc: &ProgressDocument, item: &AvatarItem) -> bool {
    match item.unlock {
        None | Some(UnlockCondition::None) => true,
        Some(UnlockCondition::CompleteTier(tier)) => is_tier_complete(lessons, tier, doc),
        Some(UnlockCondition::MinXp(xp)) => doc.total_xp >= xp,
        Some(UnlockCondition::StreakDays(days)) => doc.current_streak >= days,
    }
}

pub fn can_afford(doc: &ProgressDocument, item: &AvatarItem) -> bool {
    doc.total_xp >= item.xp_cost
}

pub fn owns_item(doc: &ProgressDocument, item_id: &str) -> bool {
    doc.owns_item(item_id)
}

/// Shop label for an item's unlock condition, if it has one.
pub fn unlock_requirement_text(item: &AvatarItem) -> Option<String> {
    match item.unlock? {
        UnlockCondition::None => None,
        UnlockCondition::CompleteTier(tier) => {
            Some(format!("Unlock by completing {}", tier.display_name()))
        }
        UnlockCondition::MinXp(xp) => Some(format!("Unlock at {} XP", xp)),
        UnlockCondition::StreakDays(days) => Some(format!("Unlock with a {}-day streak", days)),
    }
}

/// Whether the item's value currently fills its slot.
pub fn is_equipped(doc: &ProgressDocument, item: &AvatarItem) -> bool {
    let equipped = &doc.avatar.equipped;
    let value = item.equip_value.as_str();
    match item.item_type {
        AvatarItemType::Color => equipped.body_color == value,
        AvatarItemType::Eyes => equipped.eyes == value,
        AvatarItemType::Headgear => equipped.headgear.as_deref() == Some(value),
        AvatarItemType::Accessory => equipped.accessory.as_deref() == Some(value),
        AvatarItemType::Effect => equipped.effect.as_deref() == Some(value),
    }
}

/// Whether the item may be equipped without buying it first.
pub fn is_earned(lessons: &LessonCatalog, doc: &ProgressDocument, item: &AvatarItem) -> bool {
    item.xp_cost == 0 && meets_unlock(lessons, doc, item)
}

/// Buy an item. Does not equip it.
pub fn buy_item(
    doc: &ProgressDocument,
    items: &AvatarCatalog,
    lessons: &LessonCatalog,
    item_id: &str,
) -> Result<ProgressDocument, EconomyError> {
    let item = items
        .get(item_id)
        .ok_or_else(|| EconomyError::UnknownItem(item_id.to_string()))?;

    if owns_item(doc, item_id) {
        return Err(EconomyError::AlreadyOwned(item_id.to_string()));
    }
    if !meets_unlock(lessons, doc, item) {
        return Err(EconomyError::Locked {
            item: item_id.to_string(),
            requirement: unlock_requirement_text(item).unwrap_or_default(),
        });
    }
    if !can_afford(doc, item) {
        return Err(EconomyError::InsufficientXp {
            needed: item.xp_cost,
            available: doc.total_xp,
        });
    }

    let mut next = doc.clone();
    next.total_xp -= item.xp_cost;
    next.avatar.inventory.insert(item_id.to_string());
    tracing::info!(item = item_id, cost = item.xp_cost, "Avatar item bought");
    Ok(next)
}

/// Equip an item into its slot.
///
/// Allowed when the item is owned, is a starter color or eyes, or is earned.
/// An equipped item always ends up in the inventory.
pub fn equip_item(
    doc: &ProgressDocument,
    items: &AvatarCatalog,
    lessons: &LessonCatalog,
    item_id: &str,
) -> Result<ProgressDocument, EconomyError> {
    let item = items
        .get(item_id)
        .ok_or_else(|| EconomyError::UnknownItem(item_id.to_string()))?;

    let allowed =
        owns_item(doc, item_id) || item.is_starter() || is_earned(lessons, doc, item);
    if !allowed {
        return Err(EconomyError::NotOwned(item_id.to_string()));
    }

    let mut next = doc.clone();
    let equipped = &mut next.avatar.equipped;
    let value = item.equip_value.clone();
    match item.item_type {
        AvatarItemType::Color => equipped.body_color = value,
        AvatarItemType::Eyes => equipped.eyes = value,
        AvatarItemType::Headgear => equipped.headgear = Some(value),
        AvatarItemType::Accessory => equipped.accessory = Some(value),
        AvatarItemType::Effect => equipped.effect = Some(value),
    }
    next.avatar.inventory.insert(item_id.to_string());

    tracing::debug!(item = item_id, "Avatar item equipped");
    Ok(next)
}
