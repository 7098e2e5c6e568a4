//! Unit tests for the avatar shop.

use super::{day, fresh};
use aiquest::avatar::{buy_item, can_afford, equip_item, meets_unlock, EconomyError};
use aiquest::catalog::{AvatarCatalog, LessonCatalog, LessonTier};
use aiquest::progress::{complete_lesson, LessonRecord};

#[test]
fn test_unaffordable_purchase_is_refused() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let mut doc = fresh();
    doc.total_xp = 30;

    let result = buy_item(&doc, &items, &lessons, "color_purple");
    assert_eq!(
        result,
        Err(EconomyError::InsufficientXp {
            needed: 40,
            available: 30
        })
    );
    assert_eq!(doc.total_xp, 30);
    assert!(!doc.owns_item("color_purple"));
}

#[test]
fn test_buy_then_equip() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let mut doc = fresh();
    doc.total_xp = 120;

    let doc = buy_item(&doc, &items, &lessons, "accessory_jetpack").unwrap();
    assert_eq!(doc.total_xp, 50);
    assert_eq!(doc.avatar.equipped.accessory, None);

    let doc = equip_item(&doc, &items, &lessons, "accessory_jetpack").unwrap();
    assert_eq!(doc.avatar.equipped.accessory.as_deref(), Some("jetpack"));
    assert_eq!(doc.total_xp, 50);
}

#[test]
fn test_streak_unlocked_effect() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let flame = items.get("effect_flame").unwrap();
    let mut doc = fresh();
    doc.total_xp = 200;
    doc.current_streak = 6;
    doc.longest_streak = 6;
    assert!(can_afford(&doc, flame));
    assert!(!meets_unlock(&lessons, &doc, flame));
    assert!(matches!(
        buy_item(&doc, &items, &lessons, "effect_flame"),
        Err(EconomyError::Locked { .. })
    ));

    doc.current_streak = 7;
    let doc = buy_item(&doc, &items, &lessons, "effect_flame").unwrap();
    assert!(doc.owns_item("effect_flame"));
    assert_eq!(doc.total_xp, 150);
}

#[test]
fn test_earned_headgear_after_finishing_beginner() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let today = day(2026, 10, 17);
    let mut doc = fresh();
    for id in lessons.tier_ids(LessonTier::Beginner) {
        doc = complete_lesson(&doc, id, 100, 10, false, today);
    }
    let xp_before = doc.total_xp;

    let doc = equip_item(&doc, &items, &lessons, "headgear_graduation").unwrap();
    assert_eq!(doc.avatar.equipped.headgear.as_deref(), Some("graduation"));
    assert!(doc.owns_item("headgear_graduation"));
    assert_eq!(doc.total_xp, xp_before);

    // Explorer headgear is still out of reach.
    assert_eq!(
        equip_item(&doc, &items, &lessons, "headgear_headset"),
        Err(EconomyError::NotOwned("headgear_headset".to_string()))
    );
}

#[test]
fn test_owned_item_stays_equippable_after_xp_spent() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let mut doc = fresh();
    doc.total_xp = 300;
    let doc = buy_item(&doc, &items, &lessons, "effect_sparkle").unwrap();
    assert_eq!(doc.total_xp, 260);

    // Below the unlock threshold now, but the item is owned.
    let doc = equip_item(&doc, &items, &lessons, "effect_sparkle").unwrap();
    assert_eq!(doc.avatar.equipped.effect.as_deref(), Some("sparkle"));
}

#[test]
fn test_inventory_only_grows() {
    let items = AvatarCatalog::builtin();
    let lessons = LessonCatalog::builtin();
    let mut doc = fresh();
    doc.total_xp = 500;
    doc.lesson_records.insert("x".to_string(), LessonRecord::default());

    let mut previous = doc.avatar.inventory.clone();
    for id in ["color_green", "eyes_star", "color_green", "headgear_rocket"] {
        if let Ok(next) = buy_item(&doc, &items, &lessons, id) {
            doc = next;
        }
        if let Ok(next) = equip_item(&doc, &items, &lessons, id) {
            doc = next;
        }
        assert!(doc.avatar.inventory.is_superset(&previous));
        previous = doc.avatar.inventory.clone();
    }
    assert_eq!(doc.total_xp, 500 - 25 - 30 - 60);
    assert_eq!(doc.avatar.equipped.body_color, "green");
    assert_eq!(doc.avatar.equipped.eyes, "star");
}
