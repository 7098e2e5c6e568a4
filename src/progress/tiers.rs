//! Tier gating and lesson unlock derivation.
//!
//! Tiers open in order. Explorer needs every beginner lesson done; master
//! needs every explorer lesson done and enough banked XP, both at once.
//! Inside a reachable tier, lessons unlock one after another.

use super::types::ProgressDocument;
use crate::catalog::{LessonCatalog, LessonTier};

/// XP required, in addition to finishing Explorer, to open Master.
pub const MASTER_TIER_XP_THRESHOLD: u32 = 300;

/// Completion summary of a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProgress {
    pub completed: usize,
    pub total: usize,
    /// 0..=100
    pub percent: f32,
}

fn all_completed(catalog: &LessonCatalog, tier: LessonTier, doc: &ProgressDocument) -> bool {
    catalog
        .tier_ids(tier)
        .iter()
        .all(|id| doc.is_completed(id))
}

/// A tier is complete when it has lessons and all of them are completed.
pub fn is_tier_complete(catalog: &LessonCatalog, tier: LessonTier, doc: &ProgressDocument) -> bool {
    let ids = catalog.tier_ids(tier);
    !ids.is_empty() && ids.iter().all(|id| doc.is_completed(id))
}

/// Whether the tier is still closed.
pub fn is_tier_locked(catalog: &LessonCatalog, tier: LessonTier, doc: &ProgressDocument) -> bool {
    let Some(previous) = tier.previous() else {
        return false;
    };
    !all_completed(catalog, previous, doc)
        || (tier == LessonTier::Master && doc.total_xp < MASTER_TIER_XP_THRESHOLD)
}

/// Whether a lesson can be started. Unknown lessons are never unlocked.
pub fn is_lesson_unlocked(catalog: &LessonCatalog, lesson_id: &str, doc: &ProgressDocument) -> bool {
    let Some(lesson) = catalog.get(lesson_id) else {
        return false;
    };
    if is_tier_locked(catalog, lesson.tier, doc) {
        return false;
    }
    let ids = catalog.tier_ids(lesson.tier);
    match ids.iter().position(|id| *id == lesson_id) {
        Some(0) => true,
        Some(i) => doc.is_completed(ids[i - 1]),
        None => false,
    }
}

/// First unlocked, not yet completed lesson, walking tiers in order.
pub fn next_up_lesson_id<'a>(catalog: &'a LessonCatalog, doc: &ProgressDocument) -> Option<&'a str> {
    LessonTier::ALL
        .into_iter()
        .filter(|tier| !is_tier_locked(catalog, *tier, doc))
        .flat_map(|tier| catalog.tier_ids(tier))
        .find(|id| !doc.is_completed(id) && is_lesson_unlocked(catalog, id, doc))
}

/// Human-readable reason a lesson is locked, or `None` when it is playable or unknown.
pub fn unlock_requirement(
    catalog: &LessonCatalog,
    lesson_id: &str,
    doc: &ProgressDocument,
) -> Option<String> {
    let lesson = catalog.get(lesson_id)?;
    if is_lesson_unlocked(catalog, lesson_id, doc) {
        return None;
    }

    match lesson.tier {
        LessonTier::Explorer if !all_completed(catalog, LessonTier::Beginner, doc) => {
            return Some("Finish Beginner to unlock Explorer lessons".to_string());
        }
        LessonTier::Master if !all_completed(catalog, LessonTier::Explorer, doc) => {
            return Some("Finish Explorer to unlock Master lessons".to_string());
        }
        LessonTier::Master if doc.total_xp < MASTER_TIER_XP_THRESHOLD => {
            return Some(format!(
                "Reach {} XP to unlock Master",
                MASTER_TIER_XP_THRESHOLD
            ));
        }
        _ => {}
    }

    let ids = catalog.tier_ids(lesson.tier);
    let index = ids.iter().position(|id| *id == lesson_id)?;
    let previous = catalog.get(ids[index.checked_sub(1)?]);
    Some(match previous {
        Some(prev) if !prev.title.is_empty() => format!("Complete \"{}\" to unlock", prev.title),
        _ => "Complete the previous lesson to unlock".to_string(),
    })
}

/// Completed / total lessons of a tier.
pub fn tier_progress(catalog: &LessonCatalog, tier: LessonTier, doc: &ProgressDocument) -> TierProgress {
    let ids = catalog.tier_ids(tier);
    let total = ids.len();
    let completed = ids.iter().filter(|id| doc.is_completed(id)).count();
    let percent = if total > 0 {
        completed as f32 / total as f32 * 100.0
    } else {
        0.0
    };
    TierProgress {
        completed,
        total,
        percent,
    }
}
