//! Badge awarding.
//!
//! Badges are re-evaluated after every lesson completion against fixed
//! predicates. Awarding only ever sets an unset `earned_at`.

use super::types::{BadgeId, ProgressDocument};
use chrono::NaiveDate;

/// Lesson whose completion earns the hallucination badge.
pub const HALLUCINATION_LESSON_ID: &str = "4-hallucinations";

/// Completed lessons needed for the course badge.
pub const COURSE_COMPLETION_THRESHOLD: usize = 8;

/// Streak needed for the streak badge.
pub const STREAK_BADGE_DAYS: u32 = 3;

/// Total XP needed for the XP badge.
pub const XP_BADGE_THRESHOLD: u32 = 100;

/// Whether `badge` is earned by the document state right after completing `lesson_id`.
pub fn is_earned_by(badge: BadgeId, doc: &ProgressDocument, lesson_id: &str) -> bool {
    match badge {
        BadgeId::FirstLesson => doc.completed_count() >= 1,
        BadgeId::Streak3 => doc.current_streak >= STREAK_BADGE_DAYS,
        BadgeId::Xp100 => doc.total_xp >= XP_BADGE_THRESHOLD,
        BadgeId::HallucinationHunter => lesson_id == HALLUCINATION_LESSON_ID,
        BadgeId::PromptMaster => doc.completed_count() >= COURSE_COMPLETION_THRESHOLD,
    }
}

/// Stamp `today` on every badge whose predicate now holds and is not yet earned.
pub fn award_badges(doc: &ProgressDocument, lesson_id: &str, today: NaiveDate) -> ProgressDocument {
    let mut next = doc.clone();
    for badge in next.badges.iter_mut() {
        if badge.earned_at.is_none() && is_earned_by(badge.id, doc, lesson_id) {
            badge.earned_at = Some(today);
            tracing::info!(badge = badge.id.key(), "Badge earned: {}", badge.id.name());
        }
    }
    next
}

/// Badges earned in `after` but not in `before`. Display only, never persisted.
pub fn newly_awarded(before: &ProgressDocument, after: &ProgressDocument) -> Vec<BadgeId> {
    after
        .badges
        .iter()
        .filter(|b| b.is_earned() && !before.has_badge(b.id))
        .map(|b| b.id)
        .collect()
}
