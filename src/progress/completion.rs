//! Document mutations.
//!
//! Every function here takes the current document by reference and returns
//! the next one. Nothing is persisted; the caller saves once after chaining.

use super::badges::award_badges;
use super::streak::{streak_multiplier, update_streaks};
use super::types::{LastLessonRun, LessonRecord, ProgressDocument, SettingsUpdate};
use crate::catalog::{LessonTier, SkillTag};
use chrono::NaiveDate;

/// Share of the streak-adjusted reward paid as the fast-completion bonus.
pub const FAST_BONUS_RATE: f64 = 0.25;

/// Highest storable score.
pub const MAX_SCORE: u8 = 100;

/// XP granted for one lesson completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XpAward {
    /// Streak-adjusted reward, stored on the lesson record
    pub lesson_xp: u32,
    /// Fast-completion bonus, added to the total only
    pub fast_bonus: u32,
}

impl XpAward {
    /// Everything that lands in `total_xp`.
    pub fn total(&self) -> u32 {
        self.lesson_xp.saturating_add(self.fast_bonus)
    }
}

/// Compute the XP for a completion given the streak held before it.
pub fn lesson_xp_award(current_streak: u32, base_xp: u32, fast: bool) -> XpAward {
    let multiplier = streak_multiplier(current_streak);
    let lesson_xp = (base_xp as f64 * multiplier).round() as u32;
    let fast_bonus = if fast {
        (base_xp as f64 * multiplier * FAST_BONUS_RATE).round() as u32
    } else {
        0
    };
    XpAward {
        lesson_xp,
        fast_bonus,
    }
}

/// Record a lesson completion.
///
/// Applies the streak multiplier (from the streak before this completion),
/// upserts the lesson record, adds XP, recomputes the streak and awards
/// badges against the post-completion totals. Skill XP, weekly goal and the
/// run snapshot are separate steps for the caller.
pub fn complete_lesson(
    doc: &ProgressDocument,
    lesson_id: &str,
    score: u8,
    base_xp: u32,
    fast: bool,
    today: NaiveDate,
) -> ProgressDocument {
    let award = lesson_xp_award(doc.current_streak, base_xp, fast);
    let score = score.min(MAX_SCORE);

    let mut next = doc.clone();
    let existing = next.lesson_records.get(lesson_id).cloned().unwrap_or_default();
    next.lesson_records.insert(
        lesson_id.to_string(),
        LessonRecord {
            completed: true,
            best_score: existing.best_score.max(score),
            last_completed_date: Some(today),
            xp_earned: existing.xp_earned.saturating_add(award.lesson_xp),
        },
    );
    next.total_xp = next.total_xp.saturating_add(award.total());
    next.last_activity_date = Some(today);

    tracing::debug!(
        lesson_id,
        score,
        lesson_xp = award.lesson_xp,
        fast_bonus = award.fast_bonus,
        "Lesson completed"
    );

    let next = update_streaks(&next, today);
    award_badges(&next, lesson_id, today)
}

/// Add skill XP for one correctly answered step.
pub fn add_skill_xp(doc: &ProgressDocument, skill: SkillTag, xp: u32) -> ProgressDocument {
    let mut next = doc.clone();
    let slot = next.skill_scores.get_mut(skill);
    *slot = slot.saturating_add(xp);
    next
}

/// The daily challenge can be played once per calendar day.
pub fn can_access_daily_challenge(doc: &ProgressDocument, today: NaiveDate) -> bool {
    doc.last_daily_challenge_date != Some(today)
}

/// Questions in one daily challenge.
pub const DAILY_CHALLENGE_STEPS: u32 = 5;

/// XP for a daily challenge: the base bonus plus one per correct answer.
pub fn daily_challenge_xp(base_bonus: u32, correct: u32) -> u32 {
    base_bonus.saturating_add(correct.min(DAILY_CHALLENGE_STEPS))
}

/// Stamp today's daily challenge and add its XP. A second call on the same day changes nothing.
pub fn complete_daily_challenge(doc: &ProgressDocument, xp: u32, today: NaiveDate) -> ProgressDocument {
    if !can_access_daily_challenge(doc, today) {
        tracing::debug!("Daily challenge already completed today");
        return doc.clone();
    }
    tracing::debug!(xp, "Daily challenge completed");
    ProgressDocument {
        last_daily_challenge_date: Some(today),
        total_xp: doc.total_xp.saturating_add(xp),
        ..doc.clone()
    }
}

/// Replace the last-run snapshot.
pub fn set_last_lesson_run(doc: &ProgressDocument, run: LastLessonRun) -> ProgressDocument {
    ProgressDocument {
        last_lesson_run: Some(run),
        ..doc.clone()
    }
}

/// Apply a partial settings change.
pub fn update_settings(doc: &ProgressDocument, update: &SettingsUpdate) -> ProgressDocument {
    let mut next = doc.clone();
    let settings = &mut next.settings;
    if let Some(theme) = update.theme {
        settings.theme = theme;
    }
    if let Some(muted) = update.sound_muted {
        settings.sound_muted = muted;
    }
    if let Some(haptics) = update.haptics_enabled {
        settings.haptics_enabled = haptics;
    }
    if let Some(large) = update.large_text {
        settings.large_text = large;
    }
    if let Some(reduce) = update.reduce_motion {
        settings.reduce_motion = reduce;
    }
    next
}

/// Remember whether a tier section is collapsed on the lesson map.
pub fn set_tier_collapsed(doc: &ProgressDocument, tier: LessonTier, collapsed: bool) -> ProgressDocument {
    let mut next = doc.clone();
    next.ui_state.tier_collapsed.insert(tier, collapsed);
    next
}

/// Throw everything away and start over.
pub fn reset_progress(today: NaiveDate) -> ProgressDocument {
    tracing::info!("Progress reset to defaults");
    ProgressDocument::new(today)
}
