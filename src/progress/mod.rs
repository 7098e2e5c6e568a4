//! Progress engine.
//!
//! Derives and mutates the learner's progress document:
//! - XP, levels and streaks
//! - Badges and the weekly lesson goal
//! - Tier gating of the lesson map
//!
//! Mutations take the current document and return the next one.

pub mod badges;
pub mod completion;
pub mod level;
pub mod run;
pub mod streak;
pub mod tiers;
pub mod types;
pub mod weekly_goal;

// Re-exports for convenience
pub use completion::{
    add_skill_xp, can_access_daily_challenge, complete_daily_challenge, complete_lesson,
    daily_challenge_xp, lesson_xp_award, reset_progress, set_last_lesson_run, set_tier_collapsed,
    update_settings, XpAward,
};
pub use level::{level_from_xp, xp_for_next_level, xp_progress_in_level};
pub use run::{LessonRun, RunOutcome};
pub use streak::{compute_streak, streak_multiplier, update_streaks};
pub use tiers::{
    is_lesson_unlocked, is_tier_complete, is_tier_locked, next_up_lesson_id, tier_progress,
    unlock_requirement, TierProgress,
};
pub use types::{
    AvatarEquipped, AvatarState, Badge, BadgeId, LastLessonRun, LessonRecord, ProgressDocument,
    Settings, SettingsUpdate, SkillScores, Theme, UiState, WeeklyGoalState,
};
pub use weekly_goal::{set_weekly_goal_target, update_weekly_goal_on_lesson_complete, WeeklyGoalUpdate};
