//! Structural migration of stored progress documents.
//!
//! Any JSON value is accepted. Each field is read on its own and falls back
//! to its default when missing or malformed, so a corrupt field loses only
//! itself. Derived invariants are restored after the merge.

use crate::catalog::{LessonTier, SkillTag};
use crate::progress::types::{
    default_badges, AvatarEquipped, AvatarState, LastLessonRun, LessonRecord, ProgressDocument,
    Settings, SkillScores, UiState, WeeklyGoalState, DEFAULT_WEEKLY_BONUS_XP,
    DEFAULT_WEEKLY_TARGET, SCHEMA_VERSION, STARTER_INVENTORY,
};
use crate::progress::weekly_goal::week_start;
use crate::progress::BadgeId;
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Schema version assumed for documents written before the tag existed.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

/// Turn whatever was stored into a complete, current document.
pub fn migrate(raw: &Value, today: NaiveDate) -> ProgressDocument {
    let Some(obj) = raw.as_object() else {
        tracing::warn!("Stored progress is not an object, using defaults");
        return ProgressDocument::new(today);
    };

    let stored_version = obj
        .get("schemaVersion")
        .and_then(uint)
        .unwrap_or(LEGACY_SCHEMA_VERSION);
    if stored_version < SCHEMA_VERSION {
        tracing::info!(
            from = stored_version,
            to = SCHEMA_VERSION,
            "Migrating progress document"
        );
    }

    let current_streak = obj.get("currentStreak").and_then(uint).unwrap_or(0);
    let longest_streak = obj
        .get("longestStreak")
        .and_then(uint)
        .unwrap_or(0)
        .max(current_streak);

    ProgressDocument {
        schema_version: SCHEMA_VERSION,
        lesson_records: obj.get("lessons").map(lesson_records).unwrap_or_default(),
        total_xp: obj.get("totalXp").and_then(uint).unwrap_or(0),
        current_streak,
        longest_streak,
        last_activity_date: obj.get("lastActivityDate").and_then(date),
        badges: badges(obj.get("badges")),
        skill_scores: obj.get("skills").map(skill_scores).unwrap_or_default(),
        last_daily_challenge_date: obj.get("lastDailyChallengeDate").and_then(date),
        settings: obj.get("settings").map(settings).unwrap_or_default(),
        weekly_goal: weekly_goal(obj.get("weeklyGoal"), today),
        last_lesson_run: obj
            .get("lastLessonRun")
            .and_then(|v| serde_json::from_value::<LastLessonRun>(v.clone()).ok()),
        ui_state: obj.get("ui").map(ui_state).unwrap_or_default(),
        avatar: avatar(obj.get("avatar")),
    }
}

/// Non-negative integer, accepting floats written by older clients.
fn uint(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return Some(n.min(u32::MAX as u64) as u32);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.round().min(u32::MAX as f64) as u32)
    } else {
        None
    }
}

/// Calendar date from `YYYY-MM-DD`, or the date part of a full timestamp.
fn date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn lesson_records(value: &Value) -> BTreeMap<String, LessonRecord> {
    let Some(lessons) = value.as_object() else {
        return BTreeMap::new();
    };
    lessons
        .iter()
        .filter_map(|(id, record)| {
            let record = record.as_object()?;
            Some((
                id.clone(),
                LessonRecord {
                    completed: record.get("completed").and_then(Value::as_bool).unwrap_or(false),
                    best_score: record
                        .get("bestScore")
                        .and_then(uint)
                        .unwrap_or(0)
                        .min(100) as u8,
                    last_completed_date: record.get("lastCompletedDate").and_then(date),
                    xp_earned: record.get("xpEarned").and_then(uint).unwrap_or(0),
                },
            ))
        })
        .collect()
}

/// Merge stored badges over the full catalog by id.
fn badges(value: Option<&Value>) -> Vec<crate::progress::Badge> {
    let mut earned: BTreeMap<BadgeId, NaiveDate> = BTreeMap::new();
    for entry in value.and_then(Value::as_array).into_iter().flatten() {
        let Some(id) = entry.get("id").and_then(Value::as_str).and_then(BadgeId::from_key) else {
            continue;
        };
        if let Some(at) = entry.get("earnedAt").and_then(date) {
            earned.insert(id, at);
        }
    }

    let mut badges = default_badges();
    for badge in badges.iter_mut() {
        badge.earned_at = earned.get(&badge.id).copied();
    }
    badges
}

fn skill_scores(value: &Value) -> SkillScores {
    let mut scores = SkillScores::default();
    for tag in SkillTag::ALL {
        if let Some(score) = value.get(tag.key()).and_then(uint) {
            *scores.get_mut(tag) = score;
        }
    }
    scores
}

fn settings(value: &Value) -> Settings {
    let defaults = Settings::default();
    let flag = |key: &str, default: bool| value.get(key).and_then(Value::as_bool).unwrap_or(default);
    Settings {
        theme: value
            .get("theme")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.theme),
        sound_muted: flag("soundMuted", defaults.sound_muted),
        haptics_enabled: flag("hapticsEnabled", defaults.haptics_enabled),
        large_text: flag("largeText", defaults.large_text),
        reduce_motion: value.get("reduceMotion").and_then(Value::as_bool),
    }
}

/// Weekly goal for the current week. A stored goal from another week resets.
fn weekly_goal(value: Option<&Value>, today: NaiveDate) -> WeeklyGoalState {
    let current = week_start(today);
    let Some(goal) = value.and_then(Value::as_object) else {
        return WeeklyGoalState::for_week(current);
    };

    match goal.get("weekStartISO").and_then(date) {
        Some(stored) if stored == current => {}
        stored => {
            if let Some(stored) = stored {
                tracing::debug!(from = %stored, to = %current, "Stored weekly goal is stale");
            }
            return WeeklyGoalState::for_week(current);
        }
    }

    let ids: BTreeSet<String> = goal
        .get("completedLessonIdsThisWeek")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(string).collect())
        .unwrap_or_default();

    WeeklyGoalState {
        week_start: current,
        target_lessons: goal
            .get("targetLessons")
            .and_then(uint)
            .unwrap_or(DEFAULT_WEEKLY_TARGET),
        completed_lessons: ids.len() as u32,
        completed_lesson_ids_this_week: ids,
        bonus_xp: goal
            .get("bonusXP")
            .and_then(uint)
            .unwrap_or(DEFAULT_WEEKLY_BONUS_XP),
        bonus_awarded: goal
            .get("bonusAwarded")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn ui_state(value: &Value) -> UiState {
    let tier_collapsed = value
        .get("learnTierCollapsed")
        .and_then(Value::as_object)
        .map(|tiers| {
            tiers
                .iter()
                .filter_map(|(tier, collapsed)| {
                    Some((tier.parse::<LessonTier>().ok()?, collapsed.as_bool()?))
                })
                .collect()
        })
        .unwrap_or_default();
    UiState { tier_collapsed }
}

fn avatar(value: Option<&Value>) -> AvatarState {
    let mut state = AvatarState::default();
    let Some(avatar) = value.and_then(Value::as_object) else {
        return state;
    };

    if let Some(equipped) = avatar.get("equipped").and_then(Value::as_object) {
        state.equipped = equipped_slots(equipped);
    }
    if let Some(items) = avatar.get("inventory").and_then(Value::as_array) {
        state.inventory.extend(items.iter().filter_map(string));
    }
    state
        .inventory
        .extend(STARTER_INVENTORY.iter().map(|s| s.to_string()));
    state
}

fn equipped_slots(equipped: &Map<String, Value>) -> AvatarEquipped {
    let defaults = AvatarEquipped::default();
    let slot = |key: &str| equipped.get(key).and_then(string);
    AvatarEquipped {
        body_color: slot("bodyColor").unwrap_or(defaults.body_color),
        eyes: slot("eyes").unwrap_or(defaults.eyes),
        headgear: slot("headgear"),
        accessory: slot("accessory"),
        effect: slot("effect"),
    }
}
