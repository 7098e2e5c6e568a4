//! Unit tests for loading documents written by older versions.

use super::day;
use aiquest::catalog::SkillTag;
use aiquest::progress::types::{DEFAULT_WEEKLY_TARGET, SCHEMA_VERSION};
use aiquest::progress::BadgeId;
use aiquest::storage::migrate;
use serde_json::json;

#[test]
fn test_last_week_goal_resets_to_current_monday() {
    // 2026-10-14 is a Wednesday; its Monday is 2026-10-12.
    let today = day(2026, 10, 14);
    let raw = json!({
        "lessons": {},
        "totalXp": 80,
        "weeklyGoal": {
            "weekStartISO": "2026-10-05",
            "targetLessons": 3,
            "completedLessons": 3,
            "completedLessonIdsThisWeek": ["1-what-is-ai", "2-what-is-llm", "3-tokens-prompts"],
            "bonusXP": 50,
            "bonusAwarded": true
        }
    });

    let doc = migrate(&raw, today);
    assert_eq!(doc.weekly_goal.week_start, day(2026, 10, 12));
    assert_eq!(doc.weekly_goal.completed_lessons, 0);
    assert!(!doc.weekly_goal.bonus_awarded);
    assert_eq!(doc.weekly_goal.target_lessons, DEFAULT_WEEKLY_TARGET);
    assert_eq!(doc.total_xp, 80);
}

#[test]
fn test_first_generation_document() {
    let today = day(2026, 10, 17);
    let raw = json!({
        "lessons": {
            "1-what-is-ai": { "completed": true, "bestScore": 100, "lastCompletedDate": "2026-10-10", "xpEarned": 15 },
            "2-what-is-llm": { "completed": true, "bestScore": 75, "lastCompletedDate": "2026-10-11", "xpEarned": 20 }
        },
        "totalXp": 35,
        "currentStreak": 2,
        "longestStreak": 2,
        "lastActivityDate": "2026-10-11",
        "badges": [
            { "id": "first_lesson", "earnedAt": "2026-10-10" },
            { "id": "streak_3", "earnedAt": null },
            { "id": "xp_100", "earnedAt": null },
            { "id": "hallucination_hunter", "earnedAt": null },
            { "id": "prompt_master", "earnedAt": null }
        ]
    });

    let doc = migrate(&raw, today);
    assert_eq!(doc.schema_version, SCHEMA_VERSION);
    assert_eq!(doc.completed_count(), 2);
    assert_eq!(doc.total_xp, 35);
    assert_eq!(doc.current_streak, 2);
    assert!(doc.has_badge(BadgeId::FirstLesson));
    assert_eq!(doc.skill_scores.get(SkillTag::Prompting), 0);
    assert!(doc.settings.haptics_enabled);
    assert!(doc.owns_item("color_blue"));
    assert_eq!(doc.avatar.equipped.eyes, "happy");
    assert_eq!(doc.last_lesson_run, None);
}

#[test]
fn test_missing_badges_are_added_unearned() {
    let today = day(2026, 10, 17);
    let raw = json!({
        "badges": [
            { "id": "xp_100", "earnedAt": "2026-09-01" }
        ]
    });

    let doc = migrate(&raw, today);
    let ids: Vec<BadgeId> = doc.badges.iter().map(|b| b.id).collect();
    assert_eq!(ids, BadgeId::ALL.to_vec());
    assert!(doc.has_badge(BadgeId::Xp100));
    assert!(!doc.has_badge(BadgeId::FirstLesson));
}

#[test]
fn test_badges_not_an_array() {
    let today = day(2026, 10, 17);
    let doc = migrate(&json!({ "badges": "oops", "totalXp": 12 }), today);
    assert_eq!(doc.badges.len(), BadgeId::ALL.len());
    assert!(doc.badges.iter().all(|b| !b.is_earned()));
    assert_eq!(doc.total_xp, 12);
}

#[test]
fn test_migration_is_stable() {
    let today = day(2026, 10, 17);
    let raw = json!({
        "lessons": { "1-what-is-ai": { "completed": true, "bestScore": 90 } },
        "totalXp": 40,
        "skills": { "safety": 5 }
    });

    let once = migrate(&raw, today);
    let twice = migrate(&serde_json::to_value(&once).unwrap(), today);
    assert_eq!(once, twice);
}
