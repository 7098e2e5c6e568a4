//! Unit tests for lesson completion, streaks, badges and the weekly goal.

use super::{day, fresh};
use aiquest::catalog::{LessonCatalog, SkillTag};
use aiquest::progress::{
    complete_daily_challenge, complete_lesson, lesson_xp_award, BadgeId, LessonRun,
    ProgressDocument,
};

/// Play a lesson with every graded step answered correctly.
fn play(catalog: &LessonCatalog, doc: &ProgressDocument, id: &str, date: chrono::NaiveDate) -> ProgressDocument {
    let lesson = catalog.get(id).expect("lesson in catalog");
    let mut run = LessonRun::new(lesson);
    for step in lesson.steps.iter().filter(|s| s.is_graded()) {
        run.record_answer(&step.id, true);
    }
    run.finish(doc, date).document
}

#[test]
fn test_first_lesson_on_fresh_document() {
    let today = day(2026, 10, 17);
    let doc = complete_lesson(&fresh(), "1-what-is-ai", 100, 15, false, today);

    assert_eq!(doc.total_xp, 15);
    assert_eq!(doc.current_streak, 1);
    assert!(doc.has_badge(BadgeId::FirstLesson));
    assert!(!doc.has_badge(BadgeId::HallucinationHunter));
}

#[test]
fn test_week_long_streak_pays_one_and_a_half() {
    let today = day(2026, 10, 17);
    let mut doc = fresh();
    doc.current_streak = 7;
    doc.longest_streak = 7;

    let next = complete_lesson(&doc, "2-what-is-llm", 100, 20, false, today);
    assert_eq!(next.lesson("2-what-is-llm").unwrap().xp_earned, 30);
}

#[test]
fn test_consecutive_days_build_streak() {
    let catalog = LessonCatalog::builtin();
    // Monday through Thursday of one week.
    let days = [day(2026, 10, 12), day(2026, 10, 13), day(2026, 10, 14), day(2026, 10, 15)];
    let ids = ["1-what-is-ai", "2-what-is-llm", "3-tokens-prompts", "4-hallucinations"];

    let mut doc = ProgressDocument::new(days[0]);
    for (date, id) in days.iter().zip(ids) {
        doc = complete_lesson(&doc, id, 100, catalog.get(id).unwrap().xp_reward, false, *date);
    }

    assert_eq!(doc.current_streak, 4);
    assert_eq!(doc.longest_streak, 4);
    assert!(doc.has_badge(BadgeId::Streak3));
    assert!(doc.has_badge(BadgeId::HallucinationHunter));
    // Fourth lesson ran on a 3-day streak: 25 * 1.2.
    assert_eq!(doc.lesson("4-hallucinations").unwrap().xp_earned, 30);
    assert_eq!(doc.total_xp, 15 + 20 + 20 + 30);
}

#[test]
fn test_missed_day_resets_streak_but_not_longest() {
    let mut doc = ProgressDocument::new(day(2026, 10, 12));
    doc = complete_lesson(&doc, "a", 100, 10, false, day(2026, 10, 12));
    doc = complete_lesson(&doc, "b", 100, 10, false, day(2026, 10, 13));
    assert_eq!(doc.current_streak, 2);

    doc = complete_lesson(&doc, "c", 100, 10, false, day(2026, 10, 16));
    assert_eq!(doc.current_streak, 1);
    assert_eq!(doc.longest_streak, 2);
}

#[test]
fn test_fast_bonus_rounding() {
    let award = lesson_xp_award(0, 15, true);
    assert_eq!(award.lesson_xp, 15);
    // 15 * 0.25 = 3.75
    assert_eq!(award.fast_bonus, 4);
    assert_eq!(award.total(), 19);

    let award = lesson_xp_award(14, 25, true);
    assert_eq!(award.lesson_xp, 50);
    assert_eq!(award.fast_bonus, 13);
}

#[test]
fn test_weekly_bonus_through_lesson_runs() {
    let catalog = LessonCatalog::builtin();
    let monday = day(2026, 10, 12);
    let mut doc = ProgressDocument::new(monday);

    doc = play(&catalog, &doc, "1-what-is-ai", monday);
    doc = play(&catalog, &doc, "1-what-is-ai", monday);
    doc = play(&catalog, &doc, "2-what-is-llm", monday);
    assert!(!doc.weekly_goal.bonus_awarded);
    assert_eq!(doc.weekly_goal.completed_lessons, 2);

    let before = doc.total_xp;
    doc = play(&catalog, &doc, "3-tokens-prompts", monday);
    assert!(doc.weekly_goal.bonus_awarded);
    assert_eq!(doc.weekly_goal.completed_lessons, 3);
    assert_eq!(doc.total_xp, before + 20 + 30);

    let before = doc.total_xp;
    doc = play(&catalog, &doc, "4-hallucinations", monday);
    assert_eq!(doc.total_xp, before + 25);
}

#[test]
fn test_new_week_starts_over() {
    let catalog = LessonCatalog::builtin();
    let mut doc = ProgressDocument::new(day(2026, 10, 12));
    for id in ["1-what-is-ai", "2-what-is-llm", "3-tokens-prompts"] {
        doc = play(&catalog, &doc, id, day(2026, 10, 12));
    }
    assert!(doc.weekly_goal.bonus_awarded);

    let next_monday = day(2026, 10, 19);
    doc = play(&catalog, &doc, "1-what-is-ai", next_monday);
    assert_eq!(doc.weekly_goal.week_start, next_monday);
    assert_eq!(doc.weekly_goal.completed_lessons, 1);
    assert!(!doc.weekly_goal.bonus_awarded);
}

#[test]
fn test_skill_xp_only_for_correct_answers() {
    let catalog = LessonCatalog::builtin();
    let lesson = catalog.get("5-bias-fairness").unwrap();
    let today = day(2026, 10, 17);

    let mut run = LessonRun::new(lesson);
    run.record_answer("s3", true);
    run.record_answer("s4", false);
    run.record_answer("s5", true);
    run.record_answer("s6", false);
    let outcome = run.finish(&fresh(), today);

    assert_eq!(outcome.score, 50);
    assert_eq!(outcome.document.skill_scores.get(SkillTag::Bias), 10);
    assert_eq!(
        outcome.summary.skill_xp_earned.get(&SkillTag::Bias),
        Some(&10)
    );
}

#[test]
fn test_xp_and_badges_never_go_backward() {
    let catalog = LessonCatalog::builtin();
    let mut doc = ProgressDocument::new(day(2026, 10, 12));
    let mut date = day(2026, 10, 12);

    for lesson in catalog.lessons() {
        let next = play(&catalog, &doc, &lesson.id, date);
        assert!(next.total_xp >= doc.total_xp);
        assert!(next.longest_streak >= next.current_streak);
        for badge in &doc.badges {
            if let Some(at) = badge.earned_at {
                assert_eq!(next.badge(badge.id).unwrap().earned_at, Some(at));
            }
        }
        doc = next;
        date = date.succ_opt().unwrap();
    }

    assert_eq!(doc.completed_count(), catalog.len());
    for id in BadgeId::ALL {
        assert!(doc.has_badge(id), "{:?} should be earned", id);
    }
}

#[test]
fn test_daily_challenge_does_not_touch_streak() {
    let today = day(2026, 10, 17);
    let doc = complete_daily_challenge(&fresh(), 25, today);
    assert_eq!(doc.total_xp, 25);
    assert_eq!(doc.current_streak, 0);
    assert_eq!(doc.last_activity_date, None);
}
