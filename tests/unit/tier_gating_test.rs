//! Unit tests for tier gating and the lesson map.

use super::fresh;
use aiquest::catalog::{Lesson, LessonCatalog, LessonTier, Step, StepKind};
use aiquest::progress::{
    is_lesson_unlocked, is_tier_complete, is_tier_locked, next_up_lesson_id, set_tier_collapsed,
    tier_progress, unlock_requirement, LessonRecord, ProgressDocument,
};

/// Mark lessons completed without going through the XP path.
fn mark_completed(doc: &mut ProgressDocument, ids: &[&str]) {
    for id in ids {
        doc.lesson_records.insert(
            id.to_string(),
            LessonRecord {
                completed: true,
                best_score: 100,
                last_completed_date: None,
                xp_earned: 0,
            },
        );
    }
}

fn small_lesson(id: &str, tier: LessonTier) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: id.to_uppercase(),
        tier,
        xp_reward: 10,
        steps: vec![Step {
            id: "s1".to_string(),
            kind: StepKind::Mcq,
            skill_tag: None,
            skill_xp: None,
        }],
        badge_id: None,
        summary_takeaways: Vec::new(),
    }
}

#[test]
fn test_master_locked_on_xp_alone() {
    let catalog = LessonCatalog::builtin();
    let mut doc = fresh();
    mark_completed(&mut doc, &catalog.tier_ids(LessonTier::Beginner));
    mark_completed(&mut doc, &catalog.tier_ids(LessonTier::Explorer));

    doc.total_xp = 299;
    assert!(is_tier_locked(&catalog, LessonTier::Master, &doc));
    assert!(!is_lesson_unlocked(&catalog, "12-deepfakes", &doc));

    doc.total_xp = 300;
    assert!(!is_tier_locked(&catalog, LessonTier::Master, &doc));
    assert!(is_lesson_unlocked(&catalog, "12-deepfakes", &doc));
}

#[test]
fn test_next_up_walks_tiers_in_order() {
    let catalog = LessonCatalog::builtin();
    let mut doc = fresh();
    assert_eq!(next_up_lesson_id(&catalog, &doc), Some("1-what-is-ai"));

    let beginner = catalog.tier_ids(LessonTier::Beginner);
    mark_completed(&mut doc, &beginner[..beginner.len() - 1]);
    assert_eq!(
        next_up_lesson_id(&catalog, &doc),
        Some("13-ai-has-no-feelings")
    );

    mark_completed(&mut doc, &beginner);
    mark_completed(&mut doc, &catalog.tier_ids(LessonTier::Explorer));
    // Master still needs XP, so nothing is up next.
    assert_eq!(next_up_lesson_id(&catalog, &doc), None);

    doc.total_xp = 400;
    assert_eq!(next_up_lesson_id(&catalog, &doc), Some("12-deepfakes"));
}

#[test]
fn test_completed_lessons_stay_unlocked() {
    let catalog = LessonCatalog::builtin();
    let mut doc = fresh();
    mark_completed(&mut doc, &["1-what-is-ai", "2-what-is-llm"]);
    assert!(is_lesson_unlocked(&catalog, "1-what-is-ai", &doc));
    assert!(is_lesson_unlocked(&catalog, "2-what-is-llm", &doc));
    assert!(is_lesson_unlocked(&catalog, "3-tokens-prompts", &doc));
    assert!(!is_lesson_unlocked(&catalog, "4-hallucinations", &doc));
    assert_eq!(
        unlock_requirement(&catalog, "4-hallucinations", &doc).as_deref(),
        Some("Complete \"Tokens & Prompts\" to unlock")
    );
}

#[test]
fn test_empty_tier_is_never_complete() {
    let catalog = LessonCatalog::new(vec![
        small_lesson("b1", LessonTier::Beginner),
        small_lesson("e1", LessonTier::Explorer),
    ])
    .unwrap();
    let mut doc = fresh();
    mark_completed(&mut doc, &["b1", "e1"]);

    assert!(is_tier_complete(&catalog, LessonTier::Beginner, &doc));
    assert!(!is_tier_complete(&catalog, LessonTier::Master, &doc));
    assert_eq!(tier_progress(&catalog, LessonTier::Master, &doc).total, 0);
}

#[test]
fn test_duplicate_lesson_ids_rejected() {
    let result = LessonCatalog::new(vec![
        small_lesson("b1", LessonTier::Beginner),
        small_lesson("b1", LessonTier::Explorer),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_tier_collapse_is_presentation_only() {
    let catalog = LessonCatalog::builtin();
    let doc = fresh();
    let collapsed = set_tier_collapsed(&doc, LessonTier::Beginner, true);

    assert_eq!(
        collapsed.ui_state.tier_collapsed.get(&LessonTier::Beginner),
        Some(&true)
    );
    assert_eq!(
        next_up_lesson_id(&catalog, &collapsed),
        next_up_lesson_id(&catalog, &doc)
    );
}
