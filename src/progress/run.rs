//! A single play-through of a lesson.
//!
//! `LessonRun` collects step outcomes while the learner plays, then applies
//! the completion mutations in their fixed order: lesson completion, skill
//! XP, weekly goal, run snapshot. Badge and level-up detection compare
//! against the document as it was before the run.

use super::badges::newly_awarded;
use super::completion::{add_skill_xp, complete_lesson, lesson_xp_award, set_last_lesson_run};
use super::level::level_from_xp;
use super::types::{LastLessonRun, ProgressDocument};
use super::weekly_goal::update_weekly_goal_on_lesson_complete;
use crate::catalog::{Lesson, SkillTag};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Document with every completion step applied
    pub document: ProgressDocument,
    /// Snapshot stored as `last_lesson_run`
    pub summary: LastLessonRun,
    /// Score recorded for the run
    pub score: u8,
    /// Whether this run paid the weekly bonus
    pub weekly_bonus_awarded: bool,
}

/// In-progress lesson play-through.
#[derive(Debug, Clone)]
pub struct LessonRun<'a> {
    lesson: &'a Lesson,
    correct_steps: BTreeSet<String>,
    answered_steps: BTreeSet<String>,
    fast: bool,
}

impl<'a> LessonRun<'a> {
    /// Start a run of `lesson`.
    pub fn new(lesson: &'a Lesson) -> Self {
        Self {
            lesson,
            correct_steps: BTreeSet::new(),
            answered_steps: BTreeSet::new(),
            fast: false,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        self.lesson
    }

    /// Record the answer to a step. Only the first answer to a step counts.
    /// Returns false for unknown or ungraded steps.
    pub fn record_answer(&mut self, step_id: &str, correct: bool) -> bool {
        let graded = self
            .lesson
            .steps
            .iter()
            .any(|s| s.id == step_id && s.is_graded());
        if !graded || !self.answered_steps.insert(step_id.to_string()) {
            return false;
        }
        if correct {
            self.correct_steps.insert(step_id.to_string());
        }
        true
    }

    /// Mark the run as finished quickly enough for the fast bonus.
    pub fn set_fast(&mut self, fast: bool) {
        self.fast = fast;
    }

    /// Percentage of graded steps answered correctly. A lesson without graded steps scores 100.
    pub fn score(&self) -> u8 {
        let graded = self.lesson.graded_step_count();
        if graded == 0 {
            return 100;
        }
        ((self.correct_steps.len() as f64 / graded as f64) * 100.0).round() as u8
    }

    /// Skill XP earned by the correct answers so far.
    pub fn skill_xp(&self) -> BTreeMap<SkillTag, u32> {
        let mut earned = BTreeMap::new();
        for step in &self.lesson.steps {
            if !self.correct_steps.contains(&step.id) {
                continue;
            }
            if let Some((tag, xp)) = step.skill_award() {
                *earned.entry(tag).or_insert(0) += xp;
            }
        }
        earned
    }

    /// Apply the run to `doc`.
    pub fn finish(self, doc: &ProgressDocument, today: NaiveDate) -> RunOutcome {
        let lesson_id = self.lesson.id.as_str();
        let score = self.score();
        let award = lesson_xp_award(doc.current_streak, self.lesson.xp_reward, self.fast);

        let mut next = complete_lesson(doc, lesson_id, score, self.lesson.xp_reward, self.fast, today);

        let skill_xp = self.skill_xp();
        for (tag, xp) in &skill_xp {
            next = add_skill_xp(&next, *tag, *xp);
        }

        let weekly = update_weekly_goal_on_lesson_complete(&next, lesson_id, award.total(), today);
        let next = weekly.document;

        let new_level = level_from_xp(next.total_xp);
        let leveled_up = new_level > level_from_xp(doc.total_xp);
        if leveled_up {
            tracing::info!(new_level, "Level up");
        }

        let summary = LastLessonRun {
            lesson_id: lesson_id.to_string(),
            xp_earned: award.total(),
            skill_xp_earned: skill_xp,
            badges_awarded: newly_awarded(doc, &next),
            leveled_up,
            new_level,
        };
        let document = set_last_lesson_run(&next, summary.clone());

        RunOutcome {
            document,
            summary,
            score,
            weekly_bonus_awarded: weekly.bonus_just_awarded,
        }
    }
}
