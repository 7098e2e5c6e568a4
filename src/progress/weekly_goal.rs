//! Weekly lesson goal.
//!
//! The goal is scoped to the calendar week starting Monday. Lessons are
//! credited through a per-week id set, so replays never count twice, and the
//! bonus is paid at most once per week.

use super::types::{ProgressDocument, WeeklyGoalState};
use chrono::{Datelike, Days, NaiveDate};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Whether the stored weekly state belongs to a week other than today's.
pub fn is_stale(goal: &WeeklyGoalState, today: NaiveDate) -> bool {
    goal.week_start != week_start(today)
}

/// Reset the weekly goal to defaults when its week is not the current one.
///
/// The target is not carried over: a new week always starts from the default target.
pub fn roll_week_if_stale(doc: &ProgressDocument, today: NaiveDate) -> ProgressDocument {
    if !is_stale(&doc.weekly_goal, today) {
        return doc.clone();
    }
    let current = week_start(today);
    tracing::debug!(
        from = %doc.weekly_goal.week_start,
        to = %current,
        "Weekly goal rolled over"
    );
    ProgressDocument {
        weekly_goal: WeeklyGoalState::for_week(current),
        ..doc.clone()
    }
}

/// Result of crediting a lesson toward the weekly goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGoalUpdate {
    pub document: ProgressDocument,
    /// True only on the call that paid the bonus
    pub bonus_just_awarded: bool,
}

/// Credit a completed lesson toward this week's goal.
///
/// A lesson already credited this week changes nothing. When the count
/// reaches the target and the bonus is unpaid, the bonus XP is added once.
///
/// `xp_earned` is the XP the lesson paid. It is logged with the credit and
/// does not affect the goal.
pub fn update_weekly_goal_on_lesson_complete(
    doc: &ProgressDocument,
    lesson_id: &str,
    xp_earned: u32,
    today: NaiveDate,
) -> WeeklyGoalUpdate {
    let mut next = roll_week_if_stale(doc, today);

    if !next
        .weekly_goal
        .completed_lesson_ids_this_week
        .insert(lesson_id.to_string())
    {
        tracing::debug!(lesson_id, "Lesson already counted toward this week's goal");
        return WeeklyGoalUpdate {
            document: next,
            bonus_just_awarded: false,
        };
    }

    let goal = &mut next.weekly_goal;
    goal.completed_lessons = goal.completed_lesson_ids_this_week.len() as u32;
    tracing::debug!(
        lesson_id,
        xp_earned,
        completed = goal.completed_lessons,
        target = goal.target_lessons,
        "Weekly goal credited"
    );

    let mut bonus_just_awarded = false;
    if goal.completed_lessons >= goal.target_lessons && !goal.bonus_awarded {
        goal.bonus_awarded = true;
        let bonus = goal.bonus_xp;
        next.total_xp = next.total_xp.saturating_add(bonus);
        bonus_just_awarded = true;
        tracing::info!(bonus, "Weekly goal reached");
    }

    WeeklyGoalUpdate {
        document: next,
        bonus_just_awarded,
    }
}

/// Change this week's lesson target. Does not pay the bonus by itself.
pub fn set_weekly_goal_target(doc: &ProgressDocument, target: u32) -> ProgressDocument {
    let mut next = doc.clone();
    next.weekly_goal.target_lessons = target;
    next
}
