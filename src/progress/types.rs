//! Progress document types.
//!
//! The `ProgressDocument` is the single persisted aggregate for a learner.
//! Wire names follow the stored JSON format so older documents load as-is.

use crate::catalog::{LessonTier, SkillTag};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Version tag written into every saved document.
pub const SCHEMA_VERSION: u32 = 2;

/// Weekly lesson target after a reset.
pub const DEFAULT_WEEKLY_TARGET: u32 = 3;

/// Bonus XP for hitting the weekly target.
pub const DEFAULT_WEEKLY_BONUS_XP: u32 = 30;

/// Body color equipped on a fresh document.
pub const DEFAULT_BODY_COLOR: &str = "blue";

/// Eyes equipped on a fresh document.
pub const DEFAULT_EYES: &str = "happy";

/// Items every learner owns from the start.
pub const STARTER_INVENTORY: [&str; 2] = ["color_blue", "eyes_happy"];

/// Per-lesson record, created on first completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRecord {
    /// Whether the lesson has been finished at least once
    pub completed: bool,
    /// Best score so far (0-100)
    pub best_score: u8,
    /// Date of the most recent completion
    pub last_completed_date: Option<NaiveDate>,
    /// XP accumulated across all completions (excludes fast bonuses)
    pub xp_earned: u32,
}

impl Default for LessonRecord {
    fn default() -> Self {
        Self {
            completed: false,
            best_score: 0,
            last_completed_date: None,
            xp_earned: 0,
        }
    }
}

/// Badge identifiers. The catalog is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BadgeId {
    #[serde(rename = "first_lesson")]
    FirstLesson,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "xp_100")]
    Xp100,
    #[serde(rename = "hallucination_hunter")]
    HallucinationHunter,
    #[serde(rename = "prompt_master")]
    PromptMaster,
}

impl BadgeId {
    /// Every badge in display order.
    pub const ALL: [BadgeId; 5] = [
        BadgeId::FirstLesson,
        BadgeId::Streak3,
        BadgeId::Xp100,
        BadgeId::HallucinationHunter,
        BadgeId::PromptMaster,
    ];

    /// Wire key.
    pub fn key(&self) -> &'static str {
        match self {
            BadgeId::FirstLesson => "first_lesson",
            BadgeId::Streak3 => "streak_3",
            BadgeId::Xp100 => "xp_100",
            BadgeId::HallucinationHunter => "hallucination_hunter",
            BadgeId::PromptMaster => "prompt_master",
        }
    }

    /// Parse a wire key.
    pub fn from_key(key: &str) -> Option<BadgeId> {
        BadgeId::ALL.into_iter().find(|b| b.key() == key)
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            BadgeId::FirstLesson => "First Step",
            BadgeId::Streak3 => "On Fire",
            BadgeId::Xp100 => "Century",
            BadgeId::HallucinationHunter => "Hallucination Hunter",
            BadgeId::PromptMaster => "Prompt Master",
        }
    }

    /// How the badge is earned.
    pub fn description(&self) -> &'static str {
        match self {
            BadgeId::FirstLesson => "Complete your first lesson",
            BadgeId::Streak3 => "3-day streak",
            BadgeId::Xp100 => "Earn 100 XP",
            BadgeId::HallucinationHunter => "Complete the Hallucinations lesson",
            BadgeId::PromptMaster => "Complete 8 lessons",
        }
    }

    /// Icon shown next to the badge name.
    pub fn emoji(&self) -> &'static str {
        match self {
            BadgeId::FirstLesson => "🌟",
            BadgeId::Streak3 => "🔥",
            BadgeId::Xp100 => "💯",
            BadgeId::HallucinationHunter => "🔍",
            BadgeId::PromptMaster => "🎓",
        }
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Badge state. `earned_at` is set once and never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub earned_at: Option<NaiveDate>,
}

impl Badge {
    /// Unearned badge.
    pub fn locked(id: BadgeId) -> Self {
        Self { id, earned_at: None }
    }

    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}

/// Full badge list with nothing earned.
pub fn default_badges() -> Vec<Badge> {
    BadgeId::ALL.into_iter().map(Badge::locked).collect()
}

/// Per-skill accumulators. Always carries every skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScores {
    pub prompting: u32,
    pub safety: u32,
    pub bias: u32,
    pub hallucination_detection: u32,
    pub ai_understanding: u32,
}

impl SkillScores {
    /// Score for one skill.
    pub fn get(&self, skill: SkillTag) -> u32 {
        match skill {
            SkillTag::Prompting => self.prompting,
            SkillTag::Safety => self.safety,
            SkillTag::Bias => self.bias,
            SkillTag::HallucinationDetection => self.hallucination_detection,
            SkillTag::AiUnderstanding => self.ai_understanding,
        }
    }

    /// Mutable slot for one skill.
    pub fn get_mut(&mut self, skill: SkillTag) -> &mut u32 {
        match skill {
            SkillTag::Prompting => &mut self.prompting,
            SkillTag::Safety => &mut self.safety,
            SkillTag::Bias => &mut self.bias,
            SkillTag::HallucinationDetection => &mut self.hallucination_detection,
            SkillTag::AiUnderstanding => &mut self.ai_understanding,
        }
    }

    /// Iterate (skill, score) pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillTag, u32)> + '_ {
        SkillTag::ALL.into_iter().map(move |tag| (tag, self.get(tag)))
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "Light"),
            Theme::Dark => write!(f, "Dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Learner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Color theme
    pub theme: Theme,
    /// Mute sound effects
    pub sound_muted: bool,
    /// Vibrate on feedback
    pub haptics_enabled: bool,
    /// Larger body text
    pub large_text: bool,
    /// Reduced motion override; `None` follows the OS preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_motion: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sound_muted: false,
            haptics_enabled: true,
            large_text: false,
            reduce_motion: None,
        }
    }
}

/// Partial settings change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub sound_muted: Option<bool>,
    pub haptics_enabled: Option<bool>,
    pub large_text: Option<bool>,
    /// `Some(None)` clears the override
    pub reduce_motion: Option<Option<bool>>,
}

/// Week-scoped lesson goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoalState {
    /// Monday of the week this state belongs to
    #[serde(rename = "weekStartISO")]
    pub week_start: NaiveDate,
    /// Lessons to complete this week
    pub target_lessons: u32,
    /// Distinct lessons completed this week
    pub completed_lessons: u32,
    /// Lessons already credited this week
    pub completed_lesson_ids_this_week: BTreeSet<String>,
    /// Bonus XP for reaching the target
    #[serde(rename = "bonusXP")]
    pub bonus_xp: u32,
    /// Whether the bonus was paid this week
    pub bonus_awarded: bool,
}

impl WeeklyGoalState {
    /// Fresh state for the week starting on `week_start`.
    pub fn for_week(week_start: NaiveDate) -> Self {
        Self {
            week_start,
            target_lessons: DEFAULT_WEEKLY_TARGET,
            completed_lessons: 0,
            completed_lesson_ids_this_week: BTreeSet::new(),
            bonus_xp: DEFAULT_WEEKLY_BONUS_XP,
            bonus_awarded: false,
        }
    }

    /// Progress toward the target (0..=100).
    pub fn percent(&self) -> f32 {
        if self.target_lessons == 0 {
            return 100.0;
        }
        ((self.completed_lessons as f32 / self.target_lessons as f32) * 100.0).min(100.0)
    }

    /// Whether this week's target has been reached.
    pub fn is_met(&self) -> bool {
        self.completed_lessons >= self.target_lessons
    }
}

/// Summary of the most recent lesson run, for the completion screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastLessonRun {
    pub lesson_id: String,
    /// XP earned this run, fast bonus included
    pub xp_earned: u32,
    /// Skill XP earned this run
    #[serde(rename = "skillXPEarnedBySkill", default)]
    pub skill_xp_earned: BTreeMap<SkillTag, u32>,
    /// Badges first earned during this run
    #[serde(default)]
    pub badges_awarded: Vec<BadgeId>,
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Presentation-only state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    #[serde(
        rename = "learnTierCollapsed",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tier_collapsed: BTreeMap<LessonTier, bool>,
}

/// Equipped avatar slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarEquipped {
    pub body_color: String,
    pub eyes: String,
    pub headgear: Option<String>,
    pub accessory: Option<String>,
    pub effect: Option<String>,
}

impl Default for AvatarEquipped {
    fn default() -> Self {
        Self {
            body_color: DEFAULT_BODY_COLOR.to_string(),
            eyes: DEFAULT_EYES.to_string(),
            headgear: None,
            accessory: None,
            effect: None,
        }
    }
}

/// Avatar customization state. The inventory only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarState {
    pub equipped: AvatarEquipped,
    pub inventory: BTreeSet<String>,
}

impl Default for AvatarState {
    fn default() -> Self {
        Self {
            equipped: AvatarEquipped::default(),
            inventory: STARTER_INVENTORY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The learner's whole progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    /// Writer schema version
    pub schema_version: u32,
    /// Sparse per-lesson records; absent means never attempted
    #[serde(rename = "lessons")]
    pub lesson_records: BTreeMap<String, LessonRecord>,
    pub total_xp: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
    /// Every badge in the catalog, earned or not
    pub badges: Vec<Badge>,
    #[serde(rename = "skills")]
    pub skill_scores: SkillScores,
    pub last_daily_challenge_date: Option<NaiveDate>,
    pub settings: Settings,
    pub weekly_goal: WeeklyGoalState,
    pub last_lesson_run: Option<LastLessonRun>,
    #[serde(rename = "ui")]
    pub ui_state: UiState,
    pub avatar: AvatarState,
}

impl ProgressDocument {
    /// All-default document, as created on first run.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            lesson_records: BTreeMap::new(),
            total_xp: 0,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            badges: default_badges(),
            skill_scores: SkillScores::default(),
            last_daily_challenge_date: None,
            settings: Settings::default(),
            weekly_goal: WeeklyGoalState::for_week(super::weekly_goal::week_start(today)),
            last_lesson_run: None,
            ui_state: UiState::default(),
            avatar: AvatarState::default(),
        }
    }

    /// Record for a lesson, if it was ever completed.
    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonRecord> {
        self.lesson_records.get(lesson_id)
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.lesson(lesson_id).map(|r| r.completed).unwrap_or(false)
    }

    /// Number of distinct completed lessons.
    pub fn completed_count(&self) -> usize {
        self.lesson_records.values().filter(|r| r.completed).count()
    }

    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|b| b.id == id)
    }

    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.badge(id).map(Badge::is_earned).unwrap_or(false)
    }

    /// Current level.
    pub fn level(&self) -> u32 {
        super::level::level_from_xp(self.total_xp)
    }

    pub fn owns_item(&self, item_id: &str) -> bool {
        self.avatar.inventory.contains(item_id)
    }
}
