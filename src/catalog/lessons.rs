//! Lesson catalog: the ordered, read-only list of lessons the engine gates and rewards.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content tier. Tiers unlock in order: beginner, explorer, master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonTier {
    /// First band, always reachable
    Beginner,
    /// Reachable once every beginner lesson is completed
    Explorer,
    /// Reachable once every explorer lesson is completed and enough XP is banked
    Master,
}

impl LessonTier {
    /// All tiers in unlock order.
    pub const ALL: [LessonTier; 3] = [LessonTier::Beginner, LessonTier::Explorer, LessonTier::Master];

    /// Get display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            LessonTier::Beginner => "Beginner",
            LessonTier::Explorer => "Explorer",
            LessonTier::Master => "Master",
        }
    }

    /// The tier that must be finished before this one opens.
    pub fn previous(&self) -> Option<LessonTier> {
        match self {
            LessonTier::Beginner => None,
            LessonTier::Explorer => Some(LessonTier::Beginner),
            LessonTier::Master => Some(LessonTier::Explorer),
        }
    }
}

impl std::fmt::Display for LessonTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for LessonTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(LessonTier::Beginner),
            "explorer" => Ok(LessonTier::Explorer),
            "master" => Ok(LessonTier::Master),
            other => Err(format!("unknown tier '{}'", other)),
        }
    }
}

/// Skill trained by a graded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTag {
    Prompting,
    Safety,
    Bias,
    HallucinationDetection,
    AiUnderstanding,
}

impl SkillTag {
    /// Every skill, in display order.
    pub const ALL: [SkillTag; 5] = [
        SkillTag::Prompting,
        SkillTag::Safety,
        SkillTag::Bias,
        SkillTag::HallucinationDetection,
        SkillTag::AiUnderstanding,
    ];

    /// Wire key, as used in stored documents.
    pub fn key(&self) -> &'static str {
        match self {
            SkillTag::Prompting => "prompting",
            SkillTag::Safety => "safety",
            SkillTag::Bias => "bias",
            SkillTag::HallucinationDetection => "hallucination_detection",
            SkillTag::AiUnderstanding => "ai_understanding",
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SkillTag::Prompting => "Prompting",
            SkillTag::Safety => "Safety",
            SkillTag::Bias => "Bias",
            SkillTag::HallucinationDetection => "Hallucination Detection",
            SkillTag::AiUnderstanding => "AI Understanding",
        }
    }
}

impl std::fmt::Display for SkillTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SkillTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillTag::ALL
            .into_iter()
            .find(|tag| tag.key() == s)
            .ok_or_else(|| format!("unknown skill '{}'", s))
    }
}

/// Interaction kind of a lesson step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Info,
    Mcq,
    Match,
    Order,
    Spot,
    BuildPrompt,
    DetectRisk,
    Scenario,
    NextWordPrediction,
}

/// One step of a lesson. Only the grading metadata is carried here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Step identifier, unique within its lesson
    pub id: String,
    /// Interaction kind
    #[serde(rename = "type")]
    pub kind: StepKind,
    /// Skill trained by answering this step correctly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tag: Option<SkillTag>,
    /// Skill XP granted on a correct answer
    #[serde(default, rename = "skillXP", skip_serializing_if = "Option::is_none")]
    pub skill_xp: Option<u32>,
}

impl Step {
    /// Info steps are read, not answered.
    pub fn is_graded(&self) -> bool {
        self.kind != StepKind::Info
    }

    /// Skill award for a correct answer, when the step is tagged.
    pub fn skill_award(&self) -> Option<(SkillTag, u32)> {
        match (self.skill_tag, self.skill_xp) {
            (Some(tag), Some(xp)) if xp > 0 => Some((tag, xp)),
            _ => None,
        }
    }
}

/// A lesson as the engine sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Stable lesson identifier (e.g. "4-hallucinations")
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Content tier
    pub tier: LessonTier,
    /// Base XP reward before streak multiplier
    pub xp_reward: u32,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Badge this lesson is associated with, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_id: Option<String>,
    /// Bullets shown on the completion summary
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary_takeaways: Vec<String>,
}

impl Lesson {
    /// Number of steps that are answered rather than read.
    pub fn graded_step_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_graded()).count()
    }
}

/// Errors loading a lesson catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Duplicate lesson id: {0}")]
    DuplicateLesson(String),
}

/// Ordered lesson catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Build a catalog from an ordered lesson list.
    pub fn new(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for lesson in &lessons {
            if !seen.insert(lesson.id.as_str()) {
                return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
            }
        }
        Ok(Self { lessons })
    }

    /// Load a catalog from a JSON array of lessons.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let lessons: Vec<Lesson> =
            serde_json::from_str(json).map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::new(lessons)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::IoError(e.to_string()))?;
        let catalog = Self::from_json(&content)?;
        tracing::info!("Loaded {} lessons from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// All lessons in catalog order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Number of lessons.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Look a lesson up by id.
    pub fn get(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Ordered ids of one tier.
    pub fn tier_ids(&self, tier: LessonTier) -> Vec<&str> {
        self.lessons
            .iter()
            .filter(|l| l.tier == tier)
            .map(|l| l.id.as_str())
            .collect()
    }

    /// The built-in course.
    pub fn builtin() -> Self {
        Self {
            lessons: builtin_lessons(),
        }
    }
}

impl Default for LessonCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lesson(
    id: &str,
    title: &str,
    tier: LessonTier,
    xp_reward: u32,
    steps: &[(StepKind, Option<(SkillTag, u32)>)],
) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        tier,
        xp_reward,
        steps: steps
            .iter()
            .enumerate()
            .map(|(i, (kind, award))| Step {
                id: format!("s{}", i + 1),
                kind: *kind,
                skill_tag: award.map(|(tag, _)| tag),
                skill_xp: award.map(|(_, xp)| xp),
            })
            .collect(),
        badge_id: None,
        summary_takeaways: Vec::new(),
    }
}

fn builtin_lessons() -> Vec<Lesson> {
    use LessonTier::*;
    use SkillTag::*;
    use StepKind::*;

    let mut hallucinations = lesson(
        "4-hallucinations",
        "Hallucinations",
        Beginner,
        25,
        &[
            (Info, None),
            (Info, None),
            (Spot, Some((HallucinationDetection, 5))),
            (Spot, Some((HallucinationDetection, 5))),
            (Spot, Some((HallucinationDetection, 5))),
            (Spot, Some((HallucinationDetection, 5))),
            (Spot, Some((HallucinationDetection, 5))),
        ],
    );
    hallucinations.badge_id = Some("hallucination_hunter".to_string());
    hallucinations.summary_takeaways = vec![
        "AI can sound right and still be wrong.".to_string(),
        "Double-check important facts.".to_string(),
    ];

    let mut great_prompts = lesson(
        "8-great-prompts",
        "Build a Great Prompt",
        Beginner,
        30,
        &[
            (Info, None),
            (BuildPrompt, Some((Prompting, 10))),
            (Mcq, Some((Prompting, 5))),
            (Mcq, None),
        ],
    );
    great_prompts.badge_id = Some("prompt_master".to_string());

    vec![
        lesson(
            "1-what-is-ai",
            "What is AI?",
            Beginner,
            15,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "2-what-is-llm",
            "What is an LLM?",
            Beginner,
            20,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "3-tokens-prompts",
            "Tokens & Prompts",
            Beginner,
            20,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((Prompting, 5))),
                (Match, Some((AiUnderstanding, 5))),
            ],
        ),
        hallucinations,
        lesson(
            "5-bias-fairness",
            "Bias & Fairness",
            Beginner,
            20,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((Bias, 5))),
                (Order, Some((Bias, 5))),
                (Scenario, Some((Bias, 5))),
                (Mcq, Some((Bias, 5))),
            ],
        ),
        lesson(
            "6-safety",
            "Safety First",
            Beginner,
            20,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((Safety, 5))),
                (Match, Some((Safety, 5))),
                (Scenario, Some((Safety, 5))),
                (Mcq, Some((Safety, 5))),
            ],
        ),
        lesson(
            "7-ai-for-school",
            "Using AI for School",
            Beginner,
            25,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((Safety, 5))),
                (Order, Some((Prompting, 5))),
            ],
        ),
        great_prompts,
        lesson(
            "9-how-ai-predicts-words",
            "How AI Predicts Words",
            Explorer,
            25,
            &[
                (Info, None),
                (NextWordPrediction, Some((AiUnderstanding, 5))),
                (NextWordPrediction, Some((AiUnderstanding, 5))),
                (NextWordPrediction, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "10-training-data-matters",
            "Training Data Matters",
            Explorer,
            28,
            &[
                (Info, None),
                (Scenario, Some((Bias, 5))),
                (DetectRisk, Some((Safety, 5))),
            ],
        ),
        lesson(
            "11-ai-vs-google",
            "AI vs Google",
            Explorer,
            25,
            &[
                (Info, None),
                (Mcq, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "12-deepfakes",
            "Deepfakes",
            Master,
            35,
            &[
                (Info, None),
                (Scenario, Some((HallucinationDetection, 10))),
                (Scenario, Some((Safety, 10))),
            ],
        ),
        lesson(
            "13-ai-has-no-feelings",
            "AI Has No Feelings",
            Beginner,
            20,
            &[
                (Info, None),
                (Info, None),
                (Mcq, Some((AiUnderstanding, 5))),
                (Scenario, Some((Safety, 5))),
            ],
        ),
        lesson(
            "14-ai-in-apps",
            "AI in Games & Apps",
            Explorer,
            25,
            &[
                (Info, None),
                (Info, None),
                (Scenario, Some((Safety, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "15-training-vs-using",
            "Training vs Using AI",
            Explorer,
            28,
            &[
                (Info, None),
                (Info, None),
                (Order, Some((AiUnderstanding, 5))),
                (Mcq, Some((AiUnderstanding, 5))),
            ],
        ),
        lesson(
            "16-confidence-tricks",
            "Confident Doesn't Mean Correct",
            Master,
            35,
            &[
                (Info, None),
                (Info, None),
                (Spot, Some((HallucinationDetection, 10))),
                (Scenario, Some((HallucinationDetection, 10))),
            ],
        ),
    ]
}
