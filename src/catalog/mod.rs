//! Read-only reference catalogs consumed by the progress engine.
//!
//! - Lessons grouped into three ordered tiers
//! - Avatar items with prices and unlock conditions

pub mod avatar_items;
pub mod lessons;

pub use avatar_items::{AvatarCatalog, AvatarItem, AvatarItemType, AvatarRarity, UnlockCondition};
pub use lessons::{CatalogError, Lesson, LessonCatalog, LessonTier, SkillTag, Step, StepKind};
