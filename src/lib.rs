//! AI Quest - progress and gamification engine
//!
//! Tracks lessons, XP, streaks, skills, badges, a weekly goal and an avatar
//! shop for a self-paced lesson app. All state lives in one versioned
//! progress document, persisted in SQLite and migrated on load.

pub mod avatar;
pub mod catalog;
pub mod progress;
pub mod storage;

// Re-export commonly used types
pub use avatar::EconomyError;
pub use catalog::{AvatarCatalog, LessonCatalog};
pub use progress::{LessonRun, ProgressDocument};
pub use storage::config::AppConfig;
pub use storage::store::ProgressStore;
