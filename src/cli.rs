//! Command-line argument parsing.

use aiquest::catalog::{LessonTier, SkillTag};
use aiquest::progress::Theme;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI Quest progress CLI
#[derive(Parser)]
#[command(name = "aiquest")]
#[command(about = "AI Quest - learn how AI works, one lesson at a time", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Progress database path (overrides the configured location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Date to treat as today, YYYY-MM-DD
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show level, streak, weekly goal and badges
    Status,

    /// Show the lesson map with lock state
    Lessons,

    /// Record a finished lesson
    Complete {
        /// Lesson id, e.g. 1-what-is-ai
        lesson_id: String,

        /// Graded steps answered correctly (default: all)
        #[arg(long)]
        correct: Option<usize>,

        /// Finished fast enough for the speed bonus
        #[arg(long)]
        fast: bool,
    },

    /// Record today's daily challenge
    Daily {
        /// Questions answered correctly
        #[arg(long, default_value_t = 0)]
        correct: u32,
    },

    /// Add skill XP directly
    Skill {
        /// Skill key, e.g. prompting
        skill: SkillTag,
        xp: u32,
    },

    /// List avatar items with price and lock state
    Shop,

    /// Buy an avatar item with XP
    Buy { item_id: String },

    /// Equip an owned or earned avatar item
    Equip { item_id: String },

    /// Change settings
    Settings {
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        sound_muted: Option<bool>,

        #[arg(long)]
        haptics: Option<bool>,

        #[arg(long)]
        large_text: Option<bool>,

        /// on, off or system
        #[arg(long)]
        reduce_motion: Option<String>,
    },

    /// Set this week's lesson target
    Goal { target: u32 },

    /// Collapse or expand a tier on the lesson map
    Collapse {
        tier: LessonTier,

        /// true to collapse, false to expand
        #[arg(action = clap::ArgAction::Set)]
        collapsed: bool,
    },

    /// Show the active configuration
    Config {
        /// Write it to config.toml in the data directory
        #[arg(long)]
        write: bool,
    },

    /// Erase all progress
    Reset {
        /// Confirm erasing everything
        #[arg(long)]
        yes: bool,
    },
}
