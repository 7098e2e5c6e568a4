//! AI Quest - command-line front end
//!
//! Each invocation loads progress, applies one command and saves once.

use aiquest::avatar::{self, is_equipped, unlock_requirement_text};
use aiquest::catalog::{AvatarCatalog, LessonCatalog, LessonTier};
use aiquest::progress::{self, LessonRun, ProgressDocument, SettingsUpdate};
use aiquest::storage::config::{get_config_path, get_data_dir, load_config, save_config, AppConfig};
use aiquest::storage::ProgressStore;
use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (
            AppConfig {
                data_dir: get_data_dir(),
                ..Default::default()
            },
            Some(e),
        ),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Could not read config, using defaults");
    }
    tracing::debug!("Starting AI Quest v{}", env!("CARGO_PKG_VERSION"));

    if let Commands::Config { write } = &cli.command {
        return show_config(&config, *write);
    }

    let session = Session::open(&cli, config)?;
    session.run(cli.command)
}

fn show_config(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    if write {
        save_config(config).context("Failed to write config")?;
        println!("Wrote {}", get_config_path().display());
    }
    println!("# data dir: {}", config.data_dir.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Everything one command needs.
struct Session {
    config: AppConfig,
    store: ProgressStore,
    lessons: LessonCatalog,
    items: AvatarCatalog,
    today: NaiveDate,
}

impl Session {
    fn open(cli: &Cli, config: AppConfig) -> anyhow::Result<Self> {
        let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

        let lessons = match &config.catalog.lessons_path {
            Some(path) => {
                let path = if path.is_relative() {
                    config.data_dir.join(path)
                } else {
                    path.clone()
                };
                LessonCatalog::load(&path)
                    .with_context(|| format!("Failed to load lesson catalog {}", path.display()))?
            }
            None => LessonCatalog::builtin(),
        };

        let store = match &cli.db {
            Some(path) => ProgressStore::open_at(path, &config.storage.record_key)
                .with_context(|| format!("Failed to open {}", path.display()))?,
            None => ProgressStore::open(&config).context("Failed to open progress store")?,
        };
        if !store.is_persistent() {
            eprintln!("Warning: progress is kept in memory and will not be saved.");
        }

        Ok(Self {
            config,
            store,
            lessons,
            items: AvatarCatalog::builtin(),
            today,
        })
    }

    fn run(&self, command: Commands) -> anyhow::Result<()> {
        let doc = self.store.load(self.today)?;

        match command {
            Commands::Status => self.print_status(&doc),
            Commands::Lessons => self.print_lessons(&doc),
            Commands::Complete {
                lesson_id,
                correct,
                fast,
            } => self.complete(&doc, &lesson_id, correct, fast)?,
            Commands::Daily { correct } => self.daily(&doc, correct)?,
            Commands::Skill { skill, xp } => {
                let next = progress::add_skill_xp(&doc, skill, xp);
                self.store.save(&next)?;
                println!(
                    "{}: {} skill XP",
                    skill.display_name(),
                    next.skill_scores.get(skill)
                );
            }
            Commands::Shop => self.print_shop(&doc),
            Commands::Buy { item_id } => {
                let next = avatar::buy_item(&doc, &self.items, &self.lessons, &item_id)
                    .with_context(|| format!("Cannot buy {}", item_id))?;
                self.store.save(&next)?;
                println!("Bought {}. {} XP left.", item_id, next.total_xp);
            }
            Commands::Equip { item_id } => {
                let next = avatar::equip_item(&doc, &self.items, &self.lessons, &item_id)
                    .with_context(|| format!("Cannot equip {}", item_id))?;
                self.store.save(&next)?;
                println!("Equipped {}.", item_id);
            }
            Commands::Settings {
                theme,
                sound_muted,
                haptics,
                large_text,
                reduce_motion,
            } => {
                let update = SettingsUpdate {
                    theme,
                    sound_muted,
                    haptics_enabled: haptics,
                    large_text,
                    reduce_motion: reduce_motion
                        .as_deref()
                        .map(parse_reduce_motion)
                        .transpose()?,
                };
                let next = if update == SettingsUpdate::default() {
                    doc
                } else {
                    let next = progress::update_settings(&doc, &update);
                    self.store.save(&next)?;
                    next
                };
                print_settings(&next);
            }
            Commands::Goal { target } => {
                if target == 0 {
                    bail!("Weekly target must be at least 1 lesson");
                }
                let next = progress::set_weekly_goal_target(&doc, target);
                self.store.save(&next)?;
                println!("Weekly goal set to {} lessons.", target);
            }
            Commands::Collapse { tier, collapsed } => {
                let next = progress::set_tier_collapsed(&doc, tier, collapsed);
                self.store.save(&next)?;
                println!(
                    "{} {}.",
                    tier.display_name(),
                    if collapsed { "collapsed" } else { "expanded" }
                );
            }
            Commands::Config { write } => show_config(&self.config, write)?,
            Commands::Reset { yes } => {
                if !yes {
                    bail!("Refusing to erase progress without --yes");
                }
                self.store.reset(self.today)?;
                println!("Progress reset for {}.", self.store.record_key());
            }
        }

        Ok(())
    }

    fn complete(
        &self,
        doc: &ProgressDocument,
        lesson_id: &str,
        correct: Option<usize>,
        fast: bool,
    ) -> anyhow::Result<()> {
        let lesson = self
            .lessons
            .get(lesson_id)
            .ok_or_else(|| anyhow!("Unknown lesson: {}", lesson_id))?;
        if !progress::is_lesson_unlocked(&self.lessons, lesson_id, doc) {
            let reason = progress::unlock_requirement(&self.lessons, lesson_id, doc)
                .unwrap_or_else(|| "locked".to_string());
            bail!("{} is locked: {}", lesson.title, reason);
        }

        let mut run = LessonRun::new(lesson);
        let correct = correct.unwrap_or(usize::MAX);
        for (i, step) in lesson.steps.iter().filter(|s| s.is_graded()).enumerate() {
            run.record_answer(&step.id, i < correct);
        }
        run.set_fast(fast);

        let outcome = run.finish(doc, self.today);
        self.store.save(&outcome.document)?;

        let summary = &outcome.summary;
        println!(
            "{} complete! Score {}%, +{} XP",
            lesson.title, outcome.score, summary.xp_earned
        );
        for (skill, xp) in &summary.skill_xp_earned {
            println!("  +{} {} skill XP", xp, skill.display_name());
        }
        for badge in &summary.badges_awarded {
            println!("  {} Badge earned: {}", badge.emoji(), badge.name());
        }
        if summary.leveled_up {
            println!("  Level up! You are now level {}.", summary.new_level);
        }
        if outcome.weekly_bonus_awarded {
            println!(
                "  Weekly goal reached: +{} bonus XP",
                outcome.document.weekly_goal.bonus_xp
            );
        }
        Ok(())
    }

    fn daily(&self, doc: &ProgressDocument, correct: u32) -> anyhow::Result<()> {
        if doc.completed_count() == 0 {
            bail!("Complete at least one lesson to unlock the daily challenge");
        }
        if !progress::can_access_daily_challenge(doc, self.today) {
            println!("Daily challenge already done today. Come back tomorrow!");
            return Ok(());
        }

        let xp = progress::daily_challenge_xp(self.config.rewards.daily_bonus_xp, correct);
        let next = progress::complete_daily_challenge(doc, xp, self.today);
        self.store.save(&next)?;
        println!("Daily challenge complete! +{} XP", xp);
        Ok(())
    }

    fn print_status(&self, doc: &ProgressDocument) {
        let xp = doc.total_xp;
        println!(
            "Level {} | {} XP ({:.0}% of the way, {} XP to level {})",
            doc.level(),
            xp,
            progress::xp_progress_in_level(xp),
            progress::xp_for_next_level(xp) - xp,
            doc.level() + 1
        );
        println!(
            "Streak: {} days (longest {}), XP x{:.1}",
            doc.current_streak,
            doc.longest_streak,
            progress::streak_multiplier(doc.current_streak)
        );

        let goal = &doc.weekly_goal;
        println!(
            "Weekly goal: {}/{} lessons ({:.0}%){}",
            goal.completed_lessons,
            goal.target_lessons,
            goal.percent(),
            if goal.bonus_awarded {
                format!(", +{} XP bonus earned", goal.bonus_xp)
            } else if goal.is_met() {
                ", target met".to_string()
            } else {
                format!(", +{} XP bonus on completion", goal.bonus_xp)
            }
        );
        println!(
            "Daily challenge: {}",
            if progress::can_access_daily_challenge(doc, self.today) {
                "available"
            } else {
                "done today"
            }
        );
        match progress::next_up_lesson_id(&self.lessons, doc).and_then(|id| self.lessons.get(id)) {
            Some(lesson) => println!("Next up: {} ({})", lesson.title, lesson.id),
            None => println!("Next up: all caught up"),
        }

        println!("Skills:");
        for (skill, score) in doc.skill_scores.iter() {
            println!("  {:<24} {}", skill.display_name(), score);
        }

        println!("Badges:");
        for badge in &doc.badges {
            match badge.earned_at {
                Some(at) => println!("  {} {} (earned {})", badge.id.emoji(), badge.id.name(), at),
                None => println!("  .. {}: {}", badge.id.name(), badge.id.description()),
            }
        }
    }

    fn print_lessons(&self, doc: &ProgressDocument) {
        let next_up = progress::next_up_lesson_id(&self.lessons, doc);

        for tier in LessonTier::ALL {
            let tier_progress = progress::tier_progress(&self.lessons, tier, doc);
            let locked = progress::is_tier_locked(&self.lessons, tier, doc);
            println!(
                "{} ({}/{}){}",
                tier.display_name(),
                tier_progress.completed,
                tier_progress.total,
                if locked { " [locked]" } else { "" }
            );
            if doc.ui_state.tier_collapsed.get(&tier).copied().unwrap_or(false) {
                continue;
            }

            for id in self.lessons.tier_ids(tier) {
                let Some(lesson) = self.lessons.get(id) else {
                    continue;
                };
                let marker = if doc.is_completed(id) {
                    "[x]"
                } else if Some(id) == next_up {
                    "[>]"
                } else if progress::is_lesson_unlocked(&self.lessons, id, doc) {
                    "[ ]"
                } else {
                    "[-]"
                };
                let detail = match doc.lesson(id) {
                    Some(record) if record.completed => format!("best {}%", record.best_score),
                    _ => progress::unlock_requirement(&self.lessons, id, doc)
                        .unwrap_or_else(|| format!("{} XP", lesson.xp_reward)),
                };
                println!("  {} {:<28} {:<32} {}", marker, id, lesson.title, detail);
            }
        }
    }

    fn print_shop(&self, doc: &ProgressDocument) {
        println!("You have {} XP", doc.total_xp);
        for item in self.items.items() {
            let state = if is_equipped(doc, item) {
                "equipped".to_string()
            } else if doc.owns_item(&item.id) {
                "owned".to_string()
            } else if !avatar::meets_unlock(&self.lessons, doc, item) {
                unlock_requirement_text(item).unwrap_or_else(|| "locked".to_string())
            } else if avatar::is_earned(&self.lessons, doc, item) {
                "earned, free to equip".to_string()
            } else {
                format!("{} XP", item.xp_cost)
            };
            println!(
                "  {:<22} {:<16} {:<10} {}",
                item.id,
                item.name,
                item.rarity.display_name(),
                state
            );
        }
    }
}

fn parse_reduce_motion(value: &str) -> anyhow::Result<Option<bool>> {
    match value {
        "on" | "true" => Ok(Some(true)),
        "off" | "false" => Ok(Some(false)),
        "system" => Ok(None),
        other => bail!("reduce-motion must be on, off or system, got '{}'", other),
    }
}

fn print_settings(doc: &ProgressDocument) {
    let settings = &doc.settings;
    println!("Theme:         {}", settings.theme);
    println!("Sound muted:   {}", settings.sound_muted);
    println!("Haptics:       {}", settings.haptics_enabled);
    println!("Large text:    {}", settings.large_text);
    println!(
        "Reduce motion: {}",
        match settings.reduce_motion {
            Some(true) => "on",
            Some(false) => "off",
            None => "system",
        }
    );
}
