use std::path::Path;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutri_choice_rs::cli::{parse_scores, Cli, Command};
use nutri_choice_rs::error::{NutriError, Result};
use nutri_choice_rs::interface::{
    collect_profile, display_dishes, display_goals, display_log, display_prediction,
    display_summary, prompt_yes_no, resolve_dish, ProfileDraft,
};
use nutri_choice_rs::models::{ActivityLevel, Gender};
use nutri_choice_rs::nutrition::summarize;
use nutri_choice_rs::prediction::top_prediction;
use nutri_choice_rs::state::{export_csv, FileStore, LogStore, LogView, ProfileStore};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let store = FileStore::open(&cli.data_dir)?;
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Profile {
            weight,
            height,
            age,
            gender,
            activity,
        } => {
            let draft = ProfileDraft {
                weight,
                height,
                age,
                gender: gender.as_deref().map(str::parse::<Gender>).transpose()?,
                activity: activity.as_deref().map(ActivityLevel::from_label),
            };
            cmd_profile(store, draft)
        }
        Command::Goals => cmd_goals(store),
        Command::Dishes => {
            display_dishes();
            Ok(())
        }
        Command::Add { dish, scores } => cmd_add(store, dish, scores),
        Command::Log { today } => cmd_log(store, today),
        Command::Remove { position, today } => cmd_remove(store, position, today),
        Command::Adjust {
            position,
            delta,
            today,
        } => cmd_adjust(store, position, delta, today),
        Command::Export { out } => cmd_export(store, &out),
        Command::Reset { yes } => cmd_reset(store, yes),
    }
}

/// Capture the profile, save it and show the new goals.
fn cmd_profile(store: FileStore, draft: ProfileDraft) -> Result<()> {
    let mut profiles = ProfileStore::new(store);
    let previous = profiles.load()?.map(|saved| saved.profile);

    let profile = collect_profile(draft, previous.as_ref())?;
    let goals = profiles.save(&profile)?;

    println!("Profile saved.");
    display_goals(&goals, true);
    Ok(())
}

fn cmd_goals(store: FileStore) -> Result<()> {
    let profiles = ProfileStore::new(store);
    match profiles.load()? {
        Some(saved) => display_goals(&saved.goals, true),
        None => display_goals(&profiles.current_goals()?, false),
    }
    Ok(())
}

/// Log a dish given by name or by classifier scores.
fn cmd_add(store: FileStore, dish: Option<String>, scores: Option<String>) -> Result<()> {
    let dish = match (dish, scores) {
        (_, Some(raw)) => {
            let scores = parse_scores(&raw).ok_or_else(|| {
                NutriError::InvalidInput(format!("could not parse scores '{}'", raw))
            })?;
            let prediction = top_prediction(&scores)?;
            display_prediction(&prediction);
            prediction.dish
        }
        (Some(name), None) => resolve_dish(&name)?,
        (None, None) => {
            return Err(NutriError::InvalidInput(
                "give a dish name or --scores".to_string(),
            ));
        }
    };

    let mut log = LogStore::new(store);
    let entry = log.append(dish.label(), &dish.info())?;
    println!(
        "Added {} ({} kcal per {}) to the daily log.",
        entry.dish, entry.calories, entry.per_serving
    );
    Ok(())
}

fn cmd_log(store: FileStore, today: bool) -> Result<()> {
    let goals = ProfileStore::new(store.clone()).current_goals()?;
    let log = LogStore::new(store);

    let view = load_view(&log, today)?;

    display_log(&view);
    display_summary(&summarize(&view.entries(), &goals));
    Ok(())
}

/// The log as displayed, optionally limited to today's entries.
fn load_view(log: &LogStore<FileStore>, today: bool) -> Result<LogView> {
    let view = log.display_view()?;
    if today {
        Ok(view.on_day(Utc::now().date_naive()))
    } else {
        Ok(view)
    }
}

/// Map a 1-based display position to a storage index.
fn storage_index(view: &LogView, position: usize) -> Result<usize> {
    if position == 0 {
        return Err(NutriError::InvalidInput(
            "positions start at 1".to_string(),
        ));
    }
    view.storage_index(position - 1)
}

fn cmd_remove(store: FileStore, position: usize, today: bool) -> Result<()> {
    let mut log = LogStore::new(store);
    let index = storage_index(&load_view(&log, today)?, position)?;
    let removed = log.remove(index)?;
    println!("Removed {} x{}.", removed.dish, removed.quantity);
    Ok(())
}

fn cmd_adjust(store: FileStore, position: usize, delta: i64, today: bool) -> Result<()> {
    let mut log = LogStore::new(store);
    let view = load_view(&log, today)?;
    let index = storage_index(&view, position)?;
    let dish = view
        .get(position - 1)
        .map(|e| e.dish.clone())
        .unwrap_or_default();

    let quantity = log.adjust_quantity(index, delta)?;
    println!("{} now x{}.", dish, quantity);
    Ok(())
}

fn cmd_export(store: FileStore, out: &Path) -> Result<()> {
    let entries = LogStore::new(store).read_all()?;
    export_csv(&entries, out)?;
    println!("Exported {} entries to {}", entries.len(), out.display());
    Ok(())
}

fn cmd_reset(store: FileStore, yes: bool) -> Result<()> {
    if !yes && !prompt_yes_no("Delete every log entry?", false)? {
        println!("Nothing changed.");
        return Ok(());
    }
    LogStore::new(store).clear()?;
    println!("Log cleared.");
    Ok(())
}
