//! Altar Levels entry point
//!
//! Headless driver: previews the catalog in the selection menu, enters the
//! chosen level and feeds it a scripted stream of gameplay events.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;

use altar_levels::{
    AudioManager, GameplayEvent, HighScores, LevelBootstrapper, LevelCatalog, LevelId,
    LevelOutcome, LevelSelectionMenu, SceneDirector, Services, Settings,
};

/// Frames to simulate before giving up on an unresolved level
const MAX_FRAMES: u32 = 10_000;

#[derive(Debug, Parser)]
#[command(name = "altar-levels", about = "Run a level from the catalog headlessly")]
struct Args {
    /// Settings save file
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Level id to play; defaults to the first catalog entry
    #[arg(long)]
    level: Option<String>,
    /// Seed for anchor placement, overrides settings
    #[arg(long)]
    seed: Option<u64>,
    /// Score gained per completed request
    #[arg(long, default_value_t = 25)]
    score_per_request: u64,
    /// Starting reputation
    #[arg(long, default_value_t = 3.0)]
    reputation: f32,
    /// Reputation lost each frame
    #[arg(long, default_value_t = 0.0)]
    reputation_loss: f32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = Settings::load(&args.settings).context("failed to load settings")?;
    let catalog = LevelCatalog::load(&settings.levels_path)?;
    if catalog.is_empty() {
        bail!("level catalog {} is empty", settings.levels_path.display());
    }

    let high_scores = Rc::new(RefCell::new(
        HighScores::load(&settings.high_scores_path).context("failed to load high scores")?,
    ));
    let director = Rc::new(RefCell::new(SceneDirector::new()));
    let mut menu = LevelSelectionMenu::new(&catalog, high_scores.clone(), director.clone())
        .with_cancel_deadzone(settings.cancel_deadzone);

    for level in catalog.levels() {
        let view = menu.preview_level(level);
        let stars: String = view.stars.iter().map(|&s| if s { '*' } else { '.' }).collect();
        println!("{:<16} {:<24} [{stars}]", level.name, view.high_score_text);
    }

    let chosen = match &args.level {
        Some(id) => catalog.get(&LevelId::new(id.as_str()))?,
        None => catalog.levels()[0].clone(),
    };
    menu.select_level(chosen);

    let request = director
        .borrow_mut()
        .take_pending()
        .context("menu did not request a scene transition")?;

    let score = Rc::new(Cell::new(0));
    let services = Services::new(
        score.clone(),
        high_scores.clone(),
        AudioManager::from_settings(&settings),
    );
    let seed = args.seed.or(settings.rng_seed);
    let mut level = LevelBootstrapper::with_seed(seed, services)
        .initialize(request.selection)
        .context("level bootstrap failed")?;

    println!(
        "Placed {} spawners, {} processors, altar at {}",
        level.spawners().len(),
        level.processors().len(),
        level.altar().position()
    );
    level.set_on_success(|score| println!("Victory! Score {score}"));
    level.set_on_defeat(|| println!("Defeat: reputation exhausted"));

    let mut completed = 0;
    let mut reputation = args.reputation;
    let mut outcome = LevelOutcome::Pending;
    for _ in 0..MAX_FRAMES {
        completed += 1;
        score.set(score.get() + args.score_per_request);
        reputation -= args.reputation_loss;

        outcome = level.handle(&[
            GameplayEvent::Reputation(reputation),
            GameplayEvent::CompletedRequests(completed),
        ]);
        if outcome.is_resolved() {
            break;
        }
    }

    let id = &level.descriptor().id;
    println!(
        "Outcome {outcome:?}, best for '{id}': {}",
        high_scores.borrow().best(id).unwrap_or(0)
    );
    Ok(())
}
