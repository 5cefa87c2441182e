use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use tempfile::TempDir;

use altar_levels::consts::GAMEPLAY_SCENE;
use altar_levels::{
    AudioManager, GameplayEvent, HighScores, LevelBootstrapper, LevelCatalog, LevelId,
    LevelOutcome, LevelSelectionMenu, SceneDirector, Services, SoundEffect,
};

fn bundled_catalog() -> LevelCatalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/levels.json");
    LevelCatalog::load(&path).unwrap()
}

#[test]
fn menu_selection_reaches_bootstrap_and_records_win() {
    let tmp = TempDir::new().unwrap();
    let scores_path = tmp.path().join("highscores.json");

    let catalog = bundled_catalog();
    let high_scores = Rc::new(RefCell::new(HighScores::load(&scores_path).unwrap()));
    let director = Rc::new(RefCell::new(SceneDirector::new()));
    let mut menu = LevelSelectionMenu::new(&catalog, high_scores.clone(), director.clone());

    let crypt = catalog.get(&LevelId::new("sunken-crypt")).unwrap();
    assert_eq!(menu.preview_level(&crypt).high_score_text, "No high score");
    menu.select_level(crypt.clone());

    let request = director.borrow_mut().take_pending().unwrap();
    assert_eq!(director.borrow().active_scene(), GAMEPLAY_SCENE);

    let score = Rc::new(Cell::new(0));
    let audio = Rc::new(RefCell::new(AudioManager::new()));
    let services = Services::new(score.clone(), high_scores.clone(), audio.clone());
    let mut level = LevelBootstrapper::with_seed(Some(2024), services)
        .initialize(request.selection)
        .unwrap();

    assert_eq!(level.spawners().len(), crypt.spawners.len());
    assert_eq!(level.processors().len(), crypt.processors.len());

    for completed in 1..crypt.request_count {
        score.set(score.get() + 30);
        assert_eq!(
            level.handle(&[GameplayEvent::CompletedRequests(completed)]),
            LevelOutcome::Pending
        );
    }
    score.set(score.get() + 30);
    let final_score = score.get();
    assert_eq!(
        level.handle(&[GameplayEvent::CompletedRequests(crypt.request_count)]),
        LevelOutcome::Won { score: final_score }
    );
    assert_eq!(audio.borrow().played(), [SoundEffect::Win]);

    // Best score survives a reload and lights the menu's stars
    let reloaded = Rc::new(RefCell::new(HighScores::load(&scores_path).unwrap()));
    assert_eq!(reloaded.borrow().best(&crypt.id), Some(final_score));

    let director = Rc::new(RefCell::new(SceneDirector::new()));
    let mut menu = LevelSelectionMenu::new(&catalog, reloaded, director);
    let view = menu.preview_level(&crypt);
    assert_eq!(view.high_score_text, format!("High score: {final_score}"));
    assert_eq!(view.stars, crypt.stars_for(final_score));
}

#[test]
fn bootstrap_without_selection_fails() {
    let director = Rc::new(RefCell::new(SceneDirector::new()));
    let request = director.borrow_mut().take_pending();
    assert!(request.is_none());

    let services = Services::new(
        Rc::new(Cell::new(0)),
        HighScores::new(),
        AudioManager::new(),
    );
    let err = LevelBootstrapper::with_seed(Some(1), services)
        .initialize(request.and_then(|r| r.selection))
        .unwrap_err();
    assert_eq!(err.to_string(), "No level data provided on level load");
}

#[test]
fn every_bundled_level_bootstraps() {
    let catalog = bundled_catalog();
    for descriptor in catalog.levels() {
        let services = Services::new(
            Rc::new(Cell::new(0)),
            HighScores::new(),
            AudioManager::new(),
        );
        let level = LevelBootstrapper::with_seed(Some(7), services)
            .initialize(Some(descriptor.clone()))
            .unwrap_or_else(|err| panic!("level '{}' failed: {err}", descriptor.id));
        assert_eq!(level.spawners().len(), descriptor.spawners.len());
    }
}
