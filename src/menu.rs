//! Level selection menu
//!
//! Hovering a level previews its best score and stars; choosing it requests
//! the gameplay scene with that level as the selection. The menu is polled
//! once per frame for the cancel axis.

use std::fmt;
use std::rc::Rc;

use crate::consts::{CANCEL_DEADZONE, STAR_TIERS};
use crate::level::{LevelCatalog, LevelDescriptor};
use crate::scene::SceneRequest;
use crate::services::{HighScoreStore, SceneLoader};

/// What the menu currently displays for the previewed level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuView {
    pub high_score_text: String,
    /// Star indicators, lowest tier first
    pub stars: [bool; STAR_TIERS],
}

pub struct LevelSelectionMenu {
    levels: Vec<Rc<LevelDescriptor>>,
    high_scores: Box<dyn HighScoreStore>,
    scenes: Box<dyn SceneLoader>,
    view: MenuView,
    active: bool,
    cancel_deadzone: f32,
    on_close: Box<dyn FnMut()>,
}

impl fmt::Debug for LevelSelectionMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelSelectionMenu")
            .field("levels", &self.levels.len())
            .field("view", &self.view)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl LevelSelectionMenu {
    pub fn new(
        catalog: &LevelCatalog,
        high_scores: impl HighScoreStore + 'static,
        scenes: impl SceneLoader + 'static,
    ) -> Self {
        Self {
            levels: catalog.levels().to_vec(),
            high_scores: Box::new(high_scores),
            scenes: Box::new(scenes),
            view: MenuView::default(),
            active: true,
            cancel_deadzone: CANCEL_DEADZONE,
            on_close: Box::new(|| {}),
        }
    }

    pub fn with_cancel_deadzone(mut self, deadzone: f32) -> Self {
        self.cancel_deadzone = deadzone.max(0.0);
        self
    }

    pub fn levels(&self) -> &[Rc<LevelDescriptor>] {
        &self.levels
    }

    pub fn view(&self) -> &MenuView {
        &self.view
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_on_close(&mut self, hook: impl FnMut() + 'static) {
        self.on_close = Box::new(hook);
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    /// Hand `descriptor` to the gameplay scene and request the transition
    pub fn select_level(&mut self, descriptor: Rc<LevelDescriptor>) {
        log::info!("Level '{}' selected", descriptor.id);
        self.scenes.load_scene(SceneRequest::gameplay(descriptor));
    }

    /// Show the stored best score and earned stars for `descriptor`
    pub fn preview_level(&mut self, descriptor: &LevelDescriptor) -> &MenuView {
        let high_score = self.high_scores.load_high_score(&descriptor.id);
        self.view.high_score_text = if high_score == 0 {
            "No high score".to_string()
        } else {
            format!("High score: {high_score}")
        };
        self.view.stars = descriptor.stars_for(high_score);
        &self.view
    }

    /// Per-frame poll of the cancel axis
    pub fn update(&mut self, cancel_axis: f32) {
        if self.active && cancel_axis > self.cancel_deadzone {
            self.close();
        }
    }

    pub fn close(&mut self) {
        (self.on_close)();
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::consts::GAMEPLAY_SCENE;
    use crate::highscores::HighScores;
    use crate::level::{LevelId, StructureTemplate};
    use crate::scene::SceneDirector;

    fn descriptor() -> LevelDescriptor {
        LevelDescriptor {
            id: LevelId::new("ossuary"),
            name: "Ossuary".into(),
            structure: StructureTemplate::default(),
            spawners: Vec::new(),
            processors: Vec::new(),
            request_count: 6,
            star_thresholds: [100, 250, 500],
        }
    }

    struct Fixture {
        high_scores: Rc<RefCell<HighScores>>,
        director: Rc<RefCell<SceneDirector>>,
        menu: LevelSelectionMenu,
    }

    fn fixture() -> Fixture {
        let catalog = LevelCatalog::new(vec![descriptor()]);
        let high_scores = Rc::new(RefCell::new(HighScores::new()));
        let director = Rc::new(RefCell::new(SceneDirector::new()));
        let menu = LevelSelectionMenu::new(&catalog, high_scores.clone(), director.clone());
        Fixture {
            high_scores,
            director,
            menu,
        }
    }

    #[test]
    fn test_preview_without_score() {
        let mut fx = fixture();
        let view = fx.menu.preview_level(&descriptor());
        assert_eq!(view.high_score_text, "No high score");
        assert_eq!(view.stars, [false, false, false]);
    }

    #[test]
    fn test_preview_with_score() {
        let mut fx = fixture();
        let level = descriptor();
        fx.high_scores.borrow_mut().save_high_score(&level.id, 250);

        let view = fx.menu.preview_level(&level);
        assert_eq!(view.high_score_text, "High score: 250");
        // 250 does not strictly exceed the second threshold
        assert_eq!(view.stars, [true, false, false]);

        fx.high_scores.borrow_mut().save_high_score(&level.id, 501);
        assert_eq!(fx.menu.preview_level(&level).stars, [true, true, true]);
    }

    #[test]
    fn test_select_requests_gameplay() {
        let mut fx = fixture();
        let level = fx.menu.levels()[0].clone();
        fx.menu.select_level(level);

        let request = fx.director.borrow_mut().take_pending().unwrap();
        assert_eq!(request.scene, GAMEPLAY_SCENE);
        assert_eq!(request.selection.unwrap().id, LevelId::new("ossuary"));
    }

    #[test]
    fn test_cancel_closes_past_deadzone() {
        let mut fx = fixture();
        let closed = Rc::new(Cell::new(0));
        let counter = closed.clone();
        fx.menu.set_on_close(move || counter.set(counter.get() + 1));

        fx.menu.update(0.0);
        fx.menu.update(CANCEL_DEADZONE);
        assert!(fx.menu.is_active());

        fx.menu.update(1.0);
        assert!(!fx.menu.is_active());
        assert_eq!(closed.get(), 1);

        // Inactive menus are not polled
        fx.menu.update(1.0);
        assert_eq!(closed.get(), 1);

        fx.menu.open();
        assert!(fx.menu.is_active());
    }

    #[test]
    fn test_custom_deadzone() {
        let mut fx = fixture();
        fx.menu = fx.menu.with_cancel_deadzone(0.5);
        fx.menu.update(0.4);
        assert!(fx.menu.is_active());
        fx.menu.update(0.6);
        assert!(!fx.menu.is_active());
    }
}
