//! Capabilities the level logic depends on
//!
//! Gameplay systems (scoring, high score storage, sound, scene loading) are
//! injected as trait objects instead of being looked up globally. Everything
//! runs on the frame loop, so shared collaborators are `Rc<RefCell<_>>` and the
//! blanket impls below let one instance serve both the menu and the level.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::audio::SoundEffect;
use crate::level::LevelId;
use crate::scene::SceneRequest;

/// Current run score, owned by the external scoring system
pub trait ScoreSource {
    fn current_score(&self) -> u64;
}

/// Best score persistence keyed by level identity
pub trait HighScoreStore {
    /// Stored best score, 0 when the level has none
    fn load_high_score(&self, level: &LevelId) -> u64;

    /// Offer a finished run's score; the store decides whether it is kept
    fn save_high_score(&mut self, level: &LevelId, score: u64);
}

/// Fire-and-forget sound cues
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Scene transition requests
pub trait SceneLoader {
    fn load_scene(&mut self, request: SceneRequest);
}

impl ScoreSource for Cell<u64> {
    fn current_score(&self) -> u64 {
        self.get()
    }
}

impl<T: ScoreSource + ?Sized> ScoreSource for Rc<T> {
    fn current_score(&self) -> u64 {
        (**self).current_score()
    }
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Rc<RefCell<T>> {
    fn load_high_score(&self, level: &LevelId) -> u64 {
        self.borrow().load_high_score(level)
    }

    fn save_high_score(&mut self, level: &LevelId, score: u64) {
        self.borrow_mut().save_high_score(level, score);
    }
}

impl<T: SoundSink + ?Sized> SoundSink for Rc<RefCell<T>> {
    fn play(&mut self, effect: SoundEffect) {
        self.borrow_mut().play(effect);
    }
}

impl<T: SceneLoader + ?Sized> SceneLoader for Rc<RefCell<T>> {
    fn load_scene(&mut self, request: SceneRequest) {
        self.borrow_mut().load_scene(request);
    }
}

/// Collaborators handed to a level at construction
pub struct Services {
    pub scores: Box<dyn ScoreSource>,
    pub high_scores: Box<dyn HighScoreStore>,
    pub sound: Box<dyn SoundSink>,
}

impl Services {
    pub fn new(
        scores: impl ScoreSource + 'static,
        high_scores: impl HighScoreStore + 'static,
        sound: impl SoundSink + 'static,
    ) -> Self {
        Self {
            scores: Box::new(scores),
            high_scores: Box::new(high_scores),
            sound: Box::new(sound),
        }
    }
}
