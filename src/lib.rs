//! Altar Levels - level bootstrap and selection for an altar defense game
//!
//! Core modules:
//! - `level`: Level descriptors, anchor pools and the bootstrap
//! - `menu`: Level selection with high score preview
//! - `scene`: Scene transition hand-off between menu and gameplay
//! - `highscores`: Per-level best scores
//! - `persistence`: Save/load with backup recovery
//! - `settings`: Player preferences and file locations
//! - `audio`: Sound cue dispatch
//! - `services`: Capabilities injected into the menu and levels

pub mod audio;
pub mod highscores;
pub mod level;
pub mod menu;
pub mod persistence;
pub mod scene;
pub mod services;
pub mod settings;

pub use audio::{AudioManager, SoundEffect};
pub use highscores::HighScores;
pub use level::{
    BootstrapError, GameplayEvent, Level, LevelBootstrapper, LevelCatalog, LevelDescriptor,
    LevelId, LevelOutcome,
};
pub use menu::{LevelSelectionMenu, MenuView};
pub use scene::{SceneDirector, SceneRequest};
pub use services::Services;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Scene that hosts a running level
    pub const GAMEPLAY_SCENE: &str = "Gameplay";
    /// Scene active before any level is chosen
    pub const MENU_SCENE: &str = "Menu";

    /// Number of star rating tiers per level
    pub const STAR_TIERS: usize = 3;

    /// Cancel axis values at or below this are treated as released
    pub const CANCEL_DEADZONE: f32 = f32::EPSILON;
}
