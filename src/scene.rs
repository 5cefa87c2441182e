//! Scene transitions
//!
//! The menu hands its chosen level to the gameplay scene through a
//! [`SceneRequest`] instead of a global slot. [`SceneDirector`] holds at most
//! one pending request until the next scene load consumes it.

use std::rc::Rc;

use crate::consts::{GAMEPLAY_SCENE, MENU_SCENE};
use crate::level::LevelDescriptor;
use crate::services::SceneLoader;

/// Level chosen in the menu for the next gameplay scene
pub type LevelSelection = Option<Rc<LevelDescriptor>>;

/// A request to switch scenes
#[derive(Debug, Clone)]
pub struct SceneRequest {
    pub scene: &'static str,
    pub selection: LevelSelection,
}

impl SceneRequest {
    /// Enter gameplay with `descriptor`
    pub fn gameplay(descriptor: Rc<LevelDescriptor>) -> Self {
        Self {
            scene: GAMEPLAY_SCENE,
            selection: Some(descriptor),
        }
    }
}

/// Tracks the active scene and the request waiting to be loaded
#[derive(Debug)]
pub struct SceneDirector {
    active: &'static str,
    pending: Option<SceneRequest>,
}

impl Default for SceneDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneDirector {
    pub fn new() -> Self {
        Self {
            active: MENU_SCENE,
            pending: None,
        }
    }

    pub fn active_scene(&self) -> &'static str {
        self.active
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Complete the pending transition, handing its selection to the caller
    pub fn take_pending(&mut self) -> Option<SceneRequest> {
        let request = self.pending.take()?;
        log::info!("Entering scene '{}'", request.scene);
        self.active = request.scene;
        Some(request)
    }
}

impl SceneLoader for SceneDirector {
    fn load_scene(&mut self, request: SceneRequest) {
        if let Some(previous) = &self.pending {
            log::debug!("Replacing pending transition to '{}'", previous.scene);
        }
        self.pending = Some(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelId, StructureTemplate};

    fn descriptor(id: &str) -> Rc<LevelDescriptor> {
        Rc::new(LevelDescriptor {
            id: LevelId::new(id),
            name: id.into(),
            structure: StructureTemplate::default(),
            spawners: Vec::new(),
            processors: Vec::new(),
            request_count: 1,
            star_thresholds: [0, 0, 0],
        })
    }

    #[test]
    fn test_pending_consumed_once() {
        let mut director = SceneDirector::new();
        assert_eq!(director.active_scene(), MENU_SCENE);

        director.load_scene(SceneRequest::gameplay(descriptor("crypt")));
        assert!(director.has_pending());

        let request = director.take_pending().unwrap();
        assert_eq!(request.scene, GAMEPLAY_SCENE);
        assert_eq!(request.selection.unwrap().id.as_str(), "crypt");
        assert_eq!(director.active_scene(), GAMEPLAY_SCENE);
        assert!(director.take_pending().is_none());
    }

    #[test]
    fn test_later_request_overwrites() {
        let mut director = SceneDirector::new();
        director.load_scene(SceneRequest::gameplay(descriptor("crypt")));
        director.load_scene(SceneRequest::gameplay(descriptor("meadow")));

        let request = director.take_pending().unwrap();
        assert_eq!(request.selection.unwrap().id.as_str(), "meadow");
    }
}
