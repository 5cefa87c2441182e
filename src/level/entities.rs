//! Entity instances placed during level setup

use glam::Vec3;

use super::anchors::Anchor;
use super::descriptor::{ProcessorConfig, SpawnerConfig};

/// Emits requests from its anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    pub anchor: Anchor,
    pub config: SpawnerConfig,
}

/// Works on requests delivered to its anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Processor {
    pub anchor: Anchor,
    pub config: ProcessorConfig,
}

/// The level's single sacrificial altar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Altar {
    pub anchor: Anchor,
}

impl Spawner {
    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }
}

impl Processor {
    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }
}

impl Altar {
    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }
}
