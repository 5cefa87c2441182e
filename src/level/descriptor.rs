//! Authored level data
//!
//! Descriptors are read-only at runtime and shared as `Rc<LevelDescriptor>`.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::anchors::{Anchor, AnchorCategory, AnchorPool};
use crate::consts::STAR_TIERS;

/// Identity of a level, used as the high score key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration bound to one spawner instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub name: String,
    /// Seconds between spawned requests
    pub spawn_interval: f32,
}

/// Configuration bound to one processor instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub name: String,
    /// Seconds a processor spends on one item
    pub process_time: f32,
}

/// Level geometry: named anchor collections for every entity category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureTemplate {
    pub name: String,
    #[serde(default)]
    pub spawn_anchors: Vec<Vec3>,
    #[serde(default)]
    pub processor_anchors: Vec<Vec3>,
    #[serde(default)]
    pub altar_anchors: Vec<Vec3>,
}

impl StructureTemplate {
    /// Anchors the template provides for `category`
    pub fn anchor_count(&self, category: AnchorCategory) -> usize {
        match category {
            AnchorCategory::Spawn => self.spawn_anchors.len(),
            AnchorCategory::Processor => self.processor_anchors.len(),
            AnchorCategory::Altar => self.altar_anchors.len(),
        }
    }

    /// Build a fresh anchor pool from the template's three collections
    pub fn instantiate(&self) -> AnchorPool {
        let collect = |category: AnchorCategory, positions: &[Vec3]| -> Vec<Anchor> {
            positions
                .iter()
                .enumerate()
                .map(|(index, &position)| Anchor {
                    category,
                    index,
                    position,
                })
                .collect()
        };

        AnchorPool::new(
            collect(AnchorCategory::Spawn, &self.spawn_anchors),
            collect(AnchorCategory::Processor, &self.processor_anchors),
            collect(AnchorCategory::Altar, &self.altar_anchors),
        )
    }
}

/// Complete configuration for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub id: LevelId,
    /// Display name shown in the selection menu
    pub name: String,
    pub structure: StructureTemplate,
    #[serde(default)]
    pub spawners: Vec<SpawnerConfig>,
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
    /// Completed requests needed to win
    pub request_count: u32,
    /// Score a run must strictly exceed to earn each star
    pub star_thresholds: [u64; STAR_TIERS],
}

impl LevelDescriptor {
    /// Number of anchors of `category` this level needs
    pub fn required_anchors(&self, category: AnchorCategory) -> usize {
        match category {
            AnchorCategory::Spawn => self.spawners.len(),
            AnchorCategory::Processor => self.processors.len(),
            AnchorCategory::Altar => 1,
        }
    }

    /// Stars earned by `score`: tier `i` is earned iff `score > star_thresholds[i]`
    pub fn stars_for(&self, score: u64) -> [bool; STAR_TIERS] {
        self.star_thresholds.map(|threshold| score > threshold)
    }
}
