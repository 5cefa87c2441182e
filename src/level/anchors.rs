//! Anchor pool: per-category working set of placement positions
//!
//! Anchors are consumed without replacement during level setup. The pool must
//! be validated against a descriptor before any anchor is taken.

use std::fmt;

use glam::Vec3;
use rand::Rng;

use super::descriptor::LevelDescriptor;

/// Entity category an anchor is reserved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorCategory {
    Spawn,
    Processor,
    Altar,
}

impl AnchorCategory {
    pub const ALL: [AnchorCategory; 3] = [
        AnchorCategory::Spawn,
        AnchorCategory::Processor,
        AnchorCategory::Altar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorCategory::Spawn => "Spawn",
            AnchorCategory::Processor => "Processor",
            AnchorCategory::Altar => "Altar",
        }
    }
}

/// A spatial location reserved for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub category: AnchorCategory,
    /// Position of the anchor within its template collection
    pub index: usize,
    pub position: Vec3,
}

/// One category that cannot satisfy a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorShortfall {
    pub category: AnchorCategory,
    pub required: usize,
    pub provided: usize,
}

impl fmt::Display for AnchorShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            AnchorCategory::Altar => f.write_str("No altar locations found"),
            category => write!(
                f,
                "{} locations count mismatch | Required: {}, Provided: {}",
                category.as_str(),
                self.required,
                self.provided
            ),
        }
    }
}

/// Mutable anchor sets for a single level load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorPool {
    spawn: Vec<Anchor>,
    processor: Vec<Anchor>,
    altar: Vec<Anchor>,
}

impl AnchorPool {
    pub fn new(spawn: Vec<Anchor>, processor: Vec<Anchor>, altar: Vec<Anchor>) -> Self {
        Self {
            spawn,
            processor,
            altar,
        }
    }

    /// Anchors still available in `category`
    pub fn anchors(&self, category: AnchorCategory) -> &[Anchor] {
        match category {
            AnchorCategory::Spawn => &self.spawn,
            AnchorCategory::Processor => &self.processor,
            AnchorCategory::Altar => &self.altar,
        }
    }

    fn anchors_mut(&mut self, category: AnchorCategory) -> &mut Vec<Anchor> {
        match category {
            AnchorCategory::Spawn => &mut self.spawn,
            AnchorCategory::Processor => &mut self.processor,
            AnchorCategory::Altar => &mut self.altar,
        }
    }

    pub fn available(&self, category: AnchorCategory) -> usize {
        self.anchors(category).len()
    }

    /// Check every category against `descriptor`.
    ///
    /// All violated categories are reported together, in spawn, processor,
    /// altar order. An empty result means the level can be placed.
    pub fn shortfalls(&self, descriptor: &LevelDescriptor) -> Vec<AnchorShortfall> {
        AnchorCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let required = descriptor.required_anchors(category);
                let provided = self.available(category);
                (provided < required).then_some(AnchorShortfall {
                    category,
                    required,
                    provided,
                })
            })
            .collect()
    }

    /// Remove and return a uniformly random anchor from `category`
    pub fn take_random<R: Rng>(&mut self, category: AnchorCategory, rng: &mut R) -> Option<Anchor> {
        let anchors = self.anchors_mut(category);
        if anchors.is_empty() {
            return None;
        }
        let index = rng.random_range(0..anchors.len());
        // Order within a category carries no meaning once sampled
        Some(anchors.swap_remove(index))
    }

    /// Return a uniformly random anchor from `category` without consuming it
    pub fn pick_random<R: Rng>(&self, category: AnchorCategory, rng: &mut R) -> Option<Anchor> {
        let anchors = self.anchors(category);
        if anchors.is_empty() {
            return None;
        }
        Some(anchors[rng.random_range(0..anchors.len())])
    }
}
