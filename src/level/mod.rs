//! Level data and setup
//!
//! - `descriptor`: authored level configuration
//! - `anchors`: per-category placement pools
//! - `entities`: placed spawners, processors and the altar
//! - `bootstrap`: turns a descriptor into a running level
//! - `catalog`: the selectable level list

pub mod anchors;
pub mod bootstrap;
pub mod catalog;
pub mod descriptor;
pub mod entities;

pub use anchors::{Anchor, AnchorCategory, AnchorPool, AnchorShortfall};
pub use bootstrap::{BootstrapError, GameplayEvent, Level, LevelBootstrapper, LevelOutcome};
pub use catalog::{CatalogError, LevelCatalog};
pub use descriptor::{LevelDescriptor, LevelId, ProcessorConfig, SpawnerConfig, StructureTemplate};
pub use entities::{Altar, Processor, Spawner};
