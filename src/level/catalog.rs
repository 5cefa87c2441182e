//! Authored level catalog loaded from a JSON asset

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;

use super::descriptor::{LevelDescriptor, LevelId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read level catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed level catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown level '{0}'")]
    UnknownLevel(LevelId),
    #[error("duplicate level id '{0}'")]
    DuplicateLevel(LevelId),
}

#[derive(Deserialize)]
struct CatalogFile {
    levels: Vec<LevelDescriptor>,
}

/// Selectable levels in authored order
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: Vec<Rc<LevelDescriptor>>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDescriptor>) -> Self {
        Self {
            levels: levels.into_iter().map(Rc::new).collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        // Ids key high score records and must be unique
        let mut seen = HashSet::new();
        if let Some(level) = file.levels.iter().find(|level| !seen.insert(&level.id)) {
            return Err(CatalogError::DuplicateLevel(level.id.clone()));
        }
        Ok(Self::new(file.levels))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn levels(&self) -> &[Rc<LevelDescriptor>] {
        &self.levels
    }

    pub fn get(&self, id: &LevelId) -> Result<Rc<LevelDescriptor>, CatalogError> {
        self.levels
            .iter()
            .find(|level| &level.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownLevel(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
