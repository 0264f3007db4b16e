//! Resource lookup by name and category.

use std::path::{Path, PathBuf};

use candlekeep_common::{ResRef, ResourceCategory};
use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// Source of game resources.
///
/// Names are case-insensitive, as the engine treats them.
pub trait ResourceProvider {
    /// Whether the resource exists.
    fn contains(&self, name: &ResRef, category: ResourceCategory) -> bool;

    /// The resource's bytes.
    fn read(&self, name: &ResRef, category: ResourceCategory) -> Result<Vec<u8>>;
}

type Key = (String, ResourceCategory);

fn not_found(name: &ResRef, category: ResourceCategory) -> Error {
    Error::NotFound {
        name: name.name(),
        category,
    }
}

/// Resources held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    entries: FxHashMap<Key, Vec<u8>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: &ResRef, category: ResourceCategory, data: Vec<u8>) {
        self.entries.insert((name.key(), category), data);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceProvider for MemoryProvider {
    fn contains(&self, name: &ResRef, category: ResourceCategory) -> bool {
        self.entries.contains_key(&(name.key(), category))
    }

    fn read(&self, name: &ResRef, category: ResourceCategory) -> Result<Vec<u8>> {
        self.entries
            .get(&(name.key(), category))
            .cloned()
            .ok_or_else(|| not_found(name, category))
    }
}

/// Loose files in one directory (an `override` folder, say).
///
/// The directory is indexed once; files whose extension is not a known
/// category or whose stem is not a valid resource name are ignored.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
    files: FxHashMap<Key, PathBuf>,
}

impl DirectoryProvider {
    /// Index `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut files = FxHashMap::default();

        for entry in std::fs::read_dir(&root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };
            let (Ok(name), Ok(category)) = (stem.parse::<ResRef>(), ext.parse::<ResourceCategory>())
            else {
                tracing::trace!(path = %path.display(), "skipping file");
                continue;
            };
            files.insert((name.key(), category), path);
        }

        tracing::debug!(root = %root.display(), files = files.len(), "indexed directory");
        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path of a resource, if present.
    pub fn path_of(&self, name: &ResRef, category: ResourceCategory) -> Option<&Path> {
        self.files.get(&(name.key(), category)).map(PathBuf::as_path)
    }
}

impl ResourceProvider for DirectoryProvider {
    fn contains(&self, name: &ResRef, category: ResourceCategory) -> bool {
        self.files.contains_key(&(name.key(), category))
    }

    fn read(&self, name: &ResRef, category: ResourceCategory) -> Result<Vec<u8>> {
        let path = self
            .path_of(name, category)
            .ok_or_else(|| not_found(name, category))?;
        Ok(std::fs::read(path)?)
    }
}
