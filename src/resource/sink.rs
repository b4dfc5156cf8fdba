use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, WorldgenError};

/// Whether a document actually changed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Destination for generated documents, addressed by a path relative to the
/// resource root (`data/tfc/worldgen/biome/plains_normal_normal.json`).
pub trait ResourceSink {
    fn write(&mut self, relative: &Path, document: &Value) -> Result<WriteOutcome>;
}

/// Writes JSON files below a root directory. Files whose contents already
/// match are left untouched so repeated runs keep their timestamps.
pub struct DirectorySink {
    root: PathBuf,
    pretty: bool,
}

impl DirectorySink {
    pub fn new(root: impl AsRef<Path>, pretty: bool) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pretty,
        }
    }

    fn render(&self, document: &Value) -> Result<String> {
        let mut text = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        text.push('\n');
        Ok(text)
    }
}

impl ResourceSink for DirectorySink {
    fn write(&mut self, relative: &Path, document: &Value) -> Result<WriteOutcome> {
        let path = self.root.join(relative);
        let text = self.render(document)?;

        if let Ok(existing) = fs::read_to_string(&path) {
            if existing == text {
                return Ok(WriteOutcome::Unchanged);
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WorldgenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, text).map_err(|source| WorldgenError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(WriteOutcome::Written)
    }
}

/// Keeps every document in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: BTreeMap<PathBuf, Value>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative: impl AsRef<Path>) -> Option<&Value> {
        self.documents.get(relative.as_ref())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents whose path starts with `prefix`, e.g. `data/tfc/worldgen/biome`.
    pub fn under<'a>(
        &'a self,
        prefix: impl AsRef<Path> + 'a,
    ) -> impl Iterator<Item = (&'a Path, &'a Value)> + 'a {
        self.documents
            .iter()
            .filter(move |(path, _)| path.starts_with(prefix.as_ref()))
            .map(|(path, value)| (path.as_path(), value))
    }
}

impl ResourceSink for MemorySink {
    fn write(&mut self, relative: &Path, document: &Value) -> Result<WriteOutcome> {
        let previous = self
            .documents
            .insert(relative.to_path_buf(), document.clone());
        Ok(match previous {
            Some(previous) if &previous == document => WriteOutcome::Unchanged,
            _ => WriteOutcome::Written,
        })
    }
}
