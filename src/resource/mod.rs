//! The output side of the generator: namespaced identifiers, the on-disk
//! layout the game expects, and the sinks documents are written to.

mod location;
mod sink;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

pub use location::ResourceLocation;
pub use sink::{DirectorySink, MemorySink, ResourceSink, WriteOutcome};

use crate::error::Result;

/// Category of a generated document; decides where it lives on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Data,
    SurfaceBuilder,
    Carver,
    Biome,
    Feature,
    Lang,
}

impl ResourceKind {
    fn worldgen_folder(self) -> Option<&'static str> {
        match self {
            ResourceKind::SurfaceBuilder => Some("configured_surface_builder"),
            ResourceKind::Carver => Some("configured_carver"),
            ResourceKind::Biome => Some("biome"),
            ResourceKind::Feature => Some("configured_feature"),
            ResourceKind::Data | ResourceKind::Lang => None,
        }
    }

    /// Relative path of the document for `location`.
    pub fn relative_path(self, location: &ResourceLocation) -> PathBuf {
        let mut path = PathBuf::new();
        match self {
            ResourceKind::Lang => {
                path.push("assets");
                path.push(location.namespace());
                path.push("lang");
            }
            _ => {
                path.push("data");
                path.push(location.namespace());
                if let Some(folder) = self.worldgen_folder() {
                    path.push("worldgen");
                    path.push(folder);
                }
            }
        }
        path.push(location.to_relative_path());
        path.set_extension("json");
        path
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Data => "data",
            ResourceKind::SurfaceBuilder => "surface builders",
            ResourceKind::Carver => "carvers",
            ResourceKind::Biome => "biomes",
            ResourceKind::Feature => "features",
            ResourceKind::Lang => "lang",
        };
        f.write_str(name)
    }
}

/// Counts of what a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub written: BTreeMap<ResourceKind, usize>,
    pub unchanged: usize,
    pub lang_entries: usize,
}

impl GenerationStats {
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.written.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.written.values().sum()
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .written
            .iter()
            .map(|(kind, count)| format!("{count} {kind}"))
            .collect();
        write!(
            f,
            "{} documents ({}), {} unchanged, {} translations",
            self.total(),
            parts.join(", "),
            self.unchanged,
            self.lang_entries
        )
    }
}

/// Collects generated documents and hands them to a [`ResourceSink`].
///
/// Translation entries are buffered and written once by [`finish`], since
/// every biome contributes to the same language file.
///
/// [`finish`]: ResourceManager::finish
pub struct ResourceManager<S: ResourceSink> {
    namespace: String,
    locale: String,
    sink: S,
    lang: BTreeMap<String, String>,
    stats: GenerationStats,
}

impl<S: ResourceSink> ResourceManager<S> {
    pub fn new(namespace: impl Into<String>, sink: S) -> Self {
        Self {
            namespace: namespace.into(),
            locale: "en_us".to_string(),
            sink,
            lang: BTreeMap::new(),
            stats: GenerationStats::default(),
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Qualifies a bare path with this manager's namespace.
    pub fn location(&self, name: &str) -> Result<ResourceLocation> {
        ResourceLocation::parse(name, &self.namespace)
    }

    /// Raw data file, `data/<ns>/<path>.json`.
    pub fn data(&mut self, name: &str, document: impl Serialize) -> Result<()> {
        self.write(ResourceKind::Data, name, document)
    }

    pub fn surface_builder(&mut self, name: &str, document: impl Serialize) -> Result<()> {
        self.write(ResourceKind::SurfaceBuilder, name, document)
    }

    pub fn carver(&mut self, name: &str, document: impl Serialize) -> Result<()> {
        self.write(ResourceKind::Carver, name, document)
    }

    pub fn biome(&mut self, name: &str, document: impl Serialize) -> Result<()> {
        self.write(ResourceKind::Biome, name, document)
    }

    pub fn feature(&mut self, name: &str, document: impl Serialize) -> Result<()> {
        self.write(ResourceKind::Feature, name, document)
    }

    /// Buffers a translation entry. A later entry for the same key replaces
    /// the earlier one.
    pub fn lang(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.lang.insert(key.into(), value.into());
    }

    pub fn write(&mut self, kind: ResourceKind, name: &str, document: impl Serialize) -> Result<()> {
        let location = self.location(name)?;
        let document = serde_json::to_value(document)?;
        self.write_value(kind, &location, &document)
    }

    fn write_value(
        &mut self,
        kind: ResourceKind,
        location: &ResourceLocation,
        document: &Value,
    ) -> Result<()> {
        let relative = kind.relative_path(location);
        match self.sink.write(&relative, document)? {
            WriteOutcome::Written => {
                debug!(%location, path = %relative.display(), "wrote {kind}");
            }
            WriteOutcome::Unchanged => {
                trace!(%location, "unchanged");
                self.stats.unchanged += 1;
            }
        }
        *self.stats.written.entry(kind).or_insert(0) += 1;
        Ok(())
    }

    /// Writes the buffered language file and returns the run's statistics.
    pub fn finish(&mut self) -> Result<GenerationStats> {
        if !self.lang.is_empty() {
            let location = ResourceLocation::parse(&self.locale, &self.namespace)?;
            let document = serde_json::to_value(&self.lang)?;
            self.write_value(ResourceKind::Lang, &location, &document)?;
            self.stats.lang_entries = self.lang.len();
        }
        Ok(self.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::*;

    #[test]
    fn kinds_map_to_game_layout() {
        let location = ResourceLocation::parse("tree/acacia", "tfc").unwrap();
        assert_eq!(
            ResourceKind::Feature.relative_path(&location),
            Path::new("data/tfc/worldgen/configured_feature/tree/acacia.json")
        );
        let location = ResourceLocation::parse("minecraft:dimension_type/overworld", "tfc").unwrap();
        assert_eq!(
            ResourceKind::Data.relative_path(&location),
            Path::new("data/minecraft/dimension_type/overworld.json")
        );
        let location = ResourceLocation::parse("en_us", "tfc").unwrap();
        assert_eq!(
            ResourceKind::Lang.relative_path(&location),
            Path::new("assets/tfc/lang/en_us.json")
        );
    }

    #[test]
    fn lang_entries_flush_on_finish() {
        let mut rm = ResourceManager::new("tfc", MemorySink::new());
        rm.lang("biome.tfc.plains_normal_normal", "(Normal / Normal) Plains");
        rm.feature("lake", json!({"type": "tfc:lake", "config": {}}))
            .unwrap();
        assert!(rm.sink().get("assets/tfc/lang/en_us.json").is_none());

        let stats = rm.finish().unwrap();
        assert_eq!(stats.count(ResourceKind::Feature), 1);
        assert_eq!(stats.count(ResourceKind::Lang), 1);
        assert_eq!(stats.lang_entries, 1);
        let lang = rm.sink().get("assets/tfc/lang/en_us.json").unwrap();
        assert_eq!(lang["biome.tfc.plains_normal_normal"], "(Normal / Normal) Plains");
    }

    #[test]
    fn invalid_names_are_rejected_before_writing() {
        let mut rm = ResourceManager::new("tfc", MemorySink::new());
        assert!(rm.feature("Bad Name", json!({})).is_err());
        assert!(rm.sink().is_empty());
    }
}
