use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::worldgen::vein::{builtin_veins, Vein};

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/main/resources")
}

fn default_locale() -> String {
    "en_us".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for one generator run, usually read from `worldgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Resource root; `data/` and `assets/` are created below it.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Veins generated in addition to the built-in table.
    #[serde(default)]
    pub extra_veins: Vec<Vein>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            locale: default_locale(),
            pretty: default_pretty(),
            log_level: default_log_level(),
            extra_veins: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config = serde_yaml::from_str(text).context("Failed to parse generator config")?;
        Ok(config)
    }

    /// The built-in vein table followed by any configured extras.
    pub fn veins(&self) -> Vec<Vein> {
        let mut veins = builtin_veins();
        veins.extend(self.extra_veins.iter().cloned());
        veins
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<GeneratorConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GeneratorConfig = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::vein::VeinKind;

    #[test]
    fn empty_document_uses_defaults() {
        let config = GeneratorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("src/main/resources"));
        assert_eq!(config.locale, "en_us");
        assert!(config.pretty);
        assert_eq!(config.log_level, "info");
        assert!(config.extra_veins.is_empty());
        assert_eq!(config.veins().len(), builtin_veins().len());
    }

    #[test]
    fn extra_veins_are_appended() {
        let config = GeneratorConfig::from_yaml_str(
            r#"
output_dir: out
pretty: false
extra_veins:
  - name: deep_sapphire
    ore: sapphire
    type: pipe
    rarity: 90
    size: 40
    min_y: 5
    max_y: 60
    density: 25
    rocks: [igneous_intrusive]
    biomes: volcanic
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert!(!config.pretty);
        let veins = config.veins();
        let extra = veins.last().unwrap();
        assert_eq!(extra.name, "deep_sapphire");
        assert_eq!(extra.kind, VeinKind::Pipe);
        assert_eq!(extra.biomes.as_deref(), Some("volcanic"));
        assert!(extra.spoiler.is_none());
    }

    #[test]
    fn loader_reports_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(temp_dir.path());
        let err = loader.load("missing.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn loader_reads_file_relative_to_base() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("worldgen.yaml"), "locale: de_de\n").unwrap();
        let config = ConfigLoader::new(temp_dir.path()).load("worldgen.yaml").unwrap();
        assert_eq!(config.locale, "de_de");
    }
}
