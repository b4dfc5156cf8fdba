use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, WorldgenError};

/// A namespaced identifier, `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    /// Parses `namespace:path`, or a bare `path` in `default_namespace`.
    pub fn parse(text: &str, default_namespace: &str) -> Result<Self> {
        let (namespace, path) = match text.split_once(':') {
            Some((namespace, path)) => (namespace, path),
            None => (default_namespace, text),
        };
        if !is_valid_namespace(namespace) || !is_valid_path(path) {
            return Err(WorldgenError::InvalidLocation(text.to_string()));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path split on `/`, as a relative file system path without extension.
    pub fn to_relative_path(&self) -> PathBuf {
        self.path.split('/').collect()
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.ends_with('/')
        && !path.contains("//")
        && path
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
}
