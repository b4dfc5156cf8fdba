use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = WorldgenError> = std::result::Result<T, E>;

/// Failures that abort a generation run. None of these are recoverable: they
/// point at a broken table or an unwritable output directory.
#[derive(Debug, Error)]
pub enum WorldgenError {
    #[error("unknown rock or rock category specification: {spec} at {context}")]
    UnknownRock { spec: String, context: String },

    #[error("unknown biome filter '{0}'")]
    UnknownBiomeFilter(String),

    #[error("vein {vein} references unknown ore '{ore}'")]
    UnknownOre { vein: String, ore: String },

    #[error("vein {vein} has spoiler rarity {rarity}%, which must be below 100")]
    InvalidSpoiler { vein: String, rarity: u32 },

    #[error("vein name '{0}' is used more than once")]
    DuplicateVein(String),

    #[error("invalid resource location '{0}'")]
    InvalidLocation(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
