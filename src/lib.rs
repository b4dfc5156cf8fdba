pub mod config;
pub mod error;
pub mod logging;
pub mod resource;
pub mod worldgen;

pub use config::{ConfigLoader, GeneratorConfig};
pub use error::{Result, WorldgenError};
pub use resource::{DirectorySink, GenerationStats, MemorySink, ResourceManager, ResourceSink};
pub use worldgen::vein::Vein;

/// Namespace every generated document is written under.
pub const NAMESPACE: &str = "tfc";
