//! World generation documents.
//!
//! [`generate`] runs one full pass: terrain descriptors first, then every
//! biome, then the configured features those biomes reference.

pub mod biome;
pub mod climate;
pub mod decoration;
pub mod decorator;
pub mod feature;
pub mod flora;
pub mod geology;
pub mod placement;
pub mod provider;
pub mod rock;
pub mod soil;
pub mod terrain;
pub mod tree;
pub mod vein;

use tracing::info;

use crate::error::Result;
use crate::resource::{ResourceKind, ResourceManager, ResourceSink};
use vein::Vein;

/// Writes every world generation document for `veins` into `rm`.
///
/// The vein table is checked before anything is written. Language entries
/// are buffered in `rm`; call [`ResourceManager::finish`] afterwards to
/// flush them.
pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>, veins: &[Vein]) -> Result<()> {
    vein::check_veins(veins)?;
    terrain::generate(rm)?;
    info!(
        surface_builders = rm.stats().count(ResourceKind::SurfaceBuilder),
        carvers = rm.stats().count(ResourceKind::Carver),
        "terrain written"
    );

    let biomes = biome::generate(rm, veins)?;
    info!(biomes, "biomes written");

    let before = rm.stats().count(ResourceKind::Feature);
    geology::generate(rm)?;
    tree::generate(rm)?;
    flora::generate(rm)?;
    info!(features = rm.stats().count(ResourceKind::Feature) - before, "features written");

    let before = rm.stats().count(ResourceKind::Feature);
    vein::generate(rm, veins)?;
    info!(veins = rm.stats().count(ResourceKind::Feature) - before, "veins written");
    Ok(())
}
