//! Dimension, noise settings, surface builders and carvers.

use serde::Serialize;
use serde_json::{json, Value};

use super::feature::{configure, configure_empty};
use super::provider::{height_provider, trapezoid_float, uniform_float, vertical_anchor, Anchor, HeightDistribution};
use crate::error::Result;
use crate::resource::{ResourceManager, ResourceSink};

pub const MIN_Y: i32 = -64;
pub const WORLD_HEIGHT: u32 = 384;
pub const SEA_LEVEL: i32 = 63;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionType {
    pub logical_height: u32,
    pub infiniburn: String,
    pub effects: String,
    pub ambient_light: f64,
    pub respawn_anchor_works: bool,
    pub has_raids: bool,
    pub min_y: i32,
    pub height: u32,
    pub natural: bool,
    pub coordinate_scale: f64,
    pub piglin_safe: bool,
    pub bed_works: bool,
    pub has_skylight: bool,
    pub has_ceiling: bool,
    pub ultrawarm: bool,
}

impl DimensionType {
    pub fn overworld() -> Self {
        Self {
            logical_height: WORLD_HEIGHT,
            infiniburn: "minecraft:infiniburn_overworld".to_string(),
            effects: "minecraft:overworld".to_string(),
            ambient_light: 0.0,
            respawn_anchor_works: false,
            has_raids: true,
            min_y: MIN_Y,
            height: WORLD_HEIGHT,
            natural: true,
            coordinate_scale: 1.0,
            piglin_safe: false,
            bed_works: true,
            has_skylight: true,
            has_ceiling: false,
            ultrawarm: false,
        }
    }
}

pub fn overworld_noise_settings() -> Value {
    json!({
        "noise_caves_enabled": true,
        "deepslate_enabled": false,
        "ore_veins_enabled": false,
        "noodle_caves_enabled": true,
        "min_surface_level": 50,
        "disable_mob_generation": false,
        "aquifers_enabled": true,
        "default_fluid": { "Properties": { "level": "0" }, "Name": "minecraft:water" },
        "bedrock_roof_position": i32::MIN,
        "bedrock_floor_position": 0,
        "sea_level": SEA_LEVEL,
        "structures": {
            "stronghold": { "distance": 32, "spread": 3, "count": 128 },
            "structures": {}
        },
        "noise": {
            "simplex_surface_noise": true,
            "random_density_offset": true,
            "size_vertical": 2,
            "density_factor": 1.0,
            "density_offset": -0.46875,
            "top_slide": { "target": -10, "size": 3, "offset": 0 },
            "bottom_slide": { "target": 15, "size": 3, "offset": 0 },
            "size_horizontal": 1,
            "min_y": MIN_Y,
            "height": WORLD_HEIGHT,
            "sampling": {
                "xz_scale": 0.9999999814507745,
                "y_scale": 0.9999999814507745,
                "xz_factor": 80.0,
                "y_factor": 160.0
            }
        },
        "default_block": { "Name": "minecraft:stone" }
    })
}

/// Surface builder names and their configured documents.
pub fn surface_builders() -> Vec<(&'static str, Value)> {
    let with_volcanoes = |parent: &str| configure("tfc:with_volcanoes", json!({ "parent": parent }));
    vec![
        ("badlands", configure_empty("tfc:badlands")),
        ("volcanic", with_volcanoes("tfc:normal")),
        ("normal", configure_empty("tfc:normal")),
        ("icebergs", configure_empty("tfc:icebergs")),
        ("mountains", configure_empty("tfc:mountains")),
        ("volcanic_mountains", with_volcanoes("tfc:mountains")),
        ("shore", configure_empty("tfc:shore")),
    ]
}

fn absolute_range(min_y: i32, max_y: i32) -> Value {
    height_provider(min_y, max_y, HeightDistribution::Uniform, Anchor::Absolute)
}

fn lava_level() -> Value {
    vertical_anchor(8, Anchor::AboveBottom)
}

/// Air carvers every biome runs, in order.
pub const AIR_CARVERS: [&str; 3] = ["tfc:cave", "tfc:canyon", "tfc:crevice"];

pub fn carvers() -> Vec<(&'static str, Value)> {
    let cave = configure(
        "tfc:cave",
        json!({
            "probability": 0.3,
            "y": absolute_range(-56, 126),
            "yScale": uniform_float(0.1, 0.9),
            "lava_level": lava_level(),
            "aquifers_enabled": false,
            "horizontal_radius_multiplier": uniform_float(0.7, 1.4),
            "vertical_radius_multiplier": uniform_float(0.8, 1.3),
            "floor_level": uniform_float(-1.0, -0.4),
        }),
    );

    let canyon = configure(
        "tfc:canyon",
        json!({
            "probability": 0.03,
            "y": absolute_range(10, 67),
            "yScale": 3,
            "lava_level": lava_level(),
            "aquifers_enabled": false,
            "vertical_rotation": uniform_float(-0.125, 0.125),
            "shape": {
                "distance_factor": uniform_float(0.75, 1.0),
                "thickness": trapezoid_float(0.0, 6.0, 2.0),
                "width_smoothness": 3,
                "horizontal_radius_factor": uniform_float(0.75, 1.0),
                "vertical_radius_default_factor": 1.0,
                "vertical_radius_center_factor": 0.0
            }
        }),
    );

    // Narrow, deep canyons.
    let crevice = configure(
        "tfc:canyon",
        json!({
            "probability": 0.00125,
            "y": absolute_range(40, 80),
            "yScale": uniform_float(6.0, 8.0),
            "lava_level": lava_level(),
            "aquifers_enabled": false,
            "vertical_rotation": uniform_float(-0.125, 0.125),
            "shape": {
                "distance_factor": uniform_float(0.5, 1.0),
                "thickness": uniform_float(0.0, 1.0),
                "width_smoothness": 6,
                "horizontal_radius_factor": uniform_float(0.25, 1.0),
                "vertical_radius_default_factor": 0.0,
                "vertical_radius_center_factor": 5.0
            }
        }),
    );

    vec![("cave", cave), ("canyon", canyon), ("crevice", crevice)]
}

pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>) -> Result<()> {
    rm.data("minecraft:dimension_type/overworld", DimensionType::overworld())?;
    rm.data("minecraft:worldgen/noise_settings/overworld", overworld_noise_settings())?;
    for (name, builder) in surface_builders() {
        rm.surface_builder(name, builder)?;
    }
    for (name, carver) in carvers() {
        rm.carver(name, carver)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::MemorySink;

    #[test]
    fn overworld_spans_384_blocks_from_minus_64() {
        let dimension = serde_json::to_value(DimensionType::overworld()).unwrap();
        assert_eq!(dimension["min_y"], -64);
        assert_eq!(dimension["height"], 384);
        assert_eq!(dimension["logical_height"], 384);
        assert_eq!(dimension["has_ceiling"], false);
        assert_eq!(dimension.as_object().unwrap().len(), 15);
    }

    #[test]
    fn noise_settings_pin_sea_level_and_roof() {
        let settings = overworld_noise_settings();
        assert_eq!(settings["sea_level"], 63);
        assert_eq!(settings["bedrock_roof_position"], -2147483648i64);
        assert_eq!(settings["noise"]["density_offset"], -0.46875);
    }

    #[test]
    fn volcanic_builders_wrap_a_parent() {
        let builders = surface_builders();
        assert_eq!(builders.len(), 7);
        let (_, volcanic) = builders.iter().find(|(name, _)| *name == "volcanic_mountains").unwrap();
        assert_eq!(volcanic["type"], "tfc:with_volcanoes");
        assert_eq!(volcanic["config"]["parent"], "tfc:mountains");
    }

    #[test]
    fn crevice_is_a_rare_canyon() {
        let carvers = carvers();
        let (_, crevice) = carvers.iter().find(|(name, _)| *name == "crevice").unwrap();
        assert_eq!(crevice["type"], "tfc:canyon");
        assert_eq!(crevice["config"]["probability"], 0.00125);
        assert_eq!(crevice["config"]["y"]["min_inclusive"], json!({"absolute": 40}));
        assert_eq!(crevice["config"]["lava_level"], json!({"above_bottom": 8}));
    }

    #[test]
    fn carvers_match_biome_references() {
        let names: Vec<String> = carvers().iter().map(|(name, _)| format!("tfc:{name}")).collect();
        assert_eq!(names, AIR_CARVERS);
    }

    #[test]
    fn writes_data_under_minecraft_namespace() {
        let mut rm = ResourceManager::new("tfc", MemorySink::new());
        generate(&mut rm).unwrap();
        assert!(rm.sink().get("data/minecraft/dimension_type/overworld.json").is_some());
        assert!(rm
            .sink()
            .get("data/minecraft/worldgen/noise_settings/overworld.json")
            .is_some());
        assert!(rm
            .sink()
            .get("data/tfc/worldgen/configured_surface_builder/shore.json")
            .is_some());
        assert!(rm.sink().get("data/tfc/worldgen/configured_carver/cave.json").is_some());
    }
}
