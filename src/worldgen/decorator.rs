//! Placement decorators composed onto configured features.

use serde_json::{json, Map, Value};

use super::provider::{height_provider, Anchor, HeightDistribution};

/// A named placement modifier with its parameter object.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub name: &'static str,
    pub config: Value,
}

impl Decorator {
    pub fn new(name: &'static str, config: Value) -> Self {
        Self { name, config }
    }

    /// A decorator that takes no parameters.
    pub fn plain(name: &'static str) -> Self {
        Self::new(name, json!({}))
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": self.name,
            "config": self.config,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heightmap {
    MotionBlocking,
    MotionBlockingNoLeaves,
    OceanFloor,
    OceanFloorWg,
    WorldSurface,
    WorldSurfaceWg,
}

impl Heightmap {
    pub fn as_str(self) -> &'static str {
        match self {
            Heightmap::MotionBlocking => "MOTION_BLOCKING",
            Heightmap::MotionBlockingNoLeaves => "MOTION_BLOCKING_NO_LEAVES",
            Heightmap::OceanFloor => "OCEAN_FLOOR",
            Heightmap::OceanFloorWg => "OCEAN_FLOOR_WG",
            Heightmap::WorldSurface => "WORLD_SURFACE",
            Heightmap::WorldSurfaceWg => "WORLD_SURFACE_WG",
        }
    }
}

pub fn chance(chance: u32) -> Decorator {
    Decorator::new("minecraft:chance", json!({ "chance": chance }))
}

pub fn count(count: u32) -> Decorator {
    Decorator::new("minecraft:count", json!({ "count": count }))
}

pub fn square() -> Decorator {
    Decorator::plain("minecraft:square")
}

pub fn heightmap(heightmap: Heightmap) -> Decorator {
    Decorator::new("minecraft:heightmap", json!({ "heightmap": heightmap.as_str() }))
}

pub fn range(min_y: i32, max_y: i32) -> Decorator {
    range_with(min_y, max_y, HeightDistribution::Uniform)
}

pub fn range_biased(min_y: i32, max_y: i32) -> Decorator {
    range_with(min_y, max_y, HeightDistribution::BiasedToBottom)
}

fn range_with(min_y: i32, max_y: i32, distribution: HeightDistribution) -> Decorator {
    Decorator::new(
        "minecraft:range",
        json!({ "height": height_provider(min_y, max_y, distribution, Anchor::AboveBottom) }),
    )
}

/// Places into carved air. Missing y bounds are left out of the config.
pub fn carving_mask(probability: f64, min_y: Option<i32>, max_y: Option<i32>) -> Decorator {
    let mut config = Map::new();
    config.insert("step".to_string(), json!("air"));
    config.insert("probability".to_string(), json!(probability));
    if let Some(min_y) = min_y {
        config.insert("min_y".to_string(), json!(min_y));
    }
    if let Some(max_y) = max_y {
        config.insert("max_y".to_string(), json!(max_y));
    }
    Decorator::new("tfc:carving_mask", Value::Object(config))
}

pub fn flat_enough() -> Decorator {
    Decorator::plain("tfc:flat_enough")
}

/// `tfc:near_water`, optionally with an explicit search radius.
pub fn near_water(radius: Option<u32>) -> Decorator {
    match radius {
        Some(radius) => Decorator::new("tfc:near_water", json!({ "radius": radius })),
        None => Decorator::plain("tfc:near_water"),
    }
}

pub fn volcano_center() -> Decorator {
    Decorator::new("tfc:volcano", json!({ "center": true }))
}

pub fn volcano_distance(distance: f64) -> Decorator {
    Decorator::new("tfc:volcano", json!({ "distance": distance }))
}

pub fn count_noise_biased(noise_to_count_ratio: u32, noise_factor: f64, noise_offset: f64) -> Decorator {
    Decorator::new(
        "minecraft:count_noise_biased",
        json!({
            "noise_to_count_ratio": noise_to_count_ratio,
            "noise_factor": noise_factor,
            "noise_offset": noise_offset,
        }),
    )
}

/// Bounds for `tfc:climate`. Unset bounds are omitted from the output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Climate {
    min_temperature: Option<i32>,
    max_temperature: Option<i32>,
    min_rainfall: Option<i32>,
    max_rainfall: Option<i32>,
    min_forest: Option<&'static str>,
    max_forest: Option<&'static str>,
    fuzzy: Option<bool>,
}

impl Climate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Temperature and rainfall bounds together, `(min_t, max_t, min_r, max_r)`.
    pub fn bounds(min_temperature: i32, max_temperature: i32, min_rainfall: i32, max_rainfall: i32) -> Self {
        Self {
            min_temperature: Some(min_temperature),
            max_temperature: Some(max_temperature),
            min_rainfall: Some(min_rainfall),
            max_rainfall: Some(max_rainfall),
            ..Self::default()
        }
    }

    pub fn min_temperature(mut self, value: i32) -> Self {
        self.min_temperature = Some(value);
        self
    }

    pub fn max_temperature(mut self, value: i32) -> Self {
        self.max_temperature = Some(value);
        self
    }

    pub fn min_rainfall(mut self, value: i32) -> Self {
        self.min_rainfall = Some(value);
        self
    }

    /// Restricts placement to forested areas (`max_forest: normal`).
    pub fn needs_forest(mut self) -> Self {
        self.max_forest = Some("normal");
        self
    }

    pub fn forest(mut self, min_forest: &'static str, max_forest: &'static str) -> Self {
        self.min_forest = Some(min_forest);
        self.max_forest = Some(max_forest);
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = Some(fuzzy);
        self
    }

    pub fn decorator(self) -> Decorator {
        let mut config = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                config.insert(key.to_string(), value);
            }
        };
        put("min_temperature", self.min_temperature.map(Value::from));
        put("max_temperature", self.max_temperature.map(Value::from));
        put("min_rainfall", self.min_rainfall.map(Value::from));
        put("max_rainfall", self.max_rainfall.map(Value::from));
        put("min_forest", self.min_forest.map(Value::from));
        put("max_forest", self.max_forest.map(Value::from));
        put("fuzzy", self.fuzzy.map(Value::from));
        Decorator::new("tfc:climate", Value::Object(config))
    }
}

impl From<Climate> for Decorator {
    fn from(climate: Climate) -> Self {
        climate.decorator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_omits_unset_bounds() {
        let decorator = Climate::new().min_rainfall(350).min_temperature(12).decorator();
        assert_eq!(decorator.name, "tfc:climate");
        assert_eq!(
            decorator.config,
            json!({"min_temperature": 12, "min_rainfall": 350})
        );
    }

    #[test]
    fn climate_forest_and_fuzzy() {
        let decorator = Climate::bounds(16, 32, 150, 470).needs_forest().fuzzy(true).decorator();
        assert_eq!(
            decorator.config,
            json!({
                "min_temperature": 16,
                "max_temperature": 32,
                "min_rainfall": 150,
                "max_rainfall": 470,
                "max_forest": "normal",
                "fuzzy": true,
            })
        );
    }

    #[test]
    fn carving_mask_optional_bounds() {
        assert_eq!(
            carving_mask(0.09, None, None).config,
            json!({"step": "air", "probability": 0.09})
        );
        assert_eq!(
            carving_mask(0.006, Some(25), None).config,
            json!({"step": "air", "probability": 0.006, "min_y": 25})
        );
    }

    #[test]
    fn heightmap_names_are_uppercase() {
        assert_eq!(
            heightmap(Heightmap::WorldSurfaceWg).config,
            json!({"heightmap": "WORLD_SURFACE_WG"})
        );
        assert_eq!(Heightmap::OceanFloorWg.as_str(), "OCEAN_FLOOR_WG");
    }

    #[test]
    fn plain_decorators_serialize_with_empty_config() {
        assert_eq!(
            square().to_json(),
            json!({"type": "minecraft:square", "config": {}})
        );
    }
}
