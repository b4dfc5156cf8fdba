//! Biome templates and the climate variants assembled from them.
//!
//! Every template is crossed with each temperature and rainfall tier. The
//! template flags decide which feature groups a variant receives; the tiers
//! decide precipitation, colours and a few climate-only features (icebergs,
//! coral reefs, mossy boulders).

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::climate::{RainfallTier, TemperatureTier, DEFAULT_FOG_COLOR, DEFAULT_SKY_COLOR, RAINFALLS, TEMPERATURES};
use super::decoration::{Decoration, FeatureStages};
use super::flora::{
    biome_plants, BERRIES, COVERS, FOREST_DECORATORS, FRUITS, KELP, MISC_PLANT_FEATURES, SHELLFISH,
    SHORE_DECORATORS,
};
use super::terrain::AIR_CARVERS;
use super::vein::{dike_names, Vein};
use crate::error::Result;
use crate::resource::{ResourceManager, ResourceSink};

/// Which feature families a template places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OceanFeatures {
    Land,
    Ocean,
    /// Ocean features on top of the usual land features.
    Both,
}

impl OceanFeatures {
    pub fn ocean(self) -> bool {
        matches!(self, OceanFeatures::Ocean | OceanFeatures::Both)
    }

    pub fn land(self) -> bool {
        matches!(self, OceanFeatures::Land | OceanFeatures::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotSprings {
    None,
    Empty,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Precipitation {
    None,
    Rain,
    Snow,
}

impl Precipitation {
    /// Arid climates never precipitate; otherwise cold climates snow.
    pub fn for_climate(temperature: &TemperatureTier, rainfall: &RainfallTier) -> Self {
        if rainfall.is_arid() {
            Precipitation::None
        } else if temperature.is_cold() {
            Precipitation::Snow
        } else {
            Precipitation::Rain
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiomeTemplate {
    pub name: &'static str,
    pub category: &'static str,
    /// Surface builder path in the `tfc` namespace.
    pub surface_builder: &'static str,
    pub boulders: bool,
    pub spawnable: bool,
    pub ocean: OceanFeatures,
    /// `None` places lakes on every biome without ocean features.
    pub lakes: Option<bool>,
    pub volcanoes: bool,
    pub reef: bool,
    pub hot_springs: HotSprings,
}

const fn template(name: &'static str, category: &'static str, surface_builder: &'static str) -> BiomeTemplate {
    BiomeTemplate {
        name,
        category,
        surface_builder,
        boulders: false,
        spawnable: true,
        ocean: OceanFeatures::Land,
        lakes: None,
        volcanoes: false,
        reef: false,
        hot_springs: HotSprings::None,
    }
}

impl BiomeTemplate {
    const fn boulders(self) -> Self {
        Self { boulders: true, ..self }
    }

    const fn unspawnable(self) -> Self {
        Self { spawnable: false, ..self }
    }

    const fn ocean(self) -> Self {
        Self { ocean: OceanFeatures::Ocean, ..self }
    }

    const fn no_lakes(self) -> Self {
        Self { lakes: Some(false), ..self }
    }

    const fn volcanic(self) -> Self {
        Self { volcanoes: true, ..self }
    }

    const fn reef(self) -> Self {
        Self { reef: true, ..self }
    }

    const fn hot_springs(self, hot_springs: HotSprings) -> Self {
        Self { hot_springs, ..self }
    }

    pub fn has_lakes(&self) -> bool {
        self.lakes.unwrap_or(!self.ocean.ocean())
    }
}

pub static BIOME_TEMPLATES: [BiomeTemplate; 31] = [
    template("badlands", "mesa", "badlands").no_lakes(),
    template("canyons", "plains", "volcanic").boulders().no_lakes().volcanic().hot_springs(HotSprings::Active),
    template("low_canyons", "swamp", "normal").boulders().no_lakes().hot_springs(HotSprings::Empty),
    template("plains", "plains", "normal"),
    template("plateau", "extreme_hills", "mountains").boulders().hot_springs(HotSprings::Empty),
    template("hills", "plains", "normal"),
    template("rolling_hills", "plains", "normal").boulders().hot_springs(HotSprings::Empty),
    template("lake", "river", "normal").unspawnable(),
    template("lowlands", "swamp", "normal").no_lakes(),
    template("mountains", "extreme_hills", "mountains"),
    template("volcanic_mountains", "extreme_hills", "volcanic_mountains").volcanic().hot_springs(HotSprings::Active),
    template("old_mountains", "extreme_hills", "mountains").hot_springs(HotSprings::Active),
    template("oceanic_mountains", "extreme_hills", "mountains").ocean(),
    template("volcanic_oceanic_mountains", "extreme_hills", "volcanic_mountains").unspawnable().ocean().volcanic(),
    template("ocean", "ocean", "normal").unspawnable().ocean(),
    template("ocean_reef", "ocean", "normal").unspawnable().ocean().reef(),
    template("deep_ocean", "ocean", "normal").unspawnable().ocean(),
    template("deep_ocean_trench", "ocean", "normal").unspawnable().ocean(),
    template("river", "river", "normal").unspawnable(),
    template("shore", "beach", "shore").unspawnable().ocean(),
    template("mountain_river", "extreme_hills", "mountains").unspawnable(),
    template("volcanic_mountain_river", "extreme_hills", "volcanic_mountains").unspawnable().volcanic(),
    template("old_mountain_river", "extreme_hills", "mountains").unspawnable(),
    template("oceanic_mountain_river", "river", "mountains").unspawnable().ocean(),
    template("volcanic_oceanic_mountain_river", "river", "volcanic_mountains").unspawnable().ocean().volcanic(),
    template("mountain_lake", "extreme_hills", "mountains").unspawnable(),
    template("volcanic_mountain_lake", "extreme_hills", "volcanic_mountains").unspawnable().volcanic(),
    template("old_mountain_lake", "extreme_hills", "mountains").unspawnable(),
    template("oceanic_mountain_lake", "river", "mountains").unspawnable().ocean(),
    template("volcanic_oceanic_mountain_lake", "river", "volcanic_mountains").unspawnable().ocean().volcanic(),
    template("plateau_lake", "extreme_hills", "mountains").boulders().unspawnable(),
];

pub fn template_by_name(name: &str) -> Option<&'static BiomeTemplate> {
    BIOME_TEMPLATES.iter().find(|template| template.name == name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomeEffects {
    pub fog_color: u32,
    pub sky_color: u32,
    pub water_color: u32,
    pub water_fog_color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomeCarvers {
    pub air: Vec<String>,
    pub liquid: Vec<String>,
}

/// One assembled biome, serialized as the biome document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomeRecord {
    #[serde(skip)]
    pub name: String,
    pub precipitation: Precipitation,
    pub category: &'static str,
    pub depth: f64,
    pub scale: f64,
    pub temperature: f64,
    pub temperature_modifier: &'static str,
    pub downfall: f64,
    pub effects: BiomeEffects,
    pub surface_builder: String,
    pub carvers: BiomeCarvers,
    pub features: FeatureStages,
    pub starts: Vec<String>,
    pub spawners: Map<String, Value>,
    pub spawn_costs: Map<String, Value>,
    pub player_spawn_friendly: bool,
    pub creature_spawn_probability: f64,
}

fn tfc(path: &str) -> String {
    format!("tfc:{path}")
}

fn plant(path: &str) -> String {
    format!("tfc:plant/{path}")
}

/// Ore stage contents: gravel, one dike per intrusive rock, then the veins.
pub fn ore_features(veins: &[Vein]) -> Vec<String> {
    let mut features = vec![tfc("vein/gravel")];
    features.extend(dike_names().map(|name| tfc(&format!("vein/{name}"))));
    features.extend(veins.iter().map(Vein::feature_id));
    features
}

/// Builds the biome for one template and climate.
pub fn assemble(
    template: &BiomeTemplate,
    temperature: &TemperatureTier,
    rainfall: &RainfallTier,
    veins: &[Vein],
) -> BiomeRecord {
    use Decoration::*;

    let precipitation = Precipitation::for_climate(temperature, rainfall);
    let surface_builder = if precipitation == Precipitation::Snow && template.category == "ocean" {
        "icebergs"
    } else {
        template.surface_builder
    };

    let ocean = template.ocean.ocean();
    let land = template.ocean.land();

    let mut stages = FeatureStages::new();
    stages.push(RawGeneration, tfc("erosion"));
    stages.push(Lakes, tfc("underground_flood_fill_lake"));
    stages.extend(UndergroundOres, ore_features(veins));
    stages.extend(
        UndergroundDecoration,
        [
            "cave_spike",
            "large_cave_spike",
            "water_spring",
            "lava_spring",
            "calcite",
            "mega_calcite",
            "icicle",
            "underground_loose_rocks",
            "underground_guano",
        ]
        .map(tfc),
    );
    stages.push(TopLayerModification, tfc("surface_loose_rocks"));

    if template.boulders {
        stages.extend(SurfaceStructures, ["raw_boulder", "cobble_boulder"].map(tfc));
        if rainfall.is_damp() {
            stages.push(SurfaceStructures, tfc("mossy_boulder"));
        }
    }

    if ocean {
        stages.extend(VegetalDecoration, biome_plants(true).map(|entry| plant(entry.name)));
        if template.name == "shore" {
            stages.extend(TopLayerModification, SHORE_DECORATORS.map(tfc));
        } else {
            stages.extend(VegetalDecoration, KELP.map(plant));
        }
        stages.extend(TopLayerModification, SHELLFISH.map(tfc));
        if temperature.is_cold() {
            stages.extend(
                LocalModifications,
                ["iceberg_packed", "iceberg_blue", "iceberg_packed_rare", "iceberg_blue_rare"].map(tfc),
            );
        }
    }

    if template.reef && temperature.is_warm() {
        stages.push(LocalModifications, tfc("coral_reef"));
    }

    if land {
        stages.extend(
            LocalModifications,
            ["clay_disc_with_indicator", "water_clay_disc_with_indicator", "peat_disc"].map(tfc),
        );
        stages.extend(VegetalDecoration, ["forest", "bamboo", "cave_vegetation"].map(tfc));
        stages.extend(VegetalDecoration, MISC_PLANT_FEATURES.map(plant));
        if !ocean {
            stages.extend(TopLayerModification, FOREST_DECORATORS.map(tfc));
        }
        // Freshwater plants go everywhere so small lakes get populated too.
        stages.extend(VegetalDecoration, biome_plants(false).map(|entry| plant(entry.name)));
        stages.extend(VegetalDecoration, COVERS.map(plant));
        stages.extend(VegetalDecoration, ["tree_fern", "arundo"].map(plant));
        stages.extend(VegetalDecoration, BERRIES.iter().map(|berry| plant(berry.name)));
        stages.extend(VegetalDecoration, FRUITS.iter().map(|fruit| plant(fruit.name)));
    }

    if template.volcanoes {
        stages.extend(
            SurfaceStructures,
            ["volcano_rivulet", "volcano_caldera", "random_volcano_fissure"].map(tfc),
        );
    }

    match template.hot_springs {
        HotSprings::None => {}
        HotSprings::Empty => stages.push(SurfaceStructures, tfc("random_empty_hot_spring")),
        HotSprings::Active => stages.push(SurfaceStructures, tfc("random_active_hot_spring")),
    }

    if template.has_lakes() {
        stages.extend(Lakes, ["flood_fill_lake", "lake"].map(tfc));
    }

    // Must run after everything else has placed its blocks.
    stages.push(TopLayerModification, tfc("ice_and_snow"));

    BiomeRecord {
        name: format!("{}_{}_{}", template.name, temperature.id, rainfall.id),
        precipitation,
        category: template.category,
        depth: 0.0,
        scale: 0.0,
        temperature: temperature.temperature,
        temperature_modifier: "none",
        downfall: rainfall.downfall,
        effects: BiomeEffects {
            fog_color: DEFAULT_FOG_COLOR,
            sky_color: DEFAULT_SKY_COLOR,
            water_color: temperature.water_color,
            water_fog_color: temperature.water_fog_color,
        },
        surface_builder: tfc(surface_builder),
        carvers: BiomeCarvers {
            air: AIR_CARVERS.iter().map(|carver| carver.to_string()).collect(),
            liquid: Vec::new(),
        },
        features: stages,
        starts: Vec::new(),
        spawners: Map::new(),
        spawn_costs: Map::new(),
        player_spawn_friendly: template.spawnable,
        creature_spawn_probability: 0.5,
    }
}

/// `snake_case` to `Title Case`.
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Translation key and display name of an assembled biome.
pub fn lang_entry(template: &BiomeTemplate, temperature: &TemperatureTier, rainfall: &RainfallTier) -> (String, String) {
    (
        format!("biome.tfc.{}_{}_{}", template.name, temperature.id, rainfall.id),
        format!(
            "({} / {}) {}",
            title_case(temperature.id),
            title_case(rainfall.id),
            title_case(template.name)
        ),
    )
}

/// Every template in every climate, in write order.
pub fn all_biomes(veins: &[Vein]) -> impl Iterator<Item = BiomeRecord> + '_ {
    TEMPERATURES.iter().flat_map(move |temperature| {
        RAINFALLS.iter().flat_map(move |rainfall| {
            BIOME_TEMPLATES
                .iter()
                .map(move |template| assemble(template, temperature, rainfall, veins))
        })
    })
}

pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>, veins: &[Vein]) -> Result<usize> {
    let mut written = 0;
    for temperature in &TEMPERATURES {
        for rainfall in &RAINFALLS {
            for template in &BIOME_TEMPLATES {
                let record = assemble(template, temperature, rainfall, veins);
                let (key, display) = lang_entry(template, temperature, rainfall);
                rm.lang(key, display);
                rm.biome(&record.name, &record)?;
                written += 1;
            }
            debug!(temperature = temperature.id, rainfall = rainfall.id, "climate assembled");
        }
    }
    Ok(written)
}
