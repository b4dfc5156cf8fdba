//! Plants, groundcover, berry bushes and fruit trees.
//!
//! Patch plants are table driven: each row fixes the block, how the patch
//! reaches its target, how often it runs and the climate it needs. Features
//! that do not fit a patch (vines, kelp, covers, bushes, fruit trees) are
//! written directly.

use serde_json::{json, Value};

use super::decorator::{
    carving_mask, chance, count, count_noise_biased, heightmap, near_water, square, Climate, Decorator,
    Heightmap,
};
use super::feature::{configure, decorated};
use super::placement::{plant_patch, simple_patch, tall_feature, vine_feature, PlantPlacement, RandomPatch, PatchTarget};
use super::rock::ROCKS;
use super::soil::{SAND_COLORS, SOIL_VARIANTS};
use crate::error::Result;
use crate::resource::{ResourceManager, ResourceSink};

/// Growth habit of a patch plant. Decides its placement and whether ocean
/// biomes carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantType {
    Standard,
    Cactus,
    Creeping,
    Epiphyte,
    Hanging,
    ShortGrass,
    TallGrass,
    TallPlant,
    Emergent,
    EmergentFresh,
    Floating,
    FloatingFresh,
    Water,
    WaterFresh,
    GrassWater,
    GrassWaterFresh,
}

impl PlantType {
    /// Salt water habits that only ocean biomes place.
    pub fn is_ocean(self) -> bool {
        matches!(
            self,
            PlantType::GrassWater | PlantType::Floating | PlantType::Water | PlantType::Emergent
        )
    }

    pub fn placement(self) -> PlantPlacement {
        match self {
            PlantType::Water | PlantType::WaterFresh | PlantType::GrassWater | PlantType::GrassWaterFresh => {
                PlantPlacement::Water
            }
            PlantType::Emergent | PlantType::EmergentFresh => PlantPlacement::Emergent,
            PlantType::Cactus | PlantType::TallGrass | PlantType::TallPlant => PlantPlacement::Tall,
            _ => PlantPlacement::Land,
        }
    }
}

/// How often a plant patch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rarity {
    /// One in `n` chunks.
    Chance(u32),
    /// `n` attempts per chunk.
    Count(u32),
    /// Every chunk.
    Always,
    /// Only when a clay disc is placed; the disc brings its own placement.
    ClayIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchPlant {
    pub name: &'static str,
    pub properties: &'static str,
    pub kind: PlantType,
    pub spread: (u32, u32),
    pub tries: Option<u32>,
    pub rarity: Rarity,
    /// `[min_temperature, max_temperature, min_rainfall, max_rainfall]`
    pub climate: [i32; 4],
    pub near_water: Option<u32>,
    pub requires_clay: bool,
}

const AGE: &str = "age=1,stage=1";
const LOWER: &str = "age=1,stage=1,part=lower";
const FLUID: &str = "age=1,stage=1,fluid=empty";
const EMERGENT: &str = "age=1,stage=1,fluid=empty,part=lower";
const FACING: &str = "age=1,stage=1,facing=north";
const CREEPING: &str = "age=1,stage=1,up=false,down=true,north=false,east=false,west=false,south=false";

const fn plant(
    name: &'static str,
    properties: &'static str,
    kind: PlantType,
    spread: (u32, u32),
    tries: Option<u32>,
    rarity: Rarity,
    climate: [i32; 4],
) -> PatchPlant {
    PatchPlant {
        name,
        properties,
        kind,
        spread,
        tries,
        rarity,
        climate,
        near_water: None,
        requires_clay: matches!(rarity, Rarity::ClayIndicator),
    }
}

impl PatchPlant {
    const fn near_water(self, radius: u32) -> Self {
        Self { near_water: Some(radius), ..self }
    }

    const fn on_clay(self) -> Self {
        Self { requires_clay: true, ..self }
    }

    pub fn is_clay_indicator(&self) -> bool {
        self.rarity == Rarity::ClayIndicator
    }

    pub fn feature_name(&self) -> String {
        format!("plant/{}", self.name)
    }

    pub fn block(&self) -> String {
        format!("tfc:plant/{}[{}]", self.name, self.properties)
    }

    fn climate_decorator(&self) -> Decorator {
        let [min_t, max_t, min_r, max_r] = self.climate;
        Climate::bounds(min_t, max_t, min_r, max_r).decorator()
    }

    pub fn decorators(&self) -> Vec<Decorator> {
        let mut decorators = match self.rarity {
            Rarity::Chance(n) => vec![chance(n), square(), self.climate_decorator()],
            Rarity::Count(n) => vec![count(n), square(), self.climate_decorator()],
            Rarity::Always => vec![square(), self.climate_decorator()],
            Rarity::ClayIndicator => vec![self.climate_decorator()],
        };
        if let Some(radius) = self.near_water {
            decorators.push(near_water(Some(radius)));
        }
        decorators
    }

    pub fn to_json(&self) -> Value {
        let (vertical, horizontal) = self.spread;
        let patch = plant_patch(
            &self.block(),
            self.kind.placement(),
            vertical,
            horizontal,
            self.tries,
            self.requires_clay,
        );
        decorated(patch, self.decorators())
    }
}

use PlantType as T;
use Rarity::{Always, Chance, ClayIndicator, Count};

pub static PLANTS: [PatchPlant; 77] = [
    plant("allium", AGE, T::Standard, (1, 10), Some(10), Chance(5), [10, 18, 150, 400]),
    plant("athyrium_fern", AGE, T::Standard, (1, 10), None, ClayIndicator, [20, 30, 200, 500]),
    plant("badderlocks", EMERGENT, T::Emergent, (1, 7), Some(100), Chance(2), [-20, 20, 150, 500]),
    plant("barrel_cactus", LOWER, T::Cactus, (1, 15), Some(10), Chance(5), [-6, 50, 0, 85]),
    plant("black_orchid", AGE, T::Standard, (1, 10), Some(10), Chance(5), [30, 41, 290, 410]),
    plant("blood_lily", AGE, T::Standard, (1, 10), Some(10), Chance(5), [33, 45, 200, 500]),
    plant("blue_orchid", AGE, T::Standard, (1, 10), Some(10), Chance(5), [8, 16, 250, 390]),
    plant("butterfly_milkweed", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-40, 25, 75, 300]),
    plant("calendula", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-5, 15, 130, 300]),
    plant("canna", AGE, T::Standard, (1, 10), None, ClayIndicator, [30, 50, 270, 500]),
    plant("cattail", EMERGENT, T::EmergentFresh, (1, 7), Some(100), Chance(2), [-10, 50, 150, 500]),
    plant("coontail", FLUID, T::GrassWaterFresh, (1, 15), Some(100), Chance(2), [5, 50, 250, 500]),
    plant("dandelion", AGE, T::Standard, (1, 10), Some(10), Chance(5), [0, 22, 120, 400]),
    plant("dead_bush", AGE, T::Standard, (1, 15), Some(10), Chance(5), [10, 50, 0, 120]),
    plant("duckweed", AGE, T::FloatingFresh, (1, 7), Some(100), Chance(5), [-34, 25, 0, 500]).near_water(9),
    plant("eel_grass", FLUID, T::GrassWater, (1, 15), Some(100), Chance(2), [-10, 25, 200, 500]),
    plant("field_horsetail", AGE, T::Standard, (1, 10), Some(10), Chance(5), [10, 26, 300, 500]),
    plant("fountain_grass", AGE, T::ShortGrass, (1, 20), Some(128), Count(2), [-12, 40, 75, 150]),
    plant("foxglove", LOWER, T::TallPlant, (1, 15), Some(10), Chance(5), [15, 29, 150, 300]),
    plant("goldenrod", AGE, T::Standard, (1, 10), None, ClayIndicator, [17, 33, 75, 310]),
    plant("grape_hyacinth", AGE, T::Standard, (1, 10), Some(10), Chance(5), [5, 33, 150, 250]),
    plant("gutweed", FLUID, T::Water, (1, 10), Some(10), Chance(4), [-50, 50, 100, 500]),
    plant("guzmania", FACING, T::Epiphyte, (6, 5), None, Chance(5), [15, 29, 290, 480]),
    plant("houstonia", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-46, 10, 150, 500]),
    plant("labrador_tea", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-5, 9, 200, 380]),
    plant("lady_fern", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-50, 16, 200, 490]),
    plant("laminaria", FLUID, T::Water, (1, 10), Some(10), Chance(4), [-50, 12, 100, 500]),
    plant("licorice_fern", FACING, T::Epiphyte, (6, 5), None, Chance(5), [-15, 25, 300, 400]),
    plant("lotus", AGE, T::FloatingFresh, (1, 7), Some(100), Chance(5), [15, 50, 0, 500]).near_water(9),
    plant("manatee_grass", FLUID, T::GrassWater, (1, 15), Some(128), Count(2), [25, 50, 250, 500]),
    plant("marigold", EMERGENT, T::EmergentFresh, (1, 7), Some(100), Chance(2), [20, 50, 50, 390]),
    plant("meads_milkweed", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-10, 14, 130, 380]),
    plant("milfoil", FLUID, T::WaterFresh, (1, 10), Some(10), Chance(4), [5, 50, 250, 500]),
    plant("morning_glory", CREEPING, T::Creeping, (1, 6), None, Chance(15), [-11, 19, 300, 500]),
    plant("moss", CREEPING, T::Creeping, (1, 6), None, Chance(15), [-7, 30, 250, 450]),
    plant("nasturtium", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-19, 0, 150, 380]),
    plant("orchard_grass", AGE, T::ShortGrass, (1, 20), None, Count(2), [-29, 27, 75, 300]),
    plant("ostrich_fern", LOWER, T::TallPlant, (1, 15), Some(10), Chance(5), [-49, 14, 290, 470]),
    plant("oxeye_daisy", AGE, T::Standard, (1, 10), Some(10), Chance(5), [10, 40, 120, 300]),
    plant("pampas_grass", LOWER, T::TallGrass, (1, 10), None, ClayIndicator, [20, 50, 0, 200]),
    plant("perovskia", AGE, T::Standard, (1, 10), None, ClayIndicator, [-50, 20, 0, 200]),
    plant("pistia", AGE, T::FloatingFresh, (1, 7), Some(100), Chance(5), [10, 45, 0, 400]).near_water(9),
    plant("poppy", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-40, 36, 150, 250]),
    plant("primrose", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-34, 33, 150, 300]),
    plant("pulsatilla", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-50, 30, 50, 200]),
    plant("reindeer_lichen", CREEPING, T::Creeping, (1, 6), None, Chance(15), [10, 33, 50, 470]),
    plant("rose", LOWER, T::TallPlant, (1, 15), Some(128), Always, [-5, 20, 150, 300]).on_clay(),
    plant("ryegrass", AGE, T::ShortGrass, (1, 20), Some(128), Count(2), [-10, 35, 150, 320]),
    plant("sacred_datura", AGE, T::Standard, (1, 10), Some(10), Chance(5), [18, 31, 75, 150]),
    plant("sagebrush", AGE, T::Standard, (1, 15), Some(10), Chance(5), [-34, 50, 0, 120]),
    plant("sago", FLUID, T::WaterFresh, (1, 10), Some(10), Chance(4), [-10, 50, 200, 500]),
    plant("sapphire_tower", LOWER, T::TallPlant, (1, 15), Some(10), Chance(5), [16, 39, 75, 200]),
    plant("sargassum", AGE, T::Floating, (1, 7), Some(100), Chance(5), [0, 25, 0, 500]).near_water(6),
    plant("scutch_grass", AGE, T::ShortGrass, (1, 20), Some(128), Count(2), [0, 50, 150, 500]),
    plant("snapdragon_pink", AGE, T::Standard, (1, 10), Some(10), Chance(5), [24, 36, 150, 300]),
    plant("snapdragon_red", AGE, T::Standard, (1, 10), Some(10), Chance(5), [24, 36, 150, 300]),
    plant("snapdragon_white", AGE, T::Standard, (1, 10), Some(10), Chance(5), [24, 36, 150, 300]),
    plant("snapdragon_yellow", AGE, T::Standard, (1, 10), Some(10), Chance(5), [24, 36, 150, 300]),
    plant("spanish_moss", "age=1,stage=1,hanging=false", T::Hanging, (1, 5), None, Chance(5), [35, 41, 400, 500]),
    plant("star_grass", FLUID, T::GrassWaterFresh, (1, 15), Some(128), Count(2), [-50, 50, 50, 260]),
    plant("strelitzia", AGE, T::Standard, (1, 10), Some(10), Chance(5), [35, 50, 50, 300]),
    plant("switchgrass", LOWER, T::TallGrass, (1, 15), None, Chance(2), [-29, 29, 110, 390]),
    plant("sword_fern", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-40, 25, 100, 500]),
    plant("tall_fescue_grass", LOWER, T::TallGrass, (1, 15), None, Chance(2), [-10, 15, 280, 430]),
    plant("timothy_grass", AGE, T::ShortGrass, (1, 20), Some(128), Count(2), [15, 29, 289, 500]),
    plant("toquilla_palm", LOWER, T::TallPlant, (1, 15), Some(10), Chance(5), [25, 50, 250, 500]),
    plant("trillium", AGE, T::Standard, (1, 10), Some(10), Chance(5), [10, 33, 150, 300]),
    plant("tropical_milkweed", AGE, T::Standard, (1, 10), Some(10), Chance(5), [28, 41, 120, 300]),
    plant("tulip_orange", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-34, 0, 100, 200]),
    plant("tulip_pink", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-34, 0, 100, 200]),
    plant("tulip_red", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-34, 0, 100, 200]),
    plant("tulip_white", AGE, T::Standard, (1, 10), Some(10), Chance(5), [-34, 0, 100, 200]),
    plant("turtle_grass", FLUID, T::GrassWater, (1, 15), Some(128), Chance(1), [-50, 25, 240, 500]),
    plant("vriesea", FACING, T::Epiphyte, (6, 5), None, Chance(5), [22, 31, 200, 400]),
    plant("water_canna", AGE, T::Standard, (1, 10), None, ClayIndicator, [0, 36, 150, 500]).near_water(9),
    plant("water_lily", AGE, T::FloatingFresh, (1, 7), Some(100), Chance(5), [-5, 38, 0, 500]).near_water(9),
    plant("yucca", AGE, T::Standard, (1, 15), Some(10), Chance(5), [-34, 36, 0, 75]),
];

/// Plants paired with clay discs, in the order the disc places them.
pub fn clay_indicators() -> impl Iterator<Item = &'static PatchPlant> {
    PLANTS.iter().filter(|plant| plant.is_clay_indicator())
}

/// Patch plants a biome places, split by whether they grow in the sea.
/// Clay indicators are placed by their disc instead.
pub fn biome_plants(ocean: bool) -> impl Iterator<Item = &'static PatchPlant> {
    PLANTS
        .iter()
        .filter(move |plant| !plant.is_clay_indicator() && plant.kind.is_ocean() == ocean)
}

/// Vines and hanging plants placed by every land biome.
pub const MISC_PLANT_FEATURES: [&str; 5] = ["hanging_vines", "hanging_vines_cave", "ivy", "jungle_vines", "liana"];

pub const COVERS: [&str; 3] = ["moss_cover", "reindeer_lichen_cover", "morning_glory_cover"];

pub const KELP: [&str; 3] = ["giant_kelp", "winged_kelp", "leafy_kelp"];

pub const SHORE_DECORATORS: [&str; 6] = ["driftwood", "clam", "mollusk", "mussel", "seaweed", "sticks_shore"];

pub const FOREST_DECORATORS: [&str; 5] = ["sticks_forest", "pinecone", "salt_lick", "dead_grass", "podzol"];

/// Shellfish placed along every ocean floor.
pub const SHELLFISH: [&str; 3] = ["mussel", "clam", "mollusk"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Berry {
    pub name: &'static str,
    pub min_temp: i32,
    pub max_temp: i32,
    pub min_rain: i32,
    pub max_rain: i32,
    pub min_forest: &'static str,
    pub max_forest: &'static str,
}

const fn berry(
    name: &'static str,
    (min_temp, max_temp): (i32, i32),
    (min_rain, max_rain): (i32, i32),
    min_forest: &'static str,
    max_forest: &'static str,
) -> Berry {
    Berry { name, min_temp, max_temp, min_rain, max_rain, min_forest, max_forest }
}

pub static BERRIES: [Berry; 11] = [
    berry("blackberry", (7, 24), (200, 500), "none", "edge"),
    berry("raspberry", (5, 25), (200, 500), "none", "edge"),
    berry("blueberry", (7, 29), (100, 400), "none", "edge"),
    berry("elderberry", (10, 33), (100, 400), "none", "edge"),
    berry("bunchberry", (15, 35), (200, 500), "edge", "old_growth"),
    berry("gooseberry", (5, 27), (200, 500), "none", "normal"),
    berry("snowberry", (-7, 18), (200, 500), "edge", "normal"),
    berry("cloudberry", (-2, 17), (80, 380), "edge", "old_growth"),
    berry("strawberry", (5, 28), (100, 400), "none", "none"),
    berry("wintergreen_berry", (-6, 17), (100, 400), "none", "edge"),
    berry("cranberry", (-5, 17), (250, 500), "edge", "old_growth"),
];

impl Berry {
    pub fn to_json(&self) -> Value {
        let climate = Climate::bounds(self.min_temp, self.max_temp, self.min_rain, self.max_rain)
            .forest(self.min_forest, self.max_forest)
            .fuzzy(false);
        decorated(
            configure("tfc:berry_bushes", json!({ "state": format!("tfc:plant/{}_bush", self.name) })),
            [heightmap(Heightmap::WorldSurfaceWg), square(), climate.decorator(), chance(15)],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    pub name: &'static str,
    pub min_temp: i32,
    pub max_temp: i32,
    pub min_rain: i32,
    pub max_rain: i32,
}

const fn fruit(name: &'static str, min_temp: i32, max_temp: i32, min_rain: i32, max_rain: i32) -> Fruit {
    Fruit { name, min_temp, max_temp, min_rain, max_rain }
}

pub static FRUITS: [Fruit; 9] = [
    fruit("cherry", 5, 25, 100, 350),
    fruit("green_apple", 1, 25, 110, 280),
    fruit("lemon", 10, 30, 180, 470),
    fruit("olive", 5, 30, 150, 500),
    fruit("orange", 15, 36, 250, 480),
    fruit("peach", 4, 27, 60, 230),
    fruit("plum", 15, 31, 250, 400),
    fruit("red_apple", 1, 25, 100, 280),
    fruit("banana", 17, 35, 280, 500),
];

impl Fruit {
    pub fn to_json(&self) -> Value {
        // Bananas grow as a plant stalk rather than a branching tree.
        let feature = if self.name == "banana" {
            configure("tfc:bananas", json!({ "state": "tfc:plant/banana_plant" }))
        } else {
            configure(
                "tfc:fruit_trees",
                json!({ "state": format!("tfc:plant/{}_growing_branch", self.name) }),
            )
        };
        let climate = Climate::bounds(self.min_temp, self.max_temp, self.min_rain, self.max_rain).needs_forest();
        decorated(
            feature,
            [heightmap(Heightmap::WorldSurfaceWg), square(), climate.decorator(), chance(200)],
        )
    }
}

fn vine_climate(bounds: [i32; 4]) -> Decorator {
    let [min_t, max_t, min_r, max_r] = bounds;
    Climate::bounds(min_t, max_t, min_r, max_r).needs_forest().fuzzy(true).decorator()
}

fn fuzzy_climate(bounds: [i32; 4]) -> Decorator {
    let [min_t, max_t, min_r, max_r] = bounds;
    Climate::bounds(min_t, max_t, min_r, max_r).fuzzy(true).decorator()
}

fn climate(bounds: [i32; 4]) -> Decorator {
    let [min_t, max_t, min_r, max_r] = bounds;
    Climate::bounds(min_t, max_t, min_r, max_r).decorator()
}

/// Vines, tree ferns, arundo and kelp, keyed by feature path.
pub fn tall_plants() -> Vec<(&'static str, Value)> {
    let tropical = [16, 32, 150, 470];
    vec![
        (
            "plant/hanging_vines",
            decorated(
                tall_feature("tfc:weeping_vines", "tfc:plant/hanging_vines_plant", "tfc:plant/hanging_vines", 90, 10, 14, 21),
                [heightmap(Heightmap::WorldSurfaceWg), square(), vine_climate(tropical)],
            ),
        ),
        (
            "plant/hanging_vines_cave",
            decorated(
                tall_feature("tfc:weeping_vines", "tfc:plant/hanging_vines_plant", "tfc:plant/hanging_vines", 90, 10, 14, 22),
                [carving_mask(0.003, Some(30), Some(80)), vine_climate(tropical)],
            ),
        ),
        (
            "plant/liana",
            decorated(
                tall_feature("tfc:weeping_vines", "tfc:plant/liana_plant", "tfc:plant/liana", 40, 10, 8, 16),
                [carving_mask(0.003, Some(30), Some(80)), vine_climate(tropical)],
            ),
        ),
        (
            "plant/ivy",
            decorated(vine_feature("tfc:plant/ivy", 15, 7, 96, 150), [vine_climate([-4, 14, 90, 450]), chance(5)]),
        ),
        (
            "plant/jungle_vines",
            decorated(vine_feature("tfc:plant/jungle_vines", 33, 7, 64, 160), [vine_climate(tropical), chance(5)]),
        ),
        (
            "plant/tree_fern",
            decorated(
                tall_feature("tfc:twisting_vines", "tfc:plant/tree_fern_plant", "tfc:plant/tree_fern", 8, 7, 2, 6),
                [heightmap(Heightmap::WorldSurfaceWg), chance(5), square(), climate([19, 50, 300, 500])],
            ),
        ),
        (
            "plant/arundo",
            decorated(
                tall_feature("tfc:twisting_vines", "tfc:plant/arundo_plant", "tfc:plant/arundo", 70, 7, 5, 8),
                [
                    heightmap(Heightmap::WorldSurfaceWg),
                    chance(3),
                    square(),
                    climate([5, 22, 100, 500]),
                    near_water(Some(6)),
                ],
            ),
        ),
        (
            "plant/winged_kelp",
            decorated(
                tall_feature("tfc:kelp", "tfc:plant/winged_kelp_plant", "tfc:plant/winged_kelp", 64, 12, 14, 21),
                [heightmap(Heightmap::OceanFloorWg), square(), chance(2), fuzzy_climate([-15, 15, 0, 450])],
            ),
        ),
        (
            "plant/leafy_kelp",
            decorated(
                tall_feature("tfc:kelp", "tfc:plant/leafy_kelp_plant", "tfc:plant/leafy_kelp", 64, 12, 14, 21),
                [heightmap(Heightmap::OceanFloorWg), square(), chance(2), fuzzy_climate([-20, 20, 0, 500])],
            ),
        ),
        (
            "plant/giant_kelp",
            decorated(
                RandomPatch::new("tfc:plant/giant_kelp_flower[age=0,fluid=empty]", json!({ "type": "tfc:kelp_tree" }), 2, 10)
                    .tries(Some(20))
                    .target(PatchTarget::Water)
                    .build(),
                [heightmap(Heightmap::OceanFloorWg), square(), fuzzy_climate([-18, 18, 0, 500])],
            ),
        ),
    ]
}

/// Dense creeping plants that carpet forest floors.
pub fn covers() -> Vec<(&'static str, Value)> {
    let cover = |name: &str, bounds: [i32; 4]| {
        let patch = plant_patch(
            &format!("tfc:plant/{name}[{CREEPING}]"),
            PlantPlacement::Land,
            1,
            7,
            Some(100),
            false,
        );
        decorated(patch, [vine_climate(bounds), count(4), square()])
    };
    vec![
        ("plant/moss_cover", cover("moss", [15, 35, 300, 500])),
        ("plant/morning_glory_cover", cover("morning_glory", [7, 19, 160, 300])),
        ("plant/reindeer_lichen_cover", cover("reindeer_lichen", [-7, 5, 210, 390])),
    ]
}

/// A clay disc together with every indicator plant, so the plants only
/// appear where clay was placed.
pub fn clay_disc_with_indicator(disc: &str, placement: Decorator, rarity: u32) -> Value {
    let mut features = vec![format!("tfc:{disc}")];
    features.extend(clay_indicators().map(|plant| format!("tfc:{}", plant.feature_name())));
    decorated(
        configure("tfc:multiple", json!({ "features": features })),
        [chance(rarity), square(), heightmap(Heightmap::WorldSurfaceWg), placement],
    )
}

/// Beach and forest floor litter, keyed by feature path.
pub fn groundcover() -> Vec<(&'static str, Value)> {
    let mut shore_floor: Vec<String> = SAND_COLORS.iter().map(|color| format!("tfc:sand/{color}")).collect();
    shore_floor.extend(ROCKS.iter().map(|rock| format!("tfc:rock/gravel/{}", rock.name)));
    let raw: Vec<String> = ROCKS.iter().map(|rock| format!("tfc:rock/raw/{}", rock.name)).collect();
    let grass: Vec<String> = SOIL_VARIANTS.iter().map(|soil| format!("tfc:grass/{soil}")).collect();

    let shore = |item: &str, tries: u32, rarity: u32, bounds: [i32; 4]| {
        decorated(
            simple_patch(&format!("tfc:groundcover/{item}[fluid=empty]"), 1, 15, tries, shore_floor.clone(), true),
            [chance(rarity), square(), climate(bounds)],
        )
    };
    let forest = |item: &str, horizontal: u32, tries: u32, whitelist: Vec<String>, rarity: u32, climate: Climate| {
        decorated(
            simple_patch(&format!("tfc:groundcover/{item}[fluid=empty]"), 1, horizontal, tries, whitelist, false),
            [chance(rarity), square(), climate.needs_forest().decorator()],
        )
    };

    vec![
        ("driftwood", shore("driftwood", 10, 6, [-10, 50, 200, 500])),
        ("clam", shore("clam", 10, 6, [-50, 22, 10, 450])),
        ("mollusk", shore("mollusk", 10, 6, [-10, 30, 150, 500])),
        ("mussel", shore("mussel", 10, 6, [10, 50, 100, 500])),
        ("sticks_shore", shore("stick", 25, 2, [-50, 50, 100, 500])),
        ("seaweed", shore("seaweed", 10, 5, [-20, 50, 150, 500])),
        ("sticks_forest", forest("stick", 15, 20, Vec::new(), 3, Climate::bounds(-20, 50, 70, 500))),
        ("pinecone", forest("pinecone", 15, 10, Vec::new(), 5, Climate::bounds(-5, 33, 200, 500))),
        ("podzol", forest("podzol", 5, 100, Vec::new(), 5, Climate::bounds(8, 20, 180, 420).fuzzy(true))),
        ("salt_lick", forest("salt_lick", 5, 100, raw, 110, Climate::bounds(5, 33, 100, 500))),
        ("dead_grass", forest("dead_grass", 5, 100, grass, 70, Climate::bounds(10, 20, 0, 150).fuzzy(true))),
    ]
}

pub fn bamboo() -> Value {
    decorated(
        configure("minecraft:bamboo", json!({ "probability": 0.2 })),
        [
            chance(30),
            vine_climate([18, 28, 300, 500]),
            count_noise_biased(160, 80.0, 0.3),
            square(),
            heightmap(Heightmap::WorldSurfaceWg),
        ],
    )
}

pub fn coral_reef() -> Value {
    let corals = [
        configure("tfc:coral_tree", json!({})),
        configure("tfc:coral_mushroom", json!({})),
        configure("tfc:coral_claw", json!({})),
    ];
    decorated(
        configure("minecraft:simple_random_selector", json!({ "features": corals })),
        [
            Climate::new().min_temperature(18).decorator(),
            count_noise_biased(10, 200.0, 1.0),
            square(),
            heightmap(Heightmap::OceanFloorWg),
        ],
    )
}

/// Moss and cobble on cave walls in warm, wet climates.
pub fn cave_vegetation() -> Value {
    let blocks: Vec<Value> = ROCKS
        .iter()
        .map(|rock| {
            json!({
                "stone": [format!("tfc:rock/raw/{}", rock.name)],
                "ore": [
                    { "block": format!("tfc:rock/mossy_cobble/{}", rock.name), "weight": 8 },
                    { "block": format!("tfc:rock/cobble/{}", rock.name), "weight": 2 },
                ],
            })
        })
        .collect();
    decorated(
        configure("tfc:cave_vegetation", json!({ "blocks": blocks })),
        [fuzzy_climate([16, 32, 150, 470]), carving_mask(0.01, Some(15), Some(100))],
    )
}

/// Writes every plant, groundcover, bush and fruit tree feature.
pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>) -> Result<()> {
    for plant in &PLANTS {
        rm.feature(&plant.feature_name(), plant.to_json())?;
    }
    for (name, feature) in tall_plants().into_iter().chain(covers()).chain(groundcover()) {
        rm.feature(name, feature)?;
    }
    rm.feature(
        "clay_disc_with_indicator",
        clay_disc_with_indicator("clay_disc", Climate::new().min_rainfall(175).decorator(), 20),
    )?;
    rm.feature(
        "water_clay_disc_with_indicator",
        clay_disc_with_indicator("water_clay_disc", near_water(None), 10),
    )?;
    for berry in &BERRIES {
        rm.feature(&format!("plant/{}", berry.name), berry.to_json())?;
    }
    for fruit in &FRUITS {
        rm.feature(&format!("plant/{}", fruit.name), fruit.to_json())?;
    }
    rm.feature("bamboo", bamboo())?;
    rm.feature("coral_reef", coral_reef())?;
    rm.feature("cave_vegetation", cave_vegetation())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn plant_named(name: &str) -> &'static PatchPlant {
        PLANTS.iter().find(|plant| plant.name == name).unwrap()
    }

    #[test]
    fn plant_names_are_unique_and_sorted() {
        let names: Vec<&str> = PLANTS.iter().map(|plant| plant.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn ocean_plants_are_the_salt_water_habits() {
        let ocean: Vec<&str> = biome_plants(true).map(|plant| plant.name).collect();
        assert_eq!(
            ocean,
            ["badderlocks", "eel_grass", "gutweed", "laminaria", "manatee_grass", "sargassum", "turtle_grass"]
        );
        assert!(biome_plants(false).all(|plant| !plant.kind.is_ocean() && !plant.is_clay_indicator()));
    }

    #[test]
    fn clay_indicators_piggy_back_on_discs() {
        let names: Vec<&str> = clay_indicators().map(|plant| plant.name).collect();
        assert_eq!(names, ["athyrium_fern", "canna", "goldenrod", "pampas_grass", "perovskia", "water_canna"]);

        let canna = plant_named("canna").to_json();
        assert_eq!(canna["config"]["decorator"]["type"], "tfc:climate");
        assert_eq!(canna["config"]["feature"]["type"], "tfc:random_patch");
        assert_eq!(canna["config"]["feature"]["config"]["whitelist"][0], "tfc:clay_grass/silt");
    }

    #[test]
    fn rose_needs_clay_but_is_placed_by_biomes() {
        let rose = plant_named("rose");
        assert!(rose.requires_clay);
        assert!(!rose.is_clay_indicator());
        assert!(biome_plants(false).any(|plant| plant.name == "rose"));
        let json = rose.to_json();
        assert_eq!(json["config"]["decorator"]["type"], "tfc:climate");
        assert_eq!(json["config"]["feature"]["config"]["decorator"]["type"], "minecraft:square");
    }

    #[test]
    fn chance_plants_end_with_near_water() {
        let lotus = plant_named("lotus").to_json();
        assert_eq!(lotus["config"]["decorator"]["type"], "tfc:near_water");
        assert_eq!(lotus["config"]["decorator"]["config"]["radius"], 9);
        let chance = &lotus["config"]["feature"]["config"]["feature"]["config"]["feature"]["config"]["decorator"];
        assert_eq!(chance["type"], "minecraft:chance");
    }

    #[test]
    fn placement_follows_habit() {
        assert_eq!(plant_named("cattail").kind.placement(), PlantPlacement::Emergent);
        assert_eq!(plant_named("coontail").kind.placement(), PlantPlacement::Water);
        assert_eq!(plant_named("barrel_cactus").kind.placement(), PlantPlacement::Tall);
        assert_eq!(plant_named("duckweed").kind.placement(), PlantPlacement::Land);
    }

    #[test]
    fn clay_disc_lists_indicators_after_disc() {
        let feature = clay_disc_with_indicator("clay_disc", near_water(None), 10);
        let mut inner = &feature;
        while inner["type"] == "minecraft:decorated" {
            inner = &inner["config"]["feature"];
        }
        let features = inner["config"]["features"].as_array().unwrap();
        assert_eq!(features[0], "tfc:clay_disc");
        assert_eq!(features.len(), 7);
        assert_eq!(feature["config"]["decorator"]["type"], "tfc:near_water");
    }

    #[test]
    fn banana_is_a_plant_stalk() {
        let banana = FRUITS.iter().find(|fruit| fruit.name == "banana").unwrap().to_json();
        let mut inner = &banana;
        while inner["type"] == "minecraft:decorated" {
            inner = &inner["config"]["feature"];
        }
        assert_eq!(inner["type"], "tfc:bananas");
        assert_eq!(banana["config"]["decorator"]["config"]["chance"], 200);
    }

    #[test]
    fn berries_pin_forest_bounds() {
        let cranberry = BERRIES.iter().find(|berry| berry.name == "cranberry").unwrap().to_json();
        let climate = &cranberry["config"]["feature"]["config"]["decorator"];
        assert_eq!(climate["type"], "tfc:climate");
        assert_eq!(climate["config"]["min_forest"], "edge");
        assert_eq!(climate["config"]["max_forest"], "old_growth");
        assert_eq!(climate["config"]["fuzzy"], false);
    }

    #[test]
    fn shore_litter_grows_on_sand_and_gravel() {
        let litter = groundcover();
        let names: BTreeSet<&str> = litter.iter().map(|(name, _)| *name).collect();
        for name in SHORE_DECORATORS.iter().chain(&FOREST_DECORATORS) {
            assert!(names.contains(name), "{name}");
        }
        let (_, driftwood) = litter.iter().find(|(name, _)| *name == "driftwood").unwrap();
        let mut inner = driftwood;
        while inner["type"] == "minecraft:decorated" {
            inner = &inner["config"]["feature"];
        }
        let whitelist = inner["config"]["whitelist"].as_array().unwrap();
        assert_eq!(whitelist.len(), SAND_COLORS.len() + ROCKS.len());
        assert_eq!(inner["config"]["can_replace_water"], true);
    }
}
