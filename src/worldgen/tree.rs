//! Forest entries and tree structure features.

use serde_json::{json, Map, Value};

use super::feature::{block_state, configure};
use crate::error::Result;
use crate::resource::{ResourceManager, ResourceSink};

/// One species in the forest table, placed where its climate bounds hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestEntry {
    pub tree: &'static str,
    pub min_rain: i32,
    pub max_rain: i32,
    pub min_temp: i32,
    pub max_temp: i32,
    /// Species with a `_large` variant used in old growth forests.
    pub old_growth: bool,
}

const fn entry(
    min_rain: i32,
    max_rain: i32,
    min_temp: i32,
    max_temp: i32,
    tree: &'static str,
    old_growth: bool,
) -> ForestEntry {
    ForestEntry { tree, min_rain, max_rain, min_temp, max_temp, old_growth }
}

pub static FOREST: [ForestEntry; 19] = [
    entry(30, 210, 17, 40, "acacia", true),
    entry(60, 240, 1, 15, "ash", true),
    entry(350, 500, -18, 5, "aspen", false),
    entry(125, 310, -11, 7, "birch", false),
    entry(0, 180, 12, 35, "blackwood", true),
    entry(180, 370, -4, 17, "chestnut", false),
    entry(290, 500, -16, -1, "douglas_fir", true),
    entry(210, 400, 7, 15, "hickory", true),
    entry(270, 500, 17, 40, "kapok", false),
    entry(270, 500, -1, 15, "maple", true),
    entry(240, 450, -9, 11, "oak", false),
    entry(180, 470, 20, 35, "palm", false),
    entry(60, 270, -18, -4, "pine", true),
    entry(140, 310, 8, 31, "rosewood", false),
    entry(250, 420, -14, 2, "sequoia", true),
    entry(110, 320, -17, 1, "spruce", true),
    entry(230, 480, 15, 29, "sycamore", true),
    entry(10, 220, -13, 9, "white_cedar", true),
    entry(330, 500, 11, 35, "willow", true),
];

impl ForestEntry {
    pub fn to_json(&self) -> Value {
        let tree = self.tree;
        let mut config = Map::new();
        config.insert("min_rain".to_string(), json!(self.min_rain));
        config.insert("max_rain".to_string(), json!(self.max_rain));
        config.insert("min_temp".to_string(), json!(self.min_temp));
        config.insert("max_temp".to_string(), json!(self.max_temp));
        config.insert("log".to_string(), json!(format!("tfc:wood/wood/{tree}")));
        config.insert("leaves".to_string(), json!(format!("tfc:wood/leaves/{tree}")));
        config.insert("twig".to_string(), json!(format!("tfc:wood/twig/{tree}")));
        config.insert("fallen_leaves".to_string(), json!(format!("tfc:wood/fallen_leaves/{tree}")));
        config.insert("normal_tree".to_string(), json!(format!("tfc:tree/{tree}")));
        if self.old_growth {
            config.insert("old_growth_tree".to_string(), json!(format!("tfc:tree/{tree}_large")));
        }
        Value::Object(config)
    }
}

/// Straight log column under a tree structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trunk {
    pub min_height: u32,
    pub max_height: u32,
    pub width: u32,
}

impl Trunk {
    pub const fn new(min_height: u32, max_height: u32, width: u32) -> Self {
        Self { min_height, max_height, width }
    }

    fn to_json(self, tree: &str) -> Value {
        json!({
            "state": block_state(&format!("tfc:wood/log/{tree}[axis=y]")),
            "min_height": self.min_height,
            "max_height": self.max_height,
            "width": self.width,
        })
    }
}

/// `(min_count, max_count, templates)` of one stacked layer.
pub type Layer = (u32, u32, u32);

/// How a tree feature picks and places its structure templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeShape {
    /// One of `count` numbered templates, optionally on a trunk.
    Random { count: u32, radius: u32, trunk: Option<Trunk> },
    /// A base template with a randomly applied overlay on a trunk.
    Overlay { trunk: Trunk, radius: u32 },
    /// Layers of templates stacked on a trunk.
    Stacked { trunk: Trunk, layers: Vec<Layer>, radius: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFeature {
    pub tree: &'static str,
    pub large: bool,
    pub shape: TreeShape,
}

impl TreeFeature {
    fn random(tree: &'static str, count: u32) -> Self {
        Self { tree, large: false, shape: TreeShape::Random { count, radius: 1, trunk: None } }
    }

    fn random_large(tree: &'static str, count: u32, radius: u32) -> Self {
        Self { tree, large: true, shape: TreeShape::Random { count, radius, trunk: None } }
    }

    fn random_on_trunk(tree: &'static str, count: u32, trunk: Trunk) -> Self {
        Self { tree, large: false, shape: TreeShape::Random { count, radius: 1, trunk: Some(trunk) } }
    }

    fn overlay(tree: &'static str, min_height: u32, max_height: u32) -> Self {
        Self {
            tree,
            large: false,
            shape: TreeShape::Overlay { trunk: Trunk::new(min_height, max_height, 1), radius: 1 },
        }
    }

    fn stacked_large(tree: &'static str, trunk: Trunk, layers: Vec<Layer>, radius: u32) -> Self {
        Self { tree, large: true, shape: TreeShape::Stacked { trunk, layers, radius } }
    }

    /// Feature path, `tree/<tree>` or `tree/<tree>_large`.
    pub fn name(&self) -> String {
        format!("tree/{}", self.structure_prefix())
    }

    fn structure_prefix(&self) -> String {
        if self.large {
            format!("{}_large", self.tree)
        } else {
            self.tree.to_string()
        }
    }

    pub fn to_json(&self) -> Value {
        let prefix = self.structure_prefix();
        match &self.shape {
            TreeShape::Random { count, radius, trunk } => {
                let structures: Vec<String> =
                    (1..=*count).map(|i| format!("tfc:{prefix}/{i}")).collect();
                let mut config = Map::new();
                config.insert("structures".to_string(), json!(structures));
                config.insert("radius".to_string(), json!(radius));
                if let Some(trunk) = trunk {
                    config.insert("trunk".to_string(), trunk.to_json(self.tree));
                }
                configure("tfc:random_tree", Value::Object(config))
            }
            TreeShape::Overlay { trunk, radius } => configure(
                "tfc:overlay_tree",
                json!({
                    "base": format!("tfc:{prefix}/base"),
                    "overlay": format!("tfc:{prefix}/overlay"),
                    "trunk": trunk.to_json(self.tree),
                    "radius": radius,
                }),
            ),
            TreeShape::Stacked { trunk, layers, radius } => {
                let layers: Vec<Value> = layers
                    .iter()
                    .enumerate()
                    .map(|(index, (min_count, max_count, templates))| {
                        let templates: Vec<String> = (1..=*templates)
                            .map(|j| format!("tfc:{prefix}/layer{}_{j}", index + 1))
                            .collect();
                        json!({
                            "templates": templates,
                            "min_count": min_count,
                            "max_count": max_count,
                        })
                    })
                    .collect();
                configure(
                    "tfc:stacked_tree",
                    json!({
                        "trunk": trunk.to_json(self.tree),
                        "layers": layers,
                        "radius": radius,
                    }),
                )
            }
        }
    }
}

pub fn tree_features() -> Vec<TreeFeature> {
    let stacked_layers = || vec![(2, 3, 3), (1, 2, 3), (1, 1, 3)];
    let white_cedar_large = TreeFeature {
        tree: "white_cedar",
        large: true,
        shape: TreeShape::Overlay { trunk: Trunk::new(2, 5, 1), radius: 1 },
    };

    vec![
        TreeFeature::random("acacia", 35),
        TreeFeature::random_large("acacia", 6, 2),
        TreeFeature::overlay("ash", 3, 5),
        TreeFeature::random_large("ash", 5, 2),
        TreeFeature::random_on_trunk("aspen", 16, Trunk::new(3, 5, 1)),
        TreeFeature::random_on_trunk("birch", 16, Trunk::new(2, 3, 1)),
        TreeFeature::random("blackwood", 10),
        TreeFeature::random_large("blackwood", 10, 1),
        TreeFeature::overlay("chestnut", 2, 4),
        TreeFeature::random("douglas_fir", 9),
        TreeFeature::random_large("douglas_fir", 5, 2),
        TreeFeature::random("hickory", 9),
        TreeFeature::random_large("hickory", 5, 2),
        TreeFeature::random("kapok", 17),
        TreeFeature::overlay("maple", 2, 4),
        TreeFeature::random_large("maple", 5, 2),
        TreeFeature::overlay("oak", 3, 5),
        TreeFeature::random("palm", 7),
        TreeFeature::random("pine", 9),
        TreeFeature::random_large("pine", 5, 2),
        TreeFeature::overlay("rosewood", 1, 3),
        TreeFeature::random("sequoia", 7),
        TreeFeature::stacked_large("sequoia", Trunk::new(8, 16, 2), stacked_layers(), 2),
        TreeFeature::random("spruce", 7),
        TreeFeature::stacked_large("spruce", Trunk::new(5, 9, 2), stacked_layers(), 2),
        TreeFeature::overlay("sycamore", 2, 5),
        TreeFeature::random_large("sycamore", 5, 2),
        TreeFeature::overlay("white_cedar", 2, 4),
        white_cedar_large,
        TreeFeature::random("willow", 7),
        TreeFeature::random_large("willow", 14, 1),
    ]
}

pub fn forest() -> Value {
    let entries: Vec<Value> = FOREST.iter().map(ForestEntry::to_json).collect();
    configure("tfc:forest", json!({ "entries": entries }))
}

/// Writes the forest feature and every tree it can place.
pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>) -> Result<()> {
    rm.feature("forest", forest())?;
    for tree in tree_features() {
        rm.feature(&tree.name(), tree.to_json())?;
    }
    Ok(())
}
