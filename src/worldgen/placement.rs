//! Patch, tall-plant and vine placement configs.

use serde_json::{json, Map, Value};

use super::feature::{block_name, block_state, configure};

/// What a patch is allowed to replace. Each target fixes the set of
/// `can_replace_*` fields written to the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    Air,
    Water,
    Both,
    Emergent,
}

/// Where patch positions are projected before placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Land,
    Sea,
    None,
}

/// Builder for `tfc:random_patch`.
#[derive(Debug, Clone)]
pub struct RandomPatch {
    state: String,
    block_placer: Value,
    vertical_spread: u32,
    horizontal_spread: u32,
    tries: Option<u32>,
    use_density: bool,
    target: PatchTarget,
    projection: Projection,
    only_underground: bool,
    whitelist: Vec<String>,
    blacklist: Vec<String>,
}

impl RandomPatch {
    pub fn new(state: impl Into<String>, block_placer: Value, vertical_spread: u32, horizontal_spread: u32) -> Self {
        Self {
            state: state.into(),
            block_placer,
            vertical_spread,
            horizontal_spread,
            tries: None,
            use_density: false,
            target: PatchTarget::Air,
            projection: Projection::Land,
            only_underground: false,
            whitelist: Vec::new(),
            blacklist: Vec::new(),
        }
    }

    pub fn tries(mut self, tries: Option<u32>) -> Self {
        self.tries = tries;
        self
    }

    pub fn use_density(mut self, use_density: bool) -> Self {
        self.use_density = use_density;
        self
    }

    pub fn target(mut self, target: PatchTarget) -> Self {
        self.target = target;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn only_underground(mut self) -> Self {
        self.only_underground = true;
        self
    }

    pub fn whitelist(mut self, whitelist: Vec<String>) -> Self {
        self.whitelist = whitelist;
        self
    }

    pub fn build(self) -> Value {
        let mut config = Map::new();
        config.insert("state_provider".to_string(), simple_state_provider(&self.state));
        config.insert("block_placer".to_string(), self.block_placer);
        config.insert("whitelist".to_string(), json!(self.whitelist));
        config.insert("blacklist".to_string(), json!(self.blacklist));
        config.insert("yspread".to_string(), json!(self.vertical_spread));
        config.insert("xspread".to_string(), json!(self.horizontal_spread));
        config.insert("zspread".to_string(), json!(self.horizontal_spread));
        if let Some(tries) = self.tries {
            config.insert("tries".to_string(), json!(tries));
        }

        match self.projection {
            Projection::Land => {}
            Projection::None => {
                config.insert("project".to_string(), json!(false));
            }
            Projection::Sea => {
                config.insert("project_to_ocean_floor".to_string(), json!(true));
            }
        }

        match self.target {
            PatchTarget::Air => {}
            PatchTarget::Water => {
                config.insert("can_replace_air".to_string(), json!(false));
                config.insert("can_replace_water".to_string(), json!(true));
                config.insert("project_to_ocean_floor".to_string(), json!(true));
            }
            PatchTarget::Both => {
                config.insert("can_replace_water".to_string(), json!(true));
            }
            PatchTarget::Emergent => {
                config.insert("can_replace_air".to_string(), json!(false));
                config.insert("can_replace_surface_water".to_string(), json!(true));
                config.insert("project_to_ocean_floor".to_string(), json!(true));
            }
        }

        if self.only_underground {
            config.insert("only_underground".to_string(), json!(true));
        }
        if self.use_density {
            config.insert("use_density".to_string(), json!(true));
        }

        configure("tfc:random_patch", Value::Object(config))
    }
}

pub fn simple_state_provider(block: &str) -> Value {
    json!({
        "type": "minecraft:simple_state_provider",
        "state": block_state(block),
    })
}

pub fn simple_block_placer() -> Value {
    json!({ "type": "minecraft:simple_block_placer" })
}

/// Randomises `property` on placement. Only the block name is kept.
pub fn random_property_placer(block: &str, property: &str) -> Value {
    json!({
        "type": "tfc:random_property",
        "block": block_name(block),
        "property": property,
    })
}

/// How a plant patch reaches its target block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantPlacement {
    Land,
    Water,
    Emergent,
    Tall,
}

/// Plant patch with the placer and target implied by `placement`.
pub fn plant_patch(
    block: &str,
    placement: PlantPlacement,
    vertical_spread: u32,
    horizontal_spread: u32,
    tries: Option<u32>,
    requires_clay: bool,
) -> Value {
    let (placer, target) = match placement {
        PlantPlacement::Land => (random_property_placer(block, "age"), PatchTarget::Air),
        PlantPlacement::Water => (random_property_placer(block, "age"), PatchTarget::Water),
        PlantPlacement::Emergent => (json!({ "type": "tfc:emergent_plant" }), PatchTarget::Emergent),
        PlantPlacement::Tall => (json!({ "type": "tfc:tall_plant" }), PatchTarget::Air),
    };
    let whitelist = if requires_clay {
        super::soil::SOIL_VARIANTS
            .iter()
            .map(|soil| format!("tfc:clay_grass/{soil}"))
            .collect()
    } else {
        Vec::new()
    };
    let use_density = !requires_clay && placement != PlantPlacement::Water;

    RandomPatch::new(block, placer, vertical_spread, horizontal_spread)
        .tries(tries)
        .use_density(use_density)
        .target(target)
        .whitelist(whitelist)
        .build()
}

/// Simple block patch. Water-agnostic patches may replace water and project
/// to the sea floor.
pub fn simple_patch(
    block: &str,
    vertical_spread: u32,
    horizontal_spread: u32,
    tries: u32,
    whitelist: Vec<String>,
    water_agnostic: bool,
) -> Value {
    let (target, projection) = if water_agnostic {
        (PatchTarget::Both, Projection::Sea)
    } else {
        (PatchTarget::Air, Projection::Land)
    };
    RandomPatch::new(block, simple_block_placer(), vertical_spread, horizontal_spread)
        .tries(Some(tries))
        .target(target)
        .projection(projection)
        .whitelist(whitelist)
        .build()
}

/// Unprojected patch that only places below the surface.
pub fn cave_patch(block: &str, vertical_spread: u32, horizontal_spread: u32, tries: u32) -> Value {
    RandomPatch::new(block, simple_block_placer(), vertical_spread, horizontal_spread)
        .tries(Some(tries))
        .projection(Projection::None)
        .only_underground()
        .build()
}

/// Body/head column plants such as weeping vines, tree ferns and kelp.
pub fn tall_feature(
    feature_type: &str,
    body: &str,
    head: &str,
    tries: u32,
    radius: u32,
    min_height: u32,
    max_height: u32,
) -> Value {
    configure(
        feature_type,
        json!({
            "body": body,
            "head": head,
            "tries": tries,
            "radius": radius,
            "minHeight": min_height,
            "maxHeight": max_height,
        }),
    )
}

pub fn vine_feature(state: &str, tries: u32, radius: u32, min_height: u32, max_height: u32) -> Value {
    configure(
        "tfc:vines",
        json!({
            "state": state,
            "tries": tries,
            "radius": radius,
            "minHeight": min_height,
            "maxHeight": max_height,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water_target_fixes_replace_fields() {
        let patch = plant_patch(
            "tfc:plant/eel_grass[age=1,stage=1,fluid=empty]",
            PlantPlacement::Water,
            1,
            15,
            Some(100),
            false,
        );
        let config = &patch["config"];
        assert_eq!(patch["type"], "tfc:random_patch");
        assert_eq!(config["can_replace_air"], false);
        assert_eq!(config["can_replace_water"], true);
        assert_eq!(config["project_to_ocean_floor"], true);
        assert!(config.get("use_density").is_none());
        assert_eq!(config["block_placer"]["type"], "tfc:random_property");
        assert_eq!(config["block_placer"]["block"], "tfc:plant/eel_grass");
    }

    #[test]
    fn emergent_plants_use_emergent_placer_and_density() {
        let patch = plant_patch(
            "tfc:plant/cattail[age=1,stage=1,fluid=empty,part=lower]",
            PlantPlacement::Emergent,
            1,
            7,
            Some(100),
            false,
        );
        let config = &patch["config"];
        assert_eq!(config["block_placer"]["type"], "tfc:emergent_plant");
        assert_eq!(config["can_replace_surface_water"], true);
        assert_eq!(config["use_density"], true);
    }

    #[test]
    fn clay_plants_whitelist_clay_grass() {
        let patch = plant_patch(
            "tfc:plant/canna[age=1,stage=1]",
            PlantPlacement::Land,
            1,
            10,
            None,
            true,
        );
        let config = &patch["config"];
        let whitelist = config["whitelist"].as_array().unwrap();
        assert_eq!(whitelist.len(), 4);
        assert!(whitelist.contains(&json!("tfc:clay_grass/loam")));
        assert!(config.get("use_density").is_none());
        assert!(config.get("tries").is_none());
    }

    #[test]
    fn water_agnostic_patch_projects_to_sea_floor() {
        let patch = simple_patch("tfc:groundcover/clam[fluid=empty]", 1, 15, 10, Vec::new(), true);
        let config = &patch["config"];
        assert_eq!(config["can_replace_water"], true);
        assert_eq!(config["project_to_ocean_floor"], true);
        assert_eq!(config["state_provider"]["state"]["Properties"]["fluid"], "empty");
        assert_eq!(config["xspread"], 15);
        assert_eq!(config["zspread"], 15);
    }

    #[test]
    fn cave_patch_is_unprojected() {
        let patch = cave_patch("tfc:groundcover/guano[fluid=empty]", 5, 5, 60);
        let config = &patch["config"];
        assert_eq!(config["project"], false);
        assert_eq!(config["only_underground"], true);
        assert_eq!(config["tries"], 60);
    }
}
