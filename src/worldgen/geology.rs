//! Terrain shaping and mineral features: erosion, lakes, springs, soil
//! discs, cave formations, boulders, volcanoes and hot springs.

use serde_json::{json, Value};

use super::decorator::{
    carving_mask, chance, count, flat_enough, heightmap, range, range_biased, square, volcano_center,
    volcano_distance, Climate, Heightmap,
};
use super::feature::{block_state, configure, configure_empty, count_weighted_list, decorated, join_not_empty};
use super::placement::cave_patch;
use super::rock::{expand_rock_names, ROCKS};
use super::soil::soil_replacements;
use crate::error::Result;
use crate::resource::{ResourceManager, ResourceSink};

/// Every feature in this module, keyed by feature path.
pub type Features = Vec<(String, Value)>;

fn push(features: &mut Features, name: impl Into<String>, feature: Value) {
    features.push((name.into(), feature));
}

pub fn icebergs() -> Features {
    let mut features = Features::new();
    for block in ["packed", "blue"] {
        let iceberg = || configure("tfc:iceberg", json!({ "state": block_state(&format!("minecraft:{block}_ice")) }));
        push(
            &mut features,
            format!("iceberg_{block}"),
            decorated(iceberg(), [chance(14), square(), Climate::new().max_temperature(-23).decorator()]),
        );
        push(
            &mut features,
            format!("iceberg_{block}_rare"),
            decorated(iceberg(), [chance(30), square(), Climate::new().max_temperature(-18).decorator()]),
        );
    }
    features
}

fn flood_fill_lake() -> Value {
    configure("tfc:flood_fill_lake", json!({ "state": "minecraft:water", "replace_fluids": [] }))
}

pub fn lakes() -> Features {
    vec![
        (
            "lake".to_string(),
            decorated(
                configure_empty("tfc:lake"),
                [chance(25), heightmap(Heightmap::WorldSurfaceWg), square()],
            ),
        ),
        (
            "flood_fill_lake".to_string(),
            decorated(flood_fill_lake(), [chance(5), square(), heightmap(Heightmap::WorldSurfaceWg)]),
        ),
        (
            "underground_flood_fill_lake".to_string(),
            decorated(flood_fill_lake(), [count(3), square(), range(16, 80)]),
        ),
    ]
}

/// Water and lava springs set into raw rock.
pub fn springs() -> Features {
    let valid_blocks: Vec<String> = ROCKS.iter().map(|rock| format!("tfc:rock/raw/{}", rock.name)).collect();
    [("water", 110), ("lava", 50)]
        .into_iter()
        .map(|(fluid, attempts)| {
            let spring = configure(
                "tfc:spring",
                json!({
                    "state": block_state(&format!("minecraft:{fluid}[falling=true]")),
                    "valid_blocks": valid_blocks,
                }),
            );
            (
                format!("{fluid}_spring"),
                decorated(spring, [count(attempts), square(), range_biased(8, 180)]),
            )
        })
        .collect()
}

fn soil_disc(min_radius: u32, max_radius: u32, height: u32, states: Vec<Value>) -> Value {
    configure(
        "tfc:soil_disc",
        json!({
            "min_radius": min_radius,
            "max_radius": max_radius,
            "height": height,
            "states": states,
        }),
    )
}

/// Clay, peat and loam discs. The clay discs carry no decorators of their
/// own; they are placed together with their indicator plants.
pub fn soil_discs() -> Features {
    let clay = || {
        let mut states = soil_replacements("dirt", |soil| format!("tfc:clay/{soil}"));
        states.extend(soil_replacements("grass", |soil| format!("tfc:clay_grass/{soil}")));
        states
    };

    let mut peat = soil_replacements("dirt", |_| "tfc:peat".to_string());
    peat.extend(soil_replacements("grass", |_| "tfc:peat_grass".to_string()));

    let mut loam = Vec::new();
    for kind in ["dirt", "grass", "clay", "clay_grass"] {
        loam.extend(soil_replacements(kind, |_| format!("tfc:{kind}/loam")));
    }

    vec![
        ("clay_disc".to_string(), soil_disc(3, 5, 3, clay())),
        ("water_clay_disc".to_string(), soil_disc(2, 3, 2, clay())),
        (
            "peat_disc".to_string(),
            decorated(
                soil_disc(5, 9, 7, peat),
                [
                    chance(10),
                    square(),
                    heightmap(Heightmap::WorldSurfaceWg),
                    Climate::new().min_temperature(12).min_rainfall(350).decorator(),
                ],
            ),
        ),
        (
            "loam_disc".to_string(),
            decorated(
                soil_disc(3, 5, 3, loam),
                [
                    chance(120),
                    square(),
                    heightmap(Heightmap::WorldSurfaceWg),
                    Climate::new().min_rainfall(400).decorator(),
                ],
            ),
        ),
    ]
}

fn thin_spike(state: &str, radius: u32, tries: u32, min_height: u32, max_height: u32) -> Value {
    configure(
        "tfc:thin_spike",
        json!({
            "state": state,
            "radius": radius,
            "tries": tries,
            "min_height": min_height,
            "max_height": max_height,
        }),
    )
}

/// Spikes, calcite and icicles hanging in carved caves.
pub fn cave_formations() -> Features {
    vec![
        (
            "cave_spike".to_string(),
            decorated(configure_empty("tfc:cave_spike"), [carving_mask(0.09, None, None)]),
        ),
        (
            "large_cave_spike".to_string(),
            decorated(configure_empty("tfc:large_cave_spike"), [carving_mask(0.006, Some(25), None)]),
        ),
        (
            "calcite".to_string(),
            decorated(thin_spike("tfc:calcite", 5, 20, 2, 5), [count(4), square(), range_biased(8, 100)]),
        ),
        (
            "mega_calcite".to_string(),
            decorated(thin_spike("tfc:calcite", 12, 70, 3, 9), [chance(20), square(), range_biased(8, 60)]),
        ),
        (
            "icicle".to_string(),
            decorated(
                thin_spike("tfc:icicle", 10, 50, 2, 5),
                [
                    count(3),
                    square(),
                    range_biased(8, 128),
                    Climate::new().max_temperature(-4).decorator(),
                ],
            ),
        ),
    ]
}

/// Raw, cobble and mossy boulders. Each boulder mixes the listed block
/// forms of the rock it lands on.
pub fn boulders() -> Features {
    let boulder = |forms: &[&str]| {
        let states: Vec<Value> = ROCKS
            .iter()
            .map(|rock| {
                let blocks: Vec<String> =
                    forms.iter().map(|form| format!("tfc:rock/{form}/{}", rock.name)).collect();
                json!({ "rock": format!("tfc:{}", rock.name), "blocks": blocks })
            })
            .collect();
        decorated(
            configure("tfc:boulder", json!({ "states": states })),
            [chance(12), square(), heightmap(Heightmap::WorldSurfaceWg), flat_enough()],
        )
    };
    vec![
        ("raw_boulder".to_string(), boulder(&["raw"])),
        ("cobble_boulder".to_string(), boulder(&["raw", "cobble"])),
        ("mossy_boulder".to_string(), boulder(&["cobble", "mossy_cobble"])),
    ]
}

/// Ore decoration around a fissure or hot spring: `ore` replaces each of
/// `rocks` in the walls.
fn ore_decoration(ore: &str, rocks: &[&str], radius: u32, count: u32) -> Value {
    let blocks: Vec<Value> = rocks
        .iter()
        .map(|rock| {
            json!({
                "stone": [format!("tfc:rock/raw/{rock}")],
                "ore": [{ "block": format!("tfc:ore/{ore}/{rock}") }],
            })
        })
        .collect();
    json!({
        "blocks": blocks,
        "radius": radius,
        "count": count,
        "rarity": 3,
    })
}

fn decoration_rocks() -> Result<Vec<&'static str>> {
    expand_rock_names(&["igneous_extrusive", "igneous_intrusive", "metamorphic"], "volcanic decoration")
}

pub fn volcanoes() -> Result<Features> {
    let rocks = decoration_rocks()?;
    let mut features = Features::new();

    push(
        &mut features,
        "volcano_rivulet",
        decorated(
            configure("tfc:rivulet", json!({ "state": "minecraft:magma_block" })),
            [count(2), square(), volcano_distance(0.7)],
        ),
    );
    push(
        &mut features,
        "volcano_caldera",
        decorated(
            configure(
                "tfc:flood_fill_lake",
                json!({
                    "overfill": true,
                    "replace_fluids": ["minecraft:water"],
                    "state": "minecraft:lava",
                }),
            ),
            [volcano_center(), heightmap(Heightmap::WorldSurfaceWg)],
        ),
    );
    push(
        &mut features,
        "random_volcano_fissure",
        configure(
            "minecraft:simple_random_selector",
            json!({
                "features": count_weighted_list(&[
                    ("tfc:topaz_volcano_fissure", 3),
                    ("tfc:kimberlite_volcano_fissure", 1),
                    ("tfc:volcano_fissure", 4),
                ]),
            }),
        ),
    );

    for ore in ["kimberlite", "topaz", ""] {
        let mut config = json!({
            "wall_state": "tfc:rock/raw/basalt",
            "fluid_state": "minecraft:lava",
            "count": 3,
            "radius": 6,
        });
        // Plain fissures have no ore to line their walls with.
        if !ore.is_empty() {
            config["decoration"] = ore_decoration(ore, &rocks, 3, 6);
        }
        let fissure = configure("tfc:fissure", config);
        push(
            &mut features,
            join_not_empty("_", &[ore, "volcano_fissure"]),
            decorated(fissure, [volcano_center(), heightmap(Heightmap::WorldSurfaceWg)]),
        );
    }
    Ok(features)
}

/// Six hot springs (sapphire, emerald or bare; empty or filled) and the two
/// random selectors biomes reference.
pub fn hot_springs() -> Result<Features> {
    let rocks = decoration_rocks()?;
    let mut features = Features::new();

    for ore in ["sapphire", "emerald", ""] {
        for (variant, fluid_state, ore_count) in [("empty", "minecraft:air", 2), ("", "tfc:fluid/spring_water", 5)] {
            let decoration = if ore.is_empty() {
                Value::Null
            } else {
                ore_decoration(ore, &rocks, 5, ore_count)
            };
            push(
                &mut features,
                join_not_empty("_", &[ore, variant, "hot_spring"]),
                configure(
                    "tfc:hot_spring",
                    json!({
                        "fluid_state": fluid_state,
                        "radius": 14,
                        "decoration": decoration,
                    }),
                ),
            );
        }
    }

    let empty = [
        ("tfc:sapphire_empty_hot_spring", 1),
        ("tfc:emerald_empty_hot_spring", 1),
        ("tfc:empty_hot_spring", 2),
    ];
    let mut active = empty.to_vec();
    active.extend([
        ("tfc:sapphire_hot_spring", 3),
        ("tfc:emerald_hot_spring", 3),
        ("tfc:hot_spring", 6),
    ]);

    push(
        &mut features,
        "random_empty_hot_spring",
        decorated(
            configure("minecraft:simple_random_selector", json!({ "features": count_weighted_list(&empty) })),
            [chance(70), square()],
        ),
    );
    push(
        &mut features,
        "random_active_hot_spring",
        decorated(
            configure("minecraft:simple_random_selector", json!({ "features": count_weighted_list(&active) })),
            [chance(50), square()],
        ),
    );
    Ok(features)
}

/// Loose rocks on the surface and in caves, and bat guano on cave floors.
pub fn loose_rocks() -> Features {
    vec![
        (
            "surface_loose_rocks".to_string(),
            decorated(
                configure_empty("tfc:loose_rock"),
                [count(6), square(), heightmap(Heightmap::OceanFloorWg)],
            ),
        ),
        (
            "underground_loose_rocks".to_string(),
            decorated(configure_empty("tfc:loose_rock"), [carving_mask(0.05, Some(-48), Some(90))]),
        ),
        (
            "underground_guano".to_string(),
            decorated(
                cave_patch("tfc:groundcover/guano[fluid=empty]", 5, 5, 60),
                [chance(3), square(), range(80, 130)],
            ),
        ),
    ]
}

/// Writes every feature in this module.
pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>) -> Result<()> {
    rm.feature("erosion", configure_empty("tfc:erosion"))?;
    rm.feature("ice_and_snow", configure_empty("tfc:ice_and_snow"))?;

    let groups = [
        icebergs(),
        lakes(),
        springs(),
        soil_discs(),
        cave_formations(),
        boulders(),
        volcanoes()?,
        hot_springs()?,
        loose_rocks(),
    ];
    for (name, feature) in groups.into_iter().flatten() {
        rm.feature(&name, feature)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(features: &'a Features, name: &str) -> &'a Value {
        &features.iter().find(|(feature, _)| feature == name).unwrap().1
    }

    fn undecorated(mut feature: &Value) -> &Value {
        while feature["type"] == "minecraft:decorated" {
            feature = &feature["config"]["feature"];
        }
        feature
    }

    #[test]
    fn icebergs_need_freezing_climates() {
        let features = icebergs();
        let names: Vec<&str> = features.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["iceberg_packed", "iceberg_packed_rare", "iceberg_blue", "iceberg_blue_rare"]);
        let rare = find(&features, "iceberg_blue_rare");
        assert_eq!(rare["config"]["decorator"]["config"]["max_temperature"], -18);
        assert_eq!(undecorated(rare)["config"]["state"]["Name"], "minecraft:blue_ice");
    }

    #[test]
    fn springs_fall_into_raw_rock() {
        let features = springs();
        let lava = find(&features, "lava_spring");
        let spring = undecorated(lava);
        assert_eq!(spring["config"]["state"]["Properties"]["falling"], "true");
        assert_eq!(spring["config"]["valid_blocks"].as_array().unwrap().len(), ROCKS.len());
        let range = &lava["config"]["decorator"];
        assert_eq!(range["config"]["height"]["type"], "biased_to_bottom");
    }

    #[test]
    fn clay_discs_are_undecorated() {
        let features = soil_discs();
        let clay = find(&features, "clay_disc");
        assert_eq!(clay["type"], "tfc:soil_disc");
        assert_eq!(clay["config"]["states"].as_array().unwrap().len(), 8);
        let loam = undecorated(find(&features, "loam_disc"));
        assert_eq!(loam["config"]["states"].as_array().unwrap().len(), 16);
        assert_eq!(loam["config"]["states"][15]["with"], "tfc:clay_grass/loam");
    }

    #[test]
    fn large_cave_spike_omits_max_y() {
        let features = cave_formations();
        let mask = &find(&features, "large_cave_spike")["config"]["decorator"]["config"];
        assert_eq!(mask["min_y"], 25);
        assert!(mask.get("max_y").is_none());
    }

    #[test]
    fn mossy_boulders_mix_cobble_forms() {
        let features = boulders();
        let mossy = undecorated(find(&features, "mossy_boulder"));
        assert_eq!(
            mossy["config"]["states"][0]["blocks"],
            json!(["tfc:rock/cobble/granite", "tfc:rock/mossy_cobble/granite"])
        );
    }

    #[test]
    fn fissures_are_weighted_by_ore() {
        let features = volcanoes().unwrap();
        let selector = find(&features, "random_volcano_fissure");
        let choices = selector["config"]["features"].as_array().unwrap();
        assert_eq!(choices.len(), 8);
        for name in ["kimberlite_volcano_fissure", "topaz_volcano_fissure", "volcano_fissure"] {
            assert!(features.iter().any(|(feature, _)| feature == name), "{name}");
        }
        let plain = undecorated(find(&features, "volcano_fissure"));
        // No ore means no decoration, rather than walls of `tfc:ore//<rock>`.
        assert!(plain["config"].get("decoration").is_none());
        let topaz = undecorated(find(&features, "topaz_volcano_fissure"));
        assert_eq!(topaz["config"]["decoration"]["blocks"][0]["ore"][0]["block"], "tfc:ore/topaz/rhyolite");
    }

    #[test]
    fn bare_hot_springs_have_no_decoration() {
        let features = hot_springs().unwrap();
        assert_eq!(features.len(), 8);
        assert_eq!(find(&features, "hot_spring")["config"]["decoration"], Value::Null);
        let emerald = find(&features, "emerald_empty_hot_spring");
        assert_eq!(emerald["config"]["fluid_state"], "minecraft:air");
        assert_eq!(emerald["config"]["decoration"]["count"], 2);
        let active = undecorated(find(&features, "random_active_hot_spring"));
        assert_eq!(active["config"]["features"].as_array().unwrap().len(), 16);
    }
}
