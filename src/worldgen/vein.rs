//! Ore veins: tables, salts, and the vein feature documents.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::rock::{expand_rock_names, rocks_in, RockCategory, ROCKS};
use crate::error::{Result, WorldgenError};
use crate::resource::{ResourceManager, ResourceSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ore {
    pub name: &'static str,
    /// Graded ores come in poor, normal and rich blocks plus a small nugget.
    pub graded: bool,
}

const fn graded(name: &'static str) -> Ore {
    Ore { name, graded: true }
}

const fn mineral(name: &'static str) -> Ore {
    Ore { name, graded: false }
}

pub static ORES: [Ore; 33] = [
    graded("native_copper"),
    graded("native_gold"),
    graded("hematite"),
    graded("native_silver"),
    graded("cassiterite"),
    graded("bismuthinite"),
    graded("garnierite"),
    graded("malachite"),
    graded("magnetite"),
    graded("limonite"),
    graded("sphalerite"),
    graded("tetrahedrite"),
    mineral("bituminous_coal"),
    mineral("lignite"),
    mineral("kaolinite"),
    mineral("gypsum"),
    mineral("graphite"),
    mineral("sulfur"),
    mineral("cinnabar"),
    mineral("cryolite"),
    mineral("saltpeter"),
    mineral("sylvite"),
    mineral("borax"),
    mineral("halite"),
    mineral("amethyst"),
    mineral("diamond"),
    mineral("emerald"),
    mineral("lapis_lazuli"),
    mineral("opal"),
    mineral("pyrite"),
    mineral("ruby"),
    mineral("sapphire"),
    mineral("topaz"),
];

pub fn ore_by_name(name: &str) -> Option<&'static Ore> {
    ORES.iter().find(|ore| ore.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VeinKind {
    Cluster,
    Disc,
    Pipe,
}

impl VeinKind {
    pub fn feature_type(self) -> &'static str {
        match self {
            VeinKind::Cluster => "tfc:cluster_vein",
            VeinKind::Disc => "tfc:disc_vein",
            VeinKind::Pipe => "tfc:pipe_vein",
        }
    }
}

/// A rarer ore mixed into a vein on some of its rocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Spoiler {
    pub ore: String,
    /// Share of the whole vein, in percent.
    pub rarity: u32,
    pub rocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vein {
    pub name: String,
    pub ore: String,
    #[serde(rename = "type")]
    pub kind: VeinKind,
    pub rarity: u32,
    pub size: u32,
    pub min_y: i32,
    pub max_y: i32,
    /// Percent of the vein volume that is ore.
    pub density: f64,
    #[serde(default)]
    pub poor: u32,
    #[serde(default)]
    pub normal: u32,
    #[serde(default)]
    pub rich: u32,
    pub rocks: Vec<String>,
    #[serde(default)]
    pub spoiler: Option<Spoiler>,
    /// Biome filter keyword: `river` or `volcanic`.
    #[serde(default)]
    pub biomes: Option<String>,
}

impl Vein {
    pub fn new(
        name: &str,
        ore: &str,
        kind: VeinKind,
        rarity: u32,
        size: u32,
        (min_y, max_y): (i32, i32),
        density: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            ore: ore.to_string(),
            kind,
            rarity,
            size,
            min_y,
            max_y,
            density,
            poor: 0,
            normal: 0,
            rich: 0,
            rocks: Vec::new(),
            spoiler: None,
            biomes: None,
        }
    }

    pub fn grades(mut self, poor: u32, normal: u32, rich: u32) -> Self {
        self.poor = poor;
        self.normal = normal;
        self.rich = rich;
        self
    }

    pub fn rocks(mut self, rocks: &[&str]) -> Self {
        self.rocks = rocks.iter().map(|rock| rock.to_string()).collect();
        self
    }

    pub fn spoiler(mut self, ore: &str, rarity: u32, rocks: &[&str]) -> Self {
        self.spoiler = Some(Spoiler {
            ore: ore.to_string(),
            rarity,
            rocks: rocks.iter().map(|rock| rock.to_string()).collect(),
        });
        self
    }

    pub fn biomes(mut self, filter: &str) -> Self {
        self.biomes = Some(filter.to_string());
        self
    }

    /// Feature id, `tfc:vein/<name>`.
    pub fn feature_id(&self) -> String {
        format!("tfc:vein/{}", self.name)
    }
}

/// The standard vein table.
pub fn builtin_veins() -> Vec<Vein> {
    use VeinKind::{Cluster, Disc, Pipe};

    vec![
        Vein::new("normal_native_copper", "native_copper", Cluster, 20, 25, (30, 70), 30.0)
            .grades(20, 40, 40)
            .rocks(&["igneous_extrusive"]),
        Vein::new("surface_native_copper", "native_copper", Cluster, 40, 15, (60, 200), 60.0)
            .grades(60, 30, 10)
            .rocks(&["igneous_extrusive"]),
        Vein::new("normal_native_gold", "native_gold", Cluster, 70, 15, (5, 60), 10.0)
            .grades(20, 40, 40)
            .rocks(&["igneous_extrusive", "igneous_intrusive"])
            .spoiler("pyrite", 20, &["igneous_extrusive", "igneous_intrusive"]),
        Vein::new("normal_native_silver", "native_silver", Cluster, 30, 20, (60, 140), 10.0)
            .grades(20, 40, 40)
            .rocks(&["granite", "gneiss"]),
        Vein::new("normal_cassiterite", "cassiterite", Cluster, 30, 30, (30, 100), 60.0)
            .grades(20, 40, 40)
            .rocks(&["igneous_intrusive"])
            .spoiler("topaz", 10, &["granite"]),
        Vein::new("normal_bismuthinite", "bismuthinite", Cluster, 30, 20, (60, 140), 40.0)
            .grades(20, 40, 40)
            .rocks(&["igneous_intrusive", "sedimentary"]),
        Vein::new("normal_garnierite", "garnierite", Cluster, 30, 20, (40, 90), 20.0)
            .grades(20, 40, 40)
            .rocks(&["gabbro"]),
        Vein::new("normal_malachite", "malachite", Cluster, 30, 25, (40, 90), 20.0)
            .grades(20, 40, 40)
            .rocks(&["marble", "limestone"])
            .spoiler("gypsum", 10, &["limestone"]),
        Vein::new("normal_magnetite", "magnetite", Cluster, 30, 25, (30, 70), 20.0)
            .grades(20, 40, 40)
            .rocks(&["sedimentary"]),
        Vein::new("normal_limonite", "limonite", Cluster, 30, 25, (30, 70), 20.0)
            .grades(20, 40, 40)
            .rocks(&["sedimentary"])
            .spoiler("ruby", 20, &["limestone", "shale"]),
        Vein::new("normal_sphalerite", "sphalerite", Cluster, 30, 25, (30, 70), 20.0)
            .grades(20, 40, 40)
            .rocks(&["metamorphic"]),
        Vein::new("normal_tetrahedrite", "tetrahedrite", Cluster, 30, 25, (30, 70), 20.0)
            .grades(20, 40, 40)
            .rocks(&["metamorphic"]),
        Vein::new("normal_hematite", "hematite", Cluster, 30, 25, (30, 70), 20.0)
            .grades(20, 40, 40)
            .rocks(&["igneous_extrusive"]),
        Vein::new("bituminous_coal", "bituminous_coal", Cluster, 60, 20, (30, 100), 40.0)
            .rocks(&["sedimentary"]),
        Vein::new("lignite", "lignite", Cluster, 60, 20, (30, 100), 40.0).rocks(&["sedimentary"]),
        Vein::new("kaolinite", "kaolinite", Cluster, 30, 15, (60, 100), 60.0).rocks(&["sedimentary"]),
        Vein::new("graphite", "graphite", Cluster, 60, 20, (30, 100), 40.0)
            .rocks(&["gneiss", "marble", "quartzite", "schist"]),
        Vein::new("cinnabar", "cinnabar", Cluster, 30, 10, (40, 100), 50.0)
            .rocks(&["igneous_extrusive", "quartzite", "shale"]),
        Vein::new("cryolite", "cryolite", Cluster, 30, 15, (40, 100), 60.0).rocks(&["granite"]),
        Vein::new("saltpeter", "saltpeter", Cluster, 60, 20, (40, 100), 40.0).rocks(&["sedimentary"]),
        Vein::new("sulfur", "sulfur", Cluster, 40, 18, (40, 100), 25.0).rocks(&["igneous_extrusive"]),
        Vein::new("sylvite", "sylvite", Cluster, 60, 20, (40, 100), 30.0)
            .rocks(&["shale", "claystone", "chert"]),
        Vein::new("borax", "borax", Cluster, 60, 20, (40, 100), 80.0).rocks(&["slate"]),
        Vein::new("gypsum", "gypsum", Disc, 40, 20, (40, 100), 60.0).rocks(&["metamorphic"]),
        Vein::new("lapis_lazuli", "lapis_lazuli", Cluster, 30, 20, (40, 100), 30.0)
            .rocks(&["limestone", "marble"]),
        Vein::new("halite", "halite", Disc, 50, 30, (40, 100), 80.0).rocks(&["sedimentary"]),
        Vein::new("diamond", "diamond", Pipe, 60, 60, (5, 140), 40.0).rocks(&["gabbro"]),
        Vein::new("emerald", "emerald", Pipe, 80, 60, (5, 140), 40.0).rocks(&["igneous_intrusive"]),
        Vein::new("amethyst", "amethyst", Disc, 25, 8, (40, 60), 20.0)
            .rocks(&["sedimentary", "metamorphic"])
            .biomes("river"),
        Vein::new("opal", "opal", Disc, 25, 8, (40, 60), 20.0)
            .rocks(&["sedimentary", "igneous_extrusive"])
            .biomes("volcanic"),
    ]
}

/// Deterministic per-vein seed: the low 32 bits of the SHA-256 digest of
/// `name`, read as a big-endian integer.
pub fn vein_salt(name: &str) -> u32 {
    let digest = Sha256::digest(name.as_bytes());
    let tail = &digest[digest.len() - 4..];
    u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]])
}

/// Resolves a biome filter keyword. `None` means the vein has no filter.
pub fn vein_biome_filter(filter: Option<&str>) -> Result<Value> {
    match filter {
        None => Ok(Value::Null),
        Some("river") => Ok(json!([{ "category": "river" }])),
        Some("volcanic") => Ok(json!([{ "biome_dictionary": "volcanic" }])),
        Some(other) => Err(WorldgenError::UnknownBiomeFilter(other.to_string())),
    }
}

/// Weighted poor/normal/rich blocks for a graded vein on one rock, plus the
/// spoiler ore when this rock carries it.
pub fn graded_ore_blocks(vein: &Vein, rock: &str, spoiler_rocks: &[&str]) -> Vec<Value> {
    let mut blocks = vec![
        json!({ "weight": vein.poor, "block": format!("tfc:ore/poor_{}/{rock}", vein.ore) }),
        json!({ "weight": vein.normal, "block": format!("tfc:ore/normal_{}/{rock}", vein.ore) }),
        json!({ "weight": vein.rich, "block": format!("tfc:ore/rich_{}/{rock}", vein.ore) }),
    ];
    if let Some(spoiler) = &vein.spoiler {
        if spoiler_rocks.contains(&rock) {
            blocks.push(json!({
                "weight": spoiler_weight(spoiler.rarity),
                "block": format!("tfc:ore/{}/{rock}", spoiler.ore),
            }));
        }
    }
    blocks
}

/// Weight that makes the spoiler `rarity` percent of a vein whose other
/// weights sum to 100. `rarity` must be below 100, see [`check_spoiler`].
pub fn spoiler_weight(rarity: u32) -> u32 {
    let p = f64::from(rarity) * 0.01;
    (100.0 * p / (1.0 - p)) as u32
}

/// A spoiler can take at most a share below the whole vein.
pub fn check_spoiler(vein: &Vein) -> Result<()> {
    match &vein.spoiler {
        Some(spoiler) if spoiler.rarity >= 100 => Err(WorldgenError::InvalidSpoiler {
            vein: vein.name.clone(),
            rarity: spoiler.rarity,
        }),
        _ => Ok(()),
    }
}

/// Rejects a table where two veins share a name, or where a vein takes the
/// name of the gravel vein or a dike. Either would overwrite a document.
pub fn check_veins(veins: &[Vein]) -> Result<()> {
    let mut seen: BTreeSet<String> = dike_names().collect();
    seen.insert("gravel".to_string());
    for vein in veins {
        if !seen.insert(vein.name.clone()) {
            return Err(WorldgenError::DuplicateVein(vein.name.clone()));
        }
        check_spoiler(vein)?;
    }
    Ok(())
}

fn stone_entry(stone: String, ore: Vec<Value>) -> Value {
    json!({ "stone": [stone], "ore": ore })
}

/// Config of one vein from the table.
pub fn vein_config(vein: &Vein) -> Result<Value> {
    check_spoiler(vein)?;
    let context = format!("vein/{}", vein.name);
    let rocks = expand_rock_names(&vein.rocks, &context)?;
    let ore = ore_by_name(&vein.ore).ok_or_else(|| WorldgenError::UnknownOre {
        vein: vein.name.clone(),
        ore: vein.ore.clone(),
    })?;

    let mut config = Map::new();
    config.insert("rarity".to_string(), json!(vein.rarity));
    config.insert("min_y".to_string(), json!(vein.min_y));
    config.insert("max_y".to_string(), json!(vein.max_y));
    config.insert("size".to_string(), json!(vein.size));
    config.insert("density".to_string(), json!(vein.density / 100.0));

    let blocks: Vec<Value> = if ore.graded {
        let spoiler_rocks = match &vein.spoiler {
            Some(spoiler) => {
                if ore_by_name(&spoiler.ore).is_none() {
                    return Err(WorldgenError::UnknownOre {
                        vein: vein.name.clone(),
                        ore: spoiler.ore.clone(),
                    });
                }
                expand_rock_names(&spoiler.rocks, &context)?
            }
            None => Vec::new(),
        };
        rocks
            .iter()
            .map(|rock| {
                stone_entry(
                    format!("tfc:rock/raw/{rock}"),
                    graded_ore_blocks(vein, rock, &spoiler_rocks),
                )
            })
            .collect()
    } else {
        rocks
            .iter()
            .map(|rock| {
                stone_entry(
                    format!("tfc:rock/raw/{rock}"),
                    vec![json!({ "block": format!("tfc:ore/{}/{rock}", vein.ore) })],
                )
            })
            .collect()
    };
    config.insert("blocks".to_string(), json!(blocks));

    if ore.graded {
        config.insert(
            "indicator".to_string(),
            json!({
                "rarity": 12,
                "blocks": [{ "block": format!("tfc:ore/small_{}", vein.ore) }],
            }),
        );
    }
    config.insert("salt".to_string(), json!(vein_salt(&vein.name)));
    config.insert("biomes".to_string(), vein_biome_filter(vein.biomes.as_deref())?);

    if !ore.graded && vein.kind == VeinKind::Pipe {
        config.insert("min_skew".to_string(), json!(5));
        config.insert("max_skew".to_string(), json!(13));
        config.insert("min_slant".to_string(), json!(0));
        config.insert("max_slant".to_string(), json!(2));
    }

    Ok(json!({
        "type": vein.kind.feature_type(),
        "config": Value::Object(config),
    }))
}

/// Gravel discs replacing every raw rock with its gravel.
pub fn gravel_vein() -> Value {
    let blocks: Vec<Value> = ROCKS
        .iter()
        .map(|rock| {
            stone_entry(
                format!("tfc:rock/raw/{}", rock.name),
                vec![json!({ "block": format!("tfc:rock/gravel/{}", rock.name) })],
            )
        })
        .collect();
    json!({
        "type": "tfc:disc_vein",
        "config": {
            "rarity": 30,
            "min_y": 0,
            "max_y": 180,
            "size": 44,
            "height": 2,
            "density": 1,
            "blocks": blocks,
            "salt": vein_salt("gravel"),
        }
    })
}

pub fn dike_name(rock: &str) -> String {
    format!("{rock}_dike")
}

/// Names of the dike veins, one per intrusive igneous rock.
pub fn dike_names() -> impl Iterator<Item = String> {
    rocks_in(RockCategory::IgneousIntrusive).map(|rock| dike_name(rock.name))
}

/// Pipe of `rock` cutting through every raw, gravel and hardened rock.
pub fn dike_vein(rock: &str) -> Value {
    let blocks: Vec<Value> = ["raw", "gravel", "hardened"]
        .iter()
        .flat_map(|form| {
            ROCKS.iter().map(move |host| {
                stone_entry(
                    format!("tfc:rock/{form}/{}", host.name),
                    vec![json!({ "block": format!("tfc:rock/raw/{rock}") })],
                )
            })
        })
        .collect();
    json!({
        "type": "tfc:pipe_vein",
        "config": {
            "rarity": 220,
            "min_y": 40,
            "max_y": 180,
            "size": 90,
            "density": 0.95,
            "blocks": blocks,
            "salt": vein_salt(&dike_name(rock)),
            "radius": 4,
            "minSkew": 7,
            "maxSkew": 20,
            "minSlant": 2,
            "maxSlant": 5,
        }
    })
}

/// Writes every vein in `veins`, the gravel vein and the dikes.
pub fn generate<S: ResourceSink>(rm: &mut ResourceManager<S>, veins: &[Vein]) -> Result<()> {
    for vein in veins {
        let config = vein_config(vein)?;
        debug!(vein = %vein.name, salt = vein_salt(&vein.name), "vein");
        rm.feature(&format!("vein/{}", vein.name), config)?;
    }
    rm.feature("vein/gravel", gravel_vein())?;
    for rock in rocks_in(RockCategory::IgneousIntrusive) {
        rm.feature(&format!("vein/{}", dike_name(rock.name)), dike_vein(rock.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_matches_known_digests() {
        assert_eq!(vein_salt("gravel"), 0xa35d7d24);
        assert_eq!(vein_salt("normal_native_copper"), 774465741);
        assert_eq!(vein_salt("granite_dike"), 597756037);
        assert_eq!(vein_salt(""), 0x7852b855);
    }

    #[test]
    fn salt_is_deterministic_and_name_dependent() {
        assert_eq!(vein_salt("normal_hematite"), vein_salt("normal_hematite"));
        assert_ne!(vein_salt("normal_hematite"), vein_salt("normal_magnetite"));
    }

    #[test]
    fn biome_filters() {
        assert_eq!(vein_biome_filter(None).unwrap(), Value::Null);
        assert_eq!(vein_biome_filter(Some("river")).unwrap(), json!([{"category": "river"}]));
        assert_eq!(
            vein_biome_filter(Some("volcanic")).unwrap(),
            json!([{"biome_dictionary": "volcanic"}])
        );
        assert!(matches!(
            vein_biome_filter(Some("desert")),
            Err(WorldgenError::UnknownBiomeFilter(name)) if name == "desert"
        ));
    }

    #[test]
    fn spoiler_weights() {
        assert_eq!(spoiler_weight(10), 11);
        assert_eq!(spoiler_weight(20), 25);
    }

    #[test]
    fn builtin_veins_reference_known_rocks_and_ores() {
        for vein in builtin_veins() {
            let rocks = expand_rock_names(&vein.rocks, &vein.name).unwrap();
            assert!(!rocks.is_empty(), "{} has no rocks", vein.name);
            assert!(ore_by_name(&vein.ore).is_some(), "{} has unknown ore", vein.name);
            vein_config(&vein).unwrap();
        }
    }

    #[test]
    fn graded_vein_with_spoiler() {
        let vein = builtin_veins()
            .into_iter()
            .find(|vein| vein.name == "normal_cassiterite")
            .unwrap();
        let config = vein_config(&vein).unwrap();
        assert_eq!(config["type"], "tfc:cluster_vein");
        let config = &config["config"];
        assert_eq!(config["density"], 0.6);
        assert_eq!(config["indicator"]["blocks"][0]["block"], "tfc:ore/small_cassiterite");
        assert_eq!(config["biomes"], Value::Null);

        let blocks = config["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        let granite = &blocks[0];
        assert_eq!(granite["stone"][0], "tfc:rock/raw/granite");
        let ores = granite["ore"].as_array().unwrap();
        assert_eq!(ores.len(), 4);
        assert_eq!(ores[3], json!({"weight": 11, "block": "tfc:ore/topaz/granite"}));
        assert_eq!(blocks[1]["ore"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn mineral_pipe_gets_skew_bounds() {
        let vein = builtin_veins().into_iter().find(|vein| vein.name == "diamond").unwrap();
        let config = vein_config(&vein).unwrap();
        assert_eq!(config["type"], "tfc:pipe_vein");
        assert_eq!(config["config"]["max_skew"], 13);
        assert!(config["config"].get("indicator").is_none());
        assert_eq!(config["config"]["blocks"][0]["ore"][0]["block"], "tfc:ore/diamond/gabbro");
    }

    #[test]
    fn unknown_ore_is_fatal() {
        let vein = Vein::new("bad", "mithril", VeinKind::Cluster, 1, 1, (0, 10), 10.0).rocks(&["granite"]);
        assert!(matches!(vein_config(&vein), Err(WorldgenError::UnknownOre { .. })));
    }

    #[test]
    fn unknown_rock_names_the_vein() {
        let vein = Vein::new("bad", "sulfur", VeinKind::Cluster, 1, 1, (0, 10), 10.0).rocks(&["obsidian"]);
        match vein_config(&vein) {
            Err(WorldgenError::UnknownRock { spec, context }) => {
                assert_eq!(spec, "obsidian");
                assert_eq!(context, "vein/bad");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn whole_vein_spoiler_is_fatal() {
        for rarity in [100, 150] {
            let vein = Vein::new("bad_gold", "native_gold", VeinKind::Cluster, 30, 10, (5, 60), 10.0)
                .grades(20, 40, 40)
                .rocks(&["granite"])
                .spoiler("pyrite", rarity, &["granite"]);
            match vein_config(&vein) {
                Err(WorldgenError::InvalidSpoiler { vein, rarity: found }) => {
                    assert_eq!(vein, "bad_gold");
                    assert_eq!(found, rarity);
                }
                other => panic!("unexpected {other:?}"),
            }
            assert!(matches!(check_veins(&[vein]), Err(WorldgenError::InvalidSpoiler { .. })));
        }
    }

    #[test]
    fn vein_names_must_be_unique() {
        let mut veins = builtin_veins();
        check_veins(&veins).unwrap();

        veins.push(Vein::new("sulfur", "sulfur", VeinKind::Disc, 1, 1, (0, 10), 10.0).rocks(&["basalt"]));
        assert!(matches!(check_veins(&veins), Err(WorldgenError::DuplicateVein(name)) if name == "sulfur"));

        for reserved in ["gravel", "diorite_dike"] {
            let vein = Vein::new(reserved, "sulfur", VeinKind::Cluster, 1, 1, (0, 10), 10.0).rocks(&["basalt"]);
            assert!(matches!(check_veins(&[vein]), Err(WorldgenError::DuplicateVein(name)) if name == reserved));
        }
    }

    #[test]
    fn dikes_cover_every_host_form() {
        let dike = dike_vein("granite");
        assert_eq!(dike["config"]["blocks"].as_array().unwrap().len(), ROCKS.len() * 3);
        assert_eq!(dike["config"]["salt"], vein_salt("granite_dike"));
        assert_eq!(dike_names().collect::<Vec<_>>(), ["granite_dike", "diorite_dike", "gabbro_dike"]);
    }
}
