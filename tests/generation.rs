use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use tfc_worldgen::resource::ResourceKind;
use tfc_worldgen::worldgen::{self, vein::builtin_veins};
use tfc_worldgen::{DirectorySink, GeneratorConfig, MemorySink, ResourceManager, WorldgenError, NAMESPACE};

fn generate_in_memory() -> ResourceManager<MemorySink> {
    let mut rm = ResourceManager::new(NAMESPACE, MemorySink::new());
    worldgen::generate(&mut rm, &builtin_veins()).unwrap();
    rm.finish().unwrap();
    rm
}

fn biome<'a>(rm: &'a ResourceManager<MemorySink>, name: &str) -> &'a Value {
    rm.sink()
        .get(format!("data/tfc/worldgen/biome/{name}.json"))
        .unwrap_or_else(|| panic!("missing biome {name}"))
}

fn feature_path(id: &str) -> PathBuf {
    let (namespace, path) = id.split_once(':').unwrap();
    PathBuf::from(format!("data/{namespace}/worldgen/configured_feature/{path}.json"))
}

#[test]
fn every_template_in_every_climate() {
    let rm = generate_in_memory();
    let biomes: Vec<_> = rm.sink().under("data/tfc/worldgen/biome").collect();
    assert_eq!(biomes.len(), 775);
    for (path, biome) in biomes {
        let stages = biome["features"].as_array().unwrap();
        assert_eq!(stages.len(), 10, "{}", path.display());
        assert_eq!(biome["carvers"]["air"].as_array().unwrap().len(), 3);
    }
}

#[test]
fn biome_references_resolve_to_written_documents() {
    let rm = generate_in_memory();
    let mut referenced = BTreeSet::new();
    for (_, biome) in rm.sink().under("data/tfc/worldgen/biome") {
        for stage in biome["features"].as_array().unwrap() {
            for id in stage.as_array().unwrap() {
                referenced.insert(id.as_str().unwrap().to_string());
            }
        }
        let builder = biome["surface_builder"].as_str().unwrap();
        let builder = builder.trim_start_matches("tfc:");
        let path = format!("data/tfc/worldgen/configured_surface_builder/{builder}.json");
        assert!(rm.sink().get(&path).is_some(), "{path}");
    }
    for id in &referenced {
        assert!(rm.sink().get(feature_path(id)).is_some(), "missing feature {id}");
    }
}

#[test]
fn precipitation_follows_climate() {
    let rm = generate_in_memory();
    assert_eq!(biome(&rm, "plains_normal_arid")["precipitation"], "none");
    assert_eq!(biome(&rm, "plains_frozen_arid")["precipitation"], "none");
    assert_eq!(biome(&rm, "plains_cold_wet")["precipitation"], "snow");
    assert_eq!(biome(&rm, "plains_warm_wet")["precipitation"], "rain");
}

#[test]
fn snowy_oceans_get_icebergs() {
    let rm = generate_in_memory();
    assert_eq!(biome(&rm, "ocean_frozen_normal")["surface_builder"], "tfc:icebergs");
    assert_eq!(biome(&rm, "deep_ocean_cold_wet")["surface_builder"], "tfc:icebergs");
    assert_eq!(biome(&rm, "ocean_warm_normal")["surface_builder"], "tfc:normal");
    // Arid skies never snow, so the ocean keeps its own builder.
    assert_eq!(biome(&rm, "ocean_frozen_arid")["surface_builder"], "tfc:normal");
    // Shores are beaches, not oceans.
    assert_eq!(biome(&rm, "shore_frozen_normal")["surface_builder"], "tfc:shore");
}

#[test]
fn ores_follow_gravel_and_dikes() {
    let rm = generate_in_memory();
    let ores = biome(&rm, "plains_normal_normal")["features"][6].as_array().unwrap();
    assert_eq!(ores[0], "tfc:vein/gravel");
    assert_eq!(ores[1], "tfc:vein/granite_dike");
    let veins = builtin_veins();
    assert_eq!(ores.last().unwrap().as_str().unwrap(), veins.last().unwrap().feature_id());
}

#[test]
fn directory_sink_lays_out_resource_tree() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut rm = ResourceManager::new(NAMESPACE, DirectorySink::new(temp_dir.path(), true));
    worldgen::generate(&mut rm, &builtin_veins()).unwrap();
    let stats = rm.finish().unwrap();
    assert_eq!(stats.unchanged, 0);
    assert_eq!(stats.lang_entries, 775);

    let root = temp_dir.path();
    assert!(root.join("data/minecraft/dimension_type/overworld.json").is_file());
    assert!(root.join("data/tfc/worldgen/configured_carver/crevice.json").is_file());
    assert!(root.join("data/tfc/worldgen/configured_feature/vein/gravel.json").is_file());
    assert!(root.join("data/tfc/worldgen/configured_feature/tree/acacia.json").is_file());

    let lang: Value =
        serde_json::from_str(&fs::read_to_string(root.join("assets/tfc/lang/en_us.json")).unwrap()).unwrap();
    assert_eq!(lang["biome.tfc.plains_normal_normal"], "(Normal / Normal) Plains");
    assert_eq!(
        lang["biome.tfc.volcanic_oceanic_mountain_lake_lukewarm_arid"],
        "(Lukewarm / Arid) Volcanic Oceanic Mountain Lake"
    );
}

#[test]
fn second_run_leaves_files_unchanged() {
    let temp_dir = tempfile::tempdir().unwrap();
    let veins = builtin_veins();
    let mut first = ResourceManager::new(NAMESPACE, DirectorySink::new(temp_dir.path(), false));
    worldgen::generate(&mut first, &veins).unwrap();
    let first = first.finish().unwrap();

    let mut second = ResourceManager::new(NAMESPACE, DirectorySink::new(temp_dir.path(), false));
    worldgen::generate(&mut second, &veins).unwrap();
    let second = second.finish().unwrap();
    assert_eq!(second.total(), first.total());
    assert_eq!(second.unchanged, second.total());
    assert_eq!(second.count(ResourceKind::Biome), 775);
}

#[test]
fn configured_vein_with_unknown_rock_fails() {
    let config = GeneratorConfig::from_yaml_str(
        r#"
extra_veins:
  - name: bad_copper
    ore: native_copper
    type: cluster
    rarity: 30
    size: 20
    min_y: 0
    max_y: 100
    density: 40
    rocks: [moonstone]
"#,
    )
    .unwrap();
    let mut rm = ResourceManager::new(NAMESPACE, MemorySink::new());
    let err = worldgen::generate(&mut rm, &config.veins()).unwrap_err();
    match err {
        WorldgenError::UnknownRock { spec, context } => {
            assert_eq!(spec, "moonstone");
            assert_eq!(context, "vein/bad_copper");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn configured_vein_spoiling_the_whole_vein_fails() {
    let config = GeneratorConfig::from_yaml_str(
        r#"
extra_veins:
  - name: fools_gold
    ore: native_gold
    type: cluster
    rarity: 30
    size: 10
    min_y: 5
    max_y: 60
    density: 10
    poor: 20
    normal: 40
    rich: 40
    rocks: [granite]
    spoiler:
      ore: pyrite
      rarity: 100
      rocks: [granite]
"#,
    )
    .unwrap();
    let mut rm = ResourceManager::new(NAMESPACE, MemorySink::new());
    let err = worldgen::generate(&mut rm, &config.veins()).unwrap_err();
    assert!(matches!(
        err,
        WorldgenError::InvalidSpoiler { ref vein, rarity: 100 } if vein == "fools_gold"
    ));
    assert!(rm.sink().is_empty());
}

#[test]
fn configured_vein_reusing_a_name_fails() {
    let config = GeneratorConfig::from_yaml_str(
        r#"
extra_veins:
  - name: gravel
    ore: sulfur
    type: cluster
    rarity: 40
    size: 18
    min_y: 40
    max_y: 100
    density: 25
    rocks: [basalt]
"#,
    )
    .unwrap();
    let mut rm = ResourceManager::new(NAMESPACE, MemorySink::new());
    let err = worldgen::generate(&mut rm, &config.veins()).unwrap_err();
    assert!(matches!(err, WorldgenError::DuplicateVein(ref name) if name == "gravel"));
    assert!(rm.sink().is_empty());
}
