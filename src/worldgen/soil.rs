/// Soil variants that have dirt, grass, clay and clay grass blocks.
pub const SOIL_VARIANTS: [&str; 4] = ["silt", "loam", "sandy_loam", "silty_loam"];

pub const SAND_COLORS: [&str; 7] = ["brown", "white", "black", "red", "yellow", "green", "pink"];

/// `replace` → `with` pairs for every soil variant, e.g. dirt → clay.
pub fn soil_replacements(from: &str, to: impl Fn(&str) -> String) -> Vec<serde_json::Value> {
    SOIL_VARIANTS
        .iter()
        .map(|soil| {
            serde_json::json!({
                "replace": format!("tfc:{from}/{soil}"),
                "with": to(soil),
            })
        })
        .collect()
}
