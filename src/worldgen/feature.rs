//! Configured feature documents and block states.

use serde_json::{json, Map, Value};

use super::decorator::Decorator;

/// `{"type": feature_type, "config": config}`.
pub fn configure(feature_type: &str, config: Value) -> Value {
    json!({
        "type": feature_type,
        "config": config,
    })
}

/// A feature that takes no configuration.
pub fn configure_empty(feature_type: &str) -> Value {
    configure(feature_type, json!({}))
}

/// Wraps `feature` in one `minecraft:decorated` layer per decorator.
///
/// Each decorator wraps the result of the previous one, so the last
/// decorator in the list is the outermost and runs first.
pub fn decorated(feature: Value, decorators: impl IntoIterator<Item = Decorator>) -> Value {
    decorators.into_iter().fold(feature, |inner, decorator| {
        configure(
            "minecraft:decorated",
            json!({
                "feature": inner,
                "decorator": decorator.to_json(),
            }),
        )
    })
}

/// Parses `namespace:block[key=value,...]` into `{"Name", "Properties"}`.
/// `Properties` is omitted when the state string has none.
pub fn block_state(spec: &str) -> Value {
    let (name, properties) = match spec.split_once('[') {
        Some((name, rest)) => (name, rest.trim_end_matches(']')),
        None => (spec, ""),
    };

    let mut state = Map::new();
    state.insert("Name".to_string(), Value::from(name));
    let properties: Map<String, Value> = properties
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), Value::from(value.trim())))
        .collect();
    if !properties.is_empty() {
        state.insert("Properties".to_string(), Value::Object(properties));
    }
    Value::Object(state)
}

/// Block name of a state string, without properties.
pub fn block_name(spec: &str) -> &str {
    spec.split_once('[').map_or(spec, |(name, _)| name)
}

/// Repeats each item `count` times, producing a flat weighted list for
/// `minecraft:simple_random_selector`.
pub fn count_weighted_list<T: Clone>(pairs: &[(T, usize)]) -> Vec<T> {
    pairs
        .iter()
        .flat_map(|(item, count)| std::iter::repeat(item.clone()).take(*count))
        .collect()
}

/// Joins the non-empty parts with `separator`.
pub fn join_not_empty(separator: &str, parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}
