//! Vertical anchors and number providers shared by carvers and decorators.

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Absolute,
    AboveBottom,
    BelowTop,
}

impl Anchor {
    fn key(self) -> &'static str {
        match self {
            Anchor::Absolute => "absolute",
            Anchor::AboveBottom => "above_bottom",
            Anchor::BelowTop => "below_top",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightDistribution {
    Uniform,
    BiasedToBottom,
}

impl HeightDistribution {
    fn name(self) -> &'static str {
        match self {
            HeightDistribution::Uniform => "uniform",
            HeightDistribution::BiasedToBottom => "biased_to_bottom",
        }
    }
}

pub fn vertical_anchor(y: i32, anchor: Anchor) -> Value {
    json!({ anchor.key(): y })
}

pub fn height_provider(min_y: i32, max_y: i32, distribution: HeightDistribution, anchor: Anchor) -> Value {
    json!({
        "type": distribution.name(),
        "min_inclusive": vertical_anchor(min_y, anchor),
        "max_inclusive": vertical_anchor(max_y, anchor),
    })
}

pub fn uniform_float(min_inclusive: f64, max_exclusive: f64) -> Value {
    json!({
        "type": "uniform",
        "value": {
            "min_inclusive": min_inclusive,
            "max_exclusive": max_exclusive,
        }
    })
}

pub fn trapezoid_float(min: f64, max: f64, plateau: f64) -> Value {
    json!({
        "type": "trapezoid",
        "value": {
            "min": min,
            "max": max,
            "plateau": plateau,
        }
    })
}
