//! Temperature and rainfall tiers that every biome template is crossed with.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureTier {
    pub id: &'static str,
    pub temperature: f64,
    pub water_color: u32,
    pub water_fog_color: u32,
}

impl TemperatureTier {
    pub fn is_cold(&self) -> bool {
        matches!(self.id, "cold" | "frozen")
    }

    pub fn is_warm(&self) -> bool {
        matches!(self.id, "lukewarm" | "warm")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainfallTier {
    pub id: &'static str,
    pub downfall: f64,
}

impl RainfallTier {
    pub fn is_arid(&self) -> bool {
        self.id == "arid"
    }

    pub fn is_damp(&self) -> bool {
        matches!(self.id, "damp" | "wet")
    }
}

pub static TEMPERATURES: [TemperatureTier; 5] = [
    TemperatureTier { id: "frozen", temperature: 0.0, water_color: 3750089, water_fog_color: 329011 },
    TemperatureTier { id: "cold", temperature: 0.25, water_color: 4020182, water_fog_color: 329011 },
    TemperatureTier { id: "normal", temperature: 0.5, water_color: 4159204, water_fog_color: 329011 },
    TemperatureTier { id: "lukewarm", temperature: 0.75, water_color: 4566514, water_fog_color: 267827 },
    TemperatureTier { id: "warm", temperature: 1.0, water_color: 4445678, water_fog_color: 270131 },
];

pub static RAINFALLS: [RainfallTier; 5] = [
    RainfallTier { id: "arid", downfall: 0.0 },
    RainfallTier { id: "dry", downfall: 0.2 },
    RainfallTier { id: "normal", downfall: 0.45 },
    RainfallTier { id: "damp", downfall: 0.7 },
    RainfallTier { id: "wet", downfall: 0.9 },
];

pub const DEFAULT_FOG_COLOR: u32 = 12638463;
pub const DEFAULT_SKY_COLOR: u32 = 0x84E6FF;

pub fn temperature(id: &str) -> Option<&'static TemperatureTier> {
    TEMPERATURES.iter().find(|tier| tier.id == id)
}

pub fn rainfall(id: &str) -> Option<&'static RainfallTier> {
    RAINFALLS.iter().find(|tier| tier.id == id)
}
