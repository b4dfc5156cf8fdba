use serde::{Serialize, Serializer};

/// Feature passes in the order the engine runs them. The discriminant is the
/// list index in a biome's `features` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Decoration {
    RawGeneration = 0,
    Lakes = 1,
    LocalModifications = 2,
    UndergroundStructures = 3,
    SurfaceStructures = 4,
    Strongholds = 5,
    UndergroundOres = 6,
    UndergroundDecoration = 7,
    VegetalDecoration = 8,
    TopLayerModification = 9,
}

impl Decoration {
    pub const COUNT: usize = 10;

    pub const ALL: [Decoration; Decoration::COUNT] = [
        Decoration::RawGeneration,
        Decoration::Lakes,
        Decoration::LocalModifications,
        Decoration::UndergroundStructures,
        Decoration::SurfaceStructures,
        Decoration::Strongholds,
        Decoration::UndergroundOres,
        Decoration::UndergroundDecoration,
        Decoration::VegetalDecoration,
        Decoration::TopLayerModification,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Feature ids bucketed by decoration stage. Always exactly
/// [`Decoration::COUNT`] lists, serialized positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureStages {
    stages: [Vec<String>; Decoration::COUNT],
}

impl FeatureStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Decoration, feature: impl Into<String>) {
        self.stages[stage.index()].push(feature.into());
    }

    pub fn extend<I>(&mut self, stage: Decoration, features: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.stages[stage.index()].extend(features.into_iter().map(Into::into));
    }

    pub fn get(&self, stage: Decoration) -> &[String] {
        &self.stages[stage.index()]
    }

    pub fn contains(&self, stage: Decoration, feature: &str) -> bool {
        self.get(stage).iter().any(|id| id == feature)
    }

    /// Every feature id across all stages.
    pub fn all_features(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().flatten().map(String::as_str)
    }
}

impl Serialize for FeatureStages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.stages.serialize(serializer)
    }
}
