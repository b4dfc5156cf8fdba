//! Rock table and specifier expansion.

use crate::error::{Result, WorldgenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockCategory {
    Sedimentary,
    Metamorphic,
    IgneousExtrusive,
    IgneousIntrusive,
}

impl RockCategory {
    pub const ALL: [RockCategory; 4] = [
        RockCategory::Sedimentary,
        RockCategory::Metamorphic,
        RockCategory::IgneousExtrusive,
        RockCategory::IgneousIntrusive,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RockCategory::Sedimentary => "sedimentary",
            RockCategory::Metamorphic => "metamorphic",
            RockCategory::IgneousExtrusive => "igneous_extrusive",
            RockCategory::IgneousIntrusive => "igneous_intrusive",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rock {
    pub name: &'static str,
    pub category: RockCategory,
}

const fn rock(name: &'static str, category: RockCategory) -> Rock {
    Rock { name, category }
}

pub static ROCKS: [Rock; 20] = [
    rock("granite", RockCategory::IgneousIntrusive),
    rock("diorite", RockCategory::IgneousIntrusive),
    rock("gabbro", RockCategory::IgneousIntrusive),
    rock("shale", RockCategory::Sedimentary),
    rock("claystone", RockCategory::Sedimentary),
    rock("limestone", RockCategory::Sedimentary),
    rock("conglomerate", RockCategory::Sedimentary),
    rock("dolomite", RockCategory::Sedimentary),
    rock("chert", RockCategory::Sedimentary),
    rock("chalk", RockCategory::Sedimentary),
    rock("rhyolite", RockCategory::IgneousExtrusive),
    rock("basalt", RockCategory::IgneousExtrusive),
    rock("andesite", RockCategory::IgneousExtrusive),
    rock("dacite", RockCategory::IgneousExtrusive),
    rock("quartzite", RockCategory::Metamorphic),
    rock("slate", RockCategory::Metamorphic),
    rock("phyllite", RockCategory::Metamorphic),
    rock("schist", RockCategory::Metamorphic),
    rock("gneiss", RockCategory::Metamorphic),
    rock("marble", RockCategory::Metamorphic),
];

pub fn rock_by_name(name: &str) -> Option<&'static Rock> {
    ROCKS.iter().find(|rock| rock.name == name)
}

pub fn rocks_in(category: RockCategory) -> impl Iterator<Item = &'static Rock> {
    ROCKS.iter().filter(move |rock| rock.category == category)
}

/// Expands rock names and category names into concrete rocks, in order.
///
/// A specifier that is neither a rock nor a category is an authoring error
/// in the calling table; `context` names that table entry in the error.
pub fn expand_rocks<S: AsRef<str>>(specs: &[S], context: &str) -> Result<Vec<&'static Rock>> {
    let mut rocks = Vec::new();
    for spec in specs {
        let spec = spec.as_ref();
        if let Some(rock) = rock_by_name(spec) {
            rocks.push(rock);
        } else if let Some(category) = RockCategory::from_name(spec) {
            rocks.extend(rocks_in(category));
        } else {
            return Err(WorldgenError::UnknownRock {
                spec: spec.to_string(),
                context: context.to_string(),
            });
        }
    }
    Ok(rocks)
}

/// Names of the rocks matched by `specs`.
pub fn expand_rock_names<S: AsRef<str>>(specs: &[S], context: &str) -> Result<Vec<&'static str>> {
    Ok(expand_rocks(specs, context)?
        .into_iter()
        .map(|rock| rock.name)
        .collect())
}
