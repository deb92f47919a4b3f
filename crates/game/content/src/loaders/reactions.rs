//! Reaction table loader.
//!
//! Each row names the elements it requires as a plain list. Naming one element
//! twice (`[Geo, Geo]`) means the target must already carry it and be hit by
//! it again.

use std::path::Path;

use combat_core::{
    ClearRule, Element, ElementMask, ReactionDefinition, ReactionKind, ReactionRequirement,
    ReactionTable,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tags a reaction removes, as written in data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClearSpec {
    #[default]
    All,
    Only(Vec<Element>),
    Nothing,
}

impl From<ClearSpec> for ClearRule {
    fn from(spec: ClearSpec) -> Self {
        match spec {
            ClearSpec::All => ClearRule::All,
            ClearSpec::Only(elements) => ClearRule::Only(elements.into_iter().collect()),
            ClearSpec::Nothing => ClearRule::Nothing,
        }
    }
}

fn unit_multiplier() -> f64 {
    1.0
}

/// One reaction row as written in data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionSpec {
    pub kind: ReactionKind,
    pub requires: Vec<Element>,
    #[serde(default = "unit_multiplier")]
    pub multiplier: f64,
    pub description: String,
    #[serde(default)]
    pub clear: ClearSpec,
    #[serde(default)]
    pub induced: Option<Element>,
}

impl ReactionSpec {
    pub fn into_definition(self) -> LoadResult<ReactionDefinition> {
        let requirement = requirement(self.kind, &self.requires)?;
        Ok(ReactionDefinition {
            kind: self.kind,
            requirement,
            damage_multiplier: self.multiplier,
            description: self.description,
            clear: self.clear.into(),
            induced_element: self.induced,
        })
    }
}

fn requirement(kind: ReactionKind, requires: &[Element]) -> LoadResult<ReactionRequirement> {
    if !(2..=3).contains(&requires.len()) {
        anyhow::bail!(
            "{} requires {} elements, expected 2 or 3",
            kind,
            requires.len()
        );
    }
    let mask: ElementMask = requires.iter().copied().collect();
    match (requires, mask.count() as usize) {
        ([first, _], 1) => Ok(ReactionRequirement::RepeatedApplication(*first)),
        (_, distinct) if distinct == requires.len() => Ok(ReactionRequirement::Elements(mask)),
        _ => anyhow::bail!("{} repeats an element in {:?}", kind, requires),
    }
}

/// Reaction table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionFile {
    pub reactions: Vec<ReactionSpec>,
}

/// Loader for the reaction table from RON files.
pub struct ReactionLoader;

impl ReactionLoader {
    /// Load a reaction table from a RON file.
    ///
    /// Rows are re-sorted by requirement size, so file order only breaks ties.
    pub fn load(path: &Path) -> LoadResult<ReactionTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid reaction table {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ReactionTable> {
        let file: ReactionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse reaction table RON: {}", e))?;

        let definitions = file
            .reactions
            .into_iter()
            .map(ReactionSpec::into_definition)
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(ReactionTable::new(definitions))
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{MatchContext, default_definitions};

    use super::*;

    #[test]
    fn repeated_element_means_repeated_application() {
        let table = ReactionLoader::parse(
            r#"(
                reactions: [
                    (kind: Stabilize, requires: [Geo, Geo], description: "Shield.", clear: Only([Geo])),
                ],
            )"#,
        )
        .unwrap();

        let stabilize = table.iter().next().unwrap();
        assert_eq!(
            stabilize.requirement,
            ReactionRequirement::RepeatedApplication(Element::Geo)
        );
        assert_eq!(stabilize.clear, ClearRule::Only(ElementMask::GEO));
        assert_eq!(stabilize.damage_multiplier, 1.0);
    }

    #[test]
    fn larger_requirements_move_ahead() {
        let table = ReactionLoader::parse(
            r#"(
                reactions: [
                    (kind: ElectroCharged, requires: [Electro, Hydro], description: "", clear: Nothing),
                    (kind: Thunderstorm, requires: [Anemo, Hydro, Electro], description: "", induced: Some(Electro)),
                ],
            )"#,
        )
        .unwrap();

        let union = MatchContext::new(
            Element::Anemo.mask() | Element::Hydro.mask(),
            Element::Electro,
        );
        assert_eq!(table.find(&union).unwrap().kind, ReactionKind::Thunderstorm);
    }

    #[test]
    fn malformed_requirements_are_rejected() {
        let empty = ReactionLoader::parse(
            r#"(reactions: [(kind: Melt, requires: [], description: "")])"#,
        );
        assert!(empty.is_err());

        let single = ReactionLoader::parse(
            r#"(reactions: [(kind: Melt, requires: [Pyro], multiplier: 1.5, description: "")])"#,
        );
        assert!(single.unwrap_err().to_string().contains("expected 2 or 3"));

        let four = ReactionLoader::parse(
            r#"(reactions: [(kind: Swirl, requires: [Anemo, Pyro, Hydro, Cryo], description: "")])"#,
        );
        assert!(four.unwrap_err().to_string().contains("expected 2 or 3"));

        let repeated = ReactionLoader::parse(
            r#"(reactions: [(kind: Melt, requires: [Pyro, Pyro, Cryo], description: "")])"#,
        );
        assert!(repeated.unwrap_err().to_string().contains("repeats"));
    }

    #[test]
    fn shipped_table_matches_the_builtin_one() {
        let shipped = ReactionLoader::parse(include_str!("../../../../../data/reactions.ron"))
            .unwrap();
        assert_eq!(shipped, ReactionTable::new(default_definitions()));
    }
}
