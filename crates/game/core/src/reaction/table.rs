//! Reaction definitions and priority matching.

use core::cmp::Reverse;

use strum::{Display, EnumIter, EnumString};

use crate::state::{Element, ElementMask};

/// Closed set of reaction behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionKind {
    Thunderstorm,
    #[strum(serialize = "Toxic Spores")]
    ToxicSpores,
    Melt,
    Vaporize,
    Freeze,
    Superconduct,
    #[strum(serialize = "Electro-charged")]
    ElectroCharged,
    Swirl,
    Crystallize,
    Stabilize,
    Petrify,
    Overload,
    Bloom,
    Burning,
    #[strum(serialize = "Healing Winds")]
    HealingWinds,
    Corrosion,
    Sandstorm,
    Frostbite,
}

/// What a target must carry for a reaction to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionRequirement {
    /// Every element in the mask is present after the attack lands.
    Elements(ElementMask),
    /// The target already carried `element` and is hit by it again.
    RepeatedApplication(Element),
}

impl ReactionRequirement {
    /// Number of element applications the requirement names. Larger is more specific.
    pub fn size(&self) -> u32 {
        match self {
            Self::Elements(mask) => mask.count(),
            Self::RepeatedApplication(_) => 2,
        }
    }

    pub fn is_satisfied(&self, context: &MatchContext) -> bool {
        match *self {
            Self::Elements(required) => context.union().contains(required),
            Self::RepeatedApplication(element) => {
                context.attack == element && context.prior.has(element)
            }
        }
    }
}

/// Which tags a reaction removes from its target afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClearRule {
    /// Both applied and swirled tags.
    All,
    /// Only these tags, from both namespaces.
    Only(ElementMask),
    Nothing,
}

/// One row of the reaction table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionDefinition {
    pub kind: ReactionKind,
    pub requirement: ReactionRequirement,
    pub damage_multiplier: f64,
    pub description: String,
    pub clear: ClearRule,
    /// Element flagged on damage the reaction deals instead of the attack's own.
    pub induced_element: Option<Element>,
}

/// Target tags seen by the matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchContext {
    /// Applied and swirled tags before the attack.
    pub prior: ElementMask,
    pub attack: Element,
}

impl MatchContext {
    pub fn new(prior: ElementMask, attack: Element) -> Self {
        Self { prior, attack }
    }

    pub fn union(&self) -> ElementMask {
        self.prior | self.attack.mask()
    }
}

/// Priority-ordered reaction list.
///
/// Definitions are kept sorted by requirement size, largest first, with
/// declaration order breaking ties. The first satisfied definition wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReactionTable {
    definitions: Vec<ReactionDefinition>,
}

impl ReactionTable {
    pub fn new(mut definitions: Vec<ReactionDefinition>) -> Self {
        definitions.sort_by_key(|definition| Reverse(definition.requirement.size()));
        Self { definitions }
    }

    pub fn find(&self, context: &MatchContext) -> Option<&ReactionDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.requirement.is_satisfied(context))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReactionDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ReactionTable {
    fn default() -> Self {
        Self::new(super::defaults::default_definitions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(prior: &[Element], attack: Element) -> Option<ReactionKind> {
        let context = MatchContext::new(prior.iter().copied().collect(), attack);
        ReactionTable::default()
            .find(&context)
            .map(|definition| definition.kind)
    }

    #[test]
    fn triple_reactions_win_over_their_subsets() {
        assert_eq!(
            find(&[Element::Anemo, Element::Hydro], Element::Electro),
            Some(ReactionKind::Thunderstorm)
        );
        assert_eq!(
            find(&[Element::Hydro, Element::Electro], Element::Anemo),
            Some(ReactionKind::Thunderstorm)
        );
        assert_eq!(
            find(&[Element::Dendro, Element::Cryo], Element::Hydro),
            Some(ReactionKind::ToxicSpores)
        );
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // Hydro + Geo is both Crystallize and Petrify; Crystallize is listed first.
        assert_eq!(
            find(&[Element::Hydro], Element::Geo),
            Some(ReactionKind::Crystallize)
        );
        assert_eq!(
            find(&[Element::Hydro], Element::Pyro),
            Some(ReactionKind::Vaporize)
        );
    }

    #[test]
    fn single_tag_never_reacts() {
        assert_eq!(find(&[], Element::Geo), None);
        assert_eq!(find(&[], Element::Hydro), None);
        assert_eq!(find(&[Element::Pyro], Element::Pyro), None);
    }

    #[test]
    fn geo_on_geo_stabilizes() {
        assert_eq!(
            find(&[Element::Geo], Element::Geo),
            Some(ReactionKind::Stabilize)
        );
    }

    #[test]
    fn sorting_is_stable_within_a_size() {
        let definition = |kind, mask| ReactionDefinition {
            kind,
            requirement: ReactionRequirement::Elements(mask),
            damage_multiplier: 1.0,
            description: String::new(),
            clear: ClearRule::Nothing,
            induced_element: None,
        };
        let table = ReactionTable::new(vec![
            definition(ReactionKind::Melt, ElementMask::PYRO | ElementMask::CRYO),
            definition(
                ReactionKind::Thunderstorm,
                ElementMask::ANEMO | ElementMask::HYDRO | ElementMask::ELECTRO,
            ),
            definition(ReactionKind::Burning, ElementMask::PYRO | ElementMask::DENDRO),
        ]);

        let kinds: Vec<_> = table.iter().map(|definition| definition.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ReactionKind::Thunderstorm,
                ReactionKind::Melt,
                ReactionKind::Burning
            ]
        );
    }

    #[test]
    fn reaction_names_match_display_text() {
        assert_eq!(ReactionKind::ElectroCharged.to_string(), "Electro-charged");
        assert_eq!(
            "Healing Winds".parse::<ReactionKind>(),
            Ok(ReactionKind::HealingWinds)
        );
    }
}
