//! Built-in reaction table.

use crate::state::{Element, ElementMask};

use super::table::{ClearRule, ReactionDefinition, ReactionKind, ReactionRequirement};

fn define(
    kind: ReactionKind,
    elements: &[Element],
    damage_multiplier: f64,
    description: &str,
    clear: ClearRule,
    induced_element: Option<Element>,
) -> ReactionDefinition {
    ReactionDefinition {
        kind,
        requirement: ReactionRequirement::Elements(elements.iter().copied().collect()),
        damage_multiplier,
        description: description.to_owned(),
        clear,
        induced_element,
    }
}

/// The 24 standard reactions in declaration order.
pub fn default_definitions() -> Vec<ReactionDefinition> {
    use ClearRule::{All, Nothing, Only};
    use Element::{Anemo, Cryo, Dendro, Electro, Geo, Hydro, Pyro};
    use ReactionKind as K;

    let swirl = |element: Element| {
        define(
            K::Swirl,
            &[Anemo, element],
            1.0,
            &format!("Applies Swirled {element} to all targets. Removes Anemo element."),
            Only(ElementMask::ANEMO),
            None,
        )
    };
    let crystallize = |element: Element| {
        define(
            K::Crystallize,
            &[Geo, element],
            1.0,
            &format!(
                "Creates a shield granting immunity to {element} for 1 turn. Removes ALL elements."
            ),
            All,
            None,
        )
    };

    vec![
        define(
            K::Thunderstorm,
            &[Anemo, Hydro, Electro],
            1.0,
            "Strikes all targets with lightning, dealing 40% of caster's max HP.",
            All,
            Some(Electro),
        ),
        define(
            K::ToxicSpores,
            &[Dendro, Hydro, Cryo],
            1.0,
            "3 Spores will emerge; after 3 turns, target takes 5% of Max HP as damage.",
            All,
            None,
        ),
        define(
            K::Melt,
            &[Pyro, Cryo],
            1.5,
            "Removes ALL applied elements.",
            All,
            None,
        ),
        define(
            K::Vaporize,
            &[Hydro, Pyro],
            1.5,
            "Removes ALL applied elements.",
            All,
            None,
        ),
        define(
            K::Freeze,
            &[Cryo, Hydro],
            0.0,
            "Freezes target for 1 turn.",
            Nothing,
            None,
        ),
        define(
            K::Superconduct,
            &[Electro, Cryo],
            1.0,
            "Reduces target defense by 50% for 1 turn. Removes ALL applied elements.",
            All,
            None,
        ),
        define(
            K::ElectroCharged,
            &[Electro, Hydro],
            1.0,
            "Applies damage to ALL targets.",
            Nothing,
            Some(Electro),
        ),
        swirl(Pyro),
        swirl(Cryo),
        swirl(Hydro),
        swirl(Electro),
        crystallize(Pyro),
        crystallize(Cryo),
        crystallize(Hydro),
        crystallize(Electro),
        ReactionDefinition {
            kind: K::Stabilize,
            requirement: ReactionRequirement::RepeatedApplication(Geo),
            damage_multiplier: 1.0,
            description:
                "Creates a shield reducing incoming damage by 30% for 2 turns. Removes Geo elements."
                    .to_owned(),
            clear: Only(ElementMask::GEO),
            induced_element: None,
        },
        define(
            K::Petrify,
            &[Hydro, Geo],
            0.0,
            "Petrifies target for 1 turn.",
            Only(ElementMask::GEO),
            None,
        ),
        define(
            K::Overload,
            &[Electro, Pyro],
            1.0,
            "Disarms target for 1 turn. Removes ALL elements.",
            All,
            None,
        ),
        define(
            K::Bloom,
            &[Dendro, Hydro],
            0.0,
            "Heals target by 25% of max health.",
            All,
            None,
        ),
        define(
            K::Burning,
            &[Dendro, Pyro],
            1.0,
            "Applies 3% max HP DoT for 3 rounds.",
            All,
            None,
        ),
        define(
            K::HealingWinds,
            &[Dendro, Anemo],
            0.0,
            "Heals all party members by 20% max HP.",
            All,
            None,
        ),
        define(
            K::Corrosion,
            &[Electro, Dendro],
            1.0,
            "Applies DoT equal to 5% max HP for 2 turns.",
            All,
            None,
        ),
        define(
            K::Sandstorm,
            &[Anemo, Geo],
            1.0,
            "Targets roll at disadvantage for 1 turn. Removes ALL applied elements.",
            All,
            None,
        ),
        define(
            K::Frostbite,
            &[Cryo, Dendro],
            1.0,
            "Applies DoT equal to 3% max HP for 3 turns and reduces movement speed by 50%.",
            All,
            None,
        ),
    ]
}
