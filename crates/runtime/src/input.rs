//! Raw form input to commands.
//!
//! Front ends hand over whatever the player typed. Malformed fields never fail:
//! they fall back to documented defaults so the encounter can always continue.

use std::str::FromStr;

use combat_core::{BaseDamageSpec, Command, Element, EntityId};

/// Text fields of an attack form.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttackInput<'a> {
    /// Element name such as `"Pyro"`. Empty uses the actor's own element.
    pub element: &'a str,
    /// Explicit base damage. Takes precedence over dice when non-empty.
    pub damage_override: &'a str,
    pub dice_faces: &'a str,
    pub dice_count: &'a str,
}

impl AttackInput<'_> {
    pub fn to_command(&self, actor: EntityId, target: EntityId) -> Command {
        Command::Attack {
            actor,
            target,
            element: parse_element(self.element),
            damage: parse_damage(self.damage_override, self.dice_faces, self.dice_count),
        }
    }
}

/// Unknown names read as no element.
pub fn parse_element(text: &str) -> Option<Element> {
    Element::from_str(text.trim()).ok()
}

/// Resolves the damage fields.
///
/// - a non-empty override wins; anything non-numeric counts as 0
/// - otherwise dice: a missing or invalid count is 1
/// - missing, invalid or zero faces use the default base damage
pub fn parse_damage(damage_override: &str, dice_faces: &str, dice_count: &str) -> BaseDamageSpec {
    let damage_override = damage_override.trim();
    if !damage_override.is_empty() {
        let value = damage_override
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0);
        return BaseDamageSpec::Fixed(value);
    }

    let Ok(faces) = dice_faces.trim().parse::<u32>() else {
        return BaseDamageSpec::Default;
    };
    let count = dice_count.trim().parse::<u32>().unwrap_or(1);
    BaseDamageSpec::dice(faces, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_dice() {
        assert_eq!(parse_damage("42", "6", "3"), BaseDamageSpec::Fixed(42.0));
        assert_eq!(parse_damage(" 7.5 ", "", ""), BaseDamageSpec::Fixed(7.5));
    }

    #[test]
    fn garbage_override_counts_as_zero() {
        assert_eq!(parse_damage("lots", "6", "1"), BaseDamageSpec::Fixed(0.0));
        assert_eq!(parse_damage("inf", "", ""), BaseDamageSpec::Fixed(0.0));
    }

    #[test]
    fn dice_defaults() {
        assert_eq!(
            parse_damage("", "6", ""),
            BaseDamageSpec::Dice { faces: 6, count: 1 }
        );
        assert_eq!(
            parse_damage("", "6", "x"),
            BaseDamageSpec::Dice { faces: 6, count: 1 }
        );
        assert_eq!(
            parse_damage("", "8", "3"),
            BaseDamageSpec::Dice { faces: 8, count: 3 }
        );
        assert_eq!(parse_damage("", "", "3"), BaseDamageSpec::Default);
        assert_eq!(parse_damage("", "0", "3"), BaseDamageSpec::Default);
        assert_eq!(parse_damage("", "d6", "3"), BaseDamageSpec::Default);
    }

    #[test]
    fn element_names() {
        assert_eq!(parse_element("Hydro"), Some(Element::Hydro));
        assert_eq!(parse_element(" Anemo "), Some(Element::Anemo));
        assert_eq!(parse_element(""), None);
        assert_eq!(parse_element("Void"), None);
    }

    #[test]
    fn form_becomes_attack() {
        let input = AttackInput {
            element: "Cryo",
            damage_override: "",
            dice_faces: "4",
            dice_count: "2",
        };
        assert_eq!(
            input.to_command(EntityId(1), EntityId(3)),
            Command::Attack {
                actor: EntityId(1),
                target: EntityId(3),
                element: Some(Element::Cryo),
                damage: BaseDamageSpec::Dice { faces: 4, count: 2 },
            }
        );
    }
}
