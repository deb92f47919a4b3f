//! Elemental tags and the two set representations built on them.
//!
//! [`ElementMask`] is the unordered bit set used for reaction matching.
//! [`ElementList`] keeps insertion order and rejects duplicates; entities
//! store their applied and swirled tags in it because several reactions
//! iterate tags in the order they landed.

use core::fmt;

use arrayvec::ArrayVec;
use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Number of distinct elements.
pub const ELEMENT_COUNT: usize = 7;

/// The closed set of elemental tags.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Pyro,
    Cryo,
    Hydro,
    Electro,
    Dendro,
    Geo,
    Anemo,
}

impl Element {
    /// Returns the single-bit mask for this element.
    pub const fn mask(self) -> ElementMask {
        match self {
            Self::Pyro => ElementMask::PYRO,
            Self::Cryo => ElementMask::CRYO,
            Self::Hydro => ElementMask::HYDRO,
            Self::Electro => ElementMask::ELECTRO,
            Self::Dendro => ElementMask::DENDRO,
            Self::Geo => ElementMask::GEO,
            Self::Anemo => ElementMask::ANEMO,
        }
    }
}

bitflags! {
    /// Unordered set of elements.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ElementMask: u8 {
        const PYRO = 1 << 0;
        const CRYO = 1 << 1;
        const HYDRO = 1 << 2;
        const ELECTRO = 1 << 3;
        const DENDRO = 1 << 4;
        const GEO = 1 << 5;
        const ANEMO = 1 << 6;
    }
}

impl ElementMask {
    /// Returns true if `element` is in the set.
    pub const fn has(self, element: Element) -> bool {
        self.contains(element.mask())
    }

    /// Number of elements in the set.
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

impl FromIterator<Element> for ElementMask {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ElementMask::empty(), |mask, element| mask | element.mask())
    }
}

impl From<Element> for ElementMask {
    fn from(element: Element) -> Self {
        element.mask()
    }
}

/// Insertion-ordered, duplicate-free element collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementList {
    elements: ArrayVec<Element, ELEMENT_COUNT>,
}

impl ElementList {
    pub fn new() -> Self {
        Self {
            elements: ArrayVec::new(),
        }
    }

    /// Appends `element` unless already present. Returns true if it was added.
    pub fn insert(&mut self, element: Element) -> bool {
        if self.contains(element) {
            return false;
        }
        self.elements.try_push(element).is_ok()
    }

    pub fn contains(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    /// Removes every element in `mask`, keeping the order of the rest.
    /// Returns true if anything was removed.
    pub fn remove_all(&mut self, mask: ElementMask) -> bool {
        let before = self.elements.len();
        self.elements.retain(|element| !mask.has(*element));
        self.elements.len() != before
    }

    /// Empties the list. Returns true if it held anything.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.elements.is_empty();
        self.elements.clear();
        had_any
    }

    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        self.elements.iter().copied()
    }

    pub fn mask(&self) -> ElementMask {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for ElementList {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut list = ElementList::new();
        for element in iter {
            list.insert(element);
        }
        list
    }
}

impl fmt::Display for ElementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, element) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn element_names_round_trip_through_strings() {
        for element in Element::iter() {
            let parsed: Element = element.to_string().parse().unwrap();
            assert_eq!(parsed, element);
        }
        assert!("Plasma".parse::<Element>().is_err());
    }

    #[test]
    fn masks_are_distinct_bits() {
        let all: ElementMask = Element::iter().collect();
        assert_eq!(all.count(), ELEMENT_COUNT as u32);
        assert_eq!(all, ElementMask::all());
    }

    #[test]
    fn list_keeps_insertion_order_without_duplicates() {
        let mut list = ElementList::new();
        assert!(list.insert(Element::Hydro));
        assert!(list.insert(Element::Pyro));
        assert!(!list.insert(Element::Hydro));

        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![Element::Hydro, Element::Pyro]
        );
        assert_eq!(list.to_string(), "[Hydro, Pyro]");
    }

    #[test]
    fn remove_all_keeps_remaining_order() {
        let mut list: ElementList = [Element::Anemo, Element::Pyro, Element::Geo, Element::Cryo]
            .into_iter()
            .collect();

        assert!(list.remove_all(ElementMask::ANEMO | ElementMask::GEO));
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![Element::Pyro, Element::Cryo]
        );
        assert!(!list.remove_all(ElementMask::DENDRO));
    }
}
