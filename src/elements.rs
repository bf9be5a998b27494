// 🌳 Five Elements - Generation and restraint cycles
// Every score in the system reduces to relations on these two cycles

use serde::{Deserialize, Serialize};

// ============================================================================
// ELEMENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// Canonical element order. Tally iteration and tie-breaking follow this
/// order so results are reproducible.
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }

    /// Chinese label, used in reports and CSV dictionaries
    pub fn han_str(&self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// Parse either the English or the Chinese label
    pub fn parse(s: &str) -> Option<Element> {
        match s.trim() {
            "Wood" | "wood" | "木" => Some(Element::Wood),
            "Fire" | "fire" | "火" => Some(Element::Fire),
            "Earth" | "earth" | "土" => Some(Element::Earth),
            "Metal" | "metal" | "金" => Some(Element::Metal),
            "Water" | "water" | "水" => Some(Element::Water),
            _ => None,
        }
    }

    /// The element this one generates (Wood→Fire→Earth→Metal→Water→Wood)
    pub fn generates(&self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one restrains (Wood⊣Earth, Fire⊣Metal, Earth⊣Water,
    /// Metal⊣Wood, Water⊣Fire)
    pub fn restrains(&self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Fire => Element::Metal,
            Element::Earth => Element::Water,
            Element::Metal => Element::Wood,
            Element::Water => Element::Fire,
        }
    }

    /// Cycle predecessor: the element that generates this one.
    /// Used when recommending a replenishment element for a weak tally.
    pub fn generated_by(&self) -> Element {
        match self {
            Element::Wood => Element::Water,
            Element::Fire => Element::Wood,
            Element::Earth => Element::Fire,
            Element::Metal => Element::Earth,
            Element::Water => Element::Metal,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ORDERED-PAIR RELATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementRelation {
    /// a generates b
    Generates,

    /// b generates a
    IsGeneratedBy,

    /// a restrains b
    Restrains,

    /// b restrains a
    IsRestrainedBy,

    /// a == b; the two cycles cover every other ordered pair
    Neutral,
}

impl ElementRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementRelation::Generates => "generates",
            ElementRelation::IsGeneratedBy => "is generated by",
            ElementRelation::Restrains => "restrains",
            ElementRelation::IsRestrainedBy => "is restrained by",
            ElementRelation::Neutral => "neutral",
        }
    }
}

/// Relation of ordered pair (a, b) under the two cycles
pub fn relation(a: Element, b: Element) -> ElementRelation {
    if a.generates() == b {
        ElementRelation::Generates
    } else if a.restrains() == b {
        ElementRelation::Restrains
    } else if b.generates() == a {
        ElementRelation::IsGeneratedBy
    } else if b.restrains() == a {
        ElementRelation::IsRestrainedBy
    } else {
        ElementRelation::Neutral
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_cycle_closes() {
        let mut e = Element::Wood;
        for _ in 0..5 {
            e = e.generates();
        }
        assert_eq!(e, Element::Wood);
    }

    #[test]
    fn test_predecessor_inverts_generation() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.generates().generated_by(), e);
        }
    }

    #[test]
    fn test_every_distinct_pair_is_covered() {
        // Exactly one non-neutral relation holds for every a != b
        for a in ALL_ELEMENTS {
            for b in ALL_ELEMENTS {
                let r = relation(a, b);
                if a == b {
                    assert_eq!(r, ElementRelation::Neutral);
                } else {
                    assert_ne!(r, ElementRelation::Neutral, "{} vs {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_relation_pairs_mirror() {
        for a in ALL_ELEMENTS {
            for b in ALL_ELEMENTS {
                let forward = relation(a, b);
                let backward = relation(b, a);
                match forward {
                    ElementRelation::Generates => {
                        assert_eq!(backward, ElementRelation::IsGeneratedBy)
                    }
                    ElementRelation::Restrains => {
                        assert_eq!(backward, ElementRelation::IsRestrainedBy)
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(Element::parse("金"), Some(Element::Metal));
        assert_eq!(Element::parse("water"), Some(Element::Water));
        assert_eq!(Element::parse("plasma"), None);
    }
}
