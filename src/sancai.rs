// ⚖️ Elemental Triad Analyzer - Heaven/Person/Earth compatibility
// Scores the two adjacent relations of the triad on the generation and
// restraint cycles

use crate::elements::{relation, Element, ElementRelation};
use serde::{Deserialize, Serialize};

// ============================================================================
// TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriadTier {
    Excellent, // >= 25
    Good,      // >= 20
    Moderate,  // >= 15
    Average,   // >= 10
    Poor,      // < 10
    /// One or more triad elements were missing; scored zero, never an error
    Incomplete,
}

impl TriadTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriadTier::Excellent => "excellent",
            TriadTier::Good => "good",
            TriadTier::Moderate => "moderate",
            TriadTier::Average => "average",
            TriadTier::Poor => "poor",
            TriadTier::Incomplete => "incomplete",
        }
    }

    fn from_score(score: u32) -> Self {
        if score >= 25 {
            TriadTier::Excellent
        } else if score >= 20 {
            TriadTier::Good
        } else if score >= 15 {
            TriadTier::Moderate
        } else if score >= 10 {
            TriadTier::Average
        } else {
            TriadTier::Poor
        }
    }
}

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriadVerdict {
    /// Heaven→Person relation; None when the input was incomplete
    pub heaven_person: Option<ElementRelation>,

    /// Person→Earth relation; None when the input was incomplete
    pub person_earth: Option<ElementRelation>,

    /// Sum of both relation scores, 0-30
    pub score: u32,

    pub tier: TriadTier,
}

impl TriadVerdict {
    fn incomplete() -> Self {
        TriadVerdict {
            heaven_person: None,
            person_earth: None,
            score: 0,
            tier: TriadTier::Incomplete,
        }
    }
}

/// Score of one ordered relation: generating the next position is best,
/// being drained by it is weak, restraint either way scores nothing.
fn relation_score(r: ElementRelation) -> u32 {
    match r {
        ElementRelation::Generates => 15,
        ElementRelation::IsGeneratedBy => 5,
        ElementRelation::Neutral => 10,
        ElementRelation::Restrains | ElementRelation::IsRestrainedBy => 0,
    }
}

/// Analyze a triad where any element may be missing. A missing element
/// degrades to a zero-score incomplete verdict.
pub fn analyze(
    heaven: Option<Element>,
    person: Option<Element>,
    earth: Option<Element>,
) -> TriadVerdict {
    let (heaven, person, earth) = match (heaven, person, earth) {
        (Some(h), Some(p), Some(e)) => (h, p, e),
        _ => return TriadVerdict::incomplete(),
    };
    analyze_elements(heaven, person, earth)
}

/// Analyze a fully specified triad
pub fn analyze_elements(heaven: Element, person: Element, earth: Element) -> TriadVerdict {
    let heaven_person = relation(heaven, person);
    let person_earth = relation(person, earth);
    let score = relation_score(heaven_person) + relation_score(person_earth);

    TriadVerdict {
        heaven_person: Some(heaven_person),
        person_earth: Some(person_earth),
        score,
        tier: TriadTier::from_score(score),
    }
}

// ============================================================================
// TESTS
// ============================================================================
