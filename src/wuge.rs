// 🔢 Five-Grid Calculator - Heaven/Person/Earth/Total/Outer grids
// Stroke-count numerology over a (surname, given name) pair

use crate::chars::CharacterDictionary;
use crate::elements::Element;
use serde::{Deserialize, Serialize};

// ============================================================================
// GRID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub value: u32,
    pub element: Element,
}

impl Grid {
    fn from_value(value: u32) -> Self {
        Grid {
            value,
            element: element_of_number(value),
        }
    }
}

/// Element of a grid number: last digit (0 reads as 10), then
/// 1-2 Wood, 3-4 Fire, 5-6 Earth, 7-8 Metal, 9-10 Water.
pub fn element_of_number(value: u32) -> Element {
    let last = match value % 10 {
        0 => 10,
        d => d,
    };
    match last {
        1 | 2 => Element::Wood,
        3 | 4 => Element::Fire,
        5 | 6 => Element::Earth,
        7 | 8 => Element::Metal,
        _ => Element::Water,
    }
}

// ============================================================================
// PROFILE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiveGridProfile {
    pub heaven: Grid,
    pub person: Grid,
    pub earth: Grid,
    pub total: Grid,
    pub outer: Grid,
}

impl FiveGridProfile {
    /// The heaven/person/earth elements, in that order
    pub fn triad(&self) -> (Element, Element, Element) {
        (self.heaven.element, self.person.element, self.earth.element)
    }

    /// Convenience label like "MetalWoodWater"
    pub fn triad_label(&self) -> String {
        format!(
            "{}{}{}",
            self.heaven.element, self.person.element, self.earth.element
        )
    }

    /// Grids in report order
    pub fn grids(&self) -> [(&'static str, Grid); 5] {
        [
            ("heaven", self.heaven),
            ("person", self.person),
            ("earth", self.earth),
            ("total", self.total),
            ("outer", self.outer),
        ]
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Pure calculator over an injected dictionary. Unknown characters fall back
/// to [`crate::chars::FALLBACK_STROKES`].
pub struct FiveGridCalculator<'a> {
    dict: &'a CharacterDictionary,
}

impl<'a> FiveGridCalculator<'a> {
    pub fn new(dict: &'a CharacterDictionary) -> Self {
        FiveGridCalculator { dict }
    }

    /// Compute the profile for a surname (1-2 characters) and given name
    /// (1-2 characters).
    pub fn profile(&self, surname: &str, given: &str) -> FiveGridProfile {
        let surname_strokes: Vec<u32> = surname
            .chars()
            .map(|c| self.dict.strokes_or_fallback(c))
            .collect();
        let given_strokes: Vec<u32> = given
            .chars()
            .map(|c| self.dict.strokes_or_fallback(c))
            .collect();
        profile_from_strokes(&surname_strokes, &given_strokes)
    }
}

/// Grid arithmetic over resolved stroke counts.
///
/// - heaven: single-character surname adds 1, compound surname sums
/// - person: last surname stroke + first given stroke
/// - earth: single-character given name adds 1, two-character sums
/// - total: sum of everything
/// - outer: 2 for 1+1, total-person for 2+2, total-person+1 otherwise
pub fn profile_from_strokes(surname: &[u32], given: &[u32]) -> FiveGridProfile {
    let surname_sum: u32 = surname.iter().sum();
    let given_sum: u32 = given.iter().sum();

    let heaven = if surname.len() == 1 {
        surname[0] + 1
    } else {
        surname_sum
    };

    let person = surname.last().copied().unwrap_or(0) + given.first().copied().unwrap_or(0);

    let earth = if given.len() == 1 {
        given[0] + 1
    } else {
        given_sum
    };

    let total = surname_sum + given_sum;

    let outer = if surname.len() == 1 && given.len() == 1 {
        2
    } else if surname.len() == 2 && given.len() == 2 {
        total - person
    } else {
        total - person + 1
    };

    FiveGridProfile {
        heaven: Grid::from_value(heaven),
        person: Grid::from_value(person),
        earth: Grid::from_value(earth),
        total: Grid::from_value(total),
        outer: Grid::from_value(outer),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_surname_double_given() {
        // surname [7], given [6, 4]
        let p = profile_from_strokes(&[7], &[6, 4]);
        assert_eq!(p.heaven.value, 8);
        assert_eq!(p.person.value, 13);
        assert_eq!(p.earth.value, 10);
        assert_eq!(p.total.value, 17);
        assert_eq!(p.outer.value, 5); // 17 - 13 + 1
    }

    #[test]
    fn test_single_single_outer_is_two() {
        let p = profile_from_strokes(&[7], &[6]);
        assert_eq!(p.heaven.value, 8);
        assert_eq!(p.person.value, 13);
        assert_eq!(p.earth.value, 7);
        assert_eq!(p.total.value, 13);
        assert_eq!(p.outer.value, 2);
    }

    #[test]
    fn test_compound_surname_double_given() {
        let p = profile_from_strokes(&[5, 10], &[22, 9]);
        assert_eq!(p.heaven.value, 15);
        assert_eq!(p.person.value, 32); // 10 + 22
        assert_eq!(p.earth.value, 31);
        assert_eq!(p.total.value, 46);
        assert_eq!(p.outer.value, 14); // 46 - 32
    }

    #[test]
    fn test_total_reconciles_with_stroke_sums() {
        let cases: [(&[u32], &[u32]); 4] =
            [(&[7], &[6, 4]), (&[7], &[6]), (&[5, 10], &[22, 9]), (&[5, 10], &[3])];
        for (s, g) in cases {
            let p = profile_from_strokes(s, g);
            let expected: u32 = s.iter().sum::<u32>() + g.iter().sum::<u32>();
            assert_eq!(p.total.value, expected);
        }
    }

    #[test]
    fn test_element_of_number() {
        assert_eq!(element_of_number(1), Element::Wood);
        assert_eq!(element_of_number(12), Element::Wood);
        assert_eq!(element_of_number(13), Element::Fire);
        assert_eq!(element_of_number(25), Element::Earth);
        assert_eq!(element_of_number(17), Element::Metal);
        assert_eq!(element_of_number(9), Element::Water);
        // last digit 0 reads as 10 -> Water
        assert_eq!(element_of_number(20), Element::Water);
    }

    #[test]
    fn test_dictionary_fallback_strokes() {
        let dict = CharacterDictionary::with_defaults();
        let calc = FiveGridCalculator::new(&dict);
        // 'Ω' is not in the dictionary: both given characters fall back to 6
        let p = calc.profile("林", "ΩΩ");
        assert_eq!(p.earth.value, 12);
        assert_eq!(p.total.value, 8 + 12);
    }
}
