// ✍️ Narrative Composer - Offline template-based name description
// Pure decoration: consumes a name and its character records, returns prose.
// Randomized phrase selection goes through the injected RNG so callers can
// seed it for stable output.

use crate::chars::{CharacterDictionary, Gender};
use crate::elements::Element;
use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// PHRASE POOLS
// ============================================================================

/// One classical image per weak spot in the template, keyed by the first
/// character's element
fn element_motto(element: Element) -> &'static [&'static str] {
    match element {
        Element::Wood => &[
            "a young forest reaching for light",
            "bamboo that bends without breaking",
            "new leaves urging on the old",
        ],
        Element::Fire => &[
            "a sunrise over the river",
            "a steady lamp in a long night",
            "summer sky without clouds",
        ],
        Element::Earth => &[
            "a mountain that holds its ground",
            "broad fields carrying every harvest",
            "a wall of old stone, patient and sure",
        ],
        Element::Metal => &[
            "a blade ground bright on the whetstone",
            "gold washed clean by the river",
            "a bell whose note carries far",
        ],
        Element::Water => &[
            "the sea receiving a hundred rivers",
            "a spring running clear over stone",
            "deep water moving without hurry",
        ],
    }
}

const MOODS: &[&str] = &[
    "a clear breeze",
    "high mountains and flowing water",
    "the first sun of morning",
    "a sky full of stars",
    "early spring in full motion",
];

const FUTURES: &[&str] = &[
    "a bright road ahead",
    "ambitions that reach far",
    "both virtue and talent",
    "peace and quiet joy",
    "uncommon accomplishment",
];

const QUALITIES: &[&str] = &["scholarly", "generous", "quick-spirited", "steady", "fresh"];

// ============================================================================
// COMPOSER
// ============================================================================

pub struct NarrativeComposer<'a> {
    dict: &'a CharacterDictionary,
}

impl<'a> NarrativeComposer<'a> {
    pub fn new(dict: &'a CharacterDictionary) -> Self {
        NarrativeComposer { dict }
    }

    /// Compose a short description for a finished candidate. Never fails;
    /// unknown characters fall back to a generic gloss.
    pub fn describe(&self, surname: &str, given: &str, gender: Gender, rng: &mut impl Rng) -> String {
        let full_name = format!("{}{}", surname, given);
        let chars: Vec<char> = given.chars().collect();

        let gloss = |ch: char| -> String {
            match self.dict.lookup(ch) {
                Some(r) => format!("'{}' carries the sense of {}", ch, r.meaning),
                None => format!("'{}' carries its own quiet promise", ch),
            }
        };
        let first_gloss = chars.first().map(|&c| gloss(c)).unwrap_or_default();
        let second_gloss = chars.get(1).map(|&c| gloss(c)).unwrap_or_default();

        let lead_element = chars
            .first()
            .and_then(|&c| self.dict.lookup(c))
            .map(|r| r.element)
            .unwrap_or(Element::Wood);

        let motto = *element_motto(lead_element)
            .choose(rng)
            .expect("motto pools are non-empty");
        let mood = *MOODS.choose(rng).expect("non-empty");
        let future = *FUTURES.choose(rng).expect("non-empty");
        let quality = *QUALITIES.choose(rng).expect("non-empty");

        let child = match gender {
            Gender::Male => "a son",
            Gender::Female => "a daughter",
        };

        match rng.gen_range(0..3) {
            0 => format!(
                "The name {} reads like {}. {}; {}. Together the two characters \
                 evoke {}, a fitting wish for {} headed toward {}.",
                full_name, motto, first_gloss, second_gloss, mood, child, future
            ),
            1 => format!(
                "{} is a {} name. {}, while {}. The pairing settles into the \
                 image of {}, promising {}.",
                full_name, quality, first_gloss, second_gloss, motto, future
            ),
            _ => format!(
                "In {}, {}; {}. The name holds the feeling of {} and suits {} \
                 expected to grow into {}.",
                full_name, first_gloss, second_gloss, motto, child, future
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_describe_mentions_full_name() {
        let dict = CharacterDictionary::with_defaults();
        let composer = NarrativeComposer::new(&dict);
        let mut rng = StdRng::seed_from_u64(1);

        let text = composer.describe("林", "明轩", Gender::Male, &mut rng);
        assert!(text.contains("林明轩"));
        assert!(!text.is_empty());
    }

    #[test]
    fn test_seeded_output_is_stable() {
        let dict = CharacterDictionary::with_defaults();
        let composer = NarrativeComposer::new(&dict);

        let a = composer.describe("林", "诗雨", Gender::Female, &mut StdRng::seed_from_u64(8));
        let b = composer.describe("林", "诗雨", Gender::Female, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_characters_still_produce_text() {
        let dict = CharacterDictionary::with_defaults();
        let composer = NarrativeComposer::new(&dict);
        let mut rng = StdRng::seed_from_u64(2);

        let text = composer.describe("林", "ΩΨ", Gender::Male, &mut rng);
        assert!(text.contains('Ω'));
    }
}
