// 🔍 Candidate Search & Ranking Engine - Bounded generate-and-test search
// Filters the character pool, scores (char1, char2) pairs with the four
// component models and returns a ranked, truncated candidate list

use crate::chars::{CharacterDictionary, CharacterRecord, Gender};
use crate::elements::Element;
use crate::luck::NumberLuckTable;
use crate::sancai::{self, TriadVerdict};
use crate::wuge::{FiveGridCalculator, FiveGridProfile};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    /// Surname, 1-2 characters
    pub surname: String,

    pub gender: Gender,

    /// Favorable elements, at most 2, deduplicated on construction.
    /// Two identical elements behave exactly like a single one.
    pub favorable: Vec<Element>,

    /// Maximum number of candidates to return
    pub count: usize,
}

impl NameRequest {
    pub fn new(surname: &str, gender: Gender, count: usize) -> Self {
        NameRequest {
            surname: surname.to_string(),
            gender,
            favorable: Vec::new(),
            count,
        }
    }

    pub fn with_favorable(surname: &str, gender: Gender, count: usize, elements: &[Element]) -> Self {
        let mut favorable = Vec::new();
        for &e in elements {
            if !favorable.contains(&e) {
                favorable.push(e);
            }
        }
        favorable.truncate(2);
        NameRequest {
            surname: surname.to_string(),
            gender,
            favorable,
            count,
        }
    }
}

// ============================================================================
// CANDIDATE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScores {
    /// +8 per auspicious grid, 5 grids
    pub grid_luck: u32,

    /// Elemental triad score, 0-30
    pub triad: u32,

    /// Commonness sum plus distinct-initial bonus, capped at 20
    pub meaning_sound: u32,

    /// Favorable-element match component, 0-10
    pub element_match: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCandidate {
    pub surname: String,
    pub given_name: String,
    pub full_name: String,
    pub composite_score: u32,
    pub scores: ComponentScores,
    pub grids: FiveGridProfile,
    pub triad: TriadVerdict,

    /// Best-effort decoration filled in after ranking; never affects scores
    pub narrative: Option<String>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Search engine over an injected dictionary and luck table.
///
/// The two-phase bounded search trades completeness for guaranteed
/// termination: it will not find every valid pair in a large pool, but it
/// never exceeds its pair budgets.
pub struct NamingEngine<'a> {
    dict: &'a CharacterDictionary,
    luck: &'a NumberLuckTable,

    /// Minimum commonness for a character to enter the pool (default: 3)
    pub min_commonness: u32,

    /// Per-partition sample cap before pairing (default: 80)
    pub sample_cap: usize,

    /// Pair budget for the preferred-first phase (default: 8000)
    pub phase_one_budget: usize,

    /// Pair budget for the fallback phase (default: 16000)
    pub phase_two_budget: usize,

    /// Hard cap on accepted candidates across both phases (default: 200)
    pub candidate_cap: usize,

    /// Acceptance threshold when favorable elements were supplied
    /// (default: 70; the elemental gate already narrows the pool)
    pub threshold_with_elements: u32,

    /// Acceptance threshold without favorable elements (default: 75)
    pub threshold_without: u32,
}

impl<'a> NamingEngine<'a> {
    pub fn new(dict: &'a CharacterDictionary, luck: &'a NumberLuckTable) -> Self {
        NamingEngine {
            dict,
            luck,
            min_commonness: 3,
            sample_cap: 80,
            phase_one_budget: 8_000,
            phase_two_budget: 16_000,
            candidate_cap: 200,
            threshold_with_elements: 70,
            threshold_without: 75,
        }
    }

    /// Run one recommendation request. The RNG only injects pool-order
    /// diversity; with a seeded generator the output is reproducible.
    pub fn recommend(&self, request: &NameRequest, rng: &mut impl Rng) -> Vec<NameCandidate> {
        // Filter: gender suitability and minimum commonness
        let mut pool: Vec<&CharacterRecord> = self
            .dict
            .records()
            .filter(|r| r.gender_use.allows(request.gender))
            .filter(|r| r.commonness >= self.min_commonness)
            .collect();

        // HashMap iteration order is arbitrary; sort before shuffling so a
        // seeded RNG fully determines the pool order
        pool.sort_by_key(|r| r.ch);

        let (mut preferred, mut other): (Vec<_>, Vec<_>) = pool
            .into_iter()
            .partition(|r| request.favorable.contains(&r.element));

        preferred.shuffle(rng);
        other.shuffle(rng);
        preferred.truncate(self.sample_cap);
        other.truncate(self.sample_cap);

        let all: Vec<&CharacterRecord> = preferred.iter().chain(other.iter()).copied().collect();

        let threshold = if request.favorable.is_empty() {
            self.threshold_without
        } else {
            self.threshold_with_elements
        };

        let mut accepted: Vec<NameCandidate> = Vec::new();
        self.run_phase(request, &preferred, &all, self.phase_one_budget, threshold, &mut accepted);

        // Only widen to the non-preferred partition when the first phase
        // came up short of roughly twice the requested count
        if accepted.len() < request.count * 2 {
            self.run_phase(request, &other, &all, self.phase_two_budget, threshold, &mut accepted);
        }

        rank(&mut accepted);
        accepted.truncate(request.count);
        accepted
    }

    /// One bounded pass over first×second pairs
    fn run_phase(
        &self,
        request: &NameRequest,
        first: &[&CharacterRecord],
        second: &[&CharacterRecord],
        budget: usize,
        threshold: u32,
        accepted: &mut Vec<NameCandidate>,
    ) {
        for (c1, c2) in bounded_pairs(first, second, budget) {
            if accepted.len() >= self.candidate_cap {
                return;
            }
            if !element_gate(&request.favorable, c1.element, c2.element) {
                continue;
            }
            let candidate = self.evaluate(&request.surname, c1, c2, &request.favorable);
            if candidate.composite_score >= threshold {
                accepted.push(candidate);
            }
        }
    }

    /// Score one (surname, char pair) combination
    fn evaluate(
        &self,
        surname: &str,
        c1: &CharacterRecord,
        c2: &CharacterRecord,
        favorable: &[Element],
    ) -> NameCandidate {
        let given_name: String = [c1.ch, c2.ch].iter().collect();
        let grids = FiveGridCalculator::new(self.dict).profile(surname, &given_name);

        let grid_luck = grids
            .grids()
            .iter()
            .filter(|(_, g)| self.luck.classify(g.value).is_auspicious())
            .count() as u32
            * 8;

        let (heaven, person, earth) = grids.triad();
        let triad = sancai::analyze_elements(heaven, person, earth);

        let meaning_sound = meaning_sound_score(c1, c2);
        let element_match = element_match_score(favorable, c1.element, c2.element);

        let scores = ComponentScores {
            grid_luck,
            triad: triad.score,
            meaning_sound,
            element_match,
        };
        let composite_score = grid_luck + triad.score + meaning_sound + element_match;

        NameCandidate {
            surname: surname.to_string(),
            full_name: format!("{}{}", surname, given_name),
            given_name,
            composite_score,
            scores,
            grids,
            triad,
            narrative: None,
        }
    }
}

// ============================================================================
// PAIR STREAM
// ============================================================================

/// Centralized bounded pair iterator: the cartesian product, cut off at
/// `budget` pairs, with same-character pairs dropped. Budgets guarantee
/// termination no matter how permissive the pool is.
fn bounded_pairs<'p>(
    first: &'p [&'p CharacterRecord],
    second: &'p [&'p CharacterRecord],
    budget: usize,
) -> impl Iterator<Item = (&'p CharacterRecord, &'p CharacterRecord)> {
    first
        .iter()
        .flat_map(move |a| second.iter().map(move |b| (*a, *b)))
        .take(budget)
        .filter(|(a, b)| a.ch != b.ch)
}

// ============================================================================
// COMPONENT SCORES
// ============================================================================

/// Acceptance gate for the favorable-element policy.
///
/// - no elements: everything passes
/// - one element: at least one character must carry it
/// - two elements: either character carrying either element passes (a
///   weaker gate; the score rewards covering both)
fn element_gate(favorable: &[Element], e1: Element, e2: Element) -> bool {
    match favorable.len() {
        0 => true,
        _ => favorable.contains(&e1) || favorable.contains(&e2),
    }
}

/// Match component: flat 5 with no preference; with one element 10/5/0 for
/// both/one/neither character matching; with two elements 10 for covering
/// both distinct elements, 5 for any single match.
fn element_match_score(favorable: &[Element], e1: Element, e2: Element) -> u32 {
    match favorable.len() {
        0 => 5,
        1 => {
            let matches = [e1, e2].iter().filter(|e| favorable.contains(e)).count();
            match matches {
                2 => 10,
                1 => 5,
                _ => 0,
            }
        }
        _ => {
            let covers_both = favorable.iter().all(|f| *f == e1 || *f == e2);
            let any = favorable.contains(&e1) || favorable.contains(&e2);
            if covers_both {
                10
            } else if any {
                5
            } else {
                0
            }
        }
    }
}

/// Commonness sum plus a 5-point bonus for distinct phonetic initials,
/// capped at 20
fn meaning_sound_score(c1: &CharacterRecord, c2: &CharacterRecord) -> u32 {
    let mut score = c1.commonness + c2.commonness;
    if c1.initial != c2.initial {
        score += 5;
    }
    score.min(20)
}

// ============================================================================
// RANKING
// ============================================================================

/// Composite score descending; ties break lexicographically on the given
/// name so repeated runs over the same accepted set rank identically
fn rank(candidates: &mut [NameCandidate]) {
    candidates.sort_by(|a, b| {
        b.composite_score
            .cmp(&a.composite_score)
            .then_with(|| a.given_name.cmp(&b.given_name))
    });
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine_fixtures() -> (CharacterDictionary, NumberLuckTable) {
        (CharacterDictionary::with_defaults(), NumberLuckTable::new())
    }

    #[test]
    fn test_returns_at_most_count_above_threshold() {
        let (dict, luck) = engine_fixtures();
        let engine = NamingEngine::new(&dict, &luck);
        let request = NameRequest::new("林", Gender::Male, 5);
        let mut rng = StdRng::seed_from_u64(7);

        let results = engine.recommend(&request, &mut rng);
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        for c in &results {
            assert!(c.composite_score >= engine.threshold_without);
            assert_eq!(c.given_name.chars().count(), 2);
            // pair characters must be distinct
            let chars: Vec<char> = c.given_name.chars().collect();
            assert_ne!(chars[0], chars[1]);
        }
    }

    #[test]
    fn test_ranked_descending_with_lexicographic_ties() {
        let (dict, luck) = engine_fixtures();
        let engine = NamingEngine::new(&dict, &luck);
        let request = NameRequest::new("林", Gender::Female, 10);
        let mut rng = StdRng::seed_from_u64(11);

        let results = engine.recommend(&request, &mut rng);
        for pair in results.windows(2) {
            assert!(pair[0].composite_score >= pair[1].composite_score);
            if pair[0].composite_score == pair[1].composite_score {
                assert!(pair[0].given_name <= pair[1].given_name);
            }
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let (dict, luck) = engine_fixtures();
        let engine = NamingEngine::new(&dict, &luck);
        let request =
            NameRequest::with_favorable("林", Gender::Male, 5, &[Element::Metal, Element::Earth]);

        let a = engine.recommend(&request, &mut StdRng::seed_from_u64(42));
        let b = engine.recommend(&request, &mut StdRng::seed_from_u64(42));
        let names_a: Vec<&str> = a.iter().map(|c| c.given_name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|c| c.given_name.as_str()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_favorable_candidates_pass_gate_and_threshold() {
        let (dict, luck) = engine_fixtures();
        let engine = NamingEngine::new(&dict, &luck);
        let request =
            NameRequest::with_favorable("林", Gender::Male, 8, &[Element::Metal, Element::Earth]);
        let mut rng = StdRng::seed_from_u64(3);

        let results = engine.recommend(&request, &mut rng);
        for c in &results {
            assert!(c.composite_score >= engine.threshold_with_elements);
            let elems: Vec<Element> = c
                .given_name
                .chars()
                .map(|ch| dict.lookup(ch).unwrap().element)
                .collect();
            assert!(elems.iter().any(|e| request.favorable.contains(e)));
        }
    }

    #[test]
    fn test_empty_pool_returns_empty_list() {
        let (dict, luck) = engine_fixtures();
        let mut engine = NamingEngine::new(&dict, &luck);
        engine.min_commonness = 100; // nothing passes the filter
        let request = NameRequest::new("林", Gender::Male, 5);
        let mut rng = StdRng::seed_from_u64(1);

        let results = engine.recommend(&request, &mut rng);
        assert!(results.is_empty());
    }

    #[test]
    fn test_duplicate_favorable_behaves_as_single() {
        let request = NameRequest::with_favorable(
            "林",
            Gender::Female,
            5,
            &[Element::Water, Element::Water],
        );
        assert_eq!(request.favorable, vec![Element::Water]);

        let (dict, luck) = engine_fixtures();
        let engine = NamingEngine::new(&dict, &luck);
        let single = NameRequest::with_favorable("林", Gender::Female, 5, &[Element::Water]);

        let a = engine.recommend(&request, &mut StdRng::seed_from_u64(9));
        let b = engine.recommend(&single, &mut StdRng::seed_from_u64(9));
        let names_a: Vec<&str> = a.iter().map(|c| c.given_name.as_str()).collect();
        let names_b: Vec<&str> = b.iter().map(|c| c.given_name.as_str()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_budget_bounds_iteration() {
        let (dict, luck) = engine_fixtures();
        let mut engine = NamingEngine::new(&dict, &luck);
        engine.phase_one_budget = 0;
        engine.phase_two_budget = 0;
        let request = NameRequest::new("林", Gender::Male, 5);
        let mut rng = StdRng::seed_from_u64(5);

        // Zero budget terminates immediately with no candidates
        let results = engine.recommend(&request, &mut rng);
        assert!(results.is_empty());
    }

    #[test]
    fn test_element_match_policy() {
        use crate::elements::Element::{Earth, Fire, Metal, Water};

        // no preference: flat constant
        assert_eq!(element_match_score(&[], Fire, Water), 5);

        // one element
        assert_eq!(element_match_score(&[Metal], Metal, Metal), 10);
        assert_eq!(element_match_score(&[Metal], Metal, Fire), 5);
        assert_eq!(element_match_score(&[Metal], Fire, Water), 0);

        // two elements: covering both distinct elements is best
        assert_eq!(element_match_score(&[Metal, Earth], Metal, Earth), 10);
        assert_eq!(element_match_score(&[Metal, Earth], Metal, Fire), 5);
        assert_eq!(element_match_score(&[Metal, Earth], Metal, Metal), 5);
        assert_eq!(element_match_score(&[Metal, Earth], Fire, Water), 0);
    }

    #[test]
    fn test_element_gate_policy() {
        use crate::elements::Element::{Earth, Fire, Metal, Water};

        assert!(element_gate(&[], Fire, Water));
        assert!(element_gate(&[Metal], Metal, Fire));
        assert!(!element_gate(&[Metal], Fire, Water));
        // two-element gate is weaker: any single match passes
        assert!(element_gate(&[Metal, Earth], Earth, Fire));
        assert!(!element_gate(&[Metal, Earth], Fire, Water));
    }

    #[test]
    fn test_meaning_sound_cap() {
        let (dict, _) = engine_fixtures();
        let a = dict.lookup('明').unwrap(); // commonness 9, initial m
        let b = dict.lookup('文').unwrap(); // commonness 9, initial w
        assert_eq!(meaning_sound_score(a, b), 20); // 9 + 9 + 5, capped

        let c = dict.lookup('梅').unwrap(); // commonness 6, initial m
        assert_eq!(meaning_sound_score(a, c), 15); // same initial, no bonus
    }
}
