// Sancai/Wuge Naming System - Core Library
// Exposes all modules for use in the CLI and tests

pub mod bazi;
pub mod chars;
pub mod elements;
pub mod engine;
pub mod luck;
pub mod narrative;
pub mod report;
pub mod sancai;
pub mod wuge;

// Re-export commonly used types
pub use bazi::{
    analyze as analyze_birth_chart, favorable_elements, BirthChart, BirthChartAnalysis, BirthDate,
    Branch, ElementTally, InvalidBirthDate, Pillar, Stem,
};
pub use chars::{CharacterDictionary, CharacterRecord, Gender, GenderUse, FALLBACK_STROKES};
pub use elements::{relation, Element, ElementRelation, ALL_ELEMENTS};
pub use engine::{ComponentScores, NameCandidate, NameRequest, NamingEngine};
pub use luck::{Luck, NumberLuckTable};
pub use narrative::NarrativeComposer;
pub use report::{format_candidate, format_report, save_report, to_json};
pub use sancai::{analyze_elements as analyze_triad, TriadTier, TriadVerdict};
pub use wuge::{element_of_number, profile_from_strokes, FiveGridCalculator, FiveGridProfile, Grid};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
