// 📚 Character Dictionary - Read-only lookup service for name characters
// Maps a character to strokes, element, gender suitability, commonness,
// phonetic initial and a short meaning gloss

use crate::elements::Element;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim() {
            "male" | "m" | "男" => Some(Gender::Male),
            "female" | "f" | "女" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Which genders a character is considered suitable for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderUse {
    Male,
    Female,
    Any,
}

impl GenderUse {
    pub fn allows(&self, gender: Gender) -> bool {
        match self {
            GenderUse::Male => gender == Gender::Male,
            GenderUse::Female => gender == Gender::Female,
            GenderUse::Any => true,
        }
    }

    pub fn parse(s: &str) -> Option<GenderUse> {
        match s.trim() {
            "male" | "m" | "男" => Some(GenderUse::Male),
            "female" | "f" | "女" => Some(GenderUse::Female),
            "any" | "mf" | "男女" => Some(GenderUse::Any),
            _ => None,
        }
    }
}

// ============================================================================
// CHARACTER RECORD
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// The character itself
    pub ch: char,

    /// Dictionary stroke count (traditional counting, as naming practice uses)
    pub strokes: u32,

    /// Elemental attribution
    pub element: Element,

    /// Gender suitability
    pub gender_use: GenderUse,

    /// Commonness in given names, 0-10
    pub commonness: u32,

    /// Phonetic initial (pinyin first letter)
    pub initial: char,

    /// Short meaning gloss for reports
    pub meaning: String,
}

/// Stroke count substituted for characters missing from the dictionary.
/// An approximation that keeps the pipeline total, not an error path.
pub const FALLBACK_STROKES: u32 = 6;

// ============================================================================
// DICTIONARY
// ============================================================================

/// In-memory read-only character dictionary.
///
/// Injected into the calculators and the search engine; never global state.
pub struct CharacterDictionary {
    entries: HashMap<char, CharacterRecord>,
}

impl CharacterDictionary {
    pub fn new() -> Self {
        CharacterDictionary {
            entries: HashMap::new(),
        }
    }

    /// Dictionary pre-loaded with a pool of common name characters
    pub fn with_defaults() -> Self {
        let mut dict = CharacterDictionary::new();
        for &(ch, strokes, element, gender, commonness, initial, meaning) in DEFAULT_CHARACTERS {
            dict.insert(CharacterRecord {
                ch,
                strokes,
                element,
                gender_use: gender,
                commonness,
                initial,
                meaning: meaning.to_string(),
            });
        }
        dict
    }

    /// Load a dictionary from a CSV file with columns:
    /// char,strokes,element,gender,commonness,initial,meaning
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())
            .with_context(|| format!("Failed to open character CSV: {:?}", path.as_ref()))?;

        let mut dict = CharacterDictionary::new();
        for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.with_context(|| format!("Bad character CSV row {}", i + 2))?;
            let record = row
                .into_record()
                .with_context(|| format!("Invalid field in character CSV row {}", i + 2))?;
            dict.insert(record);
        }
        Ok(dict)
    }

    pub fn insert(&mut self, record: CharacterRecord) {
        self.entries.insert(record.ch, record);
    }

    /// Pure lookup; a miss is a recognized condition, not an error
    pub fn lookup(&self, ch: char) -> Option<&CharacterRecord> {
        self.entries.get(&ch)
    }

    /// Stroke count with the documented fallback for unknown characters
    pub fn strokes_or_fallback(&self, ch: char) -> u32 {
        self.lookup(ch).map(|r| r.strokes).unwrap_or(FALLBACK_STROKES)
    }

    /// All records, unordered
    pub fn records(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CharacterDictionary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// CSV ROW
// ============================================================================

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "char")]
    ch: String,
    strokes: u32,
    element: String,
    gender: String,
    commonness: u32,
    initial: String,
    meaning: String,
}

impl CsvRow {
    fn into_record(self) -> Result<CharacterRecord> {
        let ch = self
            .ch
            .chars()
            .next()
            .context("empty character cell")?;
        let element =
            Element::parse(&self.element).with_context(|| format!("bad element: {}", self.element))?;
        let gender_use =
            GenderUse::parse(&self.gender).with_context(|| format!("bad gender: {}", self.gender))?;
        let initial = self.initial.chars().next().unwrap_or('?');
        Ok(CharacterRecord {
            ch,
            strokes: self.strokes,
            element,
            gender_use,
            commonness: self.commonness,
            initial,
            meaning: self.meaning,
        })
    }
}

// ============================================================================
// DEFAULT CHARACTER POOL
// ============================================================================

use crate::elements::Element::{Earth, Fire, Metal, Water, Wood};
use self::GenderUse::{Any, Female, Male};

type CharRow = (char, u32, Element, GenderUse, u32, char, &'static str);

/// Built-in pool of common name characters. Stroke counts follow the
/// traditional dictionary counting used by five-grid practice.
const DEFAULT_CHARACTERS: &[CharRow] = &[
    // Wood
    ('林', 8, Wood, Any, 7, 'l', "forest, flourishing growth"),
    ('杰', 12, Wood, Male, 9, 'j', "outstanding, heroic talent"),
    ('嘉', 14, Wood, Any, 8, 'j', "fine, praiseworthy"),
    ('健', 11, Wood, Male, 8, 'j', "vigorous health"),
    ('康', 11, Wood, Male, 7, 'k', "well-being, prosperity"),
    ('柏', 9, Wood, Male, 5, 'b', "cypress, steadfastness"),
    ('松', 8, Wood, Male, 5, 's', "pine, endurance"),
    ('彬', 11, Wood, Male, 6, 'b', "refined and courteous"),
    ('荣', 14, Wood, Any, 7, 'r', "honor, glory"),
    ('芳', 10, Wood, Female, 7, 'f', "fragrance, virtue"),
    ('英', 11, Wood, Female, 7, 'y', "brave, distinguished"),
    ('梅', 11, Wood, Female, 6, 'm', "plum blossom, resilience"),
    ('菲', 14, Wood, Female, 6, 'f', "luxuriant, fragrant"),
    ('竹', 6, Wood, Any, 4, 'z', "bamboo, upright character"),
    ('楠', 13, Wood, Any, 6, 'n', "precious nanmu timber"),
    ('萱', 15, Wood, Female, 6, 'x', "daylily, forgetting worries"),
    // Fire
    ('明', 8, Fire, Any, 9, 'm', "bright, perceptive"),
    ('晓', 16, Fire, Female, 7, 'x', "daybreak, clarity"),
    ('晨', 11, Fire, Any, 8, 'c', "morning, new beginnings"),
    ('昊', 8, Fire, Male, 6, 'h', "vast summer sky"),
    ('旭', 6, Fire, Male, 6, 'x', "rising sun"),
    ('煜', 13, Fire, Male, 5, 'y', "brilliant illumination"),
    ('阳', 17, Fire, Male, 8, 'y', "sunlight, positive force"),
    ('丹', 4, Fire, Female, 5, 'd', "cinnabar red, sincerity"),
    ('婷', 12, Fire, Female, 8, 't', "graceful"),
    ('亮', 9, Fire, Male, 6, 'l', "luminous, open-hearted"),
    ('智', 12, Fire, Male, 7, 'z', "wisdom"),
    ('夏', 10, Fire, Female, 5, 'x', "summer, vitality"),
    ('烨', 16, Fire, Male, 4, 'y', "blazing splendor"),
    ('曦', 20, Fire, Female, 4, 'x', "first light of dawn"),
    // Earth
    ('宇', 6, Earth, Male, 9, 'y', "cosmos, expansive bearing"),
    ('安', 6, Earth, Any, 8, 'a', "peace, security"),
    ('坤', 8, Earth, Male, 5, 'k', "the receptive earth"),
    ('城', 10, Earth, Male, 5, 'c', "city wall, reliability"),
    ('磊', 15, Earth, Male, 6, 'l', "open and upright, rock pile"),
    ('岚', 12, Earth, Female, 5, 'l', "mountain mist"),
    ('圣', 13, Earth, Male, 5, 's', "sage, noble"),
    ('辰', 7, Earth, Any, 7, 'c', "celestial time, auspicious hour"),
    ('轩', 10, Earth, Male, 8, 'x', "lofty carriage, dignity"),
    ('嫣', 14, Earth, Female, 5, 'y', "captivating smile"),
    ('垚', 9, Earth, Male, 3, 'y', "towering earth"),
    ('娴', 15, Earth, Female, 4, 'x', "refined, serene"),
    // Metal
    ('鑫', 24, Metal, Male, 6, 'x', "abundant prosperity"),
    ('锐', 15, Metal, Male, 5, 'r', "keen edge, acumen"),
    ('静', 16, Metal, Female, 8, 'j', "stillness, composure"),
    ('瑞', 14, Metal, Any, 7, 'r', "auspicious omen"),
    ('铭', 14, Metal, Male, 7, 'm', "engraved remembrance"),
    ('钰', 13, Metal, Female, 6, 'y', "treasured jade-gold"),
    ('诗', 13, Metal, Female, 7, 's', "poetry"),
    ('成', 7, Metal, Male, 8, 'c', "accomplishment"),
    ('新', 13, Metal, Any, 7, 'x', "renewal"),
    ('思', 9, Metal, Any, 8, 's', "thought, longing"),
    ('珊', 10, Metal, Female, 5, 's', "coral"),
    ('世', 5, Metal, Male, 6, 's', "generation, the world"),
    ('宣', 9, Metal, Any, 5, 'x', "proclaim, widely known"),
    ('睿', 14, Metal, Male, 7, 'r', "far-sighted wisdom"),
    // Water
    ('海', 11, Water, Male, 7, 'h', "the sea, breadth of mind"),
    ('涵', 12, Water, Any, 8, 'h', "to contain, inner depth"),
    ('雨', 8, Water, Female, 7, 'y', "rain, timely nourishment"),
    ('雪', 11, Water, Female, 7, 'x', "snow, purity"),
    ('文', 4, Water, Any, 9, 'w', "literary grace"),
    ('波', 9, Water, Male, 5, 'b', "wave, momentum"),
    ('洋', 10, Water, Male, 6, 'y', "ocean, vastness"),
    ('浩', 11, Water, Male, 8, 'h', "grand, immense"),
    ('清', 12, Water, Any, 7, 'q', "clear, incorrupt"),
    ('泽', 17, Water, Male, 8, 'z', "moist bounty, favor"),
    ('冰', 6, Water, Female, 5, 'b', "ice, pristine"),
    ('雯', 12, Water, Female, 7, 'w', "cloud patterns"),
    ('平', 5, Water, Male, 5, 'p', "level, even-tempered"),
    ('妍', 7, Water, Female, 6, 'y', "beautiful, gifted"),
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_loaded() {
        let dict = CharacterDictionary::with_defaults();
        assert!(dict.len() >= 60);

        let rec = dict.lookup('明').unwrap();
        assert_eq!(rec.strokes, 8);
        assert_eq!(rec.element, Element::Fire);
        assert!(rec.gender_use.allows(Gender::Male));
        assert!(rec.gender_use.allows(Gender::Female));
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let dict = CharacterDictionary::with_defaults();
        assert!(dict.lookup('X').is_none());
        assert_eq!(dict.strokes_or_fallback('X'), FALLBACK_STROKES);
    }

    #[test]
    fn test_every_element_represented_per_gender() {
        // The search engine partitions by element; the default pool must not
        // leave a favorable element empty for either gender.
        let dict = CharacterDictionary::with_defaults();
        for gender in [Gender::Male, Gender::Female] {
            for element in crate::elements::ALL_ELEMENTS {
                let found = dict
                    .records()
                    .any(|r| r.element == element && r.gender_use.allows(gender));
                assert!(found, "no {} character for {}", element, gender.as_str());
            }
        }
    }

    #[test]
    fn test_csv_round_trip() {
        use std::io::Write;

        let mut path = std::env::temp_dir();
        path.push("sancai_naming_chars_test.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "char,strokes,element,gender,commonness,initial,meaning").unwrap();
        writeln!(file, "德,15,Fire,male,7,d,virtue").unwrap();
        writeln!(file, "玉,5,木,f,6,y,jade").unwrap();
        drop(file);

        let dict = CharacterDictionary::from_csv_file(&path).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.lookup('德').unwrap().commonness, 7);
        assert_eq!(dict.lookup('玉').unwrap().element, Element::Wood);
        std::fs::remove_file(&path).ok();
    }
}
