// 🎲 Number Luck Table - 81-number auspicious/inauspicious classification
// Read-only lookup service keyed by the five-grid numeric values

use serde::{Deserialize, Serialize};

// ============================================================================
// LUCK
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Luck {
    Auspicious,
    Inauspicious,
}

impl Luck {
    pub fn as_str(&self) -> &'static str {
        match self {
            Luck::Auspicious => "auspicious",
            Luck::Inauspicious => "inauspicious",
        }
    }

    pub fn is_auspicious(&self) -> bool {
        *self == Luck::Auspicious
    }
}

// ============================================================================
// LUCK TABLE
// ============================================================================

/// The traditional 81-number table. Numbers above 81 wrap back into the
/// cycle: 82 is read as 1, 83 as 2, and so on.
pub struct NumberLuckTable {
    auspicious: [bool; 82], // index 1..=81
}

/// Numbers classified auspicious by the traditional table
const AUSPICIOUS_NUMBERS: &[u32] = &[
    1, 3, 5, 6, 7, 8, 11, 13, 15, 16, 17, 18, 21, 23, 24, 25, 29, 31, 32, 33, 35, 37, 39, 41, 45,
    47, 48, 52, 57, 61, 63, 65, 67, 68, 81,
];

impl NumberLuckTable {
    pub fn new() -> Self {
        let mut auspicious = [false; 82];
        for &n in AUSPICIOUS_NUMBERS {
            auspicious[n as usize] = true;
        }
        NumberLuckTable { auspicious }
    }

    /// Classify a grid value. Zero never occurs for valid grids but is
    /// treated as inauspicious rather than a panic.
    pub fn classify(&self, value: u32) -> Luck {
        if value == 0 {
            return Luck::Inauspicious;
        }
        let wrapped = (value - 1) % 81 + 1;
        if self.auspicious[wrapped as usize] {
            Luck::Auspicious
        } else {
            Luck::Inauspicious
        }
    }
}

impl Default for NumberLuckTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_classifications() {
        let table = NumberLuckTable::new();
        assert_eq!(table.classify(1), Luck::Auspicious);
        assert_eq!(table.classify(16), Luck::Auspicious);
        assert_eq!(table.classify(81), Luck::Auspicious);
        assert_eq!(table.classify(2), Luck::Inauspicious);
        assert_eq!(table.classify(34), Luck::Inauspicious);
    }

    #[test]
    fn test_wraps_above_81() {
        let table = NumberLuckTable::new();
        // 82 reads as 1, 115 reads as 34
        assert_eq!(table.classify(82), Luck::Auspicious);
        assert_eq!(table.classify(115), Luck::Inauspicious);
    }

    #[test]
    fn test_zero_does_not_panic() {
        let table = NumberLuckTable::new();
        assert_eq!(table.classify(0), Luck::Inauspicious);
    }
}
