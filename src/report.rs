// 📄 Report - Text rendering and result saving
// Turns ranked candidates into the multi-section report block and writes
// timestamped result files

use crate::chars::Gender;
use crate::engine::NameCandidate;
use crate::luck::NumberLuckTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

// ============================================================================
// FORMATTING
// ============================================================================

/// Render one ranked candidate as a report block
pub fn format_candidate(rank: usize, candidate: &NameCandidate, luck: &NumberLuckTable) -> String {
    let mut out = Vec::new();

    out.push(format!("\n{}", "=".repeat(60)));
    out.push(format!(
        "Recommendation {}: {} (composite score: {})",
        rank, candidate.full_name, candidate.composite_score
    ));
    out.push("=".repeat(60));

    out.push(format!("\n[Five Grids] score: {}", candidate.scores.grid_luck));
    for (name, grid) in candidate.grids.grids() {
        let verdict = luck.classify(grid.value);
        let mark = if verdict.is_auspicious() { "✓" } else { "✗" };
        out.push(format!(
            "  {:<6} {:>3} ({}) - {} {}",
            name,
            grid.value,
            grid.element,
            verdict.as_str(),
            mark
        ));
    }

    out.push(format!("\n[Elemental Triad] score: {}", candidate.scores.triad));
    out.push(format!(
        "  {} - {}",
        candidate.grids.triad_label(),
        candidate.triad.tier.as_str()
    ));

    out.push(format!(
        "\n[Meaning & Sound] score: {}   [Elemental Match] score: {}",
        candidate.scores.meaning_sound, candidate.scores.element_match
    ));

    if let Some(narrative) = &candidate.narrative {
        out.push("\n[Narrative]".to_string());
        out.push(narrative.clone());
    }

    out.join("\n")
}

/// Render the whole ranked list with a header
pub fn format_report(surname: &str, gender: Gender, candidates: &[NameCandidate], luck: &NumberLuckTable) -> String {
    let mut out = String::new();
    out.push_str("Sancai/Wuge Naming Report\n");
    out.push_str(&format!("Surname: {}  Gender: {}\n", surname, gender.as_str()));
    for (i, candidate) in candidates.iter().enumerate() {
        out.push_str(&format_candidate(i + 1, candidate, luck));
        out.push('\n');
    }
    out
}

// ============================================================================
// SAVING
// ============================================================================

/// Write the text report to a timestamped file in the current directory,
/// returning the path written
pub fn save_report(surname: &str, gender: Gender, candidates: &[NameCandidate], luck: &NumberLuckTable) -> Result<PathBuf> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = PathBuf::from(format!("naming_{}_{}_{}.txt", surname, gender.as_str(), stamp));

    let report = format_report(surname, gender, candidates, luck);
    fs::write(&path, report).with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(path)
}

/// Serialize the ranked list as pretty JSON for downstream tooling
pub fn to_json(candidates: &[NameCandidate]) -> Result<String> {
    serde_json::to_string_pretty(candidates).context("Failed to serialize candidates")
}

// ============================================================================
// TESTS
// ============================================================================
