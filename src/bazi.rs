// 📅 Birth-Chart Calculator - Four sexagenary pillars + elemental tally
// 1900-epoch solar approximation of the stem/branch calendar; close enough
// for elemental analysis, not astronomically exact

use crate::elements::{Element, ALL_ELEMENTS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// STEMS & BRANCHES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stem {
    Jia,  // 甲
    Yi,   // 乙
    Bing, // 丙
    Ding, // 丁
    Wu,   // 戊
    Ji,   // 己
    Geng, // 庚
    Xin,  // 辛
    Ren,  // 壬
    Gui,  // 癸
}

pub const STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Stem::Jia => "甲",
            Stem::Yi => "乙",
            Stem::Bing => "丙",
            Stem::Ding => "丁",
            Stem::Wu => "戊",
            Stem::Ji => "己",
            Stem::Geng => "庚",
            Stem::Xin => "辛",
            Stem::Ren => "壬",
            Stem::Gui => "癸",
        }
    }

    /// Two stems per element, in cycle order
    pub fn element(&self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    Zi,   // 子
    Chou, // 丑
    Yin,  // 寅
    Mao,  // 卯
    Chen, // 辰
    Si,   // 巳
    Wu,   // 午
    Wei,  // 未
    Shen, // 申
    You,  // 酉
    Xu,   // 戌
    Hai,  // 亥
}

pub const BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

/// Month 1 starts at Yin, the traditional first month branch
const MONTH_BRANCHES: [Branch; 12] = [
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
    Branch::Zi,
    Branch::Chou,
];

impl Branch {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Branch::Zi => "子",
            Branch::Chou => "丑",
            Branch::Yin => "寅",
            Branch::Mao => "卯",
            Branch::Chen => "辰",
            Branch::Si => "巳",
            Branch::Wu => "午",
            Branch::Wei => "未",
            Branch::Shen => "申",
            Branch::You => "酉",
            Branch::Xu => "戌",
            Branch::Hai => "亥",
        }
    }

    /// Hidden stems of this branch (simplified table, 1-3 per branch).
    /// Each contributes half weight to the elemental tally.
    pub fn hidden_stems(&self) -> &'static [Stem] {
        match self {
            Branch::Zi => &[Stem::Gui],
            Branch::Chou => &[Stem::Ji, Stem::Gui, Stem::Xin],
            Branch::Yin => &[Stem::Jia, Stem::Bing, Stem::Wu],
            Branch::Mao => &[Stem::Yi],
            Branch::Chen => &[Stem::Wu, Stem::Yi, Stem::Gui],
            Branch::Si => &[Stem::Bing, Stem::Geng, Stem::Wu],
            Branch::Wu => &[Stem::Ding, Stem::Ji],
            Branch::Wei => &[Stem::Ji, Stem::Ding, Stem::Yi],
            Branch::Shen => &[Stem::Geng, Stem::Ren, Stem::Wu],
            Branch::You => &[Stem::Xin],
            Branch::Xu => &[Stem::Wu, Stem::Xin, Stem::Ding],
            Branch::Hai => &[Stem::Ren, Stem::Jia],
        }
    }
}

// ============================================================================
// PILLAR & CHART
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn label(&self) -> String {
        format!("{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthChart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl BirthChart {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// The day stem, reference point for elemental self-assessment
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn label(&self) -> String {
        format!(
            "{} {} {} {}",
            self.year.label(),
            self.month.label(),
            self.day.label(),
            self.hour.label()
        )
    }
}

// ============================================================================
// BIRTH DATE INPUT
// ============================================================================

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;
pub const DEFAULT_HOUR: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl BirthDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        BirthDate {
            year,
            month,
            day,
            hour: DEFAULT_HOUR,
        }
    }

    pub fn with_hour(year: i32, month: u32, day: u32, hour: u32) -> Self {
        BirthDate {
            year,
            month,
            day,
            hour,
        }
    }

    /// Validate the triple; the day check is leap-year aware
    pub fn validate(&self) -> Result<(), InvalidBirthDate> {
        if self.year < MIN_YEAR || self.year > MAX_YEAR {
            return Err(InvalidBirthDate {
                field: "year",
                message: format!(
                    "year {} outside supported range {}-{}",
                    self.year, MIN_YEAR, MAX_YEAR
                ),
            });
        }
        if self.month < 1 || self.month > 12 {
            return Err(InvalidBirthDate {
                field: "month",
                message: format!("month {} outside 1-12", self.month),
            });
        }
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(InvalidBirthDate {
                field: "day",
                message: format!("{}-{:02}-{:02} is not a valid date", self.year, self.month, self.day),
            });
        }
        if self.hour > 23 {
            return Err(InvalidBirthDate {
                field: "hour",
                message: format!("hour {} outside 0-23", self.hour),
            });
        }
        Ok(())
    }
}

/// Recoverable condition: callers fall back to "no favorable-element
/// preference" instead of aborting the naming workflow.
#[derive(Debug, Clone)]
pub struct InvalidBirthDate {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for InvalidBirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid birth date ({}): {}", self.field, self.message)
    }
}

impl std::error::Error for InvalidBirthDate {}

// ============================================================================
// PILLAR ARITHMETIC
// ============================================================================

fn year_pillar(year: i32) -> Pillar {
    let offset = (year - MIN_YEAR) as usize;
    Pillar {
        stem: STEMS[offset % 10],
        branch: BRANCHES[offset % 12],
    }
}

fn month_pillar(year: i32, month: u32) -> Pillar {
    let year_stem = year_pillar(year).stem;
    let stem_index = (year_stem.index() * 2 + month as usize) % 10;
    Pillar {
        stem: STEMS[stem_index],
        branch: MONTH_BRANCHES[(month - 1) as usize],
    }
}

fn day_pillar(year: i32, month: u32, day: u32) -> Pillar {
    // Per-year base: (tail+3)*5 + 55 + floor((tail-1)/4). Floor division,
    // not truncation: tail 0 must contribute -1.
    let tail = (year % 100) as i64;
    let base = (tail + 3) * 5 + 55 + (tail - 1).div_euclid(4);

    // Leap-aware day-of-year offset (days elapsed before the date)
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("validated date");
    let days_of_year = chrono::Datelike::ordinal(&date) as i64 - 1;

    let index = (base + days_of_year).rem_euclid(60) as usize;
    Pillar {
        stem: STEMS[index % 10],
        branch: BRANCHES[index % 12],
    }
}

fn hour_pillar(day_stem: Stem, hour: u32) -> Pillar {
    let branch_index = ((hour + 1) / 2) as usize % 12;
    let stem_index = (day_stem.index() * 2 + branch_index) % 10;
    Pillar {
        stem: STEMS[stem_index],
        branch: BRANCHES[branch_index],
    }
}

// ============================================================================
// ELEMENT TALLY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTally {
    counts: [f64; 5],
}

impl ElementTally {
    pub fn new() -> Self {
        ElementTally { counts: [0.0; 5] }
    }

    /// Index into the canonical element order
    fn slot(element: Element) -> usize {
        ALL_ELEMENTS
            .iter()
            .position(|&e| e == element)
            .expect("element in canonical order")
    }

    pub fn add(&mut self, element: Element, weight: f64) {
        self.counts[Self::slot(element)] += weight;
    }

    pub fn get(&self, element: Element) -> f64 {
        self.counts[Self::slot(element)]
    }

    /// (element, count) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        ALL_ELEMENTS.iter().map(move |&e| (e, self.get(e)))
    }

    /// Tally a chart: pillar stems weigh 1.0, hidden stems weigh 0.5
    pub fn from_chart(chart: &BirthChart) -> Self {
        let mut tally = ElementTally::new();
        for pillar in chart.pillars() {
            tally.add(pillar.stem.element(), 1.0);
            for hidden in pillar.branch.hidden_stems() {
                tally.add(hidden.element(), 0.5);
            }
        }
        tally
    }
}

impl Default for ElementTally {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FAVORABLE ELEMENTS
// ============================================================================

/// Replenishment rule: union the weakest and second-weakest tally sets, and
/// follow each weak element with its cycle predecessor. Weak sets are walked
/// in canonical element order so the outcome is deterministic; first
/// occurrence wins on dedup, capped at two elements.
pub fn favorable_elements(tally: &ElementTally) -> Vec<Element> {
    let mut distinct: Vec<f64> = tally.iter().map(|(_, c)| c).collect();
    distinct.sort_by(|a, b| a.partial_cmp(b).expect("tally counts are finite"));
    distinct.dedup();

    let mut weak: Vec<Element> = Vec::new();
    for &level in distinct.iter().take(2) {
        for (element, count) in tally.iter() {
            if count == level {
                weak.push(element);
            }
        }
    }

    let mut result: Vec<Element> = Vec::new();
    for element in weak {
        for candidate in [element, element.generated_by()] {
            if !result.contains(&candidate) {
                result.push(candidate);
            }
        }
    }
    result.truncate(2);
    result
}

// ============================================================================
// ANALYSIS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthChartAnalysis {
    pub chart: BirthChart,
    pub tally: ElementTally,
    pub day_master: Stem,
    pub day_master_element: Element,
    pub favorable: Vec<Element>,
}

/// Compute pillars, tally and favorable elements for a birth date.
/// Deterministic: identical inputs always yield identical output.
pub fn analyze(date: &BirthDate) -> Result<BirthChartAnalysis, InvalidBirthDate> {
    date.validate()?;

    let year = year_pillar(date.year);
    let month = month_pillar(date.year, date.month);
    let day = day_pillar(date.year, date.month, date.day);
    let hour = hour_pillar(day.stem, date.hour);

    let chart = BirthChart {
        year,
        month,
        day,
        hour,
    };
    let tally = ElementTally::from_chart(&chart);
    let favorable = favorable_elements(&tally);
    let day_master = chart.day_master();

    Ok(BirthChartAnalysis {
        chart,
        tally,
        day_master,
        day_master_element: day_master.element(),
        favorable,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_chart_2024_01_15() {
        let analysis = analyze(&BirthDate::new(2024, 1, 15)).unwrap();
        assert_eq!(analysis.chart.year.label(), "戊辰");
        assert_eq!(analysis.chart.month.label(), "癸寅");
        assert_eq!(analysis.chart.day.label(), "癸巳");
        assert_eq!(analysis.chart.hour.label(), "戊午");

        let t = &analysis.tally;
        assert_eq!(t.get(Element::Wood), 1.0);
        assert_eq!(t.get(Element::Fire), 1.5);
        assert_eq!(t.get(Element::Earth), 4.0);
        assert_eq!(t.get(Element::Metal), 0.5);
        assert_eq!(t.get(Element::Water), 2.5);

        // Metal is weakest; Earth generates Metal
        assert_eq!(analysis.favorable, vec![Element::Metal, Element::Earth]);
        assert_eq!(analysis.day_master, Stem::Gui);
        assert_eq!(analysis.day_master_element, Element::Water);
    }

    #[test]
    fn test_day_pillar_century_boundary() {
        // tail 0: floor((0-1)/4) = -1, not 0
        let analysis = analyze(&BirthDate::with_hour(2000, 6, 1, 8)).unwrap();
        assert_eq!(analysis.chart.day.label(), "乙巳");
    }

    #[test]
    fn test_deterministic_across_calls() {
        let date = BirthDate::with_hour(1990, 10, 10, 16);
        let a = analyze(&date).unwrap();
        let b = analyze(&date).unwrap();
        assert_eq!(a.chart, b.chart);
        assert_eq!(a.tally, b.tally);
        assert_eq!(a.favorable, b.favorable);
    }

    #[test]
    fn test_favorable_bounds() {
        for day in 1..=28 {
            let analysis = analyze(&BirthDate::new(1984, 7, day)).unwrap();
            assert!(analysis.favorable.len() <= 2);
            assert!(!analysis.favorable.is_empty());
        }
    }

    #[test]
    fn test_hour_branch_edges() {
        // 23:00 wraps to Zi; midnight is Zi as well
        let late = analyze(&BirthDate::with_hour(2024, 1, 15, 23)).unwrap();
        assert_eq!(late.chart.hour.branch, Branch::Zi);
        let midnight = analyze(&BirthDate::with_hour(2024, 1, 15, 0)).unwrap();
        assert_eq!(midnight.chart.hour.branch, Branch::Zi);
        // noon is the Wu branch
        let noon = analyze(&BirthDate::with_hour(2024, 1, 15, 12)).unwrap();
        assert_eq!(noon.chart.hour.branch, Branch::Wu);
    }

    #[test]
    fn test_invalid_dates_are_typed_errors() {
        assert_eq!(analyze(&BirthDate::new(1800, 1, 1)).unwrap_err().field, "year");
        assert_eq!(analyze(&BirthDate::new(2024, 13, 1)).unwrap_err().field, "month");
        // 2023 is not a leap year
        assert_eq!(analyze(&BirthDate::new(2023, 2, 29)).unwrap_err().field, "day");
        assert_eq!(
            analyze(&BirthDate::with_hour(2024, 2, 29, 24)).unwrap_err().field,
            "hour"
        );
        // 2024 is a leap year: Feb 29 is fine
        assert!(analyze(&BirthDate::new(2024, 2, 29)).is_ok());
    }

    #[test]
    fn test_hidden_stem_counts() {
        for branch in BRANCHES {
            let n = branch.hidden_stems().len();
            assert!((1..=3).contains(&n));
        }
    }
}
