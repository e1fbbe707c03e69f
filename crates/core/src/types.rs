//! Core data types for the recession study.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A calendar quarter such as `2008q3`, ordered by (year, quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuarterLabel {
    year: i32,
    quarter: u8,
}

impl QuarterLabel {
    /// Create a quarter label, rejecting quarters outside 1..=4.
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(Error::data(format!("quarter must be 1-4, got {}", quarter)));
        }
        Ok(Self { year, quarter })
    }

    /// First quarter of a year.
    pub const fn first_of(year: i32) -> Self {
        Self { year, quarter: 1 }
    }

    /// Calendar year.
    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Quarter within the year (1-4).
    #[inline]
    pub fn quarter(self) -> u8 {
        self.quarter
    }

    /// Number of quarters since year 0, used for offset arithmetic.
    #[inline]
    fn ordinal(self) -> i64 {
        self.year as i64 * 4 + (self.quarter as i64 - 1)
    }

    #[inline]
    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(4) as i32,
            quarter: (ordinal.rem_euclid(4) + 1) as u8,
        }
    }

    /// The quarter `n` quarters after this one.
    pub fn offset(self, n: usize) -> Self {
        Self::from_ordinal(self.ordinal() + n as i64)
    }

    /// The following quarter.
    pub fn succ(self) -> Self {
        self.offset(1)
    }

    /// The preceding quarter.
    pub fn pred(self) -> Self {
        Self::from_ordinal(self.ordinal() - 1)
    }

    /// Position of this quarter counted from `start`, if it is not earlier.
    pub fn quarters_since(self, start: QuarterLabel) -> Option<usize> {
        usize::try_from(self.ordinal() - start.ordinal()).ok()
    }

    /// The three calendar months belonging to this quarter.
    pub fn months(self) -> [YearMonth; 3] {
        let first = (self.quarter as u32 - 1) * 3 + 1;
        [0, 1, 2].map(|i| YearMonth {
            year: self.year,
            month: first + i,
        })
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}q{}", self.year, self.quarter)
    }
}

impl FromStr for QuarterLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, quarter) = s
            .split_once(['q', 'Q'])
            .ok_or_else(|| Error::data(format!("invalid quarter label '{}'", s)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| Error::data(format!("invalid year in quarter label '{}'", s)))?;
        let quarter = quarter
            .parse::<u8>()
            .map_err(|_| Error::data(format!("invalid quarter in quarter label '{}'", s)))?;
        Self::new(year, quarter)
    }
}

impl TryFrom<String> for QuarterLabel {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<QuarterLabel> for String {
    fn from(q: QuarterLabel) -> Self {
        q.to_string()
    }
}

/// A calendar month such as `2000-01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a month label, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::data(format!("month must be 1-12, got {}", month)));
        }
        Ok(Self { year, month })
    }

    /// Calendar year.
    #[inline]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month within the year (1-12).
    #[inline]
    pub fn month(self) -> u32 {
        self.month
    }

    /// The quarter containing this month.
    pub fn quarter(self) -> QuarterLabel {
        QuarterLabel {
            year: self.year,
            quarter: ((self.month - 1) / 3 + 1) as u8,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| Error::data(format!("invalid month label '{}'", s)))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(m: YearMonth) -> Self {
        m.to_string()
    }
}

/// Business-cycle classification of a single quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleState {
    /// Start of two consecutive quarters of decline.
    Recession,
    /// End of two consecutive quarters of growth.
    Recovery,
    /// Neither pattern holds.
    Stable,
    /// Too close to the series edge to classify.
    Undefined,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleState::Recession => "recession",
            CycleState::Recovery => "recovery",
            CycleState::Stable => "stable",
            CycleState::Undefined => "undefined",
        };
        f.write_str(s)
    }
}

/// One raw quarter of the macro series, as supplied by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpQuarter {
    /// Quarter label.
    pub quarter: QuarterLabel,
    /// GDP in current dollars.
    pub gdp_current: f64,
    /// GDP in chained (inflation-adjusted) dollars.
    pub gdp_chained: f64,
}

/// A quarter of the GDP series with its derived cycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpRecord {
    /// Quarter label.
    pub quarter: QuarterLabel,
    /// GDP in current dollars.
    pub gdp_current: f64,
    /// GDP in chained (inflation-adjusted) dollars.
    pub gdp_chained: f64,
    /// Derived business-cycle state.
    pub cycle_state: CycleState,
}

/// Boundaries of one detected recession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecessionWindow {
    /// First quarter flagged as recession.
    pub start: QuarterLabel,
    /// First recovery quarter after `start`.
    pub end: QuarterLabel,
    /// Quarter of lowest chained GDP within `[start, end]`.
    pub bottom: QuarterLabel,
}

/// Monthly prices for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPriceRow {
    /// Full state name.
    pub state: String,
    /// Region (city) name.
    pub region: String,
    /// One entry per month column of the owning table.
    pub prices: Vec<Option<f64>>,
}

/// Monthly regional price table: one row per region, one column per month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPriceTable {
    /// Month column labels.
    pub months: Vec<YearMonth>,
    /// Region rows.
    pub rows: Vec<MonthlyPriceRow>,
}

impl MonthlyPriceTable {
    /// Create an empty table with the given month columns.
    pub fn new(months: Vec<YearMonth>) -> Self {
        Self {
            months,
            rows: Vec::new(),
        }
    }

    /// Append a row, checking it has one value per month column.
    pub fn push_row(
        &mut self,
        state: impl Into<String>,
        region: impl Into<String>,
        prices: Vec<Option<f64>>,
    ) -> Result<()> {
        let region = region.into();
        if prices.len() != self.months.len() {
            return Err(Error::data(format!(
                "row '{}' has {} values for {} month columns",
                region,
                prices.len(),
                self.months.len()
            )));
        }
        self.rows.push(MonthlyPriceRow {
            state: state.into(),
            region,
            prices,
        });
        Ok(())
    }

    /// Number of region rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Quarterly mean prices for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingQuarterRow {
    /// Full state name.
    pub state: String,
    /// Region (city) name.
    pub region: String,
    /// One entry per quarter column of the owning table; `None` when no month had data.
    pub prices: Vec<Option<f64>>,
}

impl HousingQuarterRow {
    /// Price at a column index.
    #[inline]
    pub fn price_at(&self, column: usize) -> Option<f64> {
        self.prices.get(column).copied().flatten()
    }
}

/// Quarterly price table over a fixed horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyPriceTable {
    /// Quarter column labels in chronological order.
    pub quarters: Vec<QuarterLabel>,
    /// Region rows, unique by (state, region).
    pub rows: Vec<HousingQuarterRow>,
}

impl QuarterlyPriceTable {
    /// Column index of a quarter.
    pub fn column_index(&self, quarter: QuarterLabel) -> Option<usize> {
        self.quarters.iter().position(|&q| q == quarter)
    }

    /// Look up a row by its identity key.
    pub fn row(&self, state: &str, region: &str) -> Option<&HousingQuarterRow> {
        self.rows
            .iter()
            .find(|r| r.state == state && r.region == region)
    }

    /// Price for a region at a quarter.
    pub fn price(&self, state: &str, region: &str, quarter: QuarterLabel) -> Option<f64> {
        let column = self.column_index(quarter)?;
        self.row(state, region)?.price_at(column)
    }
}

/// Ratio of pre-recession price to recession-bottom price for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRatio {
    /// Full state name.
    pub state: String,
    /// Region (city) name.
    pub region: String,
    /// Pre-recession price over bottom price; lower means a smaller loss.
    pub ratio: f64,
}

/// Set of (state, region) pairs known to be university towns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversityTownSet {
    towns: HashSet<(String, String)>,
}

impl UniversityTownSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a town. Returns false if it was already present.
    pub fn insert(&mut self, state: impl Into<String>, region: impl Into<String>) -> bool {
        self.towns.insert((state.into(), region.into()))
    }

    /// Membership test.
    pub fn contains(&self, state: &str, region: &str) -> bool {
        self.towns.contains(&(state.to_string(), region.to_string()))
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }
}

impl<S: Into<String>, R: Into<String>> FromIterator<(S, R)> for UniversityTownSet {
    fn from_iter<I: IntoIterator<Item = (S, R)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (state, region) in iter {
            set.insert(state, region);
        }
        set
    }
}

/// The two populations compared by the hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TownGroup {
    #[serde(rename = "university town")]
    University,
    #[serde(rename = "non-university town")]
    NonUniversity,
}

impl fmt::Display for TownGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TownGroup::University => f.write_str("university town"),
            TownGroup::NonUniversity => f.write_str("non-university town"),
        }
    }
}

/// Result of comparing university and non-university price ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Whether the null hypothesis is rejected at p < 0.01.
    pub different: bool,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Group with the lower mean price ratio.
    pub better: TownGroup,
}
