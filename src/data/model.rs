use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (`1` = success, `0` = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("launch outcome class must be 0 or 1, got {0}")]
pub struct OutcomeError(pub i64);

impl TryFrom<i64> for Outcome {
    type Error = OutcomeError;

    fn try_from(class: i64) -> Result<Self, Self::Error> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(OutcomeError(other)),
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.class()
    }
}

impl Outcome {
    /// Numeric class value, also used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch attempt.
///
/// Field names follow the capstone CSV headers; unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Flight Number", default)]
    pub flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "class")]
    pub outcome: Outcome,
    #[serde(rename = "Booster Version", default)]
    pub booster_version: Option<String>,
    /// Colouring dimension only; never filtered on.
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        LaunchRecord {
            flight_number: None,
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_version: None,
            booster_category: booster_category.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SiteSelector – "all sites" sentinel or one discovered site
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelector {
    pub fn site(name: impl Into<String>) -> Self {
        SiteSelector::Site(name.into())
    }

    /// Whether a record's site passes this selector.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::AllSites => true,
            SiteSelector::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::AllSites => write!(f, "All Sites"),
            SiteSelector::Site(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – the slider value
// ---------------------------------------------------------------------------

/// Inclusive payload bound `[lo, hi]` in kilograms.
///
/// Not validated on construction: an inverted or non-finite range is a legal
/// value that simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        PayloadRange { lo, hi }
    }

    /// The dataset's full payload extent, the initial slider position.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (lo, hi) = dataset.payload_bounds();
        PayloadRange { lo, hi }
    }

    pub fn is_well_formed(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite() && self.lo <= self.hi
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.is_well_formed() && self.lo <= payload_mass_kg && payload_mass_kg <= self.hi
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no launch records")]
    Empty,
    #[error("row {row}: payload mass {value} is not a finite non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: launch site name is empty")]
    MissingSite { row: usize },
}

/// The full launch table with pre-computed indices. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All launch records, in file order.
    pub records: Vec<LaunchRecord>,
    /// Launch sites in first-occurrence order.
    pub sites: Vec<String>,
    /// Booster categories in first-occurrence order.
    pub booster_categories: Vec<String>,
    payload_min: f64,
    payload_max: f64,
}

/// Distinct site names in first-occurrence order.
pub fn discover_sites(records: &[LaunchRecord]) -> Vec<String> {
    first_seen(records.iter().map(|r| r.site.as_str()))
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

impl LaunchDataset {
    /// Build indices from the loaded records. Use [`validate`](Self::validate)
    /// to check load-time invariants.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = discover_sites(&records);
        let booster_categories = first_seen(records.iter().map(|r| r.booster_category.as_str()));

        let (payload_min, payload_max) = records
            .iter()
            .map(|r| r.payload_mass_kg)
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
            .unwrap_or((0.0, 0.0));

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_min,
            payload_max,
        }
    }

    /// Check the invariants the derived views rely on.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.is_empty() {
            return Err(DatasetError::Empty);
        }
        for (row, rec) in self.records.iter().enumerate() {
            if rec.site.trim().is_empty() {
                return Err(DatasetError::MissingSite { row });
            }
            if !rec.payload_mass_kg.is_finite() || rec.payload_mass_kg < 0.0 {
                return Err(DatasetError::InvalidPayload {
                    row,
                    value: rec.payload_mass_kg,
                });
            }
        }
        Ok(())
    }

    /// `(min, max)` payload mass; `(0, 0)` for an empty dataset.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Selector options offered to the user: the sentinel, then every site.
    pub fn site_options(&self) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::AllSites)
            .chain(self.sites.iter().cloned().map(SiteSelector::Site))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Four launches: two at `X` (outcomes 1, 0), two at `Y` (outcomes 1, 1).
    pub(crate) fn scenario_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("X", 100.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("X", 500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("Y", 1000.0, Outcome::Success, "FT"),
            LaunchRecord::new("Y", 5000.0, Outcome::Success, "FT"),
        ])
    }

    #[test]
    fn sites_are_discovered_in_first_occurrence_order() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 1.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS LC-40", 2.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC LC-39A", 3.0, Outcome::Success, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 4.0, Outcome::Success, "B4"),
        ]);
        assert_eq!(ds.sites, vec!["KSC LC-39A", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(ds.booster_categories, vec!["FT", "v1.0", "B4"]);
        assert_eq!(discover_sites(&ds.records), ds.sites);
    }

    #[test]
    fn site_options_start_with_the_sentinel() {
        let options = scenario_dataset().site_options();
        assert_eq!(
            options,
            vec![
                SiteSelector::AllSites,
                SiteSelector::site("X"),
                SiteSelector::site("Y"),
            ]
        );
        assert_eq!(options[0].to_string(), "All Sites");
    }

    #[test]
    fn payload_bounds_span_the_dataset() {
        let ds = scenario_dataset();
        assert_eq!(ds.payload_bounds(), (100.0, 5000.0));
        assert_eq!(PayloadRange::full(&ds), PayloadRange::new(100.0, 5000.0));
        assert_eq!(LaunchDataset::default().payload_bounds(), (0.0, 0.0));
    }

    #[test]
    fn malformed_ranges_contain_nothing() {
        assert!(PayloadRange::new(0.0, 10.0).contains(10.0));
        assert!(PayloadRange::new(5.0, 5.0).contains(5.0));
        assert!(!PayloadRange::new(9000.0, 1000.0).contains(5000.0));
        assert!(!PayloadRange::new(f64::NAN, 10.0).contains(1.0));
        assert!(!PayloadRange::new(0.0, f64::INFINITY).contains(1.0));
    }

    #[test]
    fn validate_rejects_broken_tables() {
        assert_eq!(LaunchDataset::default().validate(), Err(DatasetError::Empty));

        let negative = LaunchDataset::from_records(vec![LaunchRecord::new(
            "X",
            -1.0,
            Outcome::Success,
            "FT",
        )]);
        assert!(matches!(
            negative.validate(),
            Err(DatasetError::InvalidPayload { row: 0, .. })
        ));

        let unnamed = LaunchDataset::from_records(vec![LaunchRecord::new(
            " ",
            1.0,
            Outcome::Success,
            "FT",
        )]);
        assert_eq!(unnamed.validate(), Err(DatasetError::MissingSite { row: 0 }));

        assert!(scenario_dataset().validate().is_ok());
    }

    #[test]
    fn outcome_class_conversion() {
        assert_eq!(Outcome::try_from(1), Ok(Outcome::Success));
        assert_eq!(Outcome::try_from(0), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(2), Err(OutcomeError(2)));
        assert_eq!(u8::from(Outcome::Success), 1);
    }
}
