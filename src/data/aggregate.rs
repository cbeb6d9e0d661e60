use std::collections::HashMap;

use super::model::{LaunchDataset, Outcome, SiteSelector};

pub const SUCCESS_LABEL: &str = "Success";
pub const FAILED_LABEL: &str = "Failed";

// ---------------------------------------------------------------------------
// OutcomeCounts – ordered label → count mapping
// ---------------------------------------------------------------------------

/// One slice of the outcome summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeSlice {
    pub label: String,
    pub count: usize,
}

/// Category label → count, in first-seen order of the grouping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    slices: Vec<OutcomeSlice>,
}

impl OutcomeCounts {
    fn push(&mut self, label: impl Into<String>, count: usize) {
        self.slices.push(OutcomeSlice {
            label: label.into(),
            count,
        });
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.slices
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.count)
    }

    pub fn slices(&self) -> &[OutcomeSlice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// True when there is nothing to draw (no slices, or every slice is zero).
    pub fn is_all_zero(&self) -> bool {
        self.total() == 0
    }
}

// ---------------------------------------------------------------------------
// Outcome aggregation
// ---------------------------------------------------------------------------

/// Summarise launch outcomes for the selected site.
///
/// * `AllSites` groups by site and reports each site's number of successes,
///   one entry per site in first-occurrence order.
/// * `Site(name)` reports `Success` then `Failed` counts for that site, both
///   present even when zero (including for a site absent from the dataset).
pub fn aggregate(dataset: &LaunchDataset, site: &SiteSelector) -> OutcomeCounts {
    match site {
        SiteSelector::AllSites => successes_by_site(dataset),
        SiteSelector::Site(name) => outcomes_for_site(dataset, name),
    }
}

fn successes_by_site(dataset: &LaunchDataset) -> OutcomeCounts {
    let mut counts = OutcomeCounts::default();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for rec in &dataset.records {
        let idx = *slot.entry(rec.site.as_str()).or_insert_with(|| {
            counts.push(rec.site.as_str(), 0);
            counts.slices.len() - 1
        });
        counts.slices[idx].count += usize::from(rec.outcome.class());
    }
    counts
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> OutcomeCounts {
    let (success, failed) = dataset
        .records
        .iter()
        .filter(|r| r.site == site)
        .fold((0, 0), |(s, f), r| match r.outcome {
            Outcome::Success => (s + 1, f),
            Outcome::Failure => (s, f + 1),
        });

    let mut counts = OutcomeCounts::default();
    counts.push(SUCCESS_LABEL, success);
    counts.push(FAILED_LABEL, failed);
    counts
}

/// Chart title for the outcome summary view.
pub fn outcome_title(site: &SiteSelector) -> String {
    format!("Total Launches for {site}")
}

/// Share of successful launches for a single-site summary, if defined.
pub fn success_rate(counts: &OutcomeCounts) -> Option<f64> {
    let success = counts.get(SUCCESS_LABEL)?;
    let failed = counts.get(FAILED_LABEL)?;
    let total = success + failed;
    (total > 0).then(|| success as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::scenario_dataset;
    use crate::data::model::LaunchRecord;

    fn pairs(counts: &OutcomeCounts) -> Vec<(&str, usize)> {
        counts
            .slices()
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect()
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let counts = aggregate(&scenario_dataset(), &SiteSelector::AllSites);
        assert_eq!(pairs(&counts), vec![("X", 1), ("Y", 2)]);
    }

    #[test]
    fn single_site_reports_success_then_failed() {
        let counts = aggregate(&scenario_dataset(), &SiteSelector::site("X"));
        assert_eq!(pairs(&counts), vec![("Success", 1), ("Failed", 1)]);

        let counts = aggregate(&scenario_dataset(), &SiteSelector::site("Y"));
        assert_eq!(pairs(&counts), vec![("Success", 2), ("Failed", 0)]);
    }

    #[test]
    fn unknown_site_is_all_zero() {
        let counts = aggregate(&scenario_dataset(), &SiteSelector::site("Z"));
        assert_eq!(pairs(&counts), vec![("Success", 0), ("Failed", 0)]);
        assert!(counts.is_all_zero());
        assert_eq!(success_rate(&counts), None);
    }

    #[test]
    fn empty_dataset_degenerates() {
        let empty = LaunchDataset::default();
        assert!(aggregate(&empty, &SiteSelector::AllSites).is_empty());
        assert!(aggregate(&empty, &SiteSelector::site("X")).is_all_zero());
    }

    #[test]
    fn site_with_no_successes_keeps_its_entry() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 1.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 2.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 3.0, Outcome::Failure, "FT"),
        ]);
        let counts = aggregate(&ds, &SiteSelector::AllSites);
        assert_eq!(pairs(&counts), vec![("A", 0), ("B", 1)]);
    }

    #[test]
    fn counts_are_bounded_by_site_totals() {
        let ds = LaunchDataset::from_records(
            (0..30)
                .map(|i| {
                    let site = ["S1", "S2", "S3", "S4"][i % 4];
                    let outcome = if i % 3 == 0 { Outcome::Failure } else { Outcome::Success };
                    LaunchRecord::new(site, i as f64 * 250.0, outcome, "B5")
                })
                .collect(),
        );

        let all = aggregate(&ds, &SiteSelector::AllSites);
        assert_eq!(all, aggregate(&ds, &SiteSelector::AllSites));
        assert_eq!(all.len(), ds.sites.len());
        for (slice, site) in all.slices().iter().zip(&ds.sites) {
            assert_eq!(&slice.label, site);
            let site_total = ds.records.iter().filter(|r| &r.site == site).count();
            assert!(slice.count <= site_total);
        }

        for site in &ds.sites {
            let counts = aggregate(&ds, &SiteSelector::site(site.as_str()));
            let site_total = ds.records.iter().filter(|r| &r.site == site).count();
            assert_eq!(counts.total(), site_total);
            assert_eq!(counts, aggregate(&ds, &SiteSelector::site(site.as_str())));
        }
    }

    #[test]
    fn titles_and_rates() {
        assert_eq!(
            outcome_title(&SiteSelector::AllSites),
            "Total Launches for All Sites"
        );
        assert_eq!(outcome_title(&SiteSelector::site("X")), "Total Launches for X");

        let counts = aggregate(&scenario_dataset(), &SiteSelector::site("X"));
        assert_eq!(success_rate(&counts), Some(0.5));
    }
}
