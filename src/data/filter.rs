use super::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Payload filter: site selector + payload range → ordered subset
// ---------------------------------------------------------------------------

/// Return indices of launches that pass both controls, in dataset order.
///
/// A launch passes when:
/// * its payload lies in `range` (inclusive both ends; a malformed range
///   passes nothing), and
/// * the selector is `AllSites` or names the launch's site.
///
/// A selector naming an unknown site yields no indices.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelector,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .filter(|(_, rec)| site.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

/// Records for the payload-vs-outcome view, in dataset order.
pub fn filter_launches<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelector,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    filtered_indices(dataset, site, range)
        .into_iter()
        .map(|i| &dataset.records[i])
        .collect()
}

/// Chart title for the payload-vs-outcome view.
pub fn scatter_title(site: &SiteSelector) -> String {
    format!("Payload vs. Launch Success ({site})")
}
