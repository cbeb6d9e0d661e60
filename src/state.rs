use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{aggregate, OutcomeCounts};
use crate::data::filter::filter_launches;
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only the dataset and the two control values are stored; both derived
/// views are recomputed from them on demand.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded). Read-only once set.
    pub dataset: Option<Arc<LaunchDataset>>,

    /// Site dropdown value.
    pub site: SiteSelector,

    /// Payload slider value.
    pub payload_range: PayloadRange,

    /// Payload slider step in kilograms.
    pub payload_step: f64,

    /// Booster category colours for the scatter view.
    pub booster_colors: Option<ColorMap>,

    /// Site colours for the all-sites outcome view.
    pub site_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            site: SiteSelector::AllSites,
            payload_range: PayloadRange::new(0.0, 0.0),
            payload_step: 1000.0,
            booster_colors: None,
            site_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn with_payload_step(payload_step: f64) -> Self {
        Self {
            payload_step,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset and reset both controls.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site = SiteSelector::AllSites;
        self.payload_range = PayloadRange::full(&dataset);
        self.booster_colors = Some(ColorMap::new(
            "Booster Version Category",
            &dataset.booster_categories,
        ));
        self.site_colors = Some(ColorMap::new("Launch Site", &dataset.sites));

        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
    }

    pub fn select_site(&mut self, site: SiteSelector) {
        log::debug!("site selector -> {site}");
        self.site = site;
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        self.payload_range = range;
    }

    /// Slider extent: zero up to the dataset maximum rounded up to a step.
    pub fn payload_slider_bounds(&self) -> (f64, f64) {
        let max = self
            .dataset
            .as_ref()
            .map(|ds| ds.payload_bounds().1)
            .unwrap_or(0.0);
        let step = self.payload_step;
        (0.0, (max / step).ceil().max(1.0) * step)
    }

    /// Outcome summary for the current site selection.
    pub fn outcome_counts(&self) -> Option<OutcomeCounts> {
        self.dataset.as_ref().map(|ds| aggregate(ds, &self.site))
    }

    /// Launches passing the current site and payload controls.
    pub fn visible_launches(&self) -> Vec<&LaunchRecord> {
        match &self.dataset {
            Some(ds) => filter_launches(ds, &self.site, self.payload_range),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::scenario_dataset;

    #[test]
    fn loading_resets_controls() {
        let mut state = AppState::default();
        state.select_site(SiteSelector::site("Z"));
        state.set_payload_range(PayloadRange::new(9000.0, 1000.0));

        state.set_dataset(scenario_dataset());
        assert_eq!(state.site, SiteSelector::AllSites);
        assert_eq!(state.payload_range, PayloadRange::new(100.0, 5000.0));
        assert_eq!(state.visible_launches().len(), 4);
        assert!(state.booster_colors.is_some());
    }

    #[test]
    fn views_follow_control_changes() {
        let mut state = AppState::default();
        assert!(state.outcome_counts().is_none());
        assert!(state.visible_launches().is_empty());

        state.set_dataset(scenario_dataset());
        state.select_site(SiteSelector::site("Y"));
        state.set_payload_range(PayloadRange::new(0.0, 1000.0));

        let visible = state.visible_launches();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].payload_mass_kg, 1000.0);

        let counts = state.outcome_counts().unwrap();
        assert_eq!(counts.get("Success"), Some(2));
        assert_eq!(counts.get("Failed"), Some(0));
    }

    #[test]
    fn slider_bounds_round_up_to_step() {
        let mut state = AppState::with_payload_step(1000.0);
        assert_eq!(state.payload_slider_bounds(), (0.0, 1000.0));
        state.set_dataset(scenario_dataset());
        assert_eq!(state.payload_slider_bounds(), (0.0, 5000.0));

        state.payload_step = 2000.0;
        assert_eq!(state.payload_slider_bounds(), (0.0, 6000.0));
    }
}
