use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{FAILED_COLOR, SUCCESS_COLOR};
use crate::data::aggregate::{outcome_title, OutcomeCounts, FAILED_LABEL, SUCCESS_LABEL};
use crate::data::filter::scatter_title;
use crate::data::model::{LaunchRecord, SiteSelector};
use crate::state::AppState;

/// Arc resolution for a full turn.
const PIE_SEGMENTS: f64 = 96.0;
/// Wedges wider than this are split so every drawn polygon stays convex.
const MAX_WEDGE: f64 = FRAC_PI_2;

// ---------------------------------------------------------------------------
// Outcome summary (pie)
// ---------------------------------------------------------------------------

/// Render the outcome-distribution pie for the current site selection.
pub fn outcome_chart(ui: &mut Ui, state: &AppState) {
    let Some(counts) = state.outcome_counts() else {
        no_dataset(ui);
        return;
    };

    ui.heading(outcome_title(&state.site));
    if counts.is_all_zero() {
        ui.label(RichText::new("No launches to summarise for this selection.").italics());
        return;
    }

    let wedges = pie_wedges(&counts);
    Plot::new("outcome_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = slice_color(state, &wedge.label);
                for points in wedge.polygons() {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(points))
                            .name(&wedge.label)
                            .fill_color(color)
                            .stroke((1.0, Color32::WHITE)),
                    );
                }
                let [x, y] = wedge.label_anchor();
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), wedge.caption())
                        .color(Color32::WHITE),
                );
            }
        });
}

fn slice_color(state: &AppState, label: &str) -> Color32 {
    match (&state.site, label) {
        (SiteSelector::Site(_), SUCCESS_LABEL) => SUCCESS_COLOR,
        (SiteSelector::Site(_), FAILED_LABEL) => FAILED_COLOR,
        _ => state
            .site_colors
            .as_ref()
            .map(|cm| cm.color_for(label))
            .unwrap_or(Color32::LIGHT_BLUE),
    }
}

/// One pie slice as an angular interval, clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
struct Wedge {
    label: String,
    count: usize,
    share: f64,
    start: f64,
    end: f64,
}

fn pie_wedges(counts: &OutcomeCounts) -> Vec<Wedge> {
    let total = counts.total() as f64;
    let mut angle = FRAC_PI_2;
    counts
        .slices()
        .iter()
        .filter(|s| s.count > 0)
        .map(|s| {
            let share = s.count as f64 / total;
            let start = angle;
            angle -= share * TAU;
            Wedge {
                label: s.label.clone(),
                count: s.count,
                share,
                start,
                end: angle,
            }
        })
        .collect()
}

impl Wedge {
    /// Convex polygons (centre + arc) covering the wedge.
    fn polygons(&self) -> Vec<Vec<[f64; 2]>> {
        let sweep = self.start - self.end;
        let pieces = (sweep / MAX_WEDGE - 1e-9).ceil().max(1.0) as usize;
        let piece = sweep / pieces as f64;
        let steps = ((piece / TAU) * PIE_SEGMENTS).ceil().max(2.0) as usize;

        (0..pieces)
            .map(|p| {
                let from = self.start - piece * p as f64;
                std::iter::once([0.0, 0.0])
                    .chain((0..=steps).map(|k| {
                        let a = from - piece * k as f64 / steps as f64;
                        [a.cos(), a.sin()]
                    }))
                    .collect()
            })
            .collect()
    }

    fn label_anchor(&self) -> [f64; 2] {
        let mid = (self.start + self.end) / 2.0;
        let r = if self.share >= 0.999 { 0.0 } else { 0.65 };
        [r * mid.cos(), r * mid.sin()]
    }

    fn caption(&self) -> String {
        format!("{}\n{} ({:.1}%)", self.label, self.count, self.share * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Payload vs. outcome (scatter)
// ---------------------------------------------------------------------------

/// Render the payload-vs-outcome scatter, coloured by booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        no_dataset(ui);
        return;
    }

    ui.heading(scatter_title(&state.site));
    if !state.payload_range.is_well_formed() {
        ui.label(RichText::new("Payload range is empty (min is above max).").italics());
    }

    let launches = state.visible_launches();
    let series = points_by_category(&launches);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state
                    .booster_colors
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// `(payload, class)` points grouped by booster category, categories in
/// first-seen order so the legend is stable.
fn points_by_category<'a>(launches: &[&'a LaunchRecord]) -> Vec<(&'a str, Vec<[f64; 2]>)> {
    let mut series: Vec<(&'a str, Vec<[f64; 2]>)> = Vec::new();
    for &rec in launches {
        let point = [rec.payload_mass_kg, f64::from(rec.outcome.class())];
        match series
            .iter_mut()
            .find(|(c, _)| *c == rec.booster_category.as_str())
        {
            Some((_, pts)) => pts.push(point),
            None => series.push((rec.booster_category.as_str(), vec![point])),
        }
    }
    series
}

fn no_dataset(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a launch table to begin  (File → Open…)");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::model::tests::scenario_dataset;

    #[test]
    fn wedges_cover_a_full_turn() {
        let counts = aggregate(&scenario_dataset(), &SiteSelector::AllSites);
        let wedges = pie_wedges(&counts);
        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].start, FRAC_PI_2);
        assert_eq!(wedges[0].end, wedges[1].start);
        assert!((wedges[1].end - (FRAC_PI_2 - TAU)).abs() < 1e-9);
        assert!((wedges[1].share - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn zero_slices_are_not_drawn() {
        let counts = aggregate(&scenario_dataset(), &SiteSelector::site("Y"));
        let wedges = pie_wedges(&counts);
        assert_eq!(wedges.len(), 1);
        assert_eq!(wedges[0].label, "Success");
        assert_eq!(wedges[0].label_anchor(), [0.0, 0.0]);
        // A full circle is split into quarter-turn pieces.
        assert_eq!(wedges[0].polygons().len(), 4);
    }

    #[test]
    fn scatter_groups_by_category_in_order() {
        let ds = scenario_dataset();
        let launches: Vec<&LaunchRecord> = ds.records.iter().collect();
        let series = points_by_category(&launches);
        let categories: Vec<&str> = series.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, vec!["v1.0", "v1.1", "FT"]);
        assert_eq!(series[2].1, vec![[1000.0, 1.0], [5000.0, 1.0]]);
    }
}
