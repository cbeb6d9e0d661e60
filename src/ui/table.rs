use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Render the launches currently passing both controls, in dataset order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        return;
    }
    let launches = state.visible_launches();
    ui.strong(format!("Launches in view ({})", launches.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in [
                "Flight",
                "Launch Site",
                "Payload (kg)",
                "Outcome",
                "Booster Version",
                "Category",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, launches.len(), |mut row| {
                let rec = launches[row.index()];
                row.col(|ui| {
                    ui.label(
                        rec.flight_number
                            .map(|n| n.to_string())
                            .unwrap_or_default(),
                    );
                });
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(if rec.outcome.is_success() { "Success" } else { "Failed" });
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(&rec.booster_category);
                });
            });
        });
}
