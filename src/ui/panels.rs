use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::success_rate;
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site and payload controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Records");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Site selector ----
    ui.strong("Launch site");
    let current = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in dataset.site_options() {
                let label = option.to_string();
                if ui.selectable_label(current == option, label).clicked() {
                    state.select_site(option);
                }
            }
        });
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let (min, max) = state.payload_slider_bounds();
    let step = state.payload_step;
    let PayloadRange { mut lo, mut hi } = state.payload_range;

    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min..=max).step_by(step).text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min..=max).step_by(step).text("max"))
        .changed();
    if lo_changed || hi_changed {
        state.set_payload_range(PayloadRange::new(lo, hi));
    }

    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(PayloadRange::full(&dataset));
    }

    let (data_lo, data_hi) = dataset.payload_bounds();
    ui.label(
        RichText::new(format!("dataset: {data_lo:.0} – {data_hi:.0} kg"))
            .small()
            .weak(),
    );
    ui.separator();

    // ---- Booster category legend ----
    if let Some(cm) = &state.booster_colors {
        ui.strong(&cm.dimension);
        for (label, color) in cm.legend_entries() {
            ui.label(RichText::new(format!("● {label}")).color(color));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in view",
                ds.len(),
                state.visible_launches().len()
            ));
        }

        if let Some(rate) = state.outcome_counts().as_ref().and_then(success_rate) {
            ui.separator();
            ui.label(format!("{}: {:.0}% success", state.site, rate * 100.0));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_path(state, &path);
    }
}

/// Load a launch table into `state`, reporting failures in the status line.
pub fn load_path(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} launches from {} with sites {:?}",
                dataset.len(),
                path.display(),
                dataset.sites
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_path_reports_failure_then_clears_it() {
        let mut state = AppState::default();
        load_path(&mut state, Path::new("does-not-exist.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));

        let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        csv.write_all(b"Launch Site,class,Payload Mass (kg),Booster Version Category\nX,1,10.0,FT\n")
            .unwrap();
        load_path(&mut state, csv.path());
        assert_eq!(state.dataset.as_ref().map(|ds| ds.len()), Some(1));
        assert!(state.status_message.is_none());
    }
}
