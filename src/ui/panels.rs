use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::state::{AppState, RANGE_FIELD};
use crate::ui::summary::fmt_stat;
use iris_explorer::config::DashboardVariant;
use iris_explorer::data::model::{Field, Species};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Selection");
    ui.separator();

    // ---- Species multi-select ----
    let n_selected = state.selected_species.len();
    ui.strong(format!("Species  ({n_selected}/{})", Species::ALL.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all();
        }
        if ui.small_button("None").clicked() {
            state.select_none();
        }
    });
    for sp in Species::ALL {
        let mut checked = state.selected_species.contains(&sp);
        let text = RichText::new(sp.name()).color(state.color_map.color_for(sp));
        if ui.checkbox(&mut checked, text).changed() {
            state.toggle_species(sp);
        }
    }
    ui.separator();

    match state.config.variant {
        DashboardVariant::RangeFilter => range_sliders(ui, state),
        DashboardVariant::FeatureSelection => feature_pickers(ui, state),
    }
    ui.separator();

    ui.checkbox(&mut state.show_raw, "Show raw data table");
}

/// Two sliders whose limits keep `min <= max`.
fn range_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong(format!("{} range", RANGE_FIELD.label()));
    let (lo_bound, hi_bound) = state.range_bounds;
    let (mut lo, mut hi) = state.range;

    let lo_changed = ui
        .add(Slider::new(&mut lo, lo_bound..=hi).text("min").fixed_decimals(1))
        .changed();
    let hi_changed = ui
        .add(Slider::new(&mut hi, lo..=hi_bound).text("max").fixed_decimals(1))
        .changed();

    if lo_changed || hi_changed {
        state.set_range(lo, hi);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn feature_pickers(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Features to compare");
    feature_combo(ui, state, Axis::X);
    feature_combo(ui, state, Axis::Y);
}

fn feature_combo(ui: &mut Ui, state: &mut AppState, axis: Axis) {
    let (id, label, current) = match axis {
        Axis::X => ("feature_x", "X axis", state.feature_x),
        Axis::Y => ("feature_y", "Y axis", state.feature_y),
    };
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(current.label())
            .show_ui(ui, |ui: &mut Ui| {
                for f in Field::ALL {
                    if ui.selectable_label(current == f, f.label()).clicked() && f != current {
                        match axis {
                            Axis::X => state.set_feature_x(f),
                            Axis::Y => state.set_feature_y(f),
                        }
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Iris Data Visualisation Dashboard");
        ui.separator();
        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.summary.row_count
        ));
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metrics row
// ---------------------------------------------------------------------------

/// Filtered row count and the two headline means.
pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Filtered Rows", summary.row_count.to_string());
        metric(
            &mut cols[1],
            "Average Sepal Length (cm)",
            fmt_stat(summary.mean(Field::SepalLength)),
        );
        metric(
            &mut cols[2],
            "Average Petal Length (cm)",
            fmt_stat(summary.mean(Field::PetalLength)),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}
