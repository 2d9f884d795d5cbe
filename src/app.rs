use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, summary};
use iris_explorer::config::DashboardVariant;
use iris_explorer::data::filter::FeaturePair;

const FOOTER: &str = "Najwa Mahmood | Bachelor of Computer Science";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct IrisApp {
    pub state: AppState,
}

impl IrisApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for IrisApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: data selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, summary ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard(ui, &self.state);
                });
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    panels::metrics_row(ui, state);
    ui.separator();

    egui::CollapsingHeader::new("Visualisations")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if let Some(pair) = state.plotted_pair() {
                ui.heading(format!("Scatter Plot: {} vs {}", pair.x().label(), pair.y().label()));
                about(
                    ui,
                    "About this scatter plot",
                    &scatter_caption(pair),
                );
                plot::scatter_plot(ui, state, pair);
            }
            match state.config.variant {
                DashboardVariant::RangeFilter => {
                    ui.heading("Histogram: Sepal Length Distribution");
                    about(
                        ui,
                        "About this histogram",
                        "This histogram shows how sepal length values are distributed \
                         within the filtered dataset.",
                    );
                    plot::histogram_chart(ui, state);
                }
                DashboardVariant::FeatureSelection => {
                    ui.heading(format!("Box Plot: {}", state.feature_x.label()));
                    plot::box_plot(ui, state, state.feature_x);
                    ui.heading("Pairwise Scatter Matrix");
                    plot::scatter_matrix(ui, state);
                }
            }
        });

    egui::CollapsingHeader::new("Data Summary")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.heading("Summary of Data");
            summary::stats_table(ui, &state.stats);
            ui.add_space(8.0);
            ui.strong("Species Counts");
            summary::species_counts_table(ui, &state.summary);
            if state.show_raw {
                ui.add_space(8.0);
                ui.heading("Filtered Raw Data");
                summary::raw_table(ui, &state.view());
            }
        });

    ui.separator();
    ui.label(RichText::new(FOOTER).small().weak());
}

fn scatter_caption(pair: FeaturePair) -> String {
    format!(
        "This visual compares {} and {} across the Iris species.",
        pair.x().label(),
        pair.y().label()
    )
}

/// Collapsed explanation under a chart heading.
fn about(ui: &mut Ui, title: &str, text: &str) {
    egui::CollapsingHeader::new(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(text);
        });
}
