use eframe::egui::{self, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoints, Points};

use crate::state::AppState;
use iris_explorer::color::{with_opacity, OVERLAY_OPACITY};
use iris_explorer::data::filter::FeaturePair;
use iris_explorer::data::model::{Field, Species};

const CHART_HEIGHT: f32 = 320.0;
const MATRIX_CELL: f32 = 150.0;

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Scatter of the given pair, one series per species.
pub fn scatter_plot(ui: &mut Ui, state: &AppState, pair: FeaturePair) {
    let points = state.view().points(pair);

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label(pair.x().label())
        .y_axis_label(pair.y().label())
        .height(CHART_HEIGHT)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (sp, pts) in points {
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(sp.name())
                        .color(state.color_map.color_for(sp))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Histogram (overlay)
// ---------------------------------------------------------------------------

pub fn histogram_chart(ui: &mut Ui, state: &AppState) {
    let Some(hist) = &state.histogram else {
        ui.label("Histogram unavailable.");
        return;
    };
    let Some(width) = hist.bin_width() else {
        ui.label("No rows match the current selection.");
        return;
    };
    let centers = hist.centers();

    Plot::new("histogram_plot")
        .legend(Legend::default())
        .x_axis_label(hist.field.label())
        .y_axis_label("Count")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (sp, counts) in &hist.counts {
                let bars: Vec<Bar> = centers
                    .iter()
                    .zip(counts)
                    .filter(|(_, c)| **c > 0)
                    .map(|(&x, &c)| Bar::new(x, c as f64).width(width))
                    .collect();
                let color = with_opacity(state.color_map.color_for(*sp), OVERLAY_OPACITY);
                plot_ui.bar_chart(BarChart::new(bars).name(sp.name()).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// One box per species (whiskers at min and max). Species without rows are
/// skipped.
pub fn box_plot(ui: &mut Ui, state: &AppState, field: Field) {
    Plot::new("box_plot")
        .legend(Legend::default())
        .y_axis_label(field.label())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .show_x(false)
        .show(ui, |plot_ui| {
            for (i, sp) in Species::ALL.into_iter().enumerate() {
                let Some(stats) = state.stats_by_species.get(&sp) else {
                    continue;
                };
                let s = stats.field(field);
                let (Some(min), Some(q1), Some(median), Some(q3), Some(max)) =
                    (s.min, s.q1, s.median, s.q3, s.max)
                else {
                    continue;
                };
                let color = state.color_map.color_for(sp);
                let elem = BoxElem::new(i as f64, BoxSpread::new(min, q1, median, q3, max))
                    .name(sp.name())
                    .box_width(0.5)
                    .fill(with_opacity(color, OVERLAY_OPACITY))
                    .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(sp.name()));
            }
        });
}

// ---------------------------------------------------------------------------
// Pairwise scatter matrix
// ---------------------------------------------------------------------------

/// 4×4 grid of small scatter plots; the diagonal carries the field name.
pub fn scatter_matrix(ui: &mut Ui, state: &AppState) {
    let view = state.view();

    egui::Grid::new("scatter_matrix")
        .spacing([4.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            for fy in Field::ALL {
                for fx in Field::ALL {
                    let Ok(pair) = FeaturePair::new(fx, fy) else {
                        ui.allocate_ui(Vec2::splat(MATRIX_CELL), |ui: &mut Ui| {
                            ui.centered_and_justified(|ui: &mut Ui| {
                                ui.strong(fx.label());
                            });
                        });
                        continue;
                    };
                    let points = view.points(pair);
                    Plot::new(format!("matrix_{fx}_{fy}"))
                        .width(MATRIX_CELL)
                        .height(MATRIX_CELL)
                        .show_axes(false)
                        .allow_drag(false)
                        .allow_zoom(false)
                        .allow_scroll(false)
                        .allow_boxed_zoom(false)
                        .show_x(false)
                        .show_y(false)
                        .show(ui, |plot_ui| {
                            for (sp, pts) in points {
                                plot_ui.points(
                                    Points::new(PlotPoints::from(pts))
                                        .color(state.color_map.color_for(sp))
                                        .radius(1.5),
                                );
                            }
                        });
                }
                ui.end_row();
            }
        });
}
