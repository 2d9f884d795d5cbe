use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use iris_explorer::data::filter::FilteredView;
use iris_explorer::data::model::{Field, Record};
use iris_explorer::data::stats::{DescriptiveStats, Summary};

const ROW_HEIGHT: f32 = 18.0;

/// Two decimals, or `n/a` when the statistic is undefined.
pub fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

/// The describe table: one row per statistic, one column per field.
pub fn stats_table(ui: &mut Ui, stats: &DescriptiveStats) {
    let rows = Field::ALL.map(|f| stats.field(f).rows());

    ui.push_id("describe_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(60.0))
            .columns(Column::auto().at_least(110.0), Field::ALL.len())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("");
                });
                for f in Field::ALL {
                    header.col(|ui| {
                        ui.strong(f.column());
                    });
                }
            })
            .body(|mut body| {
                for stat in 0..rows[0].len() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(rows[0][stat].0);
                        });
                        for field_rows in &rows {
                            row.col(|ui| {
                                ui.monospace(fmt_stat(field_rows[stat].1));
                            });
                        }
                    });
                }
            });
    });
}

/// Species and their row counts in the current view, largest first.
pub fn species_counts_table(ui: &mut Ui, summary: &Summary) {
    ui.push_id("species_counts_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(60.0))
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("species");
                });
                header.col(|ui| {
                    ui.strong("count");
                });
            })
            .body(|mut body| {
                for (sp, count) in summary.counts_descending() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(sp.name());
                        });
                        row.col(|ui| {
                            ui.monospace(count.to_string());
                        });
                    });
                }
            });
    });
}

/// Every filtered record, renumbered from zero.
pub fn raw_table(ui: &mut Ui, view: &FilteredView<'_>) {
    let records: Vec<&Record> = view.records().collect();

    ui.push_id("raw_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(300.0)
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(90.0), Field::ALL.len())
            .column(Column::remainder())
            .header(ROW_HEIGHT + 2.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for f in Field::ALL {
                    header.col(|ui| {
                        ui.strong(f.column());
                    });
                }
                header.col(|ui| {
                    ui.strong("species");
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let i = row.index();
                    let rec = records[i];
                    row.col(|ui| {
                        ui.label(i.to_string());
                    });
                    for f in Field::ALL {
                        row.col(|ui| {
                            ui.monospace(format!("{:.1}", rec.value(f)));
                        });
                    }
                    row.col(|ui| {
                        ui.label(rec.species.name());
                    });
                });
            });
    });
}
