use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::all_years;
use crate::data::views::RankedCountry;
use crate::state::AppState;
use crate::ui::format_gdp;

// ---------------------------------------------------------------------------
// Top / bottom ranking tables
// ---------------------------------------------------------------------------

/// Render the top-5 and bottom-5 tables side by side.
pub fn ranking_tables(ui: &mut Ui, state: &AppState) {
    let year = state.filters.year;
    let rankings = &state.views.rankings;

    if rankings.top.is_empty() {
        ui.label("No countries with data for the selected year.");
        return;
    }

    ui.columns(2, |cols| {
        cols[0].strong("Top 5 countries");
        ranked_table(&mut cols[0], "top_ranking", &rankings.top, year);
        cols[1].strong("Bottom 5 countries");
        ranked_table(&mut cols[1], "bottom_ranking", &rankings.bottom, year);
    });
}

fn ranked_table(ui: &mut Ui, id: &str, rows: &[RankedCountry], year: u16) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(40.0))
            .column(Column::remainder())
            .column(Column::auto().at_least(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Rank");
                });
                header.col(|ui| {
                    ui.strong("Country");
                });
                header.col(|ui| {
                    ui.strong(year.to_string());
                });
            })
            .body(|mut body| {
                for row in rows {
                    body.row(18.0, |mut r| {
                        r.col(|ui| {
                            ui.label(row.rank.to_string());
                        });
                        r.col(|ui| {
                            ui.label(&row.name);
                        });
                        r.col(|ui| {
                            ui.label(format_gdp(row.value));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Raw dataset table (toggle)
// ---------------------------------------------------------------------------

/// The filtered merged table: country name plus every year column. Shown only
/// when the sidebar checkbox is on.
pub fn dataset_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let indices = &state.views.visible_indices;

    ui.push_id("dataset_table", |ui: &mut Ui| {
        ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(320.0)
                .column(Column::auto().at_least(160.0))
                .columns(Column::auto().at_least(64.0), all_years().count())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Country Name");
                    });
                    for year in all_years() {
                        header.col(|ui| {
                            ui.strong(year.to_string());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, indices.len(), |mut row| {
                        let country = &dataset.countries[indices[row.index()]];
                        row.col(|ui| {
                            ui.label(&country.name);
                        });
                        for value in &country.values {
                            row.col(|ui| {
                                match value {
                                    Some(v) => ui.label(format!("{v:.1}")),
                                    None => ui.label("–"),
                                };
                            });
                        }
                    });
                });
        });
    });
}
