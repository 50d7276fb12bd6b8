use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::{generate_palette, GroupColors};
use crate::data::model::all_years;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Income-group distribution (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of country counts per income group for the selected year.
pub fn income_bar_chart(ui: &mut Ui, state: &AppState) {
    let counts = &state.views.income_distribution;
    if counts.is_empty() {
        ui.label("No countries with data for the selected year.");
        return;
    }

    let groups: Vec<String> = counts.keys().cloned().collect();
    let colors = GroupColors::new(&groups);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (group, &count))| {
            Bar::new(i as f64, count as f64)
                .width(0.6)
                .name(group)
                .fill(colors.color_for(group))
        })
        .collect();

    let labels = groups;
    Plot::new("income_distribution")
        .height(240.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Number of countries")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 0.25 && i >= 0.0 && (i as usize) < labels.len() {
                labels[i as usize].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars).element_formatter(Box::new(|bar: &Bar, _: &BarChart| {
                    format!("{}: {} countries", bar.name, bar.value)
                })),
            );
        });
}

// ---------------------------------------------------------------------------
// Two-country trend comparison (line chart)
// ---------------------------------------------------------------------------

/// Dual-line chart of the two selected countries' full 1960–2023 series.
/// Gaps in a series (null years) are simply skipped.
pub fn comparison_chart(ui: &mut Ui, state: &AppState) {
    let Some(cmp) = &state.views.comparison else {
        ui.label(
            RichText::new("Please select two valid countries for comparison.")
                .color(Color32::YELLOW),
        );
        return;
    };

    let line_colors = generate_palette(2);

    Plot::new("country_comparison")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Year")
        .y_axis_label("GDP per capita (current US$)")
        .show(ui, |plot_ui| {
            for (series, color) in [&cmp.first, &cmp.second].into_iter().zip(&line_colors) {
                let points: PlotPoints = all_years()
                    .zip(series.values.iter())
                    .filter_map(|(year, v)| v.map(|v| [year as f64, v]))
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&series.name)
                        .color(*color)
                        .width(1.5),
                );
            }
        });
}
