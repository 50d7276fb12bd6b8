use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Sense, Ui};

use crate::color::ValueScale;
use crate::state::AppState;
use crate::ui::format_gdp;

// ---------------------------------------------------------------------------
// World map panel (tile-grid choropleth)
// ---------------------------------------------------------------------------

const TILE_SIZE: egui::Vec2 = egui::vec2(46.0, 26.0);

/// Render the filtered countries as a grid of tiles keyed by ISO3 code,
/// shaded by the selected year's value. Countries with no value for the year
/// get the null colour; hover shows name and value.
pub fn map_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let year = state.filters.year;

    let scale = ValueScale::fit(
        state
            .views
            .visible_indices
            .iter()
            .filter_map(|&i| dataset.countries[i].value_for(year)),
    );

    if state.views.visible_indices.is_empty() {
        ui.label("No countries match the current filters.");
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing = egui::vec2(3.0, 3.0);

        for &idx in &state.views.visible_indices {
            let country = &dataset.countries[idx];
            let value = country.value_for(year);
            let color = match (value, &scale) {
                (Some(v), Some(scale)) => scale.color_for(v),
                _ => ValueScale::null_color(),
            };

            let (rect, response) = ui.allocate_exact_size(TILE_SIZE, Sense::hover());
            if ui.is_rect_visible(rect) {
                let painter = ui.painter();
                painter.rect_filled(rect, CornerRadius::same(3), color);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &country.code,
                    FontId::proportional(11.0),
                    contrast_color(color),
                );
            }

            let hover = match value {
                Some(v) => format!("{} — {} ({year})", country.name, format_gdp(v)),
                None => format!("{} — no data for {year}", country.name),
            };
            response.on_hover_text(hover);
        }
    });

    if let Some(scale) = scale {
        ui.add_space(6.0);
        legend(ui, &scale);
    }
}

/// Low-to-high colour stops with their values.
fn legend(ui: &mut Ui, scale: &ValueScale) {
    ui.horizontal(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing = egui::vec2(4.0, 0.0);
        for (value, color) in scale.legend_stops(6) {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), Sense::hover());
            ui.painter().rect_filled(rect, CornerRadius::same(2), color);
            ui.label(format_gdp(value));
        }
    });
}

/// Black or white, whichever reads better on the tile colour.
fn contrast_color(bg: Color32) -> Color32 {
    let luma = 299 * bg.r() as u32 + 587 * bg.g() as u32 + 114 * bg.b() as u32;
    if luma > 128_000 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
