use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{YEAR_MAX, YEAR_MIN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        ui.label("File → Open data folder…");
        return;
    };

    // Clone the option lists so we can mutate state inside the closures.
    let income_groups = dataset.income_groups.clone();
    let regions = dataset.regions.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Income group");
            sentinel_combo(ui, "income_group", &mut state.filters.income_group, &income_groups);
            ui.add_space(6.0);

            ui.strong("Region");
            sentinel_combo(ui, "region", &mut state.filters.region, &regions);
            ui.add_space(6.0);

            ui.strong("Year");
            ui.add(egui::Slider::new(&mut state.filters.year, YEAR_MIN..=YEAR_MAX));
            ui.add_space(6.0);

            ui.checkbox(&mut state.show_dataset, "Show dataset");
            ui.separator();

            // ---- Comparison country pickers ----
            ui.strong("Compare countries");
            let names = state.views.country_names.clone();
            if names.is_empty() {
                ui.label("No countries match the current filters.");
            } else {
                country_combo(ui, "country_1", "First", &mut state.selection.first, &names);
                country_combo(ui, "country_2", "Second", &mut state.selection.second, &names);
            }
        });

    // Recompute cached views after any widget changes.
    state.refresh_views();
}

/// Dropdown over sorted distinct values with an "All" sentinel on top.
fn sentinel_combo(ui: &mut Ui, id: &str, current: &mut Option<String>, options: &[String]) {
    let selected_text = current.clone().unwrap_or_else(|| "All".to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width() - 8.0)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                *current = None;
            }
            for opt in options {
                if ui
                    .selectable_label(current.as_deref() == Some(opt), opt)
                    .clicked()
                {
                    *current = Some(opt.clone());
                }
            }
        });
}

/// Dropdown over the filtered country-name list.
fn country_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    current: &mut Option<String>,
    names: &[String],
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        let selected_text = current.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected_text)
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui: &mut Ui| {
                for name in names {
                    if ui
                        .selectable_label(current.as_deref() == Some(name), name)
                        .clicked()
                    {
                        *current = Some(name.clone());
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_data_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} countries loaded, {} visible",
                ds.len(),
                state.views.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

/// Let the user pick a directory holding the World Bank CSV pair.
pub fn open_data_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Select the folder with the GDP and metadata CSVs")
        .pick_folder();

    if let Some(dir) = dir {
        state.load_data_dir(&dir);
    }
}
