use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, map, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GdpAtlasApp {
    pub state: AppState,
}

impl Default for GdpAtlasApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for GdpAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the single-page dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui);
        });
    }
}

impl GdpAtlasApp {
    fn central_panel(&mut self, ui: &mut Ui) {
        if self.state.dataset.is_none() {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a World Bank data folder to begin  (File → Open data folder…)");
            });
            return;
        }
        let year = self.state.filters.year;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                ui.heading(format!("World Map of GDP per Capita ({year})"));
                map::map_panel(ui, &self.state);
                ui.separator();

                ui.heading(format!("Top and Bottom Countries by GDP ({year})"));
                tables::ranking_tables(ui, &self.state);
                ui.separator();

                ui.heading(format!("Country Distribution by Income Group in {year}"));
                charts::income_bar_chart(ui, &self.state);
                ui.separator();

                ui.heading("Compare GDP Trends for Two Countries");
                charts::comparison_chart(ui, &self.state);

                if self.state.show_dataset {
                    ui.separator();
                    ui.heading("Dataset (GDP per capita, current US$)");
                    tables::dataset_table(ui, &self.state);
                }
            });
    }
}
