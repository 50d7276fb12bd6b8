use std::path::{Path, PathBuf};

use crate::data::filter::FilterState;
use crate::data::loader;
use crate::data::model::GdpDataset;
use crate::data::views::{compute_views, CountrySelection, Views};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Merged dataset (None until a data directory loads successfully).
    pub dataset: Option<GdpDataset>,

    /// Directory the current dataset was loaded from.
    pub data_dir: PathBuf,

    /// Sidebar filter selections.
    pub filters: FilterState,

    /// Comparison-chart country selections.
    pub selection: CountrySelection,

    /// Whether the raw dataset table is shown.
    pub show_dataset: bool,

    /// Derived views for the current selections (cached).
    pub views: Views,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Selections the cached views were computed for.
    computed_for: Option<(FilterState, CountrySelection)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            data_dir: PathBuf::from("data"),
            filters: FilterState::default(),
            selection: CountrySelection::default(),
            show_dataset: false,
            views: Views::default(),
            status_message: None,
            computed_for: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset all selections.
    pub fn set_dataset(&mut self, dataset: GdpDataset) {
        self.dataset = Some(dataset);
        self.filters = FilterState::default();
        self.selection = CountrySelection::default();
        self.computed_for = None;
        self.status_message = None;
        self.refresh_views();
    }

    /// Load the two CSVs from `dir`, replacing the current dataset on success
    /// and surfacing a status message on failure.
    pub fn load_data_dir(&mut self, dir: &Path) {
        match loader::load_dir(dir) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} countries ({} income groups, {} regions)",
                    dataset.len(),
                    dataset.income_groups.len(),
                    dataset.regions.len()
                );
                self.data_dir = dir.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load data from {}: {e:#}", dir.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute the cached views when the selections changed since the last
    /// computation. Cheap to call every frame.
    pub fn refresh_views(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        self.filters.clamp_year();

        let key = (self.filters.clone(), self.selection.clone());
        if self.computed_for.as_ref() == Some(&key) {
            return;
        }
        self.views = compute_views(dataset, &self.filters, &self.selection);

        // Comparison dropdowns default to the first filtered country.
        if self.selection.first.is_none() || self.selection.second.is_none() {
            if let Some(first) = self.views.country_names.first().cloned() {
                self.selection.first.get_or_insert_with(|| first.clone());
                self.selection.second.get_or_insert(first);
                self.views = compute_views(dataset, &self.filters, &self.selection);
            }
        }
        self.computed_for = Some((self.filters.clone(), self.selection.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CountryRecord, GdpDataset, N_YEARS, YEAR_MAX};

    fn tiny_dataset() -> GdpDataset {
        let record = |name: &str, code: &str| CountryRecord {
            name: name.into(),
            code: code.into(),
            income_group: Some("High income".into()),
            region: Some("Europe".into()),
            values: vec![Some(1.0); N_YEARS],
        };
        GdpDataset::from_countries(vec![record("Utopia", "UTO"), record("Erewhon", "ERE")])
    }

    #[test]
    fn set_dataset_defaults_comparison_to_first_country() {
        let mut state = AppState::default();
        state.set_dataset(tiny_dataset());
        assert_eq!(state.selection.first.as_deref(), Some("Utopia"));
        assert_eq!(state.selection.second.as_deref(), Some("Utopia"));
        assert!(state.views.comparison.is_some());
        assert_eq!(state.filters.year, YEAR_MAX);
    }

    #[test]
    fn refresh_is_a_no_op_until_selections_change() {
        let mut state = AppState::default();
        state.set_dataset(tiny_dataset());
        let before = state.views.visible_indices.clone();
        state.refresh_views();
        assert_eq!(state.views.visible_indices, before);

        state.filters.income_group = Some("High income".into());
        state.refresh_views();
        assert_eq!(state.views.visible_indices.len(), 2);

        state.filters.income_group = Some("Low income".into());
        state.refresh_views();
        assert!(state.views.visible_indices.is_empty());
    }

    #[test]
    fn out_of_range_year_is_clamped() {
        let mut state = AppState::default();
        state.set_dataset(tiny_dataset());
        state.filters.year = 3000;
        state.refresh_views();
        assert_eq!(state.filters.year, YEAR_MAX);
    }
}
