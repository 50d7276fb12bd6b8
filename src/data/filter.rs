use super::model::{GdpDataset, YEAR_MAX, YEAR_MIN};

// ---------------------------------------------------------------------------
// Sidebar filter predicate
// ---------------------------------------------------------------------------

/// Sidebar selections. `None` for a categorical field is the "All" sentinel –
/// no constraint on that column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub income_group: Option<String>,
    pub region: Option<String>,
    /// Year under inspection, always within `YEAR_MIN..=YEAR_MAX`.
    pub year: u16,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            income_group: None,
            region: None,
            year: YEAR_MAX,
        }
    }
}

impl FilterState {
    /// Clamp the year back into the table's range after slider interaction.
    pub fn clamp_year(&mut self) {
        self.year = self.year.clamp(YEAR_MIN, YEAR_MAX);
    }
}

/// Return indices of countries passing the active filters, preserving source
/// row order.
///
/// A row passes a categorical filter when:
/// * the selection is `None` ("All") → no constraint
/// * the row's value equals the selected value (null never equals anything)
///
/// Conjunctive across columns; idempotent by construction (pure equality
/// predicate over immutable rows).
pub fn filtered_indices(dataset: &GdpDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .countries
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            if let Some(group) = &filters.income_group {
                if c.income_group.as_ref() != Some(group) {
                    return false;
                }
            }
            if let Some(region) = &filters.region {
                if c.region.as_ref() != Some(region) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

/// Country names of the filtered subset, first occurrence order, duplicates
/// and empty names dropped. Feeds the comparison dropdowns.
pub fn filtered_country_names(dataset: &GdpDataset, indices: &[usize]) -> Vec<String> {
    let mut names = Vec::with_capacity(indices.len());
    for &i in indices {
        let name = &dataset.countries[i].name;
        if !name.is_empty() && !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
