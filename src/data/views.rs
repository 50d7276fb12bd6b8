use std::collections::BTreeMap;

use super::filter::{filtered_country_names, filtered_indices, FilterState};
use super::model::{CountryRecord, GdpDataset};

/// Rows shown in each ranking table.
pub const RANKING_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Ranking view
// ---------------------------------------------------------------------------

/// One row of a top/bottom table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCountry {
    /// 1-based position within its table.
    pub rank: usize,
    pub name: String,
    pub value: f64,
}

/// Top-N and bottom-N countries by value for the selected year.
#[derive(Debug, Clone, Default)]
pub struct RankingView {
    pub top: Vec<RankedCountry>,
    pub bottom: Vec<RankedCountry>,
}

/// Rank the filtered subset for `year`, ignoring null values. Both sorts are
/// stable, so ties keep source row order (the deterministic tie-break pandas
/// leaves to library internals). Tables hold `min(n, non-null rows)` entries.
pub fn rankings(dataset: &GdpDataset, indices: &[usize], year: u16, n: usize) -> RankingView {
    let mut candidates: Vec<(&CountryRecord, f64)> = indices
        .iter()
        .filter_map(|&i| {
            let c = &dataset.countries[i];
            c.value_for(year).map(|v| (c, v))
        })
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top = take_ranked(&candidates, n);
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
    let bottom = take_ranked(&candidates, n);

    RankingView { top, bottom }
}

fn take_ranked(sorted: &[(&CountryRecord, f64)], n: usize) -> Vec<RankedCountry> {
    sorted
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, (c, v))| RankedCountry {
            rank: i + 1,
            name: c.name.clone(),
            value: *v,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Income-group distribution
// ---------------------------------------------------------------------------

/// Count countries per income group among the filtered rows, counting only
/// rows with a value for `year`. Null income groups and zero-count groups are
/// omitted (group-by-count semantics, not zero-filled).
pub fn income_distribution(
    dataset: &GdpDataset,
    indices: &[usize],
    year: u16,
) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &i in indices {
        let c = &dataset.countries[i];
        if let (Some(group), Some(_)) = (&c.income_group, c.value_for(year)) {
            *counts.entry(group.clone()).or_default() += 1;
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Two-country comparison
// ---------------------------------------------------------------------------

/// One country's full year series for the trend chart.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Paired series for the comparison chart. Selecting the same country twice is
/// valid and yields two identical series.
#[derive(Debug, Clone)]
pub struct ComparisonSeries {
    pub first: CountrySeries,
    pub second: CountrySeries,
}

/// Look the two names up against the *unfiltered* dataset (first match per
/// name) and extract full 1960–2023 vectors. `None` when either name matches
/// nothing – the UI shows a warning instead of a chart.
pub fn comparison(dataset: &GdpDataset, first: &str, second: &str) -> Option<ComparisonSeries> {
    let extract = |name: &str| {
        dataset.find_by_name(name).map(|c| CountrySeries {
            name: c.name.clone(),
            values: c.values.clone(),
        })
    };
    Some(ComparisonSeries {
        first: extract(first)?,
        second: extract(second)?,
    })
}

// ---------------------------------------------------------------------------
// Pure per-interaction recomputation
// ---------------------------------------------------------------------------

/// Comparison dropdown selections; unset until a dataset is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySelection {
    pub first: Option<String>,
    pub second: Option<String>,
}

/// Everything the UI renders for one combination of selections.
#[derive(Debug, Clone, Default)]
pub struct Views {
    /// Indices into the dataset passing the sidebar filters (drives the map
    /// panel and the dataset table).
    pub visible_indices: Vec<usize>,
    /// Country-name options for the comparison dropdowns.
    pub country_names: Vec<String>,
    pub rankings: RankingView,
    pub income_distribution: BTreeMap<String, usize>,
    pub comparison: Option<ComparisonSeries>,
}

/// The whole pipeline as one pure function: merged table × selections → views.
/// Recomputed when a selection changes; the dataset itself is never mutated.
pub fn compute_views(
    dataset: &GdpDataset,
    filters: &FilterState,
    selection: &CountrySelection,
) -> Views {
    let visible_indices = filtered_indices(dataset, filters);
    let country_names = filtered_country_names(dataset, &visible_indices);
    let rankings = rankings(dataset, &visible_indices, filters.year, RANKING_SIZE);
    let income_distribution = income_distribution(dataset, &visible_indices, filters.year);

    let comparison = match (&selection.first, &selection.second) {
        (Some(a), Some(b)) => comparison(dataset, a, b),
        _ => None,
    };

    Views {
        visible_indices,
        country_names,
        rankings,
        income_distribution,
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{year_index, N_YEARS, YEAR_MAX};

    fn record(
        name: &str,
        code: &str,
        group: Option<&str>,
        value_2023: Option<f64>,
    ) -> CountryRecord {
        let mut values = vec![None; N_YEARS];
        values[year_index(2023).unwrap()] = value_2023;
        CountryRecord {
            name: name.into(),
            code: code.into(),
            income_group: group.map(String::from),
            region: Some("Testland".into()),
            values,
        }
    }

    fn dataset_with_values(values: &[f64]) -> GdpDataset {
        GdpDataset::from_countries(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| record(&format!("Country {i}"), "XXX", Some("Mid"), Some(v)))
                .collect(),
        )
    }

    fn all_indices(ds: &GdpDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn top_and_bottom_bound_all_other_values() {
        let values = [9.0, 3.0, 7.0, 1.0, 5.0, 8.0, 2.0, 6.0, 4.0, 10.0, 0.5, 5.5];
        let ds = dataset_with_values(&values);
        let view = rankings(&ds, &all_indices(&ds), 2023, RANKING_SIZE);

        assert_eq!(view.top.len(), 5);
        assert_eq!(view.bottom.len(), 5);
        let min_top = view.top.iter().map(|r| r.value).fold(f64::INFINITY, f64::min);
        let max_bottom = view
            .bottom
            .iter()
            .map(|r| r.value)
            .fold(f64::NEG_INFINITY, f64::max);
        for &v in &values {
            assert!(v <= min_top || view.top.iter().any(|r| r.value == v));
            assert!(v >= max_bottom || view.bottom.iter().any(|r| r.value == v));
        }

        // >= 10 non-null rows: the two tables are disjoint
        let top_names: Vec<_> = view.top.iter().map(|r| &r.name).collect();
        assert!(view.bottom.iter().all(|r| !top_names.contains(&&r.name)));
    }

    #[test]
    fn ranks_are_dense_and_sorted() {
        let ds = dataset_with_values(&[2.0, 9.0, 4.0]);
        let view = rankings(&ds, &all_indices(&ds), 2023, RANKING_SIZE);
        assert_eq!(
            view.top.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(view.top[0].value, 9.0);
        assert_eq!(view.bottom[0].value, 2.0);
    }

    #[test]
    fn ties_keep_source_row_order() {
        let ds = dataset_with_values(&[5.0, 5.0, 5.0, 1.0]);
        let view = rankings(&ds, &all_indices(&ds), 2023, 3);
        assert_eq!(
            view.top.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["Country 0", "Country 1", "Country 2"]
        );
    }

    #[test]
    fn nulls_are_ignored_and_tables_shrink() {
        let ds = GdpDataset::from_countries(vec![
            record("A", "AAA", Some("Mid"), Some(3.0)),
            record("B", "BBB", Some("Mid"), None),
            record("C", "CCC", Some("Mid"), Some(1.0)),
        ]);
        let view = rankings(&ds, &all_indices(&ds), 2023, RANKING_SIZE);
        assert_eq!(view.top.len(), 2);
        assert_eq!(view.bottom.len(), 2);
        assert!(view.top.iter().all(|r| r.name != "B"));
    }

    #[test]
    fn distribution_counts_only_rows_with_values() {
        let ds = GdpDataset::from_countries(vec![
            record("A", "AAA", Some("High income"), Some(3.0)),
            record("B", "BBB", Some("High income"), None),
            record("C", "CCC", Some("Low income"), Some(1.0)),
            record("D", "DDD", None, Some(2.0)),
        ]);
        let counts = income_distribution(&ds, &all_indices(&ds), 2023);
        assert_eq!(counts.get("High income"), Some(&1));
        assert_eq!(counts.get("Low income"), Some(&1));
        assert_eq!(counts.len(), 2);
        assert!(counts.values().sum::<usize>() <= ds.len());
    }

    #[test]
    fn distribution_never_invents_groups() {
        let ds = dataset_with_values(&[1.0, 2.0]);
        let counts = income_distribution(&ds, &[0], 2023);
        assert_eq!(counts.get("Mid"), Some(&1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn same_country_twice_gives_identical_series() {
        let ds = dataset_with_values(&[1.0, 2.0]);
        let cmp = comparison(&ds, "Country 0", "Country 0").unwrap();
        assert_eq!(cmp.first.name, cmp.second.name);
        assert_eq!(cmp.first.values, cmp.second.values);
    }

    #[test]
    fn unknown_country_yields_no_comparison() {
        let ds = dataset_with_values(&[1.0]);
        assert!(comparison(&ds, "Country 0", "Nowhere").is_none());
        assert!(comparison(&ds, "Nowhere", "Country 0").is_none());
    }

    #[test]
    fn compute_views_wires_the_pipeline_together() {
        let ds = dataset_with_values(&[4.0, 8.0, 6.0]);
        let filters = FilterState {
            year: YEAR_MAX,
            ..Default::default()
        };
        let selection = CountrySelection {
            first: Some("Country 0".into()),
            second: Some("Country 2".into()),
        };
        let views = compute_views(&ds, &filters, &selection);
        assert_eq!(views.visible_indices.len(), 3);
        assert_eq!(views.country_names.len(), 3);
        assert_eq!(views.rankings.top[0].value, 8.0);
        assert!(views.comparison.is_some());
        assert_eq!(views.income_distribution.get("Mid"), Some(&3));
    }
}
