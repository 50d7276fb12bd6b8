//! End-to-end pipeline tests: raw CSV text → merged dataset → derived views.

use gdp_atlas::data::filter::{filtered_indices, FilterState};
use gdp_atlas::data::loader::{merge, parse_gdp_csv, parse_metadata_csv};
use gdp_atlas::data::model::GdpDataset;
use gdp_atlas::data::views::{compute_views, CountrySelection, RANKING_SIZE};

fn gdp_csv() -> String {
    let mut out = String::from(
        "Data Source,World Development Indicators\n\
         Last Updated Date,2024-05-30\n\n\n\
         Country Name,Country Code,Indicator Name,Indicator Code,1960,2023\n",
    );
    out.push_str("United States,USA,GDP per capita,NY.GDP.PCAP.CD,3007.12,70000\n");
    // eleven more countries with distinct 2023 values, plus one all-null row
    for i in 0..11 {
        out.push_str(&format!(
            "Country {i},C{i:02},GDP per capita,NY.GDP.PCAP.CD,{},{}\n",
            100 + i,
            1000 * (i + 1)
        ));
    }
    out.push_str("Dataless,NUL,GDP per capita,NY.GDP.PCAP.CD,..,\n");
    out
}

fn metadata_csv() -> String {
    let mut out = String::from("Country Code,Region,IncomeGroup,SpecialNotes,TableName\n");
    out.push_str("USA,North America,High income,,United States\n");
    for i in 0..11 {
        let group = if i < 6 { "Low income" } else { "High income" };
        out.push_str(&format!("C{i:02},Testland,{group},,Country {i}\n"));
    }
    // NUL intentionally has no metadata row
    out
}

fn dataset() -> GdpDataset {
    let rows = parse_gdp_csv(gdp_csv().as_bytes()).expect("gdp csv parses");
    let meta = parse_metadata_csv(metadata_csv().as_bytes()).expect("metadata csv parses");
    merge(rows, &meta)
}

#[test]
fn usa_scenario_flows_through_to_ranking() {
    let ds = dataset();
    let usa = ds.find_by_name("United States").expect("USA row present");
    assert_eq!(usa.income_group.as_deref(), Some("High income"));
    assert_eq!(usa.region.as_deref(), Some("North America"));
    assert_eq!(usa.value_for(2023), Some(70000.0));

    let views = compute_views(&ds, &FilterState::default(), &CountrySelection::default());
    assert_eq!(views.rankings.top[0].name, "United States");
    assert_eq!(views.rankings.top[0].value, 70000.0);
    assert_eq!(views.rankings.top[0].rank, 1);
}

#[test]
fn all_sentinel_equals_unfiltered_table() {
    let ds = dataset();
    let idx = filtered_indices(&ds, &FilterState::default());
    assert_eq!(idx.len(), ds.len());
    assert_eq!(idx, (0..ds.len()).collect::<Vec<_>>());
}

#[test]
fn concrete_group_filter_is_homogeneous() {
    let ds = dataset();
    let filters = FilterState {
        income_group: Some("Low income".into()),
        ..Default::default()
    };
    let idx = filtered_indices(&ds, &filters);
    assert_eq!(idx.len(), 6);
    for i in idx {
        assert_eq!(ds.countries[i].income_group.as_deref(), Some("Low income"));
    }
}

#[test]
fn top_and_bottom_are_disjoint_and_bounding_with_enough_rows() {
    let ds = dataset();
    let views = compute_views(&ds, &FilterState::default(), &CountrySelection::default());
    let rankings = &views.rankings;

    // 12 non-null rows for 2023 (the Dataless row is excluded)
    assert_eq!(rankings.top.len(), RANKING_SIZE);
    assert_eq!(rankings.bottom.len(), RANKING_SIZE);
    assert!(rankings.top.iter().all(|t| t.name != "Dataless"));

    let top_names: Vec<_> = rankings.top.iter().map(|r| r.name.as_str()).collect();
    assert!(rankings
        .bottom
        .iter()
        .all(|r| !top_names.contains(&r.name.as_str())));

    let min_top = rankings.top.last().unwrap().value;
    let max_bottom = rankings.bottom.last().unwrap().value;
    for c in &ds.countries {
        if let Some(v) = c.value_for(2023) {
            if !top_names.contains(&c.name.as_str()) {
                assert!(v <= min_top);
            }
            if rankings.bottom.iter().all(|r| r.name != c.name) {
                assert!(v >= max_bottom);
            }
        }
    }
}

#[test]
fn distribution_is_bounded_by_subset_size() {
    let ds = dataset();
    let views = compute_views(&ds, &FilterState::default(), &CountrySelection::default());
    let total: usize = views.income_distribution.values().sum();
    assert!(total <= ds.len());
    // the all-null row and the metadata-less row never count
    assert_eq!(total, 12);
    assert_eq!(views.income_distribution.get("Low income"), Some(&6));
    assert_eq!(views.income_distribution.get("High income"), Some(&6));
}

#[test]
fn comparison_uses_the_unfiltered_table() {
    let ds = dataset();
    // Filter down to Low income; USA falls out of the filtered list but a
    // lookup against the merged table must still succeed.
    let filters = FilterState {
        income_group: Some("Low income".into()),
        ..Default::default()
    };
    let selection = CountrySelection {
        first: Some("United States".into()),
        second: Some("Country 0".into()),
    };
    let views = compute_views(&ds, &filters, &selection);
    assert!(!views.country_names.contains(&"United States".to_string()));
    let cmp = views.comparison.expect("lookup against merged table");
    assert_eq!(cmp.first.name, "United States");
    assert_eq!(cmp.second.name, "Country 0");
}

#[test]
fn same_country_selected_twice_is_not_an_error() {
    let ds = dataset();
    let selection = CountrySelection {
        first: Some("United States".into()),
        second: Some("United States".into()),
    };
    let views = compute_views(&ds, &FilterState::default(), &selection);
    let cmp = views.comparison.expect("identical series");
    assert_eq!(cmp.first.values, cmp.second.values);
}
