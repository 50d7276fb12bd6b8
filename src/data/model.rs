use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Year range of the World Bank wide-format table
// ---------------------------------------------------------------------------

/// First year column in the source table.
pub const YEAR_MIN: u16 = 1960;
/// Last year column in the source table (inclusive).
pub const YEAR_MAX: u16 = 2023;
/// Number of year columns, `YEAR_MIN..=YEAR_MAX`.
pub const N_YEARS: usize = (YEAR_MAX - YEAR_MIN + 1) as usize;

/// Dense offset of `year` into a per-country value vector, or `None` when the
/// year falls outside the table's range.
pub fn year_index(year: u16) -> Option<usize> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Some((year - YEAR_MIN) as usize)
    } else {
        None
    }
}

/// Iterate all years in the table's range, in ascending order.
pub fn all_years() -> impl Iterator<Item = u16> {
    YEAR_MIN..=YEAR_MAX
}

// ---------------------------------------------------------------------------
// CountryRecord – one row of the merged table
// ---------------------------------------------------------------------------

/// One country after the metadata join: the primary table's name/code plus the
/// (possibly missing) income group and region, and the full year series.
#[derive(Debug, Clone)]
pub struct CountryRecord {
    pub name: String,
    /// ISO3 country code, the join key.
    pub code: String,
    /// Income group from the metadata table; `None` when the join found no
    /// match or the metadata cell was empty.
    pub income_group: Option<String>,
    /// Region from the metadata table, same nullability as `income_group`.
    pub region: Option<String>,
    /// GDP per capita per year, indexed by [`year_index`]; always `N_YEARS`
    /// long. Unparsable source cells are `None`.
    pub values: Vec<Option<f64>>,
}

impl CountryRecord {
    /// Value for the given calendar year, if present and in range.
    pub fn value_for(&self, year: u16) -> Option<f64> {
        year_index(year).and_then(|i| self.values[i])
    }
}

// ---------------------------------------------------------------------------
// MetadataRecord – one row of the country-metadata table
// ---------------------------------------------------------------------------

/// A metadata row before the join. The csv crate maps empty fields to `None`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "Country Code")]
    pub code: String,
    #[serde(rename = "IncomeGroup")]
    pub income_group: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
}

// ---------------------------------------------------------------------------
// GdpDataset – the complete merged table
// ---------------------------------------------------------------------------

/// The merged table with pre-computed dropdown option lists.
#[derive(Debug, Clone)]
pub struct GdpDataset {
    /// All countries (rows), in source order.
    pub countries: Vec<CountryRecord>,
    /// Sorted distinct non-null income groups.
    pub income_groups: Vec<String>,
    /// Sorted distinct non-null regions.
    pub regions: Vec<String>,
}

impl GdpDataset {
    /// Build the option lists from the merged rows.
    pub fn from_countries(countries: Vec<CountryRecord>) -> Self {
        let mut income_groups: BTreeSet<String> = BTreeSet::new();
        let mut regions: BTreeSet<String> = BTreeSet::new();

        for c in &countries {
            if let Some(g) = &c.income_group {
                income_groups.insert(g.clone());
            }
            if let Some(r) = &c.region {
                regions.insert(r.clone());
            }
        }

        GdpDataset {
            countries,
            income_groups: income_groups.into_iter().collect(),
            regions: regions.into_iter().collect(),
        }
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// First row whose country name equals `name`, if any.
    pub fn find_by_name(&self, name: &str) -> Option<&CountryRecord> {
        self.countries.iter().find(|c| c.name == name)
    }
}
