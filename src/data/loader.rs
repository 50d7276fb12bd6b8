use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::{year_index, CountryRecord, GdpDataset, MetadataRecord, N_YEARS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structured data-layer failures. Numeric coercion and join misses are NOT
/// errors (they become nulls); these cover genuinely unloadable input.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("required column '{0}' not found in header")]
    MissingColumn(&'static str),
    #[error("table contains no data rows")]
    NoDataRows,
    #[error("no GDP table (API_*.csv) found in {0}")]
    GdpFileNotFound(PathBuf),
    #[error("no metadata table (Metadata_Country_*.csv) found in {0}")]
    MetadataFileNotFound(PathBuf),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Lines before the header row in World Bank wide-format exports
/// (data-source line, last-updated line, two blanks).
const PREAMBLE_LINES: usize = 4;

/// Load and merge the GDP table and the country-metadata table from a
/// directory containing a World Bank CSV export.
pub fn load_dir(dir: &Path) -> Result<GdpDataset> {
    let (gdp_path, meta_path) = locate_input_files(dir)?;
    log::info!(
        "Loading GDP table {:?} with metadata {:?}",
        gdp_path.file_name().unwrap_or_default(),
        meta_path.file_name().unwrap_or_default()
    );

    let gdp_file = File::open(&gdp_path)
        .with_context(|| format!("opening GDP table {}", gdp_path.display()))?;
    let rows = parse_gdp_csv(gdp_file).context("parsing GDP table")?;

    let meta_file = File::open(&meta_path)
        .with_context(|| format!("opening metadata table {}", meta_path.display()))?;
    let metadata = parse_metadata_csv(meta_file).context("parsing metadata table")?;

    Ok(merge(rows, &metadata))
}

/// Find the two input CSVs in `dir`: the wide table (`API_*.csv`) and the
/// country metadata (`Metadata_Country_*.csv`), matching the file names the
/// World Bank ships in its CSV bundles.
pub fn locate_input_files(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let mut gdp = None;
    let mut meta = None;

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading data directory {}", dir.display()))?;
    let mut names: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")))
        .collect();
    names.sort();

    for path in names {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        if file_name.starts_with("Metadata_Country_") {
            meta.get_or_insert(path);
        } else if file_name.starts_with("API_") {
            gdp.get_or_insert(path);
        }
    }

    let gdp = gdp.ok_or_else(|| DataError::GdpFileNotFound(dir.to_path_buf()))?;
    let meta = meta.ok_or_else(|| DataError::MetadataFileNotFound(dir.to_path_buf()))?;
    Ok((gdp, meta))
}

// ---------------------------------------------------------------------------
// Wide-format GDP table
// ---------------------------------------------------------------------------

/// A primary-table row before the metadata join.
#[derive(Debug, Clone)]
pub struct PrimaryRow {
    pub name: String,
    pub code: String,
    pub values: Vec<Option<f64>>,
}

/// Parse the wide-format table: a `PREAMBLE_LINES`-row preamble, then a header
/// with "Country Name", "Country Code" and one column per year, then one row
/// per country. Year cells that fail to parse become `None` – never an error.
pub fn parse_gdp_csv(input: impl Read) -> Result<Vec<PrimaryRow>> {
    let mut buf = BufReader::new(input);
    let mut scratch = String::new();
    for _ in 0..PREAMBLE_LINES {
        scratch.clear();
        buf.read_line(&mut scratch).context("skipping preamble")?;
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(buf);
    let headers: Vec<String> = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let name_idx = headers
        .iter()
        .position(|h| h == "Country Name")
        .ok_or(DataError::MissingColumn("Country Name"))?;
    let code_idx = headers
        .iter()
        .position(|h| h == "Country Code")
        .ok_or(DataError::MissingColumn("Country Code"))?;

    // (column index, dense year offset) for every header that is a year in range
    let year_cols: Vec<(usize, usize)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            let year: u16 = h.parse().ok()?;
            Some((i, year_index(year)?))
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("GDP table row {row_no}"))?;

        let mut values = vec![None; N_YEARS];
        for &(col, offset) in &year_cols {
            values[offset] = coerce_numeric(record.get(col).unwrap_or(""));
        }

        rows.push(PrimaryRow {
            name: record.get(name_idx).unwrap_or("").trim().to_string(),
            code: record.get(code_idx).unwrap_or("").trim().to_string(),
            values,
        });
    }

    if rows.is_empty() {
        return Err(DataError::NoDataRows.into());
    }
    Ok(rows)
}

/// `pd.to_numeric(errors="coerce")` semantics: empty or unparsable text maps
/// to `None`.
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Metadata table
// ---------------------------------------------------------------------------

/// Parse the country-metadata table. Only the code / income group / region
/// columns are kept; empty cells deserialize to `None`.
pub fn parse_metadata_csv(input: impl Read) -> Result<Vec<MetadataRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<MetadataRecord>().enumerate() {
        let record = result.with_context(|| format!("metadata row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Left-outer join on country code: every primary row survives; rows with no
/// metadata match keep `None` income group / region. Duplicate codes in the
/// metadata are not validated – the first occurrence wins.
pub fn merge(rows: Vec<PrimaryRow>, metadata: &[MetadataRecord]) -> GdpDataset {
    let mut by_code: HashMap<&str, &MetadataRecord> = HashMap::with_capacity(metadata.len());
    for m in metadata {
        by_code.entry(m.code.as_str()).or_insert(m);
    }

    let countries = rows
        .into_iter()
        .map(|row| {
            let meta = by_code.get(row.code.as_str());
            CountryRecord {
                name: row.name,
                code: row.code,
                income_group: meta.and_then(|m| m.income_group.clone()),
                region: meta.and_then(|m| m.region.clone()),
                values: row.values,
            }
        })
        .collect();

    GdpDataset::from_countries(countries)
}
