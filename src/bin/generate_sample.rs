use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use gdp_atlas::data::model::{all_years, YEAR_MIN};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct SampleCountry {
    name: &'static str,
    code: &'static str,
    region: &'static str,
    income_group: &'static str,
    /// First year with data; earlier cells stay empty.
    first_year: u16,
}

const COUNTRIES: &[SampleCountry] = &[
    SampleCountry { name: "United States", code: "USA", region: "North America", income_group: "High income", first_year: 1960 },
    SampleCountry { name: "Germany", code: "DEU", region: "Europe & Central Asia", income_group: "High income", first_year: 1970 },
    SampleCountry { name: "Japan", code: "JPN", region: "East Asia & Pacific", income_group: "High income", first_year: 1960 },
    SampleCountry { name: "Norway", code: "NOR", region: "Europe & Central Asia", income_group: "High income", first_year: 1960 },
    SampleCountry { name: "Brazil", code: "BRA", region: "Latin America & Caribbean", income_group: "Upper middle income", first_year: 1960 },
    SampleCountry { name: "China", code: "CHN", region: "East Asia & Pacific", income_group: "Upper middle income", first_year: 1960 },
    SampleCountry { name: "Mexico", code: "MEX", region: "Latin America & Caribbean", income_group: "Upper middle income", first_year: 1960 },
    SampleCountry { name: "Turkiye", code: "TUR", region: "Europe & Central Asia", income_group: "Upper middle income", first_year: 1968 },
    SampleCountry { name: "India", code: "IND", region: "South Asia", income_group: "Lower middle income", first_year: 1960 },
    SampleCountry { name: "Kenya", code: "KEN", region: "Sub-Saharan Africa", income_group: "Lower middle income", first_year: 1963 },
    SampleCountry { name: "Viet Nam", code: "VNM", region: "East Asia & Pacific", income_group: "Lower middle income", first_year: 1985 },
    SampleCountry { name: "Egypt, Arab Rep.", code: "EGY", region: "Middle East & North Africa", income_group: "Lower middle income", first_year: 1960 },
    SampleCountry { name: "Ethiopia", code: "ETH", region: "Sub-Saharan Africa", income_group: "Low income", first_year: 1981 },
    SampleCountry { name: "Niger", code: "NER", region: "Sub-Saharan Africa", income_group: "Low income", first_year: 1960 },
    SampleCountry { name: "Malawi", code: "MWI", region: "Sub-Saharan Africa", income_group: "Low income", first_year: 1960 },
    SampleCountry { name: "Afghanistan", code: "AFG", region: "South Asia", income_group: "Low income", first_year: 2002 },
];

// Aggregate rows the World Bank ships alongside countries; deliberately absent
// from the metadata table so the join leaves their attributes null.
const AGGREGATES: &[(&str, &str)] = &[("World", "WLD"), ("Euro area", "EMU")];

fn base_value(income_group: &str) -> f64 {
    match income_group {
        "High income" => 3000.0,
        "Upper middle income" => 900.0,
        "Lower middle income" => 300.0,
        _ => 120.0,
    }
}

fn growth_rate(income_group: &str) -> f64 {
    match income_group {
        "High income" => 0.055,
        "Upper middle income" => 0.06,
        "Lower middle income" => 0.05,
        _ => 0.04,
    }
}

/// One country's series as CSV cells: empty before `first_year`, then a noisy
/// exponential growth path.
fn series_cells(rng: &mut SimpleRng, base: f64, growth: f64, first_year: u16) -> Vec<String> {
    let mut value = base * (0.8 + 0.4 * rng.next_f64());
    all_years()
        .map(|year| {
            if year < first_year {
                return String::new();
            }
            value *= 1.0 + rng.gauss(growth, 0.03);
            format!("{value:.6}")
        })
        .collect()
}

fn write_gdp_csv(path: &Path, rng: &mut SimpleRng) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;

    // 4-line preamble before the header, as in World Bank exports
    writeln!(file, "\"Data Source\",\"World Development Indicators\"")?;
    writeln!(file, "\"Last Updated Date\",\"2024-05-30\"")?;
    writeln!(file)?;
    writeln!(file)?;

    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec![
        "Country Name".to_string(),
        "Country Code".to_string(),
        "Indicator Name".to_string(),
        "Indicator Code".to_string(),
    ];
    header.extend(all_years().map(|y| y.to_string()));
    writer.write_record(&header)?;

    for c in COUNTRIES {
        let mut record = vec![
            c.name.to_string(),
            c.code.to_string(),
            "GDP per capita (current US$)".to_string(),
            "NY.GDP.PCAP.CD".to_string(),
        ];
        record.extend(series_cells(
            rng,
            base_value(c.income_group),
            growth_rate(c.income_group),
            c.first_year,
        ));
        writer.write_record(&record)?;
    }

    for &(name, code) in AGGREGATES {
        let mut record = vec![
            name.to_string(),
            code.to_string(),
            "GDP per capita (current US$)".to_string(),
            "NY.GDP.PCAP.CD".to_string(),
        ];
        let mut cells = series_cells(rng, 800.0, 0.05, YEAR_MIN);
        // sprinkle non-numeric cells to exercise coercion
        cells[3] = "..".to_string();
        cells[7] = "..".to_string();
        record.extend(cells);
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_metadata_csv(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Country Code", "Region", "IncomeGroup", "SpecialNotes", "TableName"])?;
    for c in COUNTRIES {
        writer.write_record([c.code, c.region, c.income_group, "", c.name])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let gdp_path = dir.join("API_NY.GDP.PCAP.CD_DS2_en_csv_v2_sample.csv");
    let meta_path = dir.join("Metadata_Country_API_NY.GDP.PCAP.CD_DS2_en_csv_v2_sample.csv");

    write_gdp_csv(&gdp_path, &mut rng)?;
    write_metadata_csv(&meta_path)?;

    println!(
        "Wrote {} countries + {} aggregates to {} and {}",
        COUNTRIES.len(),
        AGGREGATES.len(),
        gdp_path.display(),
        meta_path.display()
    );
    Ok(())
}
