/// Data layer: core types, loading/joining, filtering, and derived views.
///
/// Architecture:
/// ```text
///  API_*.csv      Metadata_Country_*.csv
///        │               │
///        ▼               ▼
///   ┌──────────────────────┐
///   │        loader         │  parse + left-join → GdpDataset
///   └──────────────────────┘
///              │
///              ▼
///   ┌──────────────────────┐
///   │      GdpDataset       │  Vec<CountryRecord>, option lists
///   └──────────────────────┘
///              │
///              ▼
///   ┌──────────────────────┐
///   │   filter + views      │  selections → filtered indices → Views
///   └──────────────────────┘
/// ```
///
/// Everything below `loader` is pure: the same dataset and selections always
/// produce the same `Views`.

pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
