//! Interactive World Bank GDP-per-capita explorer.
//!
//! The crate splits into a pure data pipeline (`data`) and an egui shell
//! (`app`, `state`, `ui`) that renders the pipeline's cached views.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
