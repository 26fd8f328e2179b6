//! External service interactions
//!
//! This module contains services that touch the file system:
//! - Contract dataset loading
//! - Spreadsheet export

pub mod dataset;
pub mod export;

pub use dataset::load_dataset;
pub use export::export_to_file;
