//! Upload ingestion: tabular-to-document normalization
//!
//! Converts flat CSV and spreadsheet data into the nested document shape the
//! rest of the system consumes. Conversion is heuristic and makes no promise
//! that the result matches the schema the answer renderers expect; a
//! mismatched document simply yields empty search results downstream.

pub mod tabular;

pub use tabular::{convert, file_stem, normalize_csv, normalize_workbook};
