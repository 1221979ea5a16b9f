//! Tab-delimited I/O for the library's two file boundaries.
//!
//! This module contains the serialization code for the performance-metrics
//! output consumed by downstream reporting, and the dataset exchange format
//! read and written across the external-interpreter boundary. Both formats
//! are tab-delimited tables with a header row.

pub mod dataset;
pub mod metrics;

/// The delimiter shared by every tabular format in the library.
pub const DELIMITER: u8 = b'\t';
