use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DELIMITER;

/// One row of the performance-metrics output: how well a single scoring
/// workflow identified the true hits of one simulated screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Id of the screen definition the data was simulated from.
    pub screen_id: u32,
    /// Id of the hit set planted in the simulated data.
    pub hit_set_id: u32,
    /// Id of the noise set applied to the simulated data.
    pub noise_set_id: u32,
    /// Compact descriptor of the whole workflow.
    pub workflow: String,
    /// Name of the normalization transformer, empty if the stage was skipped.
    pub normalization: String,
    /// Name of the pre-scoring combiner, empty if the stage was skipped.
    pub combine_before_scoring: String,
    /// Name of the scoring transformer, empty if the stage was skipped.
    pub scoring: String,
    /// Name of the post-scoring combiner, empty if the stage was skipped.
    pub combine_after_scoring: String,
    /// The hit-threshold expression, e.g. `">= 2"`.
    pub hit_threshold: String,
    /// Fraction of true hits that were called as hits.
    pub true_positive_rate: f64,
    /// Fraction of true non-hits that were called as hits.
    pub false_positive_rate: f64,
    /// Integer quality rating derived from the two rates.
    pub rating: i32,
}

/// Writes performance records as a tab-delimited table with a header row.
pub fn write_metrics<W: Write>(writer: W, records: &[PerformanceRecord]) -> csv::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes performance records to a file, replacing any previous contents.
pub fn write_metrics_file(path: &Path, records: &[PerformanceRecord]) -> csv::Result<()> {
    let file = File::create(path)?;
    write_metrics(file, records)
}
