use std::path::Path;
use std::sync::Arc;

use platescore::core::models::Dimensions;
use platescore::core::models::info::PlatesetInfo;
use platescore::core::models::provenance::Provenance;
use platescore::core::models::screen::ScreenData;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

const DELIMITER: u8 = b'\t';

#[derive(Debug, Deserialize)]
struct SignalRow {
    signal: String,
    plate: usize,
    row: usize,
    column: usize,
    value: f64,
    #[serde(default)]
    ignored: bool,
}

#[derive(Debug, Deserialize)]
struct HitRow {
    plate: usize,
    row: usize,
    column: usize,
}

fn parse_error(path: &Path, source: impl Into<anyhow::Error>) -> CliError {
    CliError::FileParsing {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

/// Loads one screen's worth of simulated noisy data from a tab-delimited
/// file with columns `signal plate row column value [ignored]`, one row per
/// (signal, well).
///
/// Dimensions are inferred from the largest indices present; every signal
/// then shares them, with unmentioned wells defaulting to zero. The file
/// name becomes the provenance source of each loaded signal.
pub fn load_screen_data(path: &Path, screen_name: &str) -> Result<ScreenData> {
    debug!("Loading screen data from file: {:?}", path);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .map_err(|e| parse_error(path, e))?;

    let mut rows: Vec<SignalRow> = Vec::new();
    for record in reader.deserialize() {
        rows.push(record.map_err(|e| parse_error(path, e))?);
    }
    if rows.is_empty() {
        return Err(parse_error(
            path,
            anyhow::anyhow!("file contains no data rows"),
        ));
    }

    let dimensions = Dimensions::new(
        rows.iter().map(|r| r.plate).max().unwrap_or(0) + 1,
        rows.iter().map(|r| r.row).max().unwrap_or(0) + 1,
        rows.iter().map(|r| r.column).max().unwrap_or(0) + 1,
    );

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut signals: indexmap::IndexMap<String, PlatesetInfo<f64>> = indexmap::IndexMap::new();
    for row in rows {
        let info = signals.entry(row.signal.clone()).or_insert_with(|| {
            PlatesetInfo::new(
                row.signal.clone(),
                Provenance::external(source.clone(), "loaded"),
                dimensions,
            )
        });
        info.set_value(row.plate, row.row, row.column, row.value);
        if row.ignored {
            info.set_ignored(row.plate, row.row, row.column, true);
        }
    }

    let mut screen = ScreenData::new(screen_name, dimensions);
    for (_, info) in signals {
        screen.signals_mut().insert_info(Arc::new(info))?;
    }

    debug!(
        signals = screen.signals().len(),
        dimensions = %screen.dimensions(),
        "Screen data loaded."
    );
    Ok(screen)
}

/// Loads the ground-truth hit layout from a tab-delimited file with columns
/// `plate row column`, one row per planted hit.
pub fn load_true_hits(path: &Path, dimensions: Dimensions) -> Result<PlatesetInfo<bool>> {
    debug!("Loading true hits from file: {:?}", path);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_path(path)
        .map_err(|e| parse_error(path, e))?;

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut hits = PlatesetInfo::new(
        "true_hits",
        Provenance::external(source, "loaded"),
        dimensions,
    );

    for record in reader.deserialize() {
        let row: HitRow = record.map_err(|e| parse_error(path, e))?;
        if row.plate >= dimensions.plates
            || row.row >= dimensions.rows
            || row.column >= dimensions.columns
        {
            return Err(parse_error(
                path,
                anyhow::anyhow!(
                    "hit at ({}, {}, {}) is outside the screen dimensions {}",
                    row.plate,
                    row.row,
                    row.column,
                    dimensions
                ),
            ));
        }
        hits.set_value(row.plate, row.row, row.column, true);
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn screen_data_loads_with_inferred_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "screen1_hitset1_noiseset1.txt",
            "signal\tplate\trow\tcolumn\tvalue\tignored\n\
             noisy_rep_1\t0\t0\t0\t1.5\tfalse\n\
             noisy_rep_1\t0\t1\t1\t2.5\ttrue\n\
             noisy_rep_2\t0\t0\t0\t3.5\tfalse\n\
             noisy_rep_2\t0\t1\t1\t4.5\tfalse\n",
        );

        let screen = load_screen_data(&path, "screen_1").unwrap();
        assert_eq!(screen.dimensions(), Dimensions::new(1, 2, 2));
        assert_eq!(screen.replicate_signal_names().len(), 2);

        let rep_1 = screen.signals().get_typed::<f64>("noisy_rep_1").unwrap().unwrap();
        assert_eq!(*rep_1.value(0, 0, 0), 1.5);
        assert!(rep_1.is_ignored(0, 1, 1));
        assert!(!rep_1.is_ignored(0, 0, 0));
        assert_eq!(
            rep_1.provenance().input_names(),
            ["screen1_hitset1_noiseset1.txt"]
        );
    }

    #[test]
    fn ignored_column_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "data.txt",
            "signal\tplate\trow\tcolumn\tvalue\n\
             noisy_rep_1\t0\t0\t0\t1.0\n\
             noisy_rep_1\t0\t0\t1\t2.0\n",
        );
        let screen = load_screen_data(&path, "screen_1").unwrap();
        assert_eq!(screen.dimensions(), Dimensions::new(1, 1, 2));
    }

    #[test]
    fn empty_data_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "data.txt", "signal\tplate\trow\tcolumn\tvalue\n");
        assert!(matches!(
            load_screen_data(&path, "screen_1"),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn true_hits_load_as_boolean_plateset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "hits.txt",
            "plate\trow\tcolumn\n0\t1\t0\n0\t1\t1\n",
        );
        let hits = load_true_hits(&path, Dimensions::new(1, 2, 2)).unwrap();
        assert!(!*hits.value(0, 0, 0));
        assert!(*hits.value(0, 1, 0));
        assert!(*hits.value(0, 1, 1));
    }

    #[test]
    fn out_of_bounds_hit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "hits.txt", "plate\trow\tcolumn\n0\t5\t0\n");
        assert!(matches!(
            load_true_hits(&path, Dimensions::new(1, 2, 2)),
            Err(CliError::FileParsing { .. })
        ));
    }
}
