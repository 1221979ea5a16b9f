use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DELIMITER;
use crate::core::models::Dimensions;
use crate::core::models::info::PlatesetInfo;
use crate::core::models::keyed::KeyedPlatesetInfos;
use crate::core::models::plateset::Plateset;
use crate::core::models::reagent::Reagent;
use crate::core::models::well::Well;

/// Errors arising from the interpreter dataset exchange.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset row addresses well ({plate}, {row}, {column}), outside {dimensions}")]
    OutOfBounds {
        plate: usize,
        row: usize,
        column: usize,
        dimensions: Dimensions,
    },

    #[error("dataset names a signal '{0}' that was not part of the exchange")]
    UnknownSignal(String),

    #[error("dataset holds no rows for signal '{0}'")]
    MissingSignal(String),
}

/// One row of the dataset written out for the external interpreter: a single
/// well of a single signal, annotated with the reagent kind at its position.
#[derive(Debug, Serialize)]
struct ExchangeRow<'a> {
    signal: &'a str,
    plate: usize,
    row: usize,
    column: usize,
    kind: &'a str,
    value: f64,
}

/// One row of the table the interpreter writes back: a transformed value for
/// a single well of a single signal.
#[derive(Debug, Deserialize)]
struct NormalizedRow {
    signal: String,
    plate: usize,
    row: usize,
    column: usize,
    value: f64,
}

/// Writes the given signals as a tab-delimited dataset for the external
/// interpreter, one row per (signal, well).
///
/// When a reagent layout is supplied, each row carries the reagent kind at
/// its well position so interpreter-side algorithms can separate samples
/// from controls; otherwise the kind column is left empty.
pub fn write_dataset<W: Write>(
    writer: W,
    signals: &KeyedPlatesetInfos<f64>,
    reagents: Option<&PlatesetInfo<Reagent>>,
) -> Result<(), DatasetError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(writer);
    for (name, info) in signals.iter() {
        for (plate, row, column) in info.plateset().coordinates() {
            let kind = reagents.map_or("", |layout| layout.value(plate, row, column).kind.label());
            csv_writer.serialize(ExchangeRow {
                signal: name,
                plate,
                row,
                column,
                kind,
                value: *info.value(plate, row, column),
            })?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders the dataset as a string, for handing to a
/// [`ScriptRunner`](crate::engine::interpreter::ScriptRunner).
pub fn dataset_to_string(
    signals: &KeyedPlatesetInfos<f64>,
    reagents: Option<&PlatesetInfo<Reagent>>,
) -> Result<String, DatasetError> {
    let mut buffer = Vec::new();
    write_dataset(&mut buffer, signals, reagents)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Reads the table the interpreter wrote back, returning one plateset of
/// transformed values per signal name, keyed in first-appearance order.
///
/// Every listed signal must cover all wells; unmentioned wells keep the
/// default value of zero, since the interpreter contract requires a complete
/// table and partial output indicates a failed run.
pub fn read_normalized<R: Read>(
    reader: R,
    expected_signals: &[&str],
    dimensions: Dimensions,
) -> Result<IndexMap<String, Plateset<f64>>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_reader(reader);
    let mut tables: IndexMap<String, Plateset<f64>> = IndexMap::new();

    for record in csv_reader.deserialize() {
        let row: NormalizedRow = record?;
        if !expected_signals.contains(&row.signal.as_str()) {
            return Err(DatasetError::UnknownSignal(row.signal));
        }
        if row.plate >= dimensions.plates
            || row.row >= dimensions.rows
            || row.column >= dimensions.columns
        {
            return Err(DatasetError::OutOfBounds {
                plate: row.plate,
                row: row.row,
                column: row.column,
                dimensions,
            });
        }
        let table = tables
            .entry(row.signal)
            .or_insert_with(|| Plateset::new(dimensions));
        table.set_well(row.plate, row.row, row.column, Well::new(row.value));
    }

    for name in expected_signals {
        if !tables.contains_key(*name) {
            return Err(DatasetError::MissingSignal((*name).to_string()));
        }
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::provenance::Provenance;
    use crate::core::models::reagent::ReagentKind;
    use std::sync::Arc;

    fn signals() -> KeyedPlatesetInfos<f64> {
        let plateset =
            Plateset::from_nested(vec![vec![vec![1.0, 2.0], vec![3.0, 4.0]]]).unwrap();
        let info = PlatesetInfo::from_plateset(
            "noisy_rep_1",
            Provenance::external("test", "loaded"),
            plateset,
        );
        KeyedPlatesetInfos::from_infos([Arc::new(info)]).unwrap()
    }

    #[test]
    fn dataset_rows_carry_reagent_kinds() {
        let dims = Dimensions::new(1, 2, 2);
        let mut reagents: PlatesetInfo<Reagent> = PlatesetInfo::new(
            "reagents",
            Provenance::external("plate_map.txt", "loaded"),
            dims,
        );
        reagents.set_value(
            0,
            0,
            0,
            Reagent::new("C1", "ctrl", ReagentKind::NegativeControl),
        );

        let text = dataset_to_string(&signals(), Some(&reagents)).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "signal\tplate\trow\tcolumn\tkind\tvalue"
        );
        assert_eq!(
            lines.next().unwrap(),
            "noisy_rep_1\t0\t0\t0\tnegative control\t1.0"
        );
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn read_normalized_rebuilds_platesets() {
        let dims = Dimensions::new(1, 2, 2);
        let input = "signal\tplate\trow\tcolumn\tvalue\n\
                     noisy_rep_1\t0\t0\t0\t-1.5\n\
                     noisy_rep_1\t0\t0\t1\t0.5\n\
                     noisy_rep_1\t0\t1\t0\t1.5\n\
                     noisy_rep_1\t0\t1\t1\t2.5\n";
        let tables = read_normalized(input.as_bytes(), &["noisy_rep_1"], dims).unwrap();
        let table = &tables["noisy_rep_1"];
        assert_eq!(*table.well(0, 0, 0).value(), -1.5);
        assert_eq!(*table.well(0, 1, 1).value(), 2.5);
    }

    #[test]
    fn read_normalized_rejects_unknown_signals() {
        let dims = Dimensions::new(1, 1, 1);
        let input = "signal\tplate\trow\tcolumn\tvalue\nstray\t0\t0\t0\t1.0\n";
        let err = read_normalized(input.as_bytes(), &["noisy_rep_1"], dims).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownSignal(name) if name == "stray"));
    }

    #[test]
    fn read_normalized_rejects_out_of_bounds_rows() {
        let dims = Dimensions::new(1, 1, 1);
        let input = "signal\tplate\trow\tcolumn\tvalue\nnoisy_rep_1\t0\t3\t0\t1.0\n";
        let err = read_normalized(input.as_bytes(), &["noisy_rep_1"], dims).unwrap_err();
        assert!(matches!(err, DatasetError::OutOfBounds { row: 3, .. }));
    }

    #[test]
    fn read_normalized_requires_every_expected_signal() {
        let dims = Dimensions::new(1, 1, 1);
        let input = "signal\tplate\trow\tcolumn\tvalue\n";
        let err = read_normalized(input.as_bytes(), &["noisy_rep_1"], dims).unwrap_err();
        assert!(matches!(err, DatasetError::MissingSignal(name) if name == "noisy_rep_1"));
    }
}
