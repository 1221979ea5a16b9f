//! Cross-replicate reducers.
//!
//! A combiner collapses several same-shaped signals into one: for every well
//! coordinate it gathers the values of all inputs whose ignore mask is clear
//! at that coordinate and reduces the gathered list to a single value. A
//! coordinate where every contributor is masked still invokes the reducer on
//! an empty list; each implementation defines its behavior for that case
//! (boolean reducers return their operator's identity, numeric reducers
//! refuse).

pub mod logical;
pub mod median;

use std::sync::Arc;

use thiserror::Error;

use super::error::EngineError;
use crate::core::models::PlateValue;
use crate::core::models::info::PlatesetInfo;
use crate::core::models::keyed::KeyedPlatesetInfos;
use crate::core::models::plateset::Plateset;
use crate::core::models::provenance::Provenance;
use crate::core::models::well::Well;

/// Failure of a single per-coordinate reduction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CombineError {
    /// The reducer has no defined result for an empty value list.
    #[error("reduction is not defined on empty input")]
    EmptyInput,
}

/// A cross-replicate N:1 reducer.
pub trait Combiner {
    /// Element type of the signals this combiner consumes.
    type Input: PlateValue;
    /// Element type of the single signal this combiner produces.
    type Output: PlateValue + Default;

    /// A short descriptor of this reduction, used in generated output names
    /// and provenance actions (e.g. `"Median"`).
    fn descriptor(&self) -> String;

    /// Reduces the non-ignored values gathered at one well coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CombineError::EmptyInput`] if the reduction is undefined for
    /// an empty list; the driver converts this into
    /// [`EngineError::EmptyCombination`] carrying the coordinate.
    fn combine_values(&self, values: &[Self::Input]) -> Result<Self::Output, CombineError>;
}

/// Collapses a keyed collection of signals into a single new signal.
///
/// The output is named `"<descriptor>_of_<name1>_<name2>..."` over the input
/// names in collection order, and its provenance lists every input. Its
/// ignore mask starts all-clear: each output value summarizes whatever
/// usable contributors existed at its coordinate.
///
/// # Errors
///
/// Returns [`EngineError::NoInputSignals`] for an empty input collection and
/// [`EngineError::EmptyCombination`] when the reducer rejects a coordinate
/// where every contributor is ignore-masked.
pub fn combine<C: Combiner>(
    combiner: &C,
    inputs: &KeyedPlatesetInfos<C::Input>,
) -> Result<PlatesetInfo<C::Output>, EngineError> {
    let descriptor = combiner.descriptor();
    let dimensions = inputs
        .dimensions()
        .ok_or_else(|| EngineError::NoInputSignals(descriptor.clone()))?;

    let input_names: Vec<&str> = inputs.names().collect();
    let output_name = format!("{}_of_{}", descriptor, input_names.join("_"));
    let provenance = Provenance::new(input_names, descriptor.clone());

    let mut values: Plateset<C::Output> = Plateset::new(dimensions);
    for plate in 0..dimensions.plates {
        for row in 0..dimensions.rows {
            for column in 0..dimensions.columns {
                let contributors: Vec<C::Input> = inputs
                    .values()
                    .filter(|info| !info.is_ignored(plate, row, column))
                    .map(|info| info.value(plate, row, column).clone())
                    .collect();
                let combined = combiner.combine_values(&contributors).map_err(|_| {
                    EngineError::EmptyCombination {
                        descriptor: descriptor.clone(),
                        plate,
                        row,
                        column,
                    }
                })?;
                values.set_well(plate, row, column, Well::new(combined));
            }
        }
    }

    Ok(PlatesetInfo::from_plateset(output_name, provenance, values))
}

/// Collapses a keyed collection and returns the result ready for insertion
/// into further keyed collections.
pub fn combine_shared<C: Combiner>(
    combiner: &C,
    inputs: &KeyedPlatesetInfos<C::Input>,
) -> Result<Arc<PlatesetInfo<C::Output>>, EngineError> {
    combine(combiner, inputs).map(Arc::new)
}
