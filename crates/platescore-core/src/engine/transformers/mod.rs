//! Per-well statistical operators.
//!
//! A transformer maps every well of a signal to a new value, one well at a
//! time, optionally after computing scoped statistics over the values it is
//! about to visit. The two-phase protocol is split across
//! [`Transformer::setup`], which turns the values of the current scope into a
//! state object, and [`Transformer::apply`], which maps one well value using
//! that state. [`Scope`] selects whether setup runs once per plateset, once
//! per plate, or not at all.
//!
//! Scope statistics are computed over every well value of the scope,
//! including ignore-masked ones; exclusions apply when values are combined
//! across replicates, not when a signal is rescaled against itself.

pub mod bscore;
pub mod hit_id;
pub mod log2;
pub mod median_divider;
pub mod zscore;

use std::sync::Arc;

use crate::core::models::info::PlatesetInfo;
use crate::core::models::keyed::KeyedPlatesetInfos;
use crate::core::models::plateset::Plateset;
use crate::core::models::provenance::Provenance;
use crate::core::models::well::Well;
use crate::core::models::{ModelError, PlateValue};

/// The portion of a signal a transformer's setup phase sees at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No setup: the transform depends only on the individual well value.
    Unscoped,
    /// Setup runs once per plate, before that plate's wells are visited.
    PerPlate,
    /// Setup runs once per plateset, before any of its wells are visited.
    PerExperiment,
}

/// A per-well 1:1 statistical operator.
///
/// Implementations are stateless strategy objects: whatever the setup phase
/// computes is returned as an explicit `State` value and passed back into
/// every [`apply`](Transformer::apply) call, so a single transformer instance
/// can be reused across signals and scopes.
pub trait Transformer {
    /// Element type of the signals this transformer consumes.
    type Input: PlateValue;
    /// Element type of the signals this transformer produces.
    type Output: PlateValue + Default;
    /// Scoped statistics computed by [`setup`](Transformer::setup).
    type State;

    /// A short descriptor of this transform, used in generated output names
    /// and provenance actions (e.g. `"ZScorePerPlate"`).
    fn descriptor(&self) -> String;

    /// Which portion of a signal the setup phase sees at once.
    fn scope(&self) -> Scope {
        Scope::Unscoped
    }

    /// Computes the scoped statistics for one scope's worth of values. For
    /// [`Scope::Unscoped`] transformers this is called with an empty slice.
    fn setup(&self, values: &[Self::Input]) -> Self::State;

    /// Maps one well value using the statistics of its enclosing scope.
    fn apply(&self, state: &Self::State, value: &Self::Input) -> Self::Output;
}

/// Applies a transformer independently to every signal of a keyed collection.
///
/// Each output signal is named `"<descriptor>_of_<input-name>"`, carries a
/// fresh provenance whose single input is the signal it was derived from, and
/// keeps a copy of its input's ignore mask: a 1:1 transform preserves well
/// identity, so exclusions carry over.
///
/// # Errors
///
/// Returns [`ModelError`] if the outputs cannot form a valid collection; with
/// uniquely named, dimension-consistent inputs this does not happen.
pub fn transform<T: Transformer>(
    transformer: &T,
    inputs: &KeyedPlatesetInfos<T::Input>,
) -> Result<KeyedPlatesetInfos<T::Output>, ModelError> {
    let mut result = KeyedPlatesetInfos::new();
    for (name, info) in inputs.iter() {
        result.insert(Arc::new(transform_info(transformer, name, info)?))?;
    }
    Ok(result)
}

/// Applies a transformer to a single signal, returning the single output.
pub fn transform_single<T: Transformer>(
    transformer: &T,
    info: &PlatesetInfo<T::Input>,
) -> Result<Arc<PlatesetInfo<T::Output>>, ModelError> {
    transform_info(transformer, info.name(), info).map(Arc::new)
}

fn transform_info<T: Transformer>(
    transformer: &T,
    name: &str,
    info: &PlatesetInfo<T::Input>,
) -> Result<PlatesetInfo<T::Output>, ModelError> {
    let descriptor = transformer.descriptor();
    let output_name = format!("{descriptor}_of_{name}");
    let provenance = Provenance::new([name], descriptor);

    let dimensions = info.dimensions();
    let mut values: Plateset<T::Output> = Plateset::new(dimensions);
    match transformer.scope() {
        Scope::Unscoped => {
            let state = transformer.setup(&[]);
            for plate in 0..dimensions.plates {
                apply_to_plate(transformer, &state, info, &mut values, plate);
            }
        }
        Scope::PerExperiment => {
            let experiment_values: Vec<T::Input> = info.plateset().values().cloned().collect();
            let state = transformer.setup(&experiment_values);
            for plate in 0..dimensions.plates {
                apply_to_plate(transformer, &state, info, &mut values, plate);
            }
        }
        Scope::PerPlate => {
            for plate in 0..dimensions.plates {
                let plate_values: Vec<T::Input> =
                    info.plateset().plate(plate).values().cloned().collect();
                let state = transformer.setup(&plate_values);
                apply_to_plate(transformer, &state, info, &mut values, plate);
            }
        }
    }

    PlatesetInfo::with_mask(output_name, provenance, values, info.ignore_mask().clone())
}

fn apply_to_plate<T: Transformer>(
    transformer: &T,
    state: &T::State,
    info: &PlatesetInfo<T::Input>,
    output: &mut Plateset<T::Output>,
    plate: usize,
) {
    let dimensions = info.dimensions();
    for row in 0..dimensions.rows {
        for column in 0..dimensions.columns {
            let transformed = transformer.apply(state, info.value(plate, row, column));
            output.set_well(plate, row, column, Well::new(transformed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Dimensions;

    /// Subtracts the first value of each plate from every well on it; the
    /// per-plate state makes scope handling observable.
    struct PlateAnchor;

    impl Transformer for PlateAnchor {
        type Input = f64;
        type Output = f64;
        type State = f64;

        fn descriptor(&self) -> String {
            "PlateAnchor".to_string()
        }

        fn scope(&self) -> Scope {
            Scope::PerPlate
        }

        fn setup(&self, values: &[f64]) -> f64 {
            values.first().copied().unwrap_or(0.0)
        }

        fn apply(&self, state: &f64, value: &f64) -> f64 {
            value - state
        }
    }

    fn two_plate_signal() -> PlatesetInfo<f64> {
        let plateset = Plateset::from_nested(vec![
            vec![vec![1.0, 2.0]],
            vec![vec![10.0, 12.0]],
        ])
        .unwrap();
        PlatesetInfo::from_plateset(
            "noisy_rep_1",
            Provenance::external("test", "loaded"),
            plateset,
        )
    }

    #[test]
    fn per_plate_setup_runs_once_per_plate() {
        let output = transform_single(&PlateAnchor, &two_plate_signal()).unwrap();
        assert_eq!(*output.value(0, 0, 0), 0.0);
        assert_eq!(*output.value(0, 0, 1), 1.0);
        assert_eq!(*output.value(1, 0, 0), 0.0);
        assert_eq!(*output.value(1, 0, 1), 2.0);
    }

    #[test]
    fn outputs_are_named_descriptor_of_input() {
        let output = transform_single(&PlateAnchor, &two_plate_signal()).unwrap();
        assert_eq!(output.name(), "PlateAnchor_of_noisy_rep_1");
    }

    #[test]
    fn provenance_lists_the_consumed_signal_and_action() {
        let output = transform_single(&PlateAnchor, &two_plate_signal()).unwrap();
        assert_eq!(output.provenance().input_names(), ["noisy_rep_1"]);
        assert_eq!(output.provenance().action(), "PlateAnchor");
    }

    #[test]
    fn ignore_mask_carries_over_to_the_output() {
        let mut input = two_plate_signal();
        input.set_ignored(1, 0, 1, true);
        let output = transform_single(&PlateAnchor, &input).unwrap();
        assert!(output.is_ignored(1, 0, 1));
        assert!(!output.is_ignored(0, 0, 0));
    }

    #[test]
    fn every_signal_of_a_collection_is_transformed() {
        let dims = Dimensions::new(1, 1, 2);
        let mut inputs = KeyedPlatesetInfos::new();
        for name in ["noisy_rep_1", "noisy_rep_2"] {
            inputs
                .insert(Arc::new(PlatesetInfo::new(
                    name,
                    Provenance::external("test", "loaded"),
                    dims,
                )))
                .unwrap();
        }
        let outputs = transform(&PlateAnchor, &inputs).unwrap();
        assert_eq!(outputs.len(), 2);
        let names: Vec<_> = outputs.names().collect();
        assert_eq!(
            names,
            vec!["PlateAnchor_of_noisy_rep_1", "PlateAnchor_of_noisy_rep_2"]
        );
    }
}
