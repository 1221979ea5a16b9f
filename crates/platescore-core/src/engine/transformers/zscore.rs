use super::{Scope, Transformer};
use crate::core::utils::stats;

/// Scoped statistics shared by the z-score transformers.
#[derive(Debug, Clone, Copy)]
pub struct ZScoreState {
    mean: f64,
    std_dev: f64,
}

fn zscore_state(values: &[f64]) -> ZScoreState {
    ZScoreState {
        mean: stats::mean(values).unwrap_or(f64::NAN),
        std_dev: stats::sample_std_dev(values).unwrap_or(f64::NAN),
    }
}

fn zscore(state: &ZScoreState, value: f64) -> f64 {
    (value - state.mean) / state.std_dev
}

/// Transformer that rescales each value to its z score relative to all
/// values of the plateset it appears in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScorePerExperiment;

impl Transformer for ZScorePerExperiment {
    type Input = f64;
    type Output = f64;
    type State = ZScoreState;

    fn descriptor(&self) -> String {
        "ZScorePerExperiment".to_string()
    }

    fn scope(&self) -> Scope {
        Scope::PerExperiment
    }

    fn setup(&self, values: &[f64]) -> ZScoreState {
        zscore_state(values)
    }

    fn apply(&self, state: &ZScoreState, value: &f64) -> f64 {
        zscore(state, *value)
    }
}

/// Transformer that rescales each value to its z score relative to all
/// values on the plate it appears on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZScorePerPlate;

impl Transformer for ZScorePerPlate {
    type Input = f64;
    type Output = f64;
    type State = ZScoreState;

    fn descriptor(&self) -> String {
        "ZScorePerPlate".to_string()
    }

    fn scope(&self) -> Scope {
        Scope::PerPlate
    }

    fn setup(&self, values: &[f64]) -> ZScoreState {
        zscore_state(values)
    }

    fn apply(&self, state: &ZScoreState, value: &f64) -> f64 {
        zscore(state, *value)
    }
}
