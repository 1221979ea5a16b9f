use super::{Scope, Transformer};
use crate::core::utils::stats;

fn median_state(values: &[f64]) -> f64 {
    stats::median(values).unwrap_or(f64::NAN)
}

/// Transformer that divides each value by the median of all values on the
/// plate it appears on.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlateMedianDivider;

impl Transformer for PlateMedianDivider {
    type Input = f64;
    type Output = f64;
    type State = f64;

    fn descriptor(&self) -> String {
        "PlateMedianDivider".to_string()
    }

    fn scope(&self) -> Scope {
        Scope::PerPlate
    }

    fn setup(&self, values: &[f64]) -> f64 {
        median_state(values)
    }

    fn apply(&self, median: &f64, value: &f64) -> f64 {
        value / median
    }
}

/// Transformer that divides each value by the median of all values of the
/// plateset it appears in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleMedianDivider;

impl Transformer for SampleMedianDivider {
    type Input = f64;
    type Output = f64;
    type State = f64;

    fn descriptor(&self) -> String {
        "SampleMedianDivider".to_string()
    }

    fn scope(&self) -> Scope {
        Scope::PerExperiment
    }

    fn setup(&self, values: &[f64]) -> f64 {
        median_state(values)
    }

    fn apply(&self, median: &f64, value: &f64) -> f64 {
        value / median
    }
}
