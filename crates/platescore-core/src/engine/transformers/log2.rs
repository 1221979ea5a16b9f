use super::Transformer;

/// Transformer that replaces each value with its base-2 logarithm.
///
/// Commonly the first step for fold-change style measurements. Non-positive
/// inputs follow IEEE semantics: zero maps to negative infinity and negative
/// values map to NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log2;

impl Transformer for Log2 {
    type Input = f64;
    type Output = f64;
    type State = ();

    fn descriptor(&self) -> String {
        "Log2".to_string()
    }

    fn setup(&self, _values: &[f64]) {}

    fn apply(&self, _state: &(), value: &f64) -> f64 {
        value.log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::info::PlatesetInfo;
    use crate::core::models::plateset::Plateset;
    use crate::core::models::provenance::Provenance;
    use crate::engine::transformers::transform_single;

    #[test]
    fn powers_of_two_map_to_integers() {
        let plateset = Plateset::from_nested(vec![vec![vec![1.0, 2.0, 8.0]]]).unwrap();
        let input =
            PlatesetInfo::from_plateset("raw", Provenance::external("test", "loaded"), plateset);
        let output = transform_single(&Log2, &input).unwrap();
        assert_eq!(*output.value(0, 0, 0), 0.0);
        assert_eq!(*output.value(0, 0, 1), 1.0);
        assert_eq!(*output.value(0, 0, 2), 3.0);
        assert_eq!(output.name(), "Log2_of_raw");
    }

    #[test]
    fn non_positive_values_follow_ieee_semantics() {
        let plateset = Plateset::from_nested(vec![vec![vec![0.0, -4.0]]]).unwrap();
        let input =
            PlatesetInfo::from_plateset("raw", Provenance::external("test", "loaded"), plateset);
        let output = transform_single(&Log2, &input).unwrap();
        assert_eq!(*output.value(0, 0, 0), f64::NEG_INFINITY);
        assert!(output.value(0, 0, 1).is_nan());
    }
}
