use super::{CombineError, Combiner};

/// Combiner that reduces boolean replicates with logical AND: a well is true
/// only if every usable contributor is true.
///
/// An empty contributor list yields `true`, the identity of AND, so a fully
/// masked coordinate never vetoes a conjunction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndCombiner;

impl Combiner for AndCombiner {
    type Input = bool;
    type Output = bool;

    fn descriptor(&self) -> String {
        "And".to_string()
    }

    fn combine_values(&self, values: &[bool]) -> Result<bool, CombineError> {
        Ok(values.iter().all(|v| *v))
    }
}

/// Combiner that reduces boolean replicates with logical OR: a well is true
/// if any usable contributor is true.
///
/// An empty contributor list yields `false`, the identity of OR.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrCombiner;

impl Combiner for OrCombiner {
    type Input = bool;
    type Output = bool;

    fn descriptor(&self) -> String {
        "Or".to_string()
    }

    fn combine_values(&self, values: &[bool]) -> Result<bool, CombineError> {
        Ok(values.iter().any(|v| *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Dimensions;
    use crate::core::models::info::PlatesetInfo;
    use crate::core::models::keyed::KeyedPlatesetInfos;
    use crate::core::models::provenance::Provenance;
    use crate::engine::combiners::combine;
    use std::sync::Arc;

    #[test]
    fn and_requires_all_true() {
        assert_eq!(AndCombiner.combine_values(&[true, false]), Ok(false));
        assert_eq!(AndCombiner.combine_values(&[true, true]), Ok(true));
    }

    #[test]
    fn or_requires_any_true() {
        assert_eq!(OrCombiner.combine_values(&[true, false]), Ok(true));
        assert_eq!(OrCombiner.combine_values(&[false, false]), Ok(false));
    }

    #[test]
    fn empty_input_yields_operator_identity() {
        assert_eq!(AndCombiner.combine_values(&[]), Ok(true));
        assert_eq!(OrCombiner.combine_values(&[]), Ok(false));
    }

    #[test]
    fn fully_masked_coordinate_receives_identity() {
        let dims = Dimensions::new(1, 1, 1);
        let mut up = PlatesetInfo::new("up", Provenance::new(["s"], "up"), dims);
        up.set_value(0, 0, 0, true);
        up.set_ignored(0, 0, 0, true);
        let mut down = PlatesetInfo::new("down", Provenance::new(["s"], "down"), dims);
        down.set_value(0, 0, 0, true);
        down.set_ignored(0, 0, 0, true);

        let inputs = KeyedPlatesetInfos::from_infos([Arc::new(up), Arc::new(down)]).unwrap();
        let anded = combine(&AndCombiner, &inputs).unwrap();
        assert!(*anded.value(0, 0, 0));
        let ored = combine(&OrCombiner, &inputs).unwrap();
        assert!(!*ored.value(0, 0, 0));
    }
}
