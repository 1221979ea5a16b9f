use super::{CombineError, Combiner};
use crate::core::utils::stats;

/// Combiner that reduces double replicates to their median, averaging the two
/// middle order statistics for an even count.
///
/// The median of an empty list is undefined; a coordinate whose contributors
/// are all ignore-masked is reported as an error rather than silently mapped
/// to a sentinel value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCombiner;

impl Combiner for MedianCombiner {
    type Input = f64;
    type Output = f64;

    fn descriptor(&self) -> String {
        "Median".to_string()
    }

    fn combine_values(&self, values: &[f64]) -> Result<f64, CombineError> {
        stats::median(values).ok_or(CombineError::EmptyInput)
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
    use crate::engine::error::EngineError;
    use std::sync::Arc;

    #[test]
    fn odd_count_takes_middle_order_statistic() {
        assert_eq!(MedianCombiner.combine_values(&[1.0, 3.0, 5.0]), Ok(3.0));
        assert_eq!(MedianCombiner.combine_values(&[5.0, 1.0, 3.0]), Ok(3.0));
    }

    #[test]
    fn even_count_averages_middle_pair() {
        assert_eq!(
            MedianCombiner.combine_values(&[1.0, 2.0, 3.0, 4.0]),
            Ok(2.5)
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(
            MedianCombiner.combine_values(&[]),
            Err(CombineError::EmptyInput)
        );
    }

    #[test]
    fn fully_masked_coordinate_fails_with_its_location() {
        let dims = Dimensions::new(1, 1, 2);
        let mut rep_1 = PlatesetInfo::new("rep_1", Provenance::external("t", "loaded"), dims);
        rep_1.set_value(0, 0, 0, 1.0);
        rep_1.set_ignored(0, 0, 1, true);
        let mut rep_2 = PlatesetInfo::new("rep_2", Provenance::external("t", "loaded"), dims);
        rep_2.set_value(0, 0, 0, 3.0);
        rep_2.set_ignored(0, 0, 1, true);

        let inputs = KeyedPlatesetInfos::from_infos([Arc::new(rep_1), Arc::new(rep_2)]).unwrap();
        let err = combine(&MedianCombiner, &inputs).unwrap_err();
        match err {
            EngineError::EmptyCombination {
                descriptor,
                plate,
                row,
                column,
            } => {
                assert_eq!(descriptor, "Median");
                assert_eq!((plate, row, column), (0, 0, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn replicates_combine_per_coordinate() {
        let dims = Dimensions::new(1, 1, 2);
        let mut rep_1 = PlatesetInfo::new("rep_1", Provenance::external("t", "loaded"), dims);
        rep_1.set_value(0, 0, 0, 1.0);
        rep_1.set_value(0, 0, 1, 4.0);
        let mut rep_2 = PlatesetInfo::new("rep_2", Provenance::external("t", "loaded"), dims);
        rep_2.set_value(0, 0, 0, 3.0);
        rep_2.set_value(0, 0, 1, 6.0);

        let inputs = KeyedPlatesetInfos::from_infos([Arc::new(rep_1), Arc::new(rep_2)]).unwrap();
        let output = combine(&MedianCombiner, &inputs).unwrap();
        assert_eq!(*output.value(0, 0, 0), 2.0);
        assert_eq!(*output.value(0, 0, 1), 5.0);
        assert_eq!(output.name(), "Median_of_rep_1_rep_2");
    }
}
