use crate::core::models::ModelError;
use crate::core::models::info::PlatesetInfo;

/// Confusion counts from comparing a called hit signal against ground truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCallCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl HitCallCounts {
    /// Fraction of true hits that were called as hits. NaN when the ground
    /// truth contains no hits.
    pub fn true_positive_rate(&self) -> f64 {
        let positives = self.true_positives + self.false_negatives;
        self.true_positives as f64 / positives as f64
    }

    /// Fraction of true non-hits that were called as hits. NaN when the
    /// ground truth contains no non-hits.
    pub fn false_positive_rate(&self) -> f64 {
        let negatives = self.false_positives + self.true_negatives;
        self.false_positives as f64 / negatives as f64
    }

    /// Integer quality rating of the hit call, from -1 (unusable) to 4
    /// (perfect recall at low false-positive cost).
    ///
    /// Comparisons against NaN rates are all false, so undefined rates fall
    /// through to a rating of 0.
    pub fn rating(&self) -> i32 {
        let tpr = self.true_positive_rate();
        let fpr = self.false_positive_rate();
        if tpr == 1.0 && fpr < 0.1 {
            4
        } else if tpr > 0.95 && fpr < 0.1 {
            3
        } else if tpr > 0.75 && fpr < 0.1 {
            2
        } else if tpr > 0.5 && fpr < 0.1 {
            1
        } else if tpr < 0.1 || fpr > 0.2 {
            -1
        } else {
            0
        }
    }
}

/// Tallies a called hit signal against the ground-truth hit layout.
///
/// Every well coordinate contributes one count, except wells ignore-masked in
/// the called signal, which are excluded the same way they were excluded from
/// the analysis that produced the call.
///
/// # Errors
///
/// Returns [`ModelError::DimensionMismatch`] if the two signals disagree in
/// dimensions.
pub fn analyze_hit_calls(
    called: &PlatesetInfo<bool>,
    truth: &PlatesetInfo<bool>,
) -> Result<HitCallCounts, ModelError> {
    if called.dimensions() != truth.dimensions() {
        return Err(ModelError::DimensionMismatch {
            name: called.name().to_string(),
            expected: truth.dimensions(),
            actual: called.dimensions(),
        });
    }

    let mut counts = HitCallCounts::default();
    for (plate, row, column) in called.plateset().coordinates() {
        if called.is_ignored(plate, row, column) {
            continue;
        }
        let is_called = *called.value(plate, row, column);
        let is_true = *truth.value(plate, row, column);
        match (is_called, is_true) {
            (true, true) => counts.true_positives += 1,
            (true, false) => counts.false_positives += 1,
            (false, true) => counts.false_negatives += 1,
            (false, false) => counts.true_negatives += 1,
        }
    }
    Ok(counts)
}
