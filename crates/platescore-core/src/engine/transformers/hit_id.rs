use super::Transformer;

/// Transformer that calls each well as a hit or non-hit via a caller-supplied
/// predicate.
///
/// Unlike the statistical transformers, whose descriptors are their type
/// names, a hit identifier describes a particular rule, so the descriptor is
/// a caller-supplied label (e.g. the configured hit-signal name).
pub struct HitIdTransformer<F> {
    label: String,
    predicate: F,
}

impl<F> HitIdTransformer<F>
where
    F: Fn(f64) -> bool,
{
    /// Creates a hit identifier from a descriptive label and a predicate that
    /// returns `true` for values to call as hits.
    pub fn new(label: impl Into<String>, predicate: F) -> Self {
        Self {
            label: label.into(),
            predicate,
        }
    }
}

impl<F> Transformer for HitIdTransformer<F>
where
    F: Fn(f64) -> bool + Send + Sync,
{
    type Input = f64;
    type Output = bool;
    type State = ();

    fn descriptor(&self) -> String {
        self.label.clone()
    }

    fn setup(&self, _values: &[f64]) {}

    fn apply(&self, _state: &(), value: &f64) -> bool {
        (self.predicate)(*value)
    }
}
