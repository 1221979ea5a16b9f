/// An immutable lineage record attached to every named plateset.
///
/// A provenance lists the inputs a dataset was derived from (names of other
/// platesets, or external source descriptors such as a file name) and the
/// single action that produced it (typically an algorithm descriptor such as
/// `"ZScorePerExperiment"`). It is set once at construction of the owning
/// [`PlatesetInfo`](super::info::PlatesetInfo) and never mutated afterwards:
/// it is a value, not a reference other records can alter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    input_names: Vec<String>,
    action: String,
}

impl Provenance {
    /// Creates a provenance from a list of input names and an action
    /// descriptor.
    pub fn new<I, S>(input_names: I, action: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input_names: input_names.into_iter().map(Into::into).collect(),
            action: action.into(),
        }
    }

    /// Convenience constructor for raw data originating outside the pipeline,
    /// e.g. `Provenance::external("screen1_noisyset2.txt", "loaded")`.
    pub fn external(source: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new([source.into()], action)
    }

    /// Names of the inputs this dataset was derived from.
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// The action that produced this dataset.
    pub fn action(&self) -> &str {
        &self.action
    }
}
