use std::str::FromStr;

/// Classifies what a reagent is used for within a screen.
///
/// Screening plates mix experimental samples with control wells; several
/// normalization algorithms need to tell them apart (e.g. B-score
/// normalization treats control wells separately from sample wells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReagentKind {
    /// An experimental sample under investigation.
    Sample,
    /// A well expected to show activity, used to calibrate the signal ceiling.
    PositiveControl,
    /// A well expected to show no activity, used to calibrate the baseline.
    NegativeControl,
    /// Unknown or unclassified reagent.
    #[default]
    Other,
}

impl ReagentKind {
    /// A lowercase label suitable for file output.
    pub fn label(&self) -> &'static str {
        match self {
            ReagentKind::Sample => "sample",
            ReagentKind::PositiveControl => "positive control",
            ReagentKind::NegativeControl => "negative control",
            ReagentKind::Other => "other",
        }
    }
}

impl FromStr for ReagentKind {
    type Err = ();

    /// Parses a string into a `ReagentKind`.
    ///
    /// Parsing is case-insensitive and accepts the common spelling variants
    /// found in plate-map files (e.g. "pos control" or "positive control").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sample" => Ok(ReagentKind::Sample),
            "positive control" | "pos control" | "positive_control" => {
                Ok(ReagentKind::PositiveControl)
            }
            "negative control" | "neg control" | "negative_control" => {
                Ok(ReagentKind::NegativeControl)
            }
            "other" | "unknown" => Ok(ReagentKind::Other),
            _ => Err(()),
        }
    }
}

/// Identifies what occupies a well in an arrayed screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reagent {
    /// An identifier for this reagent, unique within the screen's plate map.
    pub id: String,
    /// A human-readable name for this reagent.
    pub name: String,
    /// The role this reagent plays in the screen.
    pub kind: ReagentKind,
}

impl Reagent {
    /// Creates a new `Reagent` from an id, name, and kind.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ReagentKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reagent_stores_fields() {
        let reagent = Reagent::new("R001", "siRNA-17", ReagentKind::Sample);
        assert_eq!(reagent.id, "R001");
        assert_eq!(reagent.name, "siRNA-17");
        assert_eq!(reagent.kind, ReagentKind::Sample);
    }

    #[test]
    fn default_reagent_kind_is_other() {
        assert_eq!(Reagent::default().kind, ReagentKind::Other);
    }

    #[test]
    fn from_str_parses_valid_kinds() {
        assert_eq!(ReagentKind::from_str("sample"), Ok(ReagentKind::Sample));
        assert_eq!(
            ReagentKind::from_str("positive control"),
            Ok(ReagentKind::PositiveControl)
        );
        assert_eq!(
            ReagentKind::from_str("neg control"),
            Ok(ReagentKind::NegativeControl)
        );
        assert_eq!(ReagentKind::from_str("unknown"), Ok(ReagentKind::Other));
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(ReagentKind::from_str("SaMpLe"), Ok(ReagentKind::Sample));
        assert_eq!(
            ReagentKind::from_str("Positive Control"),
            Ok(ReagentKind::PositiveControl)
        );
    }

    #[test]
    fn from_str_rejects_unrecognized_kinds() {
        assert_eq!(ReagentKind::from_str("buffer blank"), Err(()));
        assert_eq!(ReagentKind::from_str(""), Err(()));
    }

    #[test]
    fn labels_round_trip_through_from_str() {
        for kind in [
            ReagentKind::Sample,
            ReagentKind::PositiveControl,
            ReagentKind::NegativeControl,
            ReagentKind::Other,
        ] {
            assert_eq!(ReagentKind::from_str(kind.label()), Ok(kind));
        }
    }
}
