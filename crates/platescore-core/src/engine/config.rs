use serde::{Deserialize, Serialize};

/// Default name for the boolean hit signal a workflow produces.
pub const DEFAULT_HIT_SIGNAL_NAME: &str = "is_hit";

fn default_hit_signal_name() -> String {
    DEFAULT_HIT_SIGNAL_NAME.to_string()
}

/// The declarative description of one scoring workflow.
///
/// Each stage field names an algorithm to resolve through the
/// [`AlgorithmRegistry`](super::registry::AlgorithmRegistry); an empty string
/// means the stage is skipped. Only the hit threshold is mandatory: hit
/// identification always runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWorkflow {
    /// Name of the normalization transformer, or empty to skip.
    #[serde(default)]
    pub normalization: String,
    /// Name of the combiner applied before scoring, or empty to skip.
    #[serde(default)]
    pub combine_before_scoring: String,
    /// Name of the scoring transformer, or empty to skip.
    #[serde(default)]
    pub scoring: String,
    /// Name of the combiner applied after scoring, or empty to skip.
    #[serde(default)]
    pub combine_after_scoring: String,
    /// The hit-threshold expression, e.g. `">= 2"`.
    pub hit_threshold: String,
    /// Label for the boolean hit signal, also used to locate it afterwards.
    #[serde(default = "default_hit_signal_name")]
    pub hit_signal_name: String,
}

impl Default for ScoringWorkflow {
    fn default() -> Self {
        Self {
            normalization: String::new(),
            combine_before_scoring: String::new(),
            scoring: String::new(),
            combine_after_scoring: String::new(),
            hit_threshold: String::new(),
            hit_signal_name: default_hit_signal_name(),
        }
    }
}

impl ScoringWorkflow {
    /// A compact one-line descriptor of the workflow, with stage names in
    /// pipeline order and empty slots preserved, e.g.
    /// `"ZScorePerPlate|Median|||>= 2"`.
    pub fn descriptor(&self) -> String {
        [
            self.normalization.as_str(),
            self.combine_before_scoring.as_str(),
            self.scoring.as_str(),
            self.combine_after_scoring.as_str(),
            self.hit_threshold.as_str(),
        ]
        .join("|")
    }
}

/// A named set of scoring workflows to be applied together, typically to rate
/// competing analysis strategies against the same simulated data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSet {
    /// A user-assigned integer id for the scoring set.
    pub id: u32,
    /// A user-assigned name for the scoring set.
    pub name: String,
    /// The workflows to apply, in order.
    pub workflows: Vec<ScoringWorkflow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_preserves_empty_stages() {
        let workflow = ScoringWorkflow {
            normalization: "ZScorePerPlate".to_string(),
            combine_before_scoring: "Median".to_string(),
            hit_threshold: ">= 2".to_string(),
            ..ScoringWorkflow::default()
        };
        assert_eq!(workflow.descriptor(), "ZScorePerPlate|Median|||>= 2");
    }

    #[test]
    fn default_hit_signal_name_is_stable() {
        assert_eq!(ScoringWorkflow::default().hit_signal_name, "is_hit");
    }
}
