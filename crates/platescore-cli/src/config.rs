use std::path::Path;

use platescore::engine::config::{ScoringSet, ScoringWorkflow};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct FileScoringWorkflow {
    #[serde(default)]
    normalization: String,
    #[serde(default, rename = "combine-before-scoring")]
    combine_before_scoring: String,
    #[serde(default)]
    scoring: String,
    #[serde(default, rename = "combine-after-scoring")]
    combine_after_scoring: String,
    #[serde(rename = "hit-threshold")]
    hit_threshold: String,
    #[serde(default, rename = "hit-signal-name")]
    hit_signal_name: Option<String>,
}

impl From<FileScoringWorkflow> for ScoringWorkflow {
    fn from(file: FileScoringWorkflow) -> Self {
        let defaults = ScoringWorkflow::default();
        Self {
            normalization: file.normalization,
            combine_before_scoring: file.combine_before_scoring,
            scoring: file.scoring,
            combine_after_scoring: file.combine_after_scoring,
            hit_threshold: file.hit_threshold,
            hit_signal_name: file.hit_signal_name.unwrap_or(defaults.hit_signal_name),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct FileScoringSet {
    id: u32,
    name: String,
    #[serde(rename = "workflow")]
    workflows: Vec<FileScoringWorkflow>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ScoringSetFile {
    #[serde(rename = "scoring-set")]
    scoring_set: FileScoringSet,
}

/// Loads a scoring-set definition from a TOML file of the form:
///
/// ```toml
/// [scoring-set]
/// id = 1
/// name = "bakeoff"
///
/// [[scoring-set.workflow]]
/// normalization = "ZScorePerPlate"
/// combine-before-scoring = "Median"
/// hit-threshold = ">= 2"
/// ```
pub fn load_scoring_set(path: &Path) -> Result<ScoringSet> {
    debug!("Loading scoring set from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let file: ScoringSetFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(ScoringSet {
        id: file.scoring_set.id,
        name: file.scoring_set.name,
        workflows: file
            .scoring_set
            .workflows
            .into_iter()
            .map(ScoringWorkflow::from)
            .collect(),
    })
}
