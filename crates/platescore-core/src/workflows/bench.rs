use tracing::{info, instrument};

use super::score;
use crate::core::io::metrics::PerformanceRecord;
use crate::core::models::info::PlatesetInfo;
use crate::core::models::screen::ScreenData;
use crate::engine::analysis::analyze_hit_calls;
use crate::engine::config::ScoringSet;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::registry::AlgorithmRegistry;

/// Identifies which simulated scenario a benchmark run scores: which screen
/// definition, which planted hit set, and which applied noise set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkIds {
    pub screen_id: u32,
    pub hit_set_id: u32,
    pub noise_set_id: u32,
}

/// Applies every workflow of a scoring set to a screen and rates each
/// resulting hit call against the ground-truth hit layout.
///
/// Each workflow runs against a fresh clone of the screen's signal state, so
/// workflows sharing stage names cannot collide on derived signal names.
/// For analysis a workflow must collapse its replicates to a single hit
/// signal (via at least one combine stage).
///
/// # Errors
///
/// Propagates any workflow failure, and returns
/// [`EngineError::AmbiguousHitCall`] for a workflow whose hit stage produced
/// more than one signal.
#[instrument(skip_all, name = "benchmark_run")]
pub fn run_scoring_set(
    screen: &ScreenData,
    signal_names: &[String],
    true_hits: &PlatesetInfo<bool>,
    scoring_set: &ScoringSet,
    ids: BenchmarkIds,
    registry: &AlgorithmRegistry,
    reporter: &ProgressReporter,
) -> Result<Vec<PerformanceRecord>, EngineError> {
    info!(
        scoring_set = scoring_set.name,
        workflows = scoring_set.workflows.len(),
        screen = screen.name(),
        "Starting benchmark run."
    );

    let mut records = Vec::with_capacity(scoring_set.workflows.len());
    for (index, workflow) in scoring_set.workflows.iter().enumerate() {
        reporter.report(Progress::Message(format!(
            "Workflow {}/{}: {}",
            index + 1,
            scoring_set.workflows.len(),
            workflow.descriptor()
        )));

        let mut working = screen.clone();
        let hits = score::run(&mut working, signal_names, workflow, registry, reporter)?;
        let hit_info = hits.single().ok_or_else(|| EngineError::AmbiguousHitCall {
            descriptor: workflow.descriptor(),
            count: hits.len(),
        })?;

        let counts = analyze_hit_calls(hit_info, true_hits)?;
        records.push(PerformanceRecord {
            screen_id: ids.screen_id,
            hit_set_id: ids.hit_set_id,
            noise_set_id: ids.noise_set_id,
            workflow: workflow.descriptor(),
            normalization: workflow.normalization.clone(),
            combine_before_scoring: workflow.combine_before_scoring.clone(),
            scoring: workflow.scoring.clone(),
            combine_after_scoring: workflow.combine_after_scoring.clone(),
            hit_threshold: workflow.hit_threshold.clone(),
            true_positive_rate: counts.true_positive_rate(),
            false_positive_rate: counts.false_positive_rate(),
            rating: counts.rating(),
        });
    }

    info!(records = records.len(), "Benchmark run complete.");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Dimensions;
    use crate::core::models::plateset::Plateset;
    use crate::core::models::provenance::Provenance;
    use crate::engine::config::ScoringWorkflow;
    use std::sync::Arc;

    fn screen() -> (ScreenData, Vec<String>) {
        let mut screen = ScreenData::new("screen_1", Dimensions::new(1, 2, 2));
        for (name, rows) in [
            ("noisy_rep_1", vec![vec![1.0, 2.0], vec![3.0, 4.0]]),
            ("noisy_rep_2", vec![vec![1.0, 2.0], vec![3.0, 6.0]]),
        ] {
            let plateset = Plateset::from_nested(vec![rows]).unwrap();
            let info = PlatesetInfo::from_plateset(
                name,
                Provenance::external("screen1_hitset1_noiseset1.txt", "loaded"),
                plateset,
            );
            screen.signals_mut().insert_info(Arc::new(info)).unwrap();
        }
        let names = screen.replicate_signal_names();
        (screen, names)
    }

    fn truth() -> PlatesetInfo<bool> {
        let mut info = PlatesetInfo::new(
            "true_hits",
            Provenance::external("hitset1.txt", "loaded"),
            Dimensions::new(1, 2, 2),
        );
        info.set_value(0, 1, 0, true);
        info.set_value(0, 1, 1, true);
        info
    }

    fn median_workflow(hit_threshold: &str) -> ScoringWorkflow {
        ScoringWorkflow {
            combine_before_scoring: "Median".to_string(),
            hit_threshold: hit_threshold.to_string(),
            ..ScoringWorkflow::default()
        }
    }

    fn ids() -> BenchmarkIds {
        BenchmarkIds {
            screen_id: 1,
            hit_set_id: 1,
            noise_set_id: 1,
        }
    }

    #[test]
    fn each_workflow_yields_one_record() {
        let (screen, names) = screen();
        let scoring_set = ScoringSet {
            id: 7,
            name: "bakeoff".to_string(),
            workflows: vec![median_workflow(">= 3"), median_workflow(">= 100")],
        };
        let records = run_scoring_set(
            &screen,
            &names,
            &truth(),
            &scoring_set,
            ids(),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(records.len(), 2);

        // The first workflow finds both planted hits and nothing else.
        assert_eq!(records[0].true_positive_rate, 1.0);
        assert_eq!(records[0].false_positive_rate, 0.0);
        assert_eq!(records[0].rating, 4);
        assert_eq!(records[0].workflow, "|Median|||>= 3");
        assert_eq!(records[0].screen_id, 1);

        // The second workflow's threshold is unreachable, so it finds none.
        assert_eq!(records[1].true_positive_rate, 0.0);
        assert_eq!(records[1].rating, -1);
    }

    #[test]
    fn workflows_with_shared_stages_do_not_collide() {
        let (screen, names) = screen();
        // Both workflows derive "Median_of_..."; each run works on a clone of
        // the screen's signal state.
        let scoring_set = ScoringSet {
            id: 7,
            name: "bakeoff".to_string(),
            workflows: vec![median_workflow(">= 3"), median_workflow(">= 4")],
        };
        let records = run_scoring_set(
            &screen,
            &names,
            &truth(),
            &scoring_set,
            ids(),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        // The original screen is untouched.
        assert_eq!(screen.signals().len(), 2);
    }

    #[test]
    fn uncombined_replicates_cannot_be_analyzed() {
        let (screen, names) = screen();
        let scoring_set = ScoringSet {
            id: 7,
            name: "bakeoff".to_string(),
            workflows: vec![ScoringWorkflow {
                hit_threshold: ">= 3".to_string(),
                ..ScoringWorkflow::default()
            }],
        };
        let err = run_scoring_set(
            &screen,
            &names,
            &truth(),
            &scoring_set,
            ids(),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::AmbiguousHitCall { count: 2, .. }
        ));
    }
}
