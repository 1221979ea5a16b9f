use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::core::models::keyed::KeyedPlatesetInfos;
use crate::core::models::screen::ScreenData;
use crate::engine::config::ScoringWorkflow;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::registry::AlgorithmRegistry;
use crate::engine::threshold::HitThreshold;
use crate::engine::transformers::{self, hit_id::HitIdTransformer};

/// Executes one scoring workflow over a screen's signals.
///
/// The pipeline is a fixed sequence of stages; each stage but the last is
/// skipped when its configured algorithm name is empty:
///
/// 1. **Select signals** - gather the named signals into the working set.
/// 2. **Normalize** - a transformer resolved by name.
/// 3. **Combine before scoring** - a combiner resolved by name, collapsing
///    the replicates to a single signal.
/// 4. **Score** - a transformer resolved by name.
/// 5. **Combine after scoring** - a combiner resolved by name.
/// 6. **Identify hits** - always runs: the hit-threshold expression is
///    parsed into a predicate and applied to the working set under the
///    configured hit-signal label.
///
/// Every stage output replaces the working set and is also merged into the
/// screen's signal collection for later inspection and output. The returned
/// collection holds the boolean hit signal(s) produced by the final stage.
///
/// # Errors
///
/// Returns [`EngineError::MissingSignal`] if a selected signal is absent,
/// [`EngineError::UnknownAlgorithm`] or
/// [`EngineError::AlgorithmTypeMismatch`] if a configured stage cannot be
/// resolved, and [`EngineError::MalformedExpression`] for an invalid
/// hit-threshold expression. All are fatal to the run; nothing is retried.
#[instrument(skip_all, name = "scoring_workflow")]
pub fn run(
    screen: &mut ScreenData,
    signal_names: &[String],
    workflow: &ScoringWorkflow,
    registry: &AlgorithmRegistry,
    reporter: &ProgressReporter,
) -> Result<KeyedPlatesetInfos<bool>, EngineError> {
    info!(workflow = workflow.descriptor(), "Starting scoring workflow.");

    // === Stage 1: Select signals ===
    reporter.report(Progress::StageStart {
        name: "SelectSignals",
    });
    let mut current = select_signals(screen, signal_names)?;
    reporter.report(Progress::StageFinish);

    // === Stage 2: Normalize ===
    current = transformer_stage(
        "Normalize",
        &workflow.normalization,
        current,
        screen,
        registry,
        reporter,
    )?;

    // === Stage 3: Combine replicates before scoring ===
    current = combiner_stage(
        "CombineBeforeScoring",
        &workflow.combine_before_scoring,
        current,
        screen,
        registry,
        reporter,
    )?;

    // === Stage 4: Score ===
    current = transformer_stage(
        "Score",
        &workflow.scoring,
        current,
        screen,
        registry,
        reporter,
    )?;

    // === Stage 5: Combine replicates after scoring ===
    current = combiner_stage(
        "CombineAfterScoring",
        &workflow.combine_after_scoring,
        current,
        screen,
        registry,
        reporter,
    )?;

    // === Stage 6: Identify hits ===
    reporter.report(Progress::StageStart {
        name: "IdentifyHits",
    });
    let threshold: HitThreshold = workflow.hit_threshold.parse()?;
    let hit_transformer = HitIdTransformer::new(workflow.hit_signal_name.clone(), move |value| {
        threshold.matches(value)
    });
    let hits = transformers::transform(&hit_transformer, &current)?;
    screen.signals_mut().extend_typed(&hits)?;
    reporter.report(Progress::StageFinish);

    info!(hit_signals = hits.len(), "Scoring workflow complete.");
    Ok(hits)
}

fn select_signals(
    screen: &ScreenData,
    signal_names: &[String],
) -> Result<KeyedPlatesetInfos<f64>, EngineError> {
    let mut selected = KeyedPlatesetInfos::new();
    for name in signal_names {
        let info = screen
            .signals()
            .get_typed::<f64>(name)?
            .ok_or_else(|| EngineError::MissingSignal(name.clone()))?;
        selected.insert(info)?;
    }
    debug!(count = selected.len(), "Selected working signals.");
    Ok(selected)
}

fn transformer_stage(
    stage: &'static str,
    algorithm: &str,
    current: KeyedPlatesetInfos<f64>,
    screen: &mut ScreenData,
    registry: &AlgorithmRegistry,
    reporter: &ProgressReporter,
) -> Result<KeyedPlatesetInfos<f64>, EngineError> {
    if algorithm.trim().is_empty() {
        debug!(stage, "Stage skipped: no algorithm configured.");
        reporter.report(Progress::StageSkipped { name: stage });
        return Ok(current);
    }

    reporter.report(Progress::StageStart { name: stage });
    let transformer = registry.resolve_transformer(algorithm)?;
    let outputs = transformer.transform(&current)?;
    screen.signals_mut().extend_typed(&outputs)?;
    info!(stage, algorithm, signals = outputs.len(), "Stage complete.");
    reporter.report(Progress::StageFinish);
    Ok(outputs)
}

fn combiner_stage(
    stage: &'static str,
    algorithm: &str,
    current: KeyedPlatesetInfos<f64>,
    screen: &mut ScreenData,
    registry: &AlgorithmRegistry,
    reporter: &ProgressReporter,
) -> Result<KeyedPlatesetInfos<f64>, EngineError> {
    if algorithm.trim().is_empty() {
        debug!(stage, "Stage skipped: no algorithm configured.");
        reporter.report(Progress::StageSkipped { name: stage });
        return Ok(current);
    }

    reporter.report(Progress::StageStart { name: stage });
    let combiner = registry.resolve_double_combiner(algorithm)?;
    let combined = combiner.combine(&current)?;
    screen.signals_mut().insert_info(Arc::clone(&combined))?;
    info!(stage, algorithm, output = combined.name(), "Stage complete.");
    reporter.report(Progress::StageFinish);
    KeyedPlatesetInfos::from_infos([combined]).map_err(EngineError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Dimensions;
    use crate::core::models::info::PlatesetInfo;
    use crate::core::models::plateset::Plateset;
    use crate::core::models::provenance::Provenance;

    fn screen_with_replicates() -> (ScreenData, Vec<String>) {
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

    fn workflow(combine_before: &str, hit_threshold: &str) -> ScoringWorkflow {
        ScoringWorkflow {
            combine_before_scoring: combine_before.to_string(),
            hit_threshold: hit_threshold.to_string(),
            ..ScoringWorkflow::default()
        }
    }

    #[test]
    fn median_combine_then_threshold_identifies_hits() {
        let (mut screen, names) = screen_with_replicates();
        let hits = run(
            &mut screen,
            &names,
            &workflow("Median", ">= 3"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        // Median of the replicates is [[1, 2], [3, 5]].
        let combined = screen
            .signals()
            .get_typed::<f64>("Median_of_noisy_rep_1_noisy_rep_2")
            .unwrap()
            .unwrap();
        assert_eq!(*combined.value(0, 0, 0), 1.0);
        assert_eq!(*combined.value(0, 1, 1), 5.0);

        let hit_info = hits.single().unwrap();
        assert_eq!(hit_info.name(), "is_hit_of_Median_of_noisy_rep_1_noisy_rep_2");
        assert!(!*hit_info.value(0, 0, 0));
        assert!(!*hit_info.value(0, 0, 1));
        assert!(*hit_info.value(0, 1, 0));
        assert!(*hit_info.value(0, 1, 1));
    }

    #[test]
    fn stricter_threshold_keeps_only_the_top_well() {
        let (mut screen, names) = screen_with_replicates();
        let hits = run(
            &mut screen,
            &names,
            &workflow("Median", ">= 4"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        let hit_info = hits.single().unwrap();
        assert!(!*hit_info.value(0, 1, 0));
        assert!(*hit_info.value(0, 1, 1));
    }

    #[test]
    fn empty_stage_names_pass_signals_through_unchanged() {
        let (mut screen, names) = screen_with_replicates();
        let hits = run(
            &mut screen,
            &names,
            &workflow("", ">= 3"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        // With every optional stage skipped, hit identification ran directly
        // over the selected raw replicates.
        assert_eq!(hits.len(), 2);
        let names: Vec<_> = hits.names().collect();
        assert_eq!(names, vec!["is_hit_of_noisy_rep_1", "is_hit_of_noisy_rep_2"]);
        let first = hits.get("is_hit_of_noisy_rep_1").unwrap();
        assert_eq!(first.provenance().input_names(), ["noisy_rep_1"]);
    }

    #[test]
    fn workflow_results_merge_into_the_screen_collection() {
        let (mut screen, names) = screen_with_replicates();
        run(
            &mut screen,
            &names,
            &workflow("Median", ">= 3"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(screen.signals().contains("Median_of_noisy_rep_1_noisy_rep_2"));
        assert!(
            screen
                .signals()
                .contains("is_hit_of_Median_of_noisy_rep_1_noisy_rep_2")
        );
        assert_eq!(screen.signals().len(), 4);
    }

    #[test]
    fn missing_selected_signal_is_fatal() {
        let (mut screen, _) = screen_with_replicates();
        let err = run(
            &mut screen,
            &["noisy_rep_9".to_string()],
            &workflow("", ">= 3"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingSignal(name) if name == "noisy_rep_9"));
    }

    #[test]
    fn unknown_stage_algorithm_is_fatal() {
        let (mut screen, names) = screen_with_replicates();
        let mut bad = workflow("", ">= 3");
        bad.normalization = "ZScorePerWormhole".to_string();
        let err = run(
            &mut screen,
            &names,
            &bad,
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::UnknownAlgorithm(_)));
    }

    #[test]
    fn boolean_algorithm_in_a_double_stage_is_fatal() {
        let (mut screen, names) = screen_with_replicates();
        let err = run(
            &mut screen,
            &names,
            &workflow("And", ">= 3"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::AlgorithmTypeMismatch { .. }));
    }

    #[test]
    fn malformed_threshold_is_fatal() {
        let (mut screen, names) = screen_with_replicates();
        let err = run(
            &mut screen,
            &names,
            &workflow("Median", "ge 2"),
            &AlgorithmRegistry::default(),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MalformedExpression { .. }));
    }

    #[test]
    fn stage_events_are_reported_in_pipeline_order() {
        use std::sync::Mutex;

        let (mut screen, names) = screen_with_replicates();
        let events: Mutex<Vec<String>> = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::StageStart { name } | Progress::StageSkipped { name } = event {
                events.lock().unwrap().push(name.to_string());
            }
        }));
        run(
            &mut screen,
            &names,
            &workflow("Median", ">= 3"),
            &AlgorithmRegistry::default(),
            &reporter,
        )
        .unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                "SelectSignals",
                "Normalize",
                "CombineBeforeScoring",
                "Score",
                "CombineAfterScoring",
                "IdentifyHits"
            ]
        );
    }
}
