use platescore::core::io::metrics;
use platescore::engine::progress::{Progress, ProgressReporter};
use platescore::engine::registry::AlgorithmRegistry;
use platescore::workflows::bench;
use tracing::{debug, info};

use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use crate::inputs::ScoringInputs;
use crate::utils::parser;
use crate::{config, data};

pub fn run(args: ScoreArgs) -> Result<()> {
    let inputs = ScoringInputs::new(
        args.working_dir,
        args.scoring_set,
        args.true_hits,
        args.data_files,
    );
    let validation_messages = inputs.validate();
    if !validation_messages.is_empty() {
        return Err(CliError::Validation(validation_messages));
    }

    let scoring_set = config::load_scoring_set(&inputs.scoring_set_path())?;
    info!(
        scoring_set = scoring_set.name,
        workflows = scoring_set.workflows.len(),
        data_files = inputs.data_file_names().len(),
        "Scoring inputs loaded."
    );

    let registry = AlgorithmRegistry::default();
    let reporter = ProgressReporter::with_callback(Box::new(|event| {
        if let Progress::Message(text) = event {
            println!("  {text}");
        }
    }));

    let mut records = Vec::new();
    for file_name in inputs.data_file_names() {
        let ids = parser::parse_simulation_ids(file_name)?;
        debug!(?ids, file_name, "Scoring data file.");

        let data_path = inputs.working_dir().join(file_name);
        let screen_name = format!("screen{}", ids.screen_id);
        let screen = data::load_screen_data(&data_path, &screen_name)?;
        let true_hits = data::load_true_hits(&inputs.true_hits_path(), screen.dimensions())?;
        let signal_names = screen.replicate_signal_names();

        records.extend(bench::run_scoring_set(
            &screen,
            &signal_names,
            &true_hits,
            &scoring_set,
            ids,
            &registry,
            &reporter,
        )?);
    }

    let metrics_path = inputs
        .working_dir()
        .join(metrics_file_name(inputs.scoring_set_file_name(), scoring_set.id));
    metrics::write_metrics_file(&metrics_path, &records)?;
    info!(
        records = records.len(),
        path = %metrics_path.display(),
        "Performance metrics written."
    );
    println!(
        "Wrote {} performance record(s) to {}",
        records.len(),
        metrics_path.display()
    );
    Ok(())
}

fn metrics_file_name(scoring_set_file: &str, scoring_set_id: u32) -> String {
    let stem = scoring_set_file
        .rsplit_once('.')
        .map_or(scoring_set_file, |(stem, _)| stem);
    format!("{stem}_scoringset{scoring_set_id}_metrics.txt")
}
