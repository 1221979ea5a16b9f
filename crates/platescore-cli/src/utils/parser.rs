use platescore::workflows::bench::BenchmarkIds;

use crate::error::{CliError, Result};

fn find_id(stem: &str, prefix: &str) -> Option<u32> {
    stem.split('_')
        .find_map(|segment| segment.strip_prefix(prefix))
        .and_then(|digits| digits.parse().ok())
}

/// Extracts the screen, hit-set, and noise-set ids from a simulated-data file
/// name of the form `screen<id>_hitset<id>_noiseset<id>...`, the naming
/// convention of the simulation generator.
pub fn parse_simulation_ids(file_name: &str) -> Result<BenchmarkIds> {
    let stem = file_name.split('.').next().unwrap_or(file_name);

    let ids = (|| {
        Some(BenchmarkIds {
            screen_id: find_id(stem, "screen")?,
            hit_set_id: find_id(stem, "hitset")?,
            noise_set_id: find_id(stem, "noiseset")?,
        })
    })();

    ids.ok_or_else(|| {
        CliError::Argument(format!(
            "data file name '{file_name}' does not match the expected format 'screen<id>_hitset<id>_noiseset<id>'"
        ))
    })
}
