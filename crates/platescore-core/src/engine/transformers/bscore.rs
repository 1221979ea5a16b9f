use std::sync::Arc;

use tracing::info;

use crate::core::io::dataset;
use crate::core::models::info::PlatesetInfo;
use crate::core::models::keyed::KeyedPlatesetInfos;
use crate::core::models::provenance::Provenance;
use crate::core::models::reagent::Reagent;
use crate::engine::error::EngineError;
use crate::engine::interpreter::{InterpreterConfig, ScriptRunner};
use crate::engine::registry::DynTransformer;

const DESCRIPTOR: &str = "BScore";

/// Normalizer that computes B scores by delegating to the external
/// statistical interpreter.
///
/// A B score is the residual of a per-plate two-way median polish, rescaled
/// by the median absolute deviation; it removes row and column positional
/// effects that per-well transforms cannot see. Because the polish needs the
/// whole plate at once, this type implements the erased
/// [`DynTransformer`] contract directly instead of the per-well
/// [`Transformer`](super::Transformer) protocol.
///
/// Construction requires interpreter configuration, so the normalizer is not
/// part of the zero-argument builtin registry; callers may register a
/// configured instance under a custom name.
pub struct BScoreNormalizer {
    runner: ScriptRunner,
    reagents: Option<Arc<PlatesetInfo<Reagent>>>,
}

impl BScoreNormalizer {
    /// Creates a normalizer running scripts through the given interpreter.
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            runner: ScriptRunner::new(config),
            reagents: None,
        }
    }

    /// Attaches the reagent layout, so the exchanged dataset marks control
    /// wells for the interpreter-side code.
    pub fn with_reagents(mut self, reagents: Arc<PlatesetInfo<Reagent>>) -> Self {
        self.reagents = Some(reagents);
        self
    }

    fn generate_script(&self) -> String {
        let dataset = ScriptRunner::script_literal(&self.runner.dataset_path());
        let output = ScriptRunner::script_literal(&self.runner.output_path());
        format!(
            r#"suppressPackageStartupMessages(library("RNAither"))
dataset <- read.table("{dataset}", header=TRUE, sep="\t", stringsAsFactors=FALSE)
normalized <- NULL
for (sig in unique(dataset$signal)) {{
  for (p in unique(dataset$plate)) {{
    slice <- dataset[dataset$signal == sig & dataset$plate == p, ]
    grid <- xtabs(value ~ row + column, data = slice)
    polish <- medpolish(grid, trace.iter = FALSE)
    scaled <- polish$residuals / mad(polish$residuals, na.rm = TRUE)
    slice$value <- scaled[cbind(slice$row + 1, slice$column + 1)]
    normalized <- rbind(normalized, slice[, c("signal", "plate", "row", "column", "value")])
  }}
}}
write.table(normalized, "{output}", sep="\t", quote=FALSE, row.names=FALSE)
"#
        )
    }
}

impl DynTransformer for BScoreNormalizer {
    fn descriptor(&self) -> String {
        DESCRIPTOR.to_string()
    }

    fn transform(
        &self,
        inputs: &KeyedPlatesetInfos<f64>,
    ) -> Result<KeyedPlatesetInfos<f64>, EngineError> {
        let dimensions = inputs
            .dimensions()
            .ok_or_else(|| EngineError::NoInputSignals(DESCRIPTOR.to_string()))?;

        let dataset_text = dataset::dataset_to_string(inputs, self.reagents.as_deref())?;
        info!(signals = inputs.len(), "Delegating B-score normalization to the interpreter.");
        let output = self.runner.run(&self.generate_script(), &dataset_text)?;

        let names: Vec<&str> = inputs.names().collect();
        let tables = dataset::read_normalized(output.as_bytes(), &names, dimensions)?;

        let mut result = KeyedPlatesetInfos::new();
        for (name, info) in inputs.iter() {
            let Some(values) = tables.get(name) else {
                continue; // read_normalized has already verified presence
            };
            let normalized = PlatesetInfo::with_mask(
                format!("{DESCRIPTOR}_of_{name}"),
                Provenance::new([name], DESCRIPTOR),
                values.clone(),
                info.ignore_mask().clone(),
            )?;
            result.insert(Arc::new(normalized))?;
        }
        Ok(result)
    }
}
