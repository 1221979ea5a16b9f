use thiserror::Error;

use super::interpreter::InterpreterError;
use crate::core::io::dataset::DatasetError;
use crate::core::models::ModelError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("no algorithm named '{0}' is registered")]
    UnknownAlgorithm(String),

    #[error("algorithm '{name}' is registered as a {registered}, but this stage needs a {requested}")]
    AlgorithmTypeMismatch {
        name: String,
        registered: String,
        requested: String,
    },

    #[error("malformed hit threshold expression '{expression}': {reason}")]
    MalformedExpression { expression: String, reason: String },

    #[error("no signal named '{0}' in the screen's signal collection")]
    MissingSignal(String),

    #[error("algorithm '{0}' was given an empty input collection")]
    NoInputSignals(String),

    #[error(
        "combiner '{descriptor}' has no usable values at plate {plate}, row {row}, column {column}: every contributor is ignore-masked"
    )]
    EmptyCombination {
        descriptor: String,
        plate: usize,
        row: usize,
        column: usize,
    },

    #[error("workflow '{descriptor}' produced {count} hit signals; analysis requires exactly one")]
    AmbiguousHitCall { descriptor: String, count: usize },

    #[error("interpreter invocation failed: {0}")]
    Interpreter(#[from] InterpreterError),

    #[error("dataset exchange failed: {0}")]
    Dataset(#[from] DatasetError),
}
