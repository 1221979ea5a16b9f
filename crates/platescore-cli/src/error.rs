use std::path::PathBuf;

use platescore::core::models::ModelError;
use platescore::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("input validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("metrics output failed: {0}")]
    Metrics(#[from] csv::Error),

    #[error("invalid argument: {0}")]
    Argument(String),
}
