//! The blocking boundary to an external statistical interpreter.
//!
//! A handful of normalization methods are delegated to an external
//! interpreter process (in practice R with the RNAither package). The
//! exchange is file-based and deliberately minimal: a tab-delimited dataset
//! and a generated script are written into a working directory, the
//! interpreter executable is invoked with the script path as its sole
//! argument, and a designated output file is read back once the process
//! exits. The child's stdout and exit status are not part of the contract;
//! only the presence of the output file is.
//!
//! The process is slow and unobservable mid-flight, so the runner enforces a
//! configurable timeout and kills the child when it expires.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use std::{fs, thread};

use thiserror::Error;
use tracing::{debug, info};

/// File name of the dataset handed to the interpreter.
pub const DATASET_FILE_NAME: &str = "interpreter_dataset.txt";
/// File name of the generated script.
pub const SCRIPT_FILE_NAME: &str = "interpreter_script.R";
/// File name the script must write its results to.
pub const OUTPUT_FILE_NAME: &str = "interpreter_output.txt";

/// How long a run may take before the child is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors arising at the interpreter boundary.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("interpreter did not finish within {limit:?} and was killed")]
    Timeout { limit: Duration },

    #[error("interpreter exited without writing its output file at '{}'", .0.display())]
    MissingOutput(PathBuf),
}

/// Where the interpreter lives and where the exchange files go.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Path to the interpreter executable (e.g. `Rscript`).
    pub executable: PathBuf,
    /// Directory the dataset, script, and output files are exchanged in.
    pub working_dir: PathBuf,
    /// How long a run may take before the child is killed.
    pub timeout: Duration,
}

impl InterpreterConfig {
    /// Creates a config with the default timeout.
    pub fn new(executable: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            working_dir: working_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs generated scripts through the external interpreter.
pub struct ScriptRunner {
    config: InterpreterConfig,
}

impl ScriptRunner {
    /// Creates a runner over the given configuration.
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    /// Path the dataset is written to; script generators embed this.
    pub fn dataset_path(&self) -> PathBuf {
        self.config.working_dir.join(DATASET_FILE_NAME)
    }

    /// Path the script is written to.
    pub fn script_path(&self) -> PathBuf {
        self.config.working_dir.join(SCRIPT_FILE_NAME)
    }

    /// Path the script must write its results to; script generators embed
    /// this.
    pub fn output_path(&self) -> PathBuf {
        self.config.working_dir.join(OUTPUT_FILE_NAME)
    }

    /// Writes the dataset and script, runs the interpreter to completion, and
    /// reads back the output file.
    ///
    /// Any previous exchange files are overwritten, and a stale output file
    /// is removed up front so a failed run cannot be mistaken for a
    /// successful one.
    ///
    /// # Errors
    ///
    /// Returns [`InterpreterError::Timeout`] if the child outlives the
    /// configured limit and [`InterpreterError::MissingOutput`] if it exits
    /// without producing the output file.
    pub fn run(&self, script: &str, dataset: &str) -> Result<String, InterpreterError> {
        let dataset_path = self.dataset_path();
        let script_path = self.script_path();
        let output_path = self.output_path();

        fs::write(&dataset_path, dataset)?;
        fs::write(&script_path, script)?;
        if output_path.exists() {
            fs::remove_file(&output_path)?;
        }

        info!(
            executable = %self.config.executable.display(),
            script = %script_path.display(),
            "Invoking external interpreter."
        );
        let mut child = Command::new(&self.config.executable)
            .arg(&script_path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let started = Instant::now();
        loop {
            // Exit status is deliberately not inspected; the output file is
            // the only success signal.
            if child.try_wait()?.is_some() {
                break;
            }
            if started.elapsed() >= self.config.timeout {
                child.kill()?;
                child.wait()?;
                return Err(InterpreterError::Timeout {
                    limit: self.config.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
        debug!(elapsed = ?started.elapsed(), "Interpreter finished.");

        if !output_path.exists() {
            return Err(InterpreterError::MissingOutput(output_path));
        }
        Ok(fs::read_to_string(&output_path)?)
    }

    /// Normalizes a path for embedding in interpreter script text, which
    /// expects forward slashes regardless of platform.
    pub fn script_literal(path: &Path) -> String {
        path.display().to_string().replace('\\', "/")
    }
}
