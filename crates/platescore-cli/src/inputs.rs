use std::path::{Path, PathBuf};

/// The file inputs of one `score` invocation, all resolved against a single
/// working directory.
#[derive(Debug, Clone)]
pub struct ScoringInputs {
    working_dir: PathBuf,
    scoring_set_file: String,
    true_hits_file: String,
    data_files: Vec<String>,
}

impl ScoringInputs {
    pub fn new(
        working_dir: PathBuf,
        scoring_set_file: String,
        true_hits_file: String,
        data_files: Vec<String>,
    ) -> Self {
        Self {
            working_dir,
            scoring_set_file,
            true_hits_file,
            data_files,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn scoring_set_file_name(&self) -> &str {
        &self.scoring_set_file
    }

    pub fn scoring_set_path(&self) -> PathBuf {
        self.working_dir.join(&self.scoring_set_file)
    }

    pub fn true_hits_path(&self) -> PathBuf {
        self.working_dir.join(&self.true_hits_file)
    }

    pub fn data_file_names(&self) -> &[String] {
        &self.data_files
    }

    pub fn data_paths(&self) -> Vec<PathBuf> {
        self.data_files
            .iter()
            .map(|name| self.working_dir.join(name))
            .collect()
    }

    fn input_file_names(&self) -> Vec<&str> {
        let mut names = vec![self.scoring_set_file.as_str(), self.true_hits_file.as_str()];
        names.extend(self.data_files.iter().map(String::as_str));
        names
    }

    /// Checks that the working directory exists and that every input file is
    /// present within it.
    ///
    /// Failures are collected into a list and reported together, rather than
    /// one at a time, so a single run surfaces every setup problem at once.
    /// An empty list means the inputs are usable.
    pub fn validate(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if !self.working_dir.is_dir() {
            messages.push(format!(
                "Working directory '{}' does not exist",
                self.working_dir.display()
            ));
        }

        for name in self.input_file_names() {
            let path = self.working_dir.join(name);
            if !path.is_file() {
                messages.push(format!(
                    "Expected input file '{}' in directory '{}'",
                    name,
                    self.working_dir.display()
                ));
            }
        }
        messages
    }
}
