//! Artifact naming
//!
//! Derives a run's identity and the locations of its CSV and JSON artifacts.
//! Pure: no filesystem access happens here.

use chrono::{DateTime, Utc};
use scrapegate_core::domain::run::{ArtifactNames, RunIdentity};
use std::path::{Path, PathBuf};

/// Names and locations of one run's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunArtifacts {
    pub identity: RunIdentity,
    pub names: ArtifactNames,
    /// Absolute CSV path handed to the worker's output directory
    pub csv_path: PathBuf,
    /// Absolute JSON path checked after the worker exits
    pub json_path: PathBuf,
    /// CSV path relative to the base directory, as returned to callers
    pub csv_relative: String,
    /// JSON path relative to the base directory, as returned to callers
    pub json_relative: String,
}

/// Derives artifact locations inside the results directory
#[derive(Debug, Clone)]
pub struct ArtifactNamer {
    results_dir: PathBuf,
    results_dir_name: String,
}

impl ArtifactNamer {
    /// # Arguments
    /// * `results_dir` - Absolute results directory
    /// * `results_dir_name` - Its name relative to the base directory
    pub fn new(results_dir: impl Into<PathBuf>, results_dir_name: impl Into<String>) -> Self {
        Self {
            results_dir: results_dir.into(),
            results_dir_name: results_dir_name.into(),
        }
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Names a run started at `now`
    pub fn name(&self, now: DateTime<Utc>) -> RunArtifacts {
        self.name_identity(RunIdentity::at(now))
    }

    /// Names a run with an already chosen identity
    pub fn name_identity(&self, identity: RunIdentity) -> RunArtifacts {
        let names = identity.artifact_names();

        RunArtifacts {
            csv_path: self.results_dir.join(&names.csv_file),
            json_path: self.results_dir.join(&names.json_file),
            csv_relative: format!("{}/{}", self.results_dir_name, names.csv_file),
            json_relative: format!("{}/{}", self.results_dir_name, names.json_file),
            identity,
            names,
        }
    }
}
