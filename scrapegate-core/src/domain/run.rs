//! Run identity and artifact naming
//!
//! Every scrape run gets a token derived from the wall-clock time plus a short
//! random disambiguator. The token names the run's CSV and JSON artifacts.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Timestamp layout used in artifact names (`YYYY-MM-DD_HH-MM-SS`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Number of hex characters in the disambiguator
const DISAMBIGUATOR_LEN: usize = 8;

/// Token identifying a single scrape run
///
/// Formatted as `<timestamp>_<disambiguator>`, e.g. `2024-03-05_14-07-09_3f9a1c02`.
/// Only filename-safe characters are used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunIdentity {
    token: String,
}

impl RunIdentity {
    /// Creates an identity for a run started at `time` with a fresh random disambiguator
    pub fn at(time: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self::from_parts(time, &suffix[..DISAMBIGUATOR_LEN])
    }

    /// Creates an identity from an explicit time and disambiguator
    pub fn from_parts(time: DateTime<Utc>, disambiguator: &str) -> Self {
        Self {
            token: format!("{}_{}", time.format(TIMESTAMP_FORMAT), disambiguator),
        }
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Artifact file names derived from this identity
    pub fn artifact_names(&self) -> ArtifactNames {
        ArtifactNames {
            csv_file: format!("jobs_{}.csv", self.token),
            json_file: format!("jobs_{}.json", self.token),
        }
    }
}

impl fmt::Display for RunIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// File names (not paths) of a run's artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub csv_file: String,
    pub json_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_identity_from_parts() {
        let identity = RunIdentity::from_parts(fixed_time(), "deadbeef");
        assert_eq!(identity.as_str(), "2024-03-05_14-07-09_deadbeef");
        assert_eq!(identity.to_string(), "2024-03-05_14-07-09_deadbeef");
    }

    #[test]
    fn test_artifact_names() {
        let names = RunIdentity::from_parts(fixed_time(), "deadbeef").artifact_names();
        assert_eq!(names.csv_file, "jobs_2024-03-05_14-07-09_deadbeef.csv");
        assert_eq!(names.json_file, "jobs_2024-03-05_14-07-09_deadbeef.json");
    }

    #[test]
    fn test_same_second_identities_differ() {
        let a = RunIdentity::at(fixed_time());
        let b = RunIdentity::at(fixed_time());
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("2024-03-05_14-07-09_"));
        assert_eq!(a.as_str().len(), "2024-03-05_14-07-09_".len() + DISAMBIGUATOR_LEN);
    }

    #[test]
    fn test_identity_is_filename_safe() {
        let identity = RunIdentity::at(Utc::now());
        assert!(
            identity
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
