//! Job Profile Catalog: the ordered table of job categories used for detection and scoring.
//!
//! Order matters: it is the tie-break order for detection.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::{self, DataError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProfile {
    pub id: String,
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    profiles: Vec<JobProfile>,
}

#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    profiles: Vec<JobProfile>,
}

impl JobCatalog {
    pub fn new(profiles: Vec<JobProfile>) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.id.trim().is_empty() || profile.name.trim().is_empty() {
                return Err(DataError::Invalid {
                    table: "job_profiles",
                    reason: "every profile needs an id and a name".to_string(),
                });
            }
            if !seen.insert(profile.id.as_str()) {
                return Err(DataError::Invalid {
                    table: "job_profiles",
                    reason: format!("duplicate profile id '{}'", profile.id),
                });
            }
        }
        Ok(Self { profiles })
    }

    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let file: CatalogFile = data::parse_table("job_profiles", json)?;
        Self::new(file.profiles)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, DataError> {
        let json = data::read_table(path, data::JOB_PROFILES_JSON)?;
        let catalog = Self::from_json(&json)?;
        info!("Job catalog loaded: {} profiles", catalog.profiles.len());
        Ok(catalog)
    }

    pub fn profiles(&self) -> &[JobProfile] {
        &self.profiles
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
