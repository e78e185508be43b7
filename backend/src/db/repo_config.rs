//! Repository and policy configuration file support.
//!
//! This module provides utilities for reading backend configuration from
//! TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::models::AllocationPolicy;

/// Backend configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub policy: PolicySettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Allocation policy settings.
///
/// `epoch` names the deployment generation ("cap" = 20 shifts with a uniform
/// ≤7 per-type cap, "exact" = 19 shifts at exactly 6/7/6); the optional
/// fields override individual values of the named epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicySettings {
    #[serde(default = "default_epoch")]
    pub epoch: String,
    #[serde(default)]
    pub total_quota: Option<u32>,
    #[serde(default)]
    pub max_consecutive_days: Option<u32>,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            total_quota: None,
            max_consecutive_days: None,
        }
    }
}

fn default_epoch() -> String {
    "exact".to_string()
}

impl RepositoryConfig {
    /// Load backend configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load backend configuration from the default location.
    ///
    /// Searches for `shiftdesk.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = vec![
            PathBuf::from("shiftdesk.toml"),
            PathBuf::from("backend/shiftdesk.toml"),
            PathBuf::from("../shiftdesk.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No shiftdesk.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Resolve the allocation policy for this deployment.
    pub fn allocation_policy(&self) -> Result<AllocationPolicy, RepositoryError> {
        let mut policy = AllocationPolicy::from_str(&self.policy.epoch)
            .map_err(RepositoryError::configuration)?;

        if let Some(quota) = self.policy.total_quota {
            policy.total_quota = quota;
        }
        if let Some(max) = self.policy.max_consecutive_days {
            policy.max_consecutive_days = max;
        }

        Ok(policy)
    }
}
