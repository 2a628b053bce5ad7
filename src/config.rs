// SPDX-License-Identifier: GPL-3.0-only

use crate::errors::DisplayResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options applied while discovering driver capabilities
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Drop repeated driver-reported formats before sorting.
    ///
    /// Off by default: duplicates reported by the driver are kept as-is.
    /// Synthesized YV12/I420 entries are never duplicated either way.
    pub dedup_formats: bool,
}

impl DiscoveryConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> DisplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> DisplayResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
