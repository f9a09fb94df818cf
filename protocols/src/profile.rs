//! JSON description of a simulated controller.
//!
//! ```json
//! {
//!   "device_type": "Programmable Logic Controller",
//!   "tags": [{ "name": "Conveyor", "declared_type": "CONVEYOR" }],
//!   "composite_types": [{
//!     "name": "CONVEYOR",
//!     "members": [
//!       { "name": "CONVEYOR", "declared_type": "" },
//!       { "name": "Speed", "declared_type": "REAL" }
//!     ]
//!   }],
//!   "values": { "Conveyor.Speed": 1.5 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tagcrawl_common::config::CONTROLLER_DEVICE_TYPE;
use tagcrawl_common::plc::composite::{CompositeType, MemberDescriptor};
use tagcrawl_common::plc::scalar::Scalar;
use thiserror::Error;

use crate::STANDARD_PRIMITIVES;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("could not read device profile '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("device profile is not valid: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    #[serde(default = "default_device_type")]
    pub device_type: String,

    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub tags: Vec<MemberDescriptor>,

    #[serde(default = "default_primitives")]
    pub primitive_types: Vec<String>,

    #[serde(default)]
    pub composite_types: Vec<CompositeType>,

    #[serde(default)]
    pub values: BTreeMap<String, Scalar>,

    /// Artificial delay per tag path, in milliseconds.
    #[serde(default)]
    pub read_latency_ms: BTreeMap<String, u64>,

    /// Status text forced onto reads of a tag path.
    #[serde(default)]
    pub read_status: BTreeMap<String, String>,
}

fn default_device_type() -> String {
    CONTROLLER_DEVICE_TYPE.to_string()
}

fn default_primitives() -> Vec<String> {
    STANDARD_PRIMITIVES.iter().map(|name| name.to_string()).collect()
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            product_name: None,
            tags: Vec::new(),
            primitive_types: default_primitives(),
            composite_types: Vec::new(),
            values: BTreeMap::new(),
            read_latency_ms: BTreeMap::new(),
            read_status: BTreeMap::new(),
        }
    }
}

impl DeviceProfile {
    pub fn from_json(text: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let text: String = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_fall_back_to_a_standard_controller() {
        let profile = DeviceProfile::from_json("{}").unwrap();
        assert_eq!(profile.device_type, CONTROLLER_DEVICE_TYPE);
        assert!(profile.primitive_types.iter().any(|name| name == "DINT"));
        assert!(profile.tags.is_empty());
    }

    #[test]
    fn values_keep_their_json_types() {
        let profile = DeviceProfile::from_json(
            r#"{ "values": { "Flag": true, "Count": 42, "Speed": 1.5, "Name": "line 1" } }"#,
        )
        .unwrap();

        assert_eq!(profile.values["Flag"], Scalar::Bool(true));
        assert_eq!(profile.values["Count"], Scalar::Int(42));
        assert_eq!(profile.values["Speed"], Scalar::Real(1.5));
        assert_eq!(profile.values["Name"], Scalar::Text("line 1".into()));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(DeviceProfile::from_json("{ tags: "), Err(ProfileError::Parse(_))));
    }
}
