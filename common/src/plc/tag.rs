use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::plc::address::Address;
use crate::plc::scalar::Scalar;

/// A leaf tag found while crawling a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDescriptor {
    /// Dot-joined path, e.g. `Line1.Motor.Speed`.
    pub full_path: String,
    pub data_type: String,
    pub source_address: Address,
    /// Filled in by a read pass; `None` until then or when the read failed.
    pub value: Option<Scalar>,
    pub discovered_at_utc: DateTime<Utc>,
    pub discovered_at_local: DateTime<Local>,
}

impl TagDescriptor {
    pub fn new(full_path: String, data_type: String, source_address: Address) -> Self {
        let discovered_at_utc = Utc::now();
        Self {
            full_path,
            data_type,
            source_address,
            value: None,
            discovered_at_utc,
            discovered_at_local: discovered_at_utc.with_timezone(&Local),
        }
    }
}

/// Tags of one discovery pass keyed by their full path.
pub type Catalog = BTreeMap<String, TagDescriptor>;

/// Successfully read values keyed by tag path.
pub type ReadResult = BTreeMap<String, Scalar>;
