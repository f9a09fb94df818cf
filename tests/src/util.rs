#![cfg(test)]
use std::sync::Arc;

use tagcrawl_common::config::Config;
use tagcrawl_core::TagService;
use tagcrawl_core::network::tcp::SkipProbe;
use tagcrawl_protocols::{DeviceProfile, SimulatedPlc};

/// A packaging line with nested structures, padding members and one tag
/// that never answers in time.
pub const LINE_PROFILE: &str = r#"{
  "product_name": "1769-L33ER CompactLogix",
  "tags": [
    { "name": "Program:MainProgram", "declared_type": "" },
    { "name": "BatchCount", "declared_type": "DINT" },
    { "name": "Filler", "declared_type": "STATION" },
    { "name": "Labeler", "declared_type": "STATION" }
  ],
  "composite_types": [
    {
      "name": "MOTOR",
      "members": [
        { "name": "MOTOR", "declared_type": "" },
        { "name": "ZZZZZZZZZZMOTOR0", "declared_type": "SINT" },
        { "name": "Running", "declared_type": "BOOL" },
        { "name": "Speed", "declared_type": "REAL" }
      ]
    },
    {
      "name": "STATION",
      "members": [
        { "name": "STATION", "declared_type": "" },
        { "name": "Drive", "declared_type": "MOTOR" },
        { "name": "Recipe", "declared_type": "STRING" }
      ]
    }
  ],
  "values": {
    "BatchCount": 412,
    "Filler.Drive.Running": true,
    "Filler.Drive.Speed": 1450.5,
    "Filler.Recipe": "cola-330",
    "Labeler.Drive.Running": false,
    "Labeler.Drive.Speed": 0.0,
    "Labeler.Recipe": "cola-330"
  },
  "read_latency_ms": { "Labeler.Drive.Speed": 1500 }
}"#;

pub const LINE_IP: &str = "192.168.10.5";

pub fn line_plc() -> SimulatedPlc {
    let profile: DeviceProfile = DeviceProfile::from_json(LINE_PROFILE).expect("profile parses");
    SimulatedPlc::from_profile(profile)
}

pub fn fast_config() -> Config {
    Config {
        per_tag_timeout: std::time::Duration::from_millis(100),
        ..Config::default()
    }
}

pub fn service(plc: &SimulatedPlc) -> TagService {
    TagService::new(Arc::new(plc.clone()), Box::new(SkipProbe), fast_config())
}
