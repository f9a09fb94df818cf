use std::time::Duration;

/// Default liveness probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Default bound applied to every single-tag read.
pub const DEFAULT_TAG_TIMEOUT: Duration = Duration::from_secs(2);

/// EtherNet/IP explicit messaging port.
pub const DEFAULT_PROBE_PORT: u16 = 44818;

/// Device type reported by the controllers this tool accepts.
pub const CONTROLLER_DEVICE_TYPE: &str = "Programmable Logic Controller";

#[derive(Debug, Clone)]
pub struct Config {
    /// How long the reachability probe waits for any answer.
    pub probe_timeout: Duration,

    /// TCP port the reachability probe knocks on.
    pub probe_port: u16,

    /// Upper bound for one tag read inside a batch.
    ///
    /// A read that exceeds it is abandoned and the batch moves on.
    pub per_tag_timeout: Duration,

    /// Device type a remote must report to pass classification.
    pub expected_device_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            probe_port: DEFAULT_PROBE_PORT,
            per_tag_timeout: DEFAULT_TAG_TIMEOUT,
            expected_device_type: CONTROLLER_DEVICE_TYPE.to_string(),
        }
    }
}
