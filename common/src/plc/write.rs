use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::driver::status;
use crate::plc::scalar::Scalar;

/// Values to write keyed by tag path, written in insertion order.
///
/// Keying by path means one batch holds at most one value per tag.
pub type WriteRequest = IndexMap<String, Scalar>;

/// Outcome of writing one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub success: bool,
    /// Status text exactly as reported by the driver.
    pub status: String,
    /// The written value, only present on success.
    pub value_written: Option<Scalar>,
}

impl WriteOutcome {
    /// Classifies a driver status for an attempted write of `value`.
    pub fn from_status(status: impl Into<String>, value: &Scalar) -> Self {
        let status: String = status.into();
        let success: bool = status == status::SUCCESS;
        Self {
            success,
            value_written: success.then(|| value.clone()),
            status,
        }
    }
}

/// Per-tag outcomes of one write batch.
///
/// Unlike reads, every requested tag has an entry regardless of outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteResult {
    pub entries: BTreeMap<String, WriteOutcome>,
}

impl WriteResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<String>, outcome: WriteOutcome) {
        self.entries.insert(path.into(), outcome);
    }

    pub fn successful_count(&self) -> usize {
        self.entries.values().filter(|outcome| outcome.success).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.successful_count()
    }

    /// `(successful, failed)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.successful_count(), self.failed_count())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(success: bool) -> WriteOutcome {
        WriteOutcome {
            success,
            status: if success { "Success".into() } else { "Path destination unknown".into() },
            value_written: success.then(|| Scalar::Int(1)),
        }
    }

    #[test]
    fn counts_always_add_up_to_entries() {
        let mut result = WriteResult::new();
        result.record("A", outcome(true));
        result.record("B", outcome(false));
        result.record("C", outcome(true));

        assert_eq!(result.counts(), (2, 1));
        assert_eq!(result.successful_count() + result.failed_count(), result.len());
    }

    #[test]
    fn only_the_success_status_keeps_the_value() {
        let written = WriteOutcome::from_status("Success", &Scalar::Int(5));
        let refused = WriteOutcome::from_status("Privilege violation", &Scalar::Int(5));

        assert!(written.success);
        assert_eq!(written.value_written, Some(Scalar::Int(5)));
        assert!(!refused.success);
        assert_eq!(refused.value_written, None);
        assert_eq!(refused.status, "Privilege violation");
    }

    #[test]
    fn requests_keep_first_seen_order_and_last_value() {
        let mut request: WriteRequest = WriteRequest::new();
        request.insert("B".into(), Scalar::Int(1));
        request.insert("A".into(), Scalar::Int(2));
        request.insert("B".into(), Scalar::Int(3));

        let pairs: Vec<(&str, &Scalar)> = request.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(pairs, vec![("B", &Scalar::Int(3)), ("A", &Scalar::Int(2))]);
    }

    #[test]
    fn re_recording_a_path_replaces_its_outcome() {
        let mut result = WriteResult::new();
        result.record("A", outcome(false));
        result.record("A", outcome(true));

        assert_eq!(result.len(), 1);
        assert_eq!(result.counts(), (1, 0));
    }
}
