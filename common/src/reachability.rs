use std::time::Duration;

use async_trait::async_trait;

use crate::error::TagError;
use crate::plc::address::Address;

/// Checks that something answers at an address, without protocol knowledge.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Fails with [`TagError::Unreachable`] when nothing answers within `timeout`.
    async fn probe(&self, address: &Address, timeout: Duration) -> Result<(), TagError>;
}
