use std::sync::Arc;

use tagcrawl_common::config::Config;
use tagcrawl_common::driver::{ProtocolDriver, Session};
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::progress::Interrupt;
use tagcrawl_common::reachability::Prober;
use tracing::{debug, warn};

/// Entry point for every controller operation.
///
/// Holds the driver and prober it talks through plus the timeouts to apply.
/// It keeps no session between calls: each operation opens what it needs
/// and closes it before returning.
pub struct TagService {
    driver: Arc<dyn ProtocolDriver>,
    prober: Box<dyn Prober>,
    cfg: Config,
    interrupt: Interrupt,
}

impl TagService {
    pub fn new(driver: Arc<dyn ProtocolDriver>, prober: Box<dyn Prober>, cfg: Config) -> Self {
        Self {
            driver,
            prober,
            cfg,
            interrupt: Interrupt::new(),
        }
    }

    /// Shares `interrupt` with the caller so it can stop a running batch.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub(crate) fn prober(&self) -> &dyn Prober {
        self.prober.as_ref()
    }

    pub(crate) fn ensure_not_interrupted(&self) -> Result<(), TagError> {
        if self.interrupt.is_triggered() {
            return Err(TagError::Cancelled);
        }
        Ok(())
    }

    pub(crate) async fn open_session(&self, address: &Address) -> Result<Arc<dyn Session>, TagError> {
        let session = self
            .driver
            .open_session(address)
            .await
            .map_err(|e| TagError::connection(address, e))?;
        debug!("session opened to {address}");
        Ok(session)
    }

    /// Closing is best effort; the operation's own result is what the caller sees.
    pub(crate) async fn close_session(&self, session: &dyn Session, address: &Address) {
        match session.close().await {
            Ok(()) => debug!("session to {address} closed"),
            Err(e) => warn!("closing session to {address} failed: {e}"),
        }
    }
}
