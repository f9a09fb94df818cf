//! Batch writes with one recorded outcome per tag.
//!
//! A failed write never stops the batch. Writes have no deadline of their
//! own; a driver that hangs on a write hangs the batch.

use std::sync::Arc;

use tagcrawl_common::driver::{Response, Session};
use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::plc::write::{WriteOutcome, WriteRequest, WriteResult};
use tagcrawl_common::progress::{OnWriteProgress, notify_outcome};
use tracing::{debug, info};

use crate::service::TagService;

impl TagService {
    pub async fn write(
        &self,
        candidate: &str,
        tag_values: &WriteRequest,
        on_progress: OnWriteProgress<'_>,
    ) -> Result<WriteResult, TagError> {
        let address: Address = self.precheck(candidate).await?;

        let session = self.open_session(&address).await?;
        let result = self.write_batch(&session, tag_values, on_progress).await;
        self.close_session(session.as_ref(), &address).await;
        let result: WriteResult = result?;

        let (successful, failed) = result.counts();
        info!("{successful} of {} writes to {address} succeeded, {failed} failed", result.len());
        Ok(result)
    }

    async fn write_batch(
        &self,
        session: &Arc<dyn Session>,
        tag_values: &WriteRequest,
        on_progress: OnWriteProgress<'_>,
    ) -> Result<WriteResult, TagError> {
        let mut result: WriteResult = WriteResult::new();

        for (path, value) in tag_values {
            self.ensure_not_interrupted()?;

            let status: String = match session.write(path, value).await {
                Ok(Response { status, .. }) => status,
                Err(e) => e.to_string(),
            };
            let outcome: WriteOutcome = WriteOutcome::from_status(status, value);

            if outcome.success {
                notify_outcome(on_progress, &format!("wrote {value} to '{path}'"), true);
            } else {
                let failure = TagError::WriteFailure {
                    path: path.clone(),
                    status: outcome.status.clone(),
                };
                debug!("{failure}");
                notify_outcome(on_progress, &failure.to_string(), false);
            }

            result.record(path.clone(), outcome);
        }

        Ok(result)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
