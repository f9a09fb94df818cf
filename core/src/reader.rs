//! # Tag Reader
//!
//! Reads a list of tag paths inside one session, one tag at a time.
//!
//! Each read runs on its own task under a deadline. When the deadline passes
//! the supervisor stops waiting and moves to the next tag; the worker is left
//! to finish on its own and whatever it returns is thrown away. Only the
//! supervising loop touches the result map.
//!
//! Failures of single tags are logged and skipped. The batch only fails when
//! nothing at all could be read.

use std::sync::Arc;
use std::time::Duration;

use tagcrawl_common::driver::{Response, Session, status};
use tagcrawl_common::error::{DriverError, TagError};
use tagcrawl_common::plc::address::Address;
use tagcrawl_common::plc::scalar::Scalar;
use tagcrawl_common::plc::tag::ReadResult;
use tagcrawl_common::progress::{OnProgress, notify};
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::service::TagService;

impl TagService {
    /// Reads `paths` with the configured per-tag timeout.
    pub async fn read(
        &self,
        candidate: &str,
        paths: &[String],
        on_progress: OnProgress<'_>,
    ) -> Result<ReadResult, TagError> {
        self.read_with_timeout(candidate, paths, self.config().per_tag_timeout, on_progress)
            .await
    }

    pub async fn read_with_timeout(
        &self,
        candidate: &str,
        paths: &[String],
        per_tag_timeout: Duration,
        on_progress: OnProgress<'_>,
    ) -> Result<ReadResult, TagError> {
        let address: Address = self.precheck(candidate).await?;

        let session = self.open_session(&address).await?;
        let values = self
            .read_batch(&session, paths, per_tag_timeout, on_progress)
            .await;
        self.close_session(session.as_ref(), &address).await;
        let values: ReadResult = values?;

        if values.is_empty() {
            return Err(TagError::NoTagsRead {
                attempted: paths.len(),
            });
        }

        info!("{} of {} tags read from {address}", values.len(), paths.len());
        Ok(values)
    }

    async fn read_batch(
        &self,
        session: &Arc<dyn Session>,
        paths: &[String],
        per_tag_timeout: Duration,
        on_progress: OnProgress<'_>,
    ) -> Result<ReadResult, TagError> {
        let mut values: ReadResult = ReadResult::new();

        for path in paths {
            self.ensure_not_interrupted()?;
            notify(on_progress, &format!("reading tag '{path}'"));

            match read_one(session, path, per_tag_timeout).await {
                Ok(value) => {
                    debug!("{path} = {value}");
                    values.insert(path.clone(), value);
                }
                Err(e) => debug!("skipping tag: {e}"),
            }
        }

        Ok(values)
    }
}

type WorkerOutcome = Result<Result<Response<Scalar>, DriverError>, JoinError>;

async fn read_one(
    session: &Arc<dyn Session>,
    path: &str,
    per_tag_timeout: Duration,
) -> Result<Scalar, TagError> {
    let worker_session: Arc<dyn Session> = Arc::clone(session);
    let worker_path: String = path.to_string();
    let worker = tokio::spawn(async move { worker_session.read(&worker_path).await });

    let outcome: WorkerOutcome = match timeout(per_tag_timeout, worker).await {
        Ok(outcome) => outcome,
        // Dropping the handle detaches the worker.
        Err(_elapsed) => {
            return Err(TagError::PerTagTimeout {
                path: path.to_string(),
                timeout: per_tag_timeout,
            });
        }
    };

    let rejected = |status: String| TagError::ReadRejected {
        path: path.to_string(),
        status,
    };

    let response: Response<Scalar> = match outcome {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return Err(rejected(e.to_string())),
        Err(e) => return Err(rejected(format!("read task failed: {e}"))),
    };

    if response.status == status::CONNECTION_REFUSED {
        return Err(rejected("connection actively refused".to_string()));
    }
    response.into_result().map_err(rejected)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
