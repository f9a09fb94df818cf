use tagcrawl_common::error::TagError;
use tagcrawl_common::plc::tag::{Catalog, ReadResult};
use tagcrawl_common::progress::OnProgress;
use tracing::info;

use crate::service::TagService;

impl TagService {
    /// Discovers every tag and fills in the values of one read pass.
    ///
    /// Discovery and reading each use their own session. Tags that could not
    /// be read keep `value = None`; a pass where nothing could be read fails
    /// with [`TagError::NoTagsRead`].
    pub async fn snapshot(
        &self,
        candidate: &str,
        on_progress: OnProgress<'_>,
    ) -> Result<Catalog, TagError> {
        let mut catalog: Catalog = self.build_catalog(candidate).await?;
        let paths: Vec<String> = catalog.keys().cloned().collect();

        let values: ReadResult = self.read(candidate, &paths, on_progress).await?;
        for (path, value) in values {
            if let Some(tag) = catalog.get_mut(&path) {
                tag.value = Some(value);
            }
        }

        info!(
            "snapshot of {candidate} holds {} tags, {} with values",
            catalog.len(),
            catalog.values().filter(|tag| tag.value.is_some()).count()
        );
        Ok(catalog)
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
