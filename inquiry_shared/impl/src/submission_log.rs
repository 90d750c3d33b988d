use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use inquiry_shared_contracts::submission_log::SubmissionLogService;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

/// Appends submission log lines to a file. Without a path every line is
/// discarded.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLogServiceImpl {
    path: Option<Arc<PathBuf>>,
}

impl SubmissionLogServiceImpl {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.map(Arc::new),
        }
    }
}

impl SubmissionLogService for SubmissionLogServiceImpl {
    #[tracing::instrument(skip(self))]
    async fn append(&self, mut line: String) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&**path)
            .await
            .with_context(|| format!("Failed to open submission log at {}", path.display()))?;

        file.write_all(line.as_bytes())
            .await
            .context("Failed to write submission log line")?;
        file.flush()
            .await
            .context("Failed to flush submission log")
    }
}
