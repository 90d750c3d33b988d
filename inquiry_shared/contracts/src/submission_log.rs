use std::future::Future;

/// Append-only sink recording one line per contact form delivery attempt.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionLogService: Send + Sync + 'static {
    /// Appends `line` followed by a newline.
    fn append(&self, line: String) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockSubmissionLogService {
    pub fn with_append(mut self, line: String) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(line))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_append_error(mut self, line: String) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(line))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "Permission denied"
                ))))
            });
        self
    }
}
