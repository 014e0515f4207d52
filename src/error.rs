//! Error type shared by every stage of the summary job.

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors from building or persisting the vendor summary.
///
/// Library code returns these to the caller; only the binary decides
/// whether to log and carry on.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("data access error: {0}")]
    DataAccess(#[from] sqlx::Error),

    #[error("transform error: {0}")]
    Transform(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SummaryError {
    /// Decode failure for a column that holds an unusable value.
    pub(crate) fn decode(column: &str, detail: impl std::fmt::Display) -> Self {
        SummaryError::DataAccess(sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: detail.to_string().into(),
        })
    }
}
