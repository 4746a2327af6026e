use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::error::{AppError, AppResult, FetchError};
use crate::metrics::{PageKind, PercentileRow};

use super::client::StatsFetchClient;
use super::payload::decode_rows;

/// Anything that can produce the percentile rows for one subject.
#[async_trait]
pub trait PercentileSource: Send + Sync {
    /// Human-readable origin, used in logs and output file names.
    fn describe(&self) -> String;

    /// Fetches every row the source has for its subject.
    ///
    /// # Errors
    ///
    /// Returns an error when the rows cannot be read or decoded.
    async fn fetch_rows(&self) -> AppResult<Vec<PercentileRow>>;
}

/// Fetches rows from `source` and keeps only the first one.
///
/// # Errors
///
/// Propagates source failures and returns `NoRows` for an empty result.
pub async fn fetch_first_row<TSource>(source: &TSource) -> AppResult<PercentileRow>
where
    TSource: PercentileSource + ?Sized,
{
    let rows = source.fetch_rows().await?;
    Ok(PercentileRow::first_of(rows)?)
}

/// Percentiles for a named player from the stats backend.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: StatsFetchClient,
    page: PageKind,
    subject: String,
}

impl HttpSource {
    #[must_use]
    pub const fn new(client: StatsFetchClient, page: PageKind, subject: String) -> Self {
        Self {
            client,
            page,
            subject,
        }
    }
}

#[async_trait]
impl PercentileSource for HttpSource {
    fn describe(&self) -> String {
        self.subject.clone()
    }

    async fn fetch_rows(&self) -> AppResult<Vec<PercentileRow>> {
        self.client
            .fetch_percentiles(self.page, &self.subject)
            .await
    }
}

/// Percentiles read from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PercentileSource for FileSource {
    fn describe(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| "percentiles".to_owned(), |stem| stem.to_string_lossy().into_owned())
    }

    async fn fetch_rows(&self) -> AppResult<Vec<PercentileRow>> {
        let path = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).await.map_err(|err| {
            AppError::fetch(FetchError::ReadFile {
                path: path.clone(),
                source: err,
            })
        })?;
        let value: serde_json::Value = serde_json::from_str(&content).map_err(|err| {
            AppError::fetch(FetchError::ParseFile {
                path: path.clone(),
                source: err,
            })
        })?;
        Ok(decode_rows(value, &path)?)
    }
}
