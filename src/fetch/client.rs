use std::time::Duration;

use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{AppError, AppResult, FetchError, ValidationError};
use crate::metrics::{PageKind, PercentileRow};

use super::payload::{PercentileResponse, rows_from_response};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("rankcard/", env!("CARGO_PKG_VERSION"));

/// Client for the dashboard's percentile endpoints.
#[derive(Debug, Clone)]
pub struct StatsFetchClient {
    client: Client,
    base_url: Url,
}

impl StatsFetchClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let mut parsed = Url::parse(base_url).map_err(|err| {
            AppError::validation(ValidationError::InvalidBaseUrl {
                value: base_url.to_owned(),
                source: err,
            })
        })?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint serving percentiles for `page`, resolved against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint cannot be joined onto the base URL.
    pub fn endpoint(&self, page: PageKind) -> AppResult<Url> {
        let relative = page.endpoint().trim_start_matches('/');
        Ok(self.base_url.join(relative)?)
    }

    /// Requests the percentile rows for `subject` on `page`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success HTTP statuses, an
    /// undecodable body, or a response with `success: false`.
    pub async fn fetch_percentiles(
        &self,
        page: PageKind,
        subject: &str,
    ) -> AppResult<Vec<PercentileRow>> {
        let url = self.endpoint(page)?;
        debug!(%url, subject, page = page.name(), "Requesting percentiles");

        let response = self
            .client
            .post(url.clone())
            .form(&[(page.subject_field(), subject)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        let body: PercentileResponse = response.json().await?;
        let rows = rows_from_response(body, subject)?;
        debug!(rows = rows.len(), subject, "Received percentile rows");
        Ok(rows)
    }
}
