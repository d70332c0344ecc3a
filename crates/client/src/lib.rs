//! HTTP client for the sequence data API.
//!
//! Fetches `/{organism}/sample/details` and parses the `data` array
//! into [`SequenceRecord`]s. The [`SampleSource`] trait is the seam
//! the run loop depends on, so tests can substitute canned responses.

pub mod error;

use serde::Deserialize;

use seqwatch_core::SequenceRecord;

pub use error::FetchError;

/// Source of sample records for an organism.
#[async_trait::async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch the current sample records for `organism`.
    async fn fetch_details(&self, organism: &str) -> Result<Vec<SequenceRecord>, FetchError>;
}

/// Reqwest-backed client for a LAPIS-style details endpoint.
#[derive(Debug, Clone)]
pub struct SampleClient {
    base_url: String,
    /// Comma-joined field list sent as the `fields` parameter.
    fields: String,
    client: reqwest::Client,
}

impl SampleClient {
    pub fn new(base_url: impl Into<String>, fields: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fields: fields.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SampleSource for SampleClient {
    async fn fetch_details(&self, organism: &str) -> Result<Vec<SequenceRecord>, FetchError> {
        let url = format!("{}/{}/sample/details", self.base_url, organism);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("dataFormat", "json"),
                ("downloadAsFile", "false"),
                ("fields", self.fields.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(%url, %status, body = %body, "details request returned non-2xx status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let records = parse_details_response(&body)?;
        tracing::debug!(organism, count = records.len(), "fetched sample details");
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    data: Vec<SequenceRecord>,
}

/// Parse a details response body into records.
///
/// The body must be a JSON object with a `data` array; anything else
/// is a [`FetchError::UnexpectedShape`].
pub fn parse_details_response(body: &str) -> Result<Vec<SequenceRecord>, FetchError> {
    let parsed: DetailsResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::UnexpectedShape(e.to_string()))?;
    Ok(parsed.data)
}
