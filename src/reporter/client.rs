use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::constants::{API_KEY_HEADER, RESULTS_COLLECTION_SEGMENTS, RESULTS_UPDATE_SEGMENT};
use crate::research::{Identifier, ItemResult};

use super::config::ReporterConfig;
use super::error::ReportError;
use super::ResultReporter;

const MAX_ERROR_BODY_BYTES: usize = 512;

#[derive(Serialize)]
struct ResultsPayload<'a> {
    results: &'a [ItemResult],
}

/// Posts result batches to the main service. One attempt per batch.
#[derive(Debug, Clone)]
pub struct HttpReporter {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl HttpReporter {
    pub fn new(config: ReporterConfig) -> Result<Self, ReportError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ReportError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/ChronicleRequestList/<request_id>/update-results`, with the
    /// id encoded as a single path segment.
    pub fn results_url(&self, request_id: &Identifier) -> Result<Url, ReportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ReportError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(RESULTS_COLLECTION_SEGMENTS)
            .push(&request_id.to_string())
            .push(RESULTS_UPDATE_SEGMENT);
        Ok(url)
    }

    /// Sends the batch and surfaces any failure as a [`ReportError`].
    pub async fn deliver(
        &self,
        request_id: &Identifier,
        results: &[ItemResult],
    ) -> Result<(), ReportError> {
        let url = self.results_url(request_id)?;
        let url_str = url.to_string();

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&ResultsPayload { results })
            .send()
            .await
            .map_err(|source| ReportError::Transport {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        truncate_at_char_boundary(&mut body, MAX_ERROR_BODY_BYTES);
        Err(ReportError::Status {
            url: url_str,
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ResultReporter for HttpReporter {
    #[instrument(skip(self, results), fields(results = results.len()))]
    async fn report(&self, request_id: &Identifier, results: &[ItemResult]) -> bool {
        match self.deliver(request_id, results).await {
            Ok(()) => {
                info!(%request_id, "Results delivered to main service");
                true
            }
            Err(e) => {
                error!(%request_id, error = %e, "Failed to deliver results to main service");
                false
            }
        }
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ReportError> {
    let url = Url::parse(raw.trim()).map_err(|e| ReportError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ReportError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.cannot_be_a_base() {
        return Err(ReportError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot carry a path".to_string(),
        });
    }

    Ok(url)
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
