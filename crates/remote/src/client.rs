use std::time::Duration;

use async_trait::async_trait;
use quotesync_core::Quote;

use crate::error::RemoteError;
use crate::wire::{NewPost, PostEcho, RemoteAck, RemotePost, map_remote_post};

/// Source of remote quotes consumed by the sync orchestrator.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetches up to `limit` remote records mapped into local shape.
    async fn fetch_remote(&self, limit: usize) -> Result<Vec<Quote>, RemoteError>;

    /// Pushes each record as a create request. Rejected records are left out
    /// of the result; one failure never aborts the batch.
    async fn push_local(&self, records: &[Quote]) -> Vec<RemoteAck>;
}

/// reqwest-backed client for a JSON collection endpoint.
pub struct RemoteClient {
    client: reqwest::Client,
    base_url: String,
    user_id: u64,
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl RemoteClient {
    /// Creates a client for the collection at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: &str, timeout: Duration, user_id: u64) -> Result<Self, RemoteError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, user_id })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn push_one(&self, record: &Quote) -> Result<RemoteAck, RemoteError> {
        let payload =
            NewPost { title: &record.category, body: &record.text, user_id: self.user_id };
        let response = self.client.post(&self.base_url).json(&payload).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 200).to_owned(),
            });
        }

        // An echo we cannot parse still means the create was accepted.
        let remote_id = serde_json::from_str::<PostEcho>(&body).ok().and_then(|echo| echo.id);
        Ok(RemoteAck { local_id: record.id.clone(), remote_id })
    }
}

#[async_trait]
impl RemoteSource for RemoteClient {
    async fn fetch_remote(&self, limit: usize) -> Result<Vec<Quote>, RemoteError> {
        let response =
            self.client.get(&self.base_url).query(&[("_limit", limit)]).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 200).to_owned(),
            });
        }

        let posts: Vec<RemotePost> =
            serde_json::from_str(&body).map_err(|e| RemoteError::JsonParse {
                context: format!("remote collection (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        let total = posts.len();
        let quotes: Vec<Quote> = posts.into_iter().filter_map(map_remote_post).collect();
        tracing::debug!(total, kept = quotes.len(), url = %self.base_url, "fetched remote quotes");
        Ok(quotes)
    }

    async fn push_local(&self, records: &[Quote]) -> Vec<RemoteAck> {
        let mut acks = Vec::with_capacity(records.len());
        for record in records {
            match self.push_one(record).await {
                Ok(ack) => acks.push(ack),
                Err(e) => {
                    tracing::warn!(id = %record.id, error = %e, "push rejected, skipping record");
                },
            }
        }
        tracing::info!(pushed = acks.len(), total = records.len(), "push finished");
        acks
    }
}

/// Truncates a string to the given maximum length at a char boundary.
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
