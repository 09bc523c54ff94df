//! Retrieval of the ops feed with bounded retries and cancellation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::models::Op;

pub const DEFAULT_ENDPOINT: &str = "https://frontend-challenge.veryableops.com/";

const FALLBACK_MESSAGE: &str = "Unable to fetch ops data";

/// Delay before each attempt; its length is the attempt budget.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub backoff: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: vec![
                Duration::ZERO,
                Duration::from_millis(500),
                Duration::from_millis(1000),
            ],
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> usize {
        self.backoff.len()
    }
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One GET against the feed. Errors are human-readable messages.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, String>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| format!("read body failed: {e}"))?;
        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// Cancellation signal shared between the caller and an in-flight fetch.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Vec<Op>),
    /// Every attempt failed; carries the last failure's message.
    Failed(String),
    /// Abandoned by the caller. Nothing should be updated.
    Cancelled,
}

/// What a dashboard shows while and after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Vec<Op>,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            data: Vec::new(),
        }
    }
}

impl FetchState {
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(ops) => {
                self.data = ops;
                self.error = None;
                self.loading = false;
            }
            FetchOutcome::Failed(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            FetchOutcome::Cancelled => {}
        }
    }
}

pub struct Fetcher<T: Transport> {
    transport: T,
    endpoint: String,
    retry: RetryPolicy,
}

impl Fetcher<HttpTransport> {
    pub fn http(endpoint: &str) -> Self {
        Self::new(HttpTransport::new(), endpoint)
    }
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, endpoint: &str) -> Self {
        Self {
            transport,
            endpoint: endpoint.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn attempt(&self) -> Result<Vec<Op>, String> {
        let resp = self.transport.get(&self.endpoint).await?;
        if !resp.is_success() {
            let message = if resp.status_text.trim().is_empty() {
                format!("Failed to load ops data (status {})", resp.status)
            } else {
                resp.status_text
            };
            return Err(message);
        }
        serde_json::from_str::<Vec<Op>>(&resp.body).map_err(|e| format!("invalid ops data: {e}"))
    }

    /// Fetch the ops list, retrying per the policy.
    ///
    /// Cancellation during a backoff delay or an attempt ends the loop at
    /// once with [`FetchOutcome::Cancelled`].
    #[instrument(name = "ops_fetch", skip(self, cancel), fields(endpoint = %self.endpoint))]
    pub async fn fetch(&self, cancel: &CancelToken) -> FetchOutcome {
        let mut last_error: Option<String> = None;

        for (attempt, delay) in self.retry.backoff.iter().enumerate() {
            if !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(*delay) => {}
                    _ = cancel.cancelled() => return FetchOutcome::Cancelled,
                }
            }
            if cancel.is_cancelled() {
                return FetchOutcome::Cancelled;
            }

            let result = tokio::select! {
                r = self.attempt() => r,
                _ = cancel.cancelled() => return FetchOutcome::Cancelled,
            };

            match result {
                Ok(ops) => {
                    debug!(attempt = attempt + 1, count = ops.len(), "ops loaded");
                    return FetchOutcome::Loaded(ops);
                }
                Err(message) => {
                    warn!(attempt = attempt + 1, error = %message, "ops fetch attempt failed");
                    last_error = Some(message);
                }
            }
        }

        FetchOutcome::Failed(last_error.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()))
    }
}
