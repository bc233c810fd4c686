//! Webhook paging with exponential-backoff retry.
//!
//! [`WebhookAlertSink`] POSTs a JSON summary of each failing evaluation to
//! an on-call endpoint. Delivery runs on a spawned tokio task, so
//! [`AlertSink::notify`] returns as soon as the request is queued. Failed
//! attempts are retried three times with exponential backoff (1 s, 2 s, 4 s).

use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use vitalwatch_core::{AlertSink, VitalVerdict};

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `event_type` field of every page.
pub const EVENT_TYPE_VITALS_ALERT: &str = "vitals.alert";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),

    /// The sink was created outside a tokio runtime.
    #[error("Webhook delivery requires a running tokio runtime")]
    NoRuntime,
}

/// Build the JSON body for one alert.
pub fn alert_payload(failing: &[VitalVerdict]) -> serde_json::Value {
    serde_json::json!({
        "event_type": EVENT_TYPE_VITALS_ALERT,
        "failure_count": failing.len(),
        "failing": failing,
        "timestamp": Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Sends alert payloads to a webhook URL.
#[derive(Clone)]
pub struct WebhookDelivery {
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a delivery service with a pre-configured HTTP client.
    pub fn new() -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Deliver a payload with retry.
    ///
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn deliver(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), WebhookError> {
        let mut last_err: Option<WebhookError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(url, payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(url, payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(url, error = %e, "Webhook delivery failed after all retries");
                Err(last_err.unwrap_or(e))
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, url: &str, payload: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WebhookAlertSink
// ---------------------------------------------------------------------------

/// [`AlertSink`] that pages an external endpoint.
pub struct WebhookAlertSink {
    url: String,
    delivery: WebhookDelivery,
    runtime: Handle,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl WebhookAlertSink {
    /// Create a sink bound to the current tokio runtime.
    pub fn new(url: impl Into<String>) -> Result<Self, WebhookError> {
        let runtime = Handle::try_current().map_err(|_| WebhookError::NoRuntime)?;
        Ok(Self::with_runtime(url, WebhookDelivery::new()?, runtime))
    }

    pub fn with_runtime(
        url: impl Into<String>,
        delivery: WebhookDelivery,
        runtime: Handle,
    ) -> Self {
        Self {
            url: url.into(),
            delivery,
            runtime,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for every delivery started so far, including retries.
    pub async fn flush(&self) {
        let handles: Vec<_> = {
            let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
            pending.drain(..).collect()
        };
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Webhook delivery task did not complete");
            }
        }
    }
}

impl AlertSink for WebhookAlertSink {
    fn notify(&self, failing: &[VitalVerdict]) {
        let payload = alert_payload(failing);
        let delivery = self.delivery.clone();
        let url = self.url.clone();

        let handle = self.runtime.spawn(async move {
            if delivery.deliver(&url, &payload).await.is_ok() {
                tracing::info!(url = %url, "Vitals alert delivered");
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
