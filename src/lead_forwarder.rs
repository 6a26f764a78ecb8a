use failsafe::futures::CircuitBreaker;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::circuit_breaker::{create_forward_circuit_breaker, ForwardCircuitBreaker};
use crate::config::Config;
use crate::models::ForwardedLead;

/// The Apps Script endpoint reads the raw body, so the payload goes out as
/// JSON text without a JSON content type.
const FORWARD_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Failure to hand a lead to the external form endpoint.
///
/// Never surfaced to the submitter; only logged.
#[derive(Debug)]
pub enum ForwardingError {
    /// The HTTP client could not be built.
    Client(reqwest::Error),
    /// The payload could not be encoded.
    Encode(serde_json::Error),
    /// Transport-level failure (DNS, connect, timeout).
    Request(reqwest::Error),
    /// The endpoint answered with a non-success status.
    Status { status: u16, body: String },
    /// The circuit breaker is open and the attempt was dropped.
    CircuitOpen,
}

impl fmt::Display for ForwardingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardingError::Client(e) => write!(f, "Failed to create forwarding client: {}", e),
            ForwardingError::Encode(e) => write!(f, "Failed to encode forwarded lead: {}", e),
            ForwardingError::Request(e) => write!(f, "Forwarding request failed: {}", e),
            ForwardingError::Status { status, body } => {
                write!(f, "Forwarding endpoint returned {}: {}", status, body)
            }
            ForwardingError::CircuitOpen => write!(f, "Forwarding circuit is open"),
        }
    }
}

impl std::error::Error for ForwardingError {}

/// Best-effort client for the external lead webhook.
///
/// Cheap to clone; clones share the HTTP connection pool and the circuit
/// breaker.
#[derive(Clone)]
pub struct LeadForwarder {
    client: reqwest::Client,
    url: String,
    breaker: ForwardCircuitBreaker,
}

impl LeadForwarder {
    /// Creates a new `LeadForwarder` posting to `url`.
    pub fn new(url: String, timeout: Duration) -> Result<Self, ForwardingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ForwardingError::Client)?;

        Ok(Self {
            client,
            url,
            breaker: create_forward_circuit_breaker(),
        })
    }

    /// Builds the forwarder when `LEAD_FORWARD_URL` is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, ForwardingError> {
        config
            .lead_forward_url
            .clone()
            .map(|url| {
                Self::new(
                    url,
                    Duration::from_secs(config.lead_forward_timeout_secs),
                )
            })
            .transpose()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends one lead through the circuit breaker.
    pub async fn forward(&self, lead: &ForwardedLead) -> Result<(), ForwardingError> {
        match self.breaker.call(self.send(lead)).await {
            Ok(()) => Ok(()),
            Err(failsafe::Error::Inner(e)) => Err(e),
            Err(failsafe::Error::Rejected) => Err(ForwardingError::CircuitOpen),
        }
    }

    /// Spawns a detached task that forwards `lead` and logs the outcome.
    ///
    /// Callers on the request path drop the handle; the task's result can
    /// never reach them.
    pub fn dispatch(&self, lead: ForwardedLead) -> JoinHandle<()> {
        let forwarder = self.clone();
        tokio::spawn(async move {
            match forwarder.forward(&lead).await {
                Ok(()) => tracing::info!("✓ Lead forwarded to {}", forwarder.url),
                Err(ForwardingError::CircuitOpen) => {
                    tracing::warn!("⚠️  Forwarding circuit open, lead not forwarded")
                }
                Err(e) => tracing::warn!("⚠️  Lead forwarding failed: {}", e),
            }
        })
    }

    async fn send(&self, lead: &ForwardedLead) -> Result<(), ForwardingError> {
        let body = serde_json::to_string(lead).map_err(ForwardingError::Encode)?;

        tracing::debug!("Forwarding lead to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, FORWARD_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(ForwardingError::Request)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ForwardingError::Status { status, body });
        }

        Ok(())
    }
}
