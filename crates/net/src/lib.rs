use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use core_types::RequestId;
use serde::{Deserialize, Serialize};

/// Body of an outbound contact message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl MessagePayload {
    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }
}

pub type Headers = Vec<(String, String)>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    pub status: u16,
    pub duration_ms: u128,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{endpoint} answered with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("could not reach {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },

    #[error("could not encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("simulated failure: {0}")]
    Simulated(String),
}

/// Delivers a serialized message somewhere.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        endpoint: &str,
        payload: &str,
        headers: &[(String, String)],
    ) -> Result<SendReceipt, TransportError>;
}

/// Blocking HTTP `POST` transport.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent("portfolio-contact/0.1")
            .build();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        endpoint: &str,
        payload: &str,
        headers: &[(String, String)],
    ) -> Result<SendReceipt, TransportError> {
        url::Url::parse(endpoint).map_err(|source| TransportError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let start = Instant::now();
        let mut req = self.agent.post(endpoint);
        for (k, v) in headers {
            req = req.set(k, v);
        }

        match req.send_string(payload) {
            Ok(resp) => Ok(SendReceipt {
                status: resp.status(),
                duration_ms: start.elapsed().as_millis(),
            }),
            Err(ureq::Error::Status(status, _)) => Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status,
            }),
            Err(e) => Err(TransportError::Unreachable {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Transport that never leaves the process.
///
/// Succeeds with status 200 unless built with [`SimulatedTransport::failing`].
#[derive(Debug, Default)]
pub struct SimulatedTransport {
    failure: Option<String>,
    sent: AtomicUsize,
}

impl SimulatedTransport {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            sent: AtomicUsize::new(0),
        }
    }

    /// Number of `send` calls so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Acquire)
    }
}

impl Transport for SimulatedTransport {
    fn send(
        &self,
        endpoint: &str,
        payload: &str,
        _headers: &[(String, String)],
    ) -> Result<SendReceipt, TransportError> {
        self.sent.fetch_add(1, Ordering::AcqRel);
        log::debug!("simulated send to {endpoint} ({} bytes)", payload.len());
        match &self.failure {
            Some(reason) => Err(TransportError::Simulated(reason.clone())),
            None => Ok(SendReceipt {
                status: 200,
                duration_ms: 0,
            }),
        }
    }
}

#[derive(Debug)]
pub enum NetEvent {
    Sent {
        request_id: RequestId,
        receipt: SendReceipt,
    },
    Failed {
        request_id: RequestId,
        error: TransportError,
    },
    /// Always follows `Sent` or `Failed`.
    Done { request_id: RequestId },
}

pub type NetCallback = Arc<dyn Fn(NetEvent) + Send + Sync>;

/// Send on a background thread and report through `cb`.
pub fn send_message(
    request_id: RequestId,
    transport: Arc<dyn Transport>,
    endpoint: String,
    payload: String,
    headers: Headers,
    cb: NetCallback,
) {
    thread::spawn(move || {
        match transport.send(&endpoint, &payload, &headers) {
            Ok(receipt) => {
                log::info!(
                    "message {request_id} delivered to {endpoint}: {} in {} ms",
                    receipt.status,
                    receipt.duration_ms
                );
                cb(NetEvent::Sent {
                    request_id,
                    receipt,
                });
            }
            Err(error) => cb(NetEvent::Failed { request_id, error }),
        }
        cb(NetEvent::Done { request_id });
    });
}
