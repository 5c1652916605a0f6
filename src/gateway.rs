// ===============================
// src/gateway.rs (HTTPS transport)
// ===============================
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::domain::SignedRequest;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client init failed: {0}")]
    Init(reqwest::Error),
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Kirim POST yang sudah ditandatangani, kembalikan body mentah.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_signed(&self, key: &str, req: &SignedRequest) -> Result<Vec<u8>, TransportError>;
}

/// reqwest-backed gateway for the private API endpoint.
pub struct HttpGateway {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpGateway {
    pub fn new(endpoint: Url) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().build().map_err(TransportError::Init)?;
        Ok(Self { http, endpoint })
    }
}

impl Transport for HttpGateway {
    async fn post_signed(&self, key: &str, req: &SignedRequest) -> Result<Vec<u8>, TransportError> {
        debug!(endpoint = %self.endpoint, body = %req.body, "posting signed request");

        let rsp = self
            .http
            .post(self.endpoint.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Key", key)
            .header("Sign", &req.signature)
            .body(req.body.clone())
            .send()
            .await?;

        // Status HTTP tidak dicek: error dari exchange ada di dalam envelope.
        let status = rsp.status();
        if !status.is_success() {
            warn!(%status, "non-2xx response from exchange");
        }
        Ok(rsp.bytes().await?.to_vec())
    }
}
