// ===============================
// src/dispatch.rs (build -> sign -> send -> parse -> render)
// ===============================
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::domain::{ParsedData, PreparedRequest};
use crate::gateway::{Transport, TransportError};
use crate::parser::{self, ResponseError};
use crate::render;
use crate::signer::sign_request;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// One round trip. Returns the rendered table.
pub async fn execute<T: Transport>(
    req: &PreparedRequest,
    creds: &Credentials,
    transport: &T,
) -> Result<String, DispatchError> {
    debug!(
        method = req.params.get("method").unwrap_or("?"),
        fields = ?req.params.names(),
        "signing request"
    );
    let signed = sign_request(&req.params, creds);
    let raw = transport.post_signed(creds.key(), &signed).await?;
    let data = parser::parse(&raw, &req.kind)?;

    if let ParsedData::Trade(t) = &data {
        info!(order_id = %t.order_id, client_order_id = %t.client_order_id, "order placed");
    }
    Ok(render::render(&data))
}
