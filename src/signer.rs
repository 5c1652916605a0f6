// ===============================
// src/signer.rs
// ===============================
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::config::Credentials;
use crate::domain::{RequestParams, SignedRequest};

type HmacSha512 = Hmac<Sha512>;

/// HMAC-SHA512 of `body` keyed by `secret`, lowercase hex (128 chars).
pub fn sign(body: &str, secret: &str) -> String {
    // HMAC menerima key dengan panjang berapa pun, jadi tidak bisa gagal.
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC key");
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Freeze the params into the body string and sign that exact string.
pub fn sign_request(params: &RequestParams, creds: &Credentials) -> SignedRequest {
    let body = params.to_body();
    let signature = sign(&body, creds.expose_secret());
    SignedRequest { body, signature }
}
