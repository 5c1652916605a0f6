// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : indodax_cli — signed command-line client for the Indodax private API
Module  : config.rs
Version : 0.1.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
Email   : kukuhtw@gmail.com
WhatsApp: https://wa.me/628129893706
LinkedIn: https://id.linkedin.com/in/kukuhtw
License : MIT (see LICENSE)

Summary : Signs private API calls with HMAC-SHA512, posts them to the
          exchange, and prints open orders, balances, trade and cancel
          confirmations as fixed-width tables.

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
use std::{env, fmt, fs, path::Path};

use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = "indodax_config.txt";
pub const DEFAULT_TAPI_URL: &str = "https://indodax.com/tapi";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error opening config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("Config file missing key or secret")]
    MissingField(&'static str),
    #[error("Invalid INDODAX_TAPI_URL {0}: {1}")]
    BadUrl(String, url::ParseError),
}

/// Public key + secret, loaded once per process.
pub struct Credentials {
    key: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(key: String, secret: String) -> Self {
        Self { key, secret: SecretString::from(secret) }
    }

    pub fn key(&self) -> &str { &self.key }

    /// Hanya untuk signing. Jangan di-log.
    pub fn expose_secret(&self) -> &str { self.secret.expose_secret() }

    /// Parse `key=...` / `secret=...` lines. Order does not matter, later
    /// lines win, anything else is ignored.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut key = None;
        let mut secret = None;
        for line in text.lines() {
            let line = line.trim_end_matches(['\r', '\n']);
            if let Some(v) = line.strip_prefix("key=") {
                key = Some(v.to_string());
            } else if let Some(v) = line.strip_prefix("secret=") {
                secret = Some(v.to_string());
            }
        }
        let key = key.ok_or(ConfigError::MissingField("key"))?;
        let secret = secret.ok_or(ConfigError::MissingField("secret"))?;
        Ok(Self::new(key, secret))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"[REDACTED]")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug)]
pub struct Settings {
    pub config_path: String,
    pub tapi_url: Url,
    pub credentials: Credentials,
}

pub fn load() -> Result<Settings, ConfigError> {
    // Pastikan .env dibaca (INDODAX_CONFIG, INDODAX_TAPI_URL)
    let _ = dotenv();

    let config_path = env::var("INDODAX_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let raw_url = env::var("INDODAX_TAPI_URL").unwrap_or_else(|_| DEFAULT_TAPI_URL.to_string());
    let tapi_url = Url::parse(&raw_url).map_err(|e| ConfigError::BadUrl(raw_url.clone(), e))?;

    let credentials = Credentials::from_file(&config_path)?;
    Ok(Settings { config_path, tapi_url, credentials })
}
