//! Shared OAuth plumbing for the Google hubs.
//!
//! One installed-flow authenticator is built from the client secret on disk and
//! cloned into each service client. Tokens are persisted so the browser consent
//! flow only runs once per machine.

use anyhow::{Context, Result};
use google_drive3::hyper_rustls;
use hyper_util::client::legacy::connect::HttpConnector;
use log::info;
use std::path::PathBuf;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

pub type HttpsConnector = hyper_rustls::HttpsConnector<HttpConnector>;

/// OAuth client secret location. Overridable for non-standard setups.
const OAUTH_PATH_ENV: &str = "GDRIVE_OAUTH_PATH";
/// Persisted token store location.
const CREDENTIALS_PATH_ENV: &str = "GDRIVE_CREDENTIALS_PATH";

pub fn oauth_keys_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(OAUTH_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join("oauth.keys.json"))
}

pub fn token_store_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(config_dir()?.join("tokens.json"))
}

fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("gdrive-mcp"))
}

#[derive(Clone)]
pub struct GoogleAuth {
    authenticator: Authenticator<HttpsConnector>,
}

impl GoogleAuth {
    /// Read the client secret and build the authenticator, persisting tokens
    /// to disk. Fails if no client secret is present.
    pub async fn connect() -> Result<Self> {
        let keys_path = oauth_keys_path()?;
        let secret = yup_oauth2::read_application_secret(&keys_path)
            .await
            .with_context(|| {
                format!("failed to read OAuth client secret at {}", keys_path.display())
            })?;

        let token_path = token_store_path()?;
        if let Some(parent) = token_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        info!("Building Google authenticator, token store: {}", token_path.display());
        let authenticator =
            InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
                .persist_tokens_to_disk(token_path)
                .build()
                .await
                .context("failed to build Google authenticator")?;

        Ok(Self { authenticator })
    }

    pub fn authenticator(&self) -> Authenticator<HttpsConnector> {
        self.authenticator.clone()
    }

    /// Connector for the service hubs, matching the authenticator's TLS stack.
    pub fn https_connector() -> Result<HttpsConnector> {
        Ok(hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .context("failed to load native TLS roots")?
            .https_or_http()
            .enable_http1()
            .build())
    }
}
