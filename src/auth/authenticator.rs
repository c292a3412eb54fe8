//! Request signing
//!
//! Every request carries an `X-BOL-Date` header and an `X-BOL-Authorization`
//! header of the form `{public_key}:{base64(hmac_sha256(canonical))}`.

use super::types::{
    Credentials, SigningRequest, AUTHORIZATION_HEADER, CONTENT_TYPE, DATE_HEADER,
};
use crate::error::{Error, Result};
use crate::types::Method;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE as CONTENT_TYPE_HEADER;
use reqwest::RequestBuilder;
use sha2::Sha256;
use std::sync::Arc;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// Produces the authorization header value for a request
pub trait Signer: Send + Sync {
    fn sign(&self, request: &SigningRequest) -> Result<String>;
}

/// HMAC-SHA256 signer over the canonical request string
#[derive(Debug, Clone)]
pub struct HmacSigner {
    credentials: Credentials,
}

impl HmacSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn public_key(&self) -> &str {
        &self.credentials.public_key
    }
}

impl Signer for HmacSigner {
    fn sign(&self, request: &SigningRequest) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.private_key.as_bytes())
            .map_err(|e| Error::signing(e.to_string()))?;
        mac.update(request.canonical_string().as_bytes());
        let digest = mac.finalize().into_bytes();

        let signature = base64::engine::general_purpose::STANDARD.encode(digest);
        Ok(format!("{}:{}", self.credentials.public_key, signature))
    }
}

/// Applies signed headers to outgoing requests
#[derive(Clone)]
pub struct Authenticator {
    signer: Arc<dyn Signer>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Authenticator using the HMAC signer
    pub fn new(credentials: Credentials) -> Self {
        Self::with_signer(HmacSigner::new(credentials))
    }

    /// Authenticator using any signer
    pub fn with_signer(signer: impl Signer + 'static) -> Self {
        Self {
            signer: Arc::new(signer),
        }
    }

    /// Sign a request dated now
    ///
    /// Called once per attempt so a retried request never reuses a stale date.
    pub fn apply(&self, req: RequestBuilder, method: Method, path: &str) -> Result<RequestBuilder> {
        self.apply_at(req, method, path, Utc::now())
    }

    /// Sign a request with an explicit date
    pub fn apply_at(
        &self,
        req: RequestBuilder,
        method: Method,
        path: &str,
        date: DateTime<Utc>,
    ) -> Result<RequestBuilder> {
        let request = SigningRequest::new(method, path, date);
        let signature = self.signer.sign(&request)?;
        trace!(%method, path, date = %request.date, "signed request");

        Ok(req
            .header(CONTENT_TYPE_HEADER, CONTENT_TYPE)
            .header(DATE_HEADER, request.date)
            .header(AUTHORIZATION_HEADER, signature))
    }
}
