use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::PhishguardError;
use crate::models::PhishingReport;

use super::ReportStore;

const FIRESTORE_AUDIENCE: &str = "https://firestore.googleapis.com/";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Service-account key file as issued by the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
}

#[derive(Debug, Serialize)]
struct TokenClaims {
    iss: String,
    sub: String,
    aud: String,
    iat: i64,
    exp: i64,
    jti: String,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Firestore-backed report store.
///
/// Documents are appended over the REST API, authenticated with a
/// self-signed service-account JWT (no OAuth token exchange). No reads are
/// ever issued.
pub struct FirestoreStore {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    collection: String,
    token: RwLock<Option<CachedToken>>,
}

impl FirestoreStore {
    /// Load the service-account key file and prepare the signing key.
    ///
    /// A failure here keeps the store offline for the process lifetime;
    /// the caller degrades to analyze-only instead of aborting startup.
    pub fn from_key_file(path: &Path, collection: &str) -> Result<Self, PhishguardError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PhishguardError::Store(format!("Cannot read key file {}: {}", path.display(), e))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&content)
            .map_err(|e| PhishguardError::Store(format!("Malformed key file: {}", e)))?;
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| PhishguardError::Store(format!("Bad private key: {}", e)))?;

        Ok(Self {
            client: Client::new(),
            key,
            encoding_key,
            collection: collection.to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn mint_token(&self, now: DateTime<Utc>) -> Result<CachedToken, PhishguardError> {
        let claims = TokenClaims {
            iss: self.key.client_email.clone(),
            sub: self.key.client_email.clone(),
            aud: FIRESTORE_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECS,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key.private_key_id.clone());

        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| PhishguardError::Store(format!("Token signing failed: {}", e)))?;

        Ok(CachedToken {
            token,
            expires_at: now
                + chrono::Duration::seconds(TOKEN_LIFETIME_SECS - TOKEN_REFRESH_MARGIN_SECS),
        })
    }

    async fn bearer_token(&self) -> Result<String, PhishguardError> {
        let now = Utc::now();
        {
            let cached = self.token.read().await;
            if let Some(t) = cached.as_ref() {
                if t.expires_at > now {
                    return Ok(t.token.clone());
                }
            }
        }

        let minted = self.mint_token(now)?;
        let token = minted.token.clone();
        *self.token.write().await = Some(minted);
        debug!(project = %self.key.project_id, "Minted Firestore access token");
        Ok(token)
    }

    fn documents_url(&self) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents/{}",
            self.key.project_id, self.collection
        )
    }
}

#[async_trait]
impl ReportStore for FirestoreStore {
    async fn append(&self, report: &PhishingReport) -> Result<(), PhishguardError> {
        let token = self.bearer_token().await?;

        let resp = self.client
            .post(self.documents_url())
            .bearer_auth(token)
            .json(&document_fields(report))
            .send()
            .await
            .map_err(|e| PhishguardError::Network(format!("Firestore request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PhishguardError::Store(format!(
                "Firestore write failed (HTTP {}): {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// Encode a report as Firestore typed fields.
fn document_fields(report: &PhishingReport) -> Value {
    json!({
        "fields": {
            "url": {"stringValue": report.url},
            "hacker_destination": {"stringValue": report.hacker_destination},
            "reported_at": {
                "timestampValue": report.reported_at.to_rfc3339_opts(SecondsFormat::Micros, true)
            },
            "status": {"stringValue": report.status.as_str()},
        }
    })
}
