//! Object storage sink: upload the CSV snapshot to a Google Cloud Storage bucket.
//!
//! Credentials are only ever held in memory. A service-account key is turned
//! into an access token with the OAuth JWT-bearer grant; without one, the VM
//! metadata server is asked for the default account's token.

use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::{csv_snapshot::to_csv_bytes, SinkOutcome};
use crate::{
    config::{GcsConfig, GcsCredentials},
    core::try_read_to_string,
    models::StatRecord,
    Result, ScrapeError,
};

pub const STORAGE_API_BASE: &str = "https://storage.googleapis.com";
pub const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account key file we need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = try_read_to_string(path).ok_or_else(|| ScrapeError::Credentials {
            message: format!("could not read key file {}", path.display()),
        })?;
        Self::from_json(&contents)
    }

    /// RS256-signed assertion valid for one hour from `issued_at` (unix seconds).
    pub fn signed_assertion(&self, issued_at: i64) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: STORAGE_SCOPE,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}

/// Where upload requests get their bearer token.
#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(String),
    ServiceAccount(ServiceAccountKey),
    Metadata { url: String },
}

impl TokenSource {
    pub fn from_credentials(credentials: &GcsCredentials) -> Result<Self> {
        Ok(match credentials {
            GcsCredentials::AccessToken(token) => TokenSource::Static(token.clone()),
            GcsCredentials::ServiceAccountJson(json) => {
                TokenSource::ServiceAccount(ServiceAccountKey::from_json(json)?)
            }
            GcsCredentials::ServiceAccountFile(path) => {
                TokenSource::ServiceAccount(ServiceAccountKey::from_file(path)?)
            }
            GcsCredentials::MetadataServer => TokenSource::Metadata {
                url: METADATA_TOKEN_URL.to_string(),
            },
        })
    }

    pub async fn access_token(&self, client: &Client) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::ServiceAccount(key) => {
                let assertion = key.signed_assertion(Utc::now().timestamp())?;
                let res = client
                    .post(&key.token_uri)
                    .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
                    .send()
                    .await?;
                parse_token_response(res).await
            }
            TokenSource::Metadata { url } => {
                let res = client
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await?;
                parse_token_response(res).await
            }
        }
    }
}

async fn parse_token_response(res: reqwest::Response) -> Result<String> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(ScrapeError::Credentials {
            message: format!("token endpoint returned {}: {}", status.as_u16(), body),
        });
    }
    Ok(res.json::<TokenResponse>().await?.access_token)
}

pub struct GcsUploader {
    client: Client,
    base_url: String,
    bucket: String,
    tokens: TokenSource,
}

impl GcsUploader {
    pub fn new(client: Client, bucket: impl Into<String>, tokens: TokenSource) -> Self {
        Self::with_base_url(client, STORAGE_API_BASE, bucket, tokens)
    }

    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        bucket: impl Into<String>,
        tokens: TokenSource,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            tokens,
        }
    }

    /// Single-request media upload; replaces any object with the same name.
    pub async fn upload_csv(&self, object_name: &str, bytes: Vec<u8>) -> Result<()> {
        let token = self.tokens.access_token(&self.client).await?;
        let url = format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket);

        let res = self
            .client
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object_name)])
            .bearer_auth(token)
            .header(CONTENT_TYPE, "text/csv")
            .body(bytes)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ScrapeError::SinkRejected {
                sink: "gcs".to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Flatten `records` to CSV and upload them as `object_name`.
///
/// Skips without any request only when no bucket is configured. An empty
/// record list still uploads a header-only CSV. Failures are logged and
/// reported, never raised.
pub async fn upload_snapshot(
    client: &Client,
    config: Option<&GcsConfig>,
    storage_base: &str,
    records: &[StatRecord],
    object_name: &str,
) -> SinkOutcome<usize> {
    let Some(config) = config else {
        info!("GCS_BUCKET_NAME not set; skipping CSV upload");
        return SinkOutcome::Skipped("bucket not configured".to_string());
    };

    if records.is_empty() {
        warn!(object = object_name, "no records fetched; uploading a header-only CSV");
    }

    let result = async {
        let bytes = to_csv_bytes(records)?;
        let size = bytes.len();
        let tokens = TokenSource::from_credentials(&config.credentials)?;
        GcsUploader::with_base_url(client.clone(), storage_base, &config.bucket, tokens)
            .upload_csv(object_name, bytes)
            .await?;
        Ok::<usize, ScrapeError>(size)
    }
    .await;

    match result {
        Ok(size) => {
            info!(bucket = %config.bucket, object = object_name, bytes = size, "uploaded CSV snapshot");
            SinkOutcome::Completed(size)
        }
        Err(e) => {
            error!(bucket = %config.bucket, object = object_name, error = %e, "CSV upload failed");
            SinkOutcome::Failed(e.to_string())
        }
    }
}
