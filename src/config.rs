//! Sink configuration read from the environment.
//!
//! Every sink is optional: a missing setting means "skip this sink", never an
//! error. Empty values count as missing.

use std::path::PathBuf;

pub const SUPABASE_URL_ENV_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_ENV_VAR: &str = "SUPABASE_KEY";
pub const GCS_BUCKET_ENV_VAR: &str = "GCS_BUCKET_NAME";
pub const GCS_ACCESS_TOKEN_ENV_VAR: &str = "GCS_ACCESS_TOKEN";
pub const GCP_CREDENTIALS_JSON_ENV_VAR: &str = "GCP_CREDENTIALS_JSON";
pub const GOOGLE_APPLICATION_CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Hosted Postgres reached through its PostgREST interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
}

/// Where the object-store access token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GcsCredentials {
    /// Ready-made bearer token.
    AccessToken(String),
    /// Service-account key JSON held in memory.
    ServiceAccountJson(String),
    /// Path to a service-account key file.
    ServiceAccountFile(PathBuf),
    /// Default service account of the host VM.
    MetadataServer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsConfig {
    pub bucket: String,
    pub credentials: GcsCredentials,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkConfig {
    pub supabase: Option<SupabaseConfig>,
    pub gcs: Option<GcsConfig>,
}

impl SinkConfig {
    /// Read sink settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read sink settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let supabase = match (get(SUPABASE_URL_ENV_VAR), get(SUPABASE_KEY_ENV_VAR)) {
            (Some(url), Some(key)) => Some(SupabaseConfig { url, key }),
            _ => None,
        };

        let gcs = get(GCS_BUCKET_ENV_VAR).map(|bucket| {
            let credentials = if let Some(token) = get(GCS_ACCESS_TOKEN_ENV_VAR) {
                GcsCredentials::AccessToken(token)
            } else if let Some(json) = get(GCP_CREDENTIALS_JSON_ENV_VAR) {
                GcsCredentials::ServiceAccountJson(json)
            } else if let Some(path) = get(GOOGLE_APPLICATION_CREDENTIALS_ENV_VAR) {
                GcsCredentials::ServiceAccountFile(PathBuf::from(path))
            } else {
                GcsCredentials::MetadataServer
            };
            GcsConfig {
                bucket,
                credentials,
            }
        });

        Self { supabase, gcs }
    }
}
