//! Token Types
//!
//! Token endpoint response and userinfo payload.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token endpoint response.
///
/// Built once per token exchange from the JSON body and never mutated.
/// Providers report OAuth errors in the same body, so every field is optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tokens {
    /// Access token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Token type (usually "bearer").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// OAuth error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
    /// Refresh token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// ID token (OIDC), not verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// Expires in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
    /// When the response was received.
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl Tokens {
    /// Granted scopes split on whitespace.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Expiration time, if the provider reported a representable lifetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.expires_in?).ok()?;
        self.received_at.checked_add_signed(Duration::try_seconds(secs)?)
    }

    /// Check if the access token is expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at()
            .map(|exp| exp <= Utc::now())
            .unwrap_or(false)
    }
}

/// Userinfo claims; the shape is provider-defined.
pub type UserInfo = serde_json::Map<String, serde_json::Value>;
