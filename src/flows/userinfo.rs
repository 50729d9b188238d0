//! Userinfo Fetch
//!
//! Fetches profile claims with a previously obtained access token.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::core::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, CONTENT_TYPE_JSON, HEADER_ACCEPT,
    HEADER_AUTHORIZATION,
};
use crate::error::{ConfigurationError, OidcResult, RelyingPartyError};
use crate::issuer::Issuer;
use crate::types::{Tokens, UserInfo};

/// Userinfo endpoint request.
pub struct UserinfoFetch<'a> {
    issuer: &'a Issuer,
    transport: Arc<dyn HttpTransport>,
}

impl<'a> UserinfoFetch<'a> {
    pub fn new(issuer: &'a Issuer, transport: Arc<dyn HttpTransport>) -> Self {
        Self { issuer, transport }
    }

    /// GET the userinfo endpoint with `tokens.access_token` as bearer token.
    #[instrument(skip_all)]
    pub async fn fetch(&self, tokens: &Tokens) -> OidcResult<UserInfo> {
        let endpoint = self.issuer.userinfo_endpoint()?;
        let access_token = tokens
            .access_token
            .as_deref()
            .ok_or(ConfigurationError::MissingAccessToken)?;

        let mut headers = HashMap::new();
        headers.insert(
            HEADER_AUTHORIZATION.to_string(),
            format!("Bearer {}", access_token),
        );
        headers.insert(HEADER_ACCEPT.to_string(), CONTENT_TYPE_JSON.to_string());

        let request = HttpRequest {
            method: HttpMethod::Get,
            url: endpoint.to_string(),
            headers,
            body: None,
        };

        let response = self.transport.send(request).await?;
        let userinfo = parse_userinfo_response(&response)?;

        tracing::debug!(claims = userinfo.len(), "Fetched userinfo");
        Ok(userinfo)
    }
}

/// Interpret a userinfo response as a JSON object.
pub fn parse_userinfo_response(response: &HttpResponse) -> OidcResult<UserInfo> {
    if !response.is_success() {
        return Err(RelyingPartyError::UnexpectedStatus {
            status: response.status,
            body: response.body.clone(),
        }
        .into());
    }

    serde_json::from_str(&response.body).map_err(|e| {
        RelyingPartyError::InvalidJson {
            message: e.to_string(),
        }
        .into()
    })
}
