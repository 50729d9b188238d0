//! Token Exchange
//!
//! Exchanges a validated authorization code for tokens at the issuer's
//! token endpoint. One request, one response, no retries.

use base64::Engine;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::core::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, QueryParams, CONTENT_TYPE_FORM,
    CONTENT_TYPE_JSON, HEADER_ACCEPT, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE,
};
use crate::error::{IdentityProviderError, OidcResult, RelyingPartyError};
use crate::issuer::Issuer;
use crate::types::{ClientAuthMethod, ClientCredentials, Tokens};

/// Token endpoint request for one authorization code.
pub struct TokenExchange<'a> {
    issuer: &'a Issuer,
    credentials: &'a ClientCredentials,
    transport: Arc<dyn HttpTransport>,
}

impl<'a> TokenExchange<'a> {
    pub fn new(
        issuer: &'a Issuer,
        credentials: &'a ClientCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            issuer,
            credentials,
            transport,
        }
    }

    /// Form parameters; the secret is only included for `client_secret_post`.
    ///
    /// `redirect_uri` is sent exactly as given.
    pub fn build_form(&self, code: &str, redirect_uri: &str) -> QueryParams {
        let mut form = QueryParams::new();
        form.put("client_id", self.credentials.client_id.as_str());
        form.put("code", code);
        form.put("redirect_uri", redirect_uri);

        if self.credentials.auth_method == ClientAuthMethod::ClientSecretPost {
            let secret = self
                .credentials
                .client_secret
                .as_ref()
                .map(|s| s.expose_secret().as_str());
            form.put("client_secret", secret);
        }

        form
    }

    fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_FORM.to_string());
        headers.insert(HEADER_ACCEPT.to_string(), CONTENT_TYPE_JSON.to_string());

        if self.credentials.auth_method == ClientAuthMethod::ClientSecretBasic {
            if let Some(secret) = &self.credentials.client_secret {
                let credentials = format!(
                    "{}:{}",
                    self.credentials.client_id,
                    secret.expose_secret()
                );
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                headers.insert(HEADER_AUTHORIZATION.to_string(), format!("Basic {}", encoded));
            }
        }

        headers
    }

    /// Send the exchange and interpret the response.
    #[instrument(skip_all, fields(client_id = %self.credentials.client_id))]
    pub async fn exchange(&self, code: &str, redirect_uri: &str) -> OidcResult<Tokens> {
        let endpoint = self.issuer.token_endpoint()?;

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: endpoint.to_string(),
            headers: self.build_headers(),
            body: Some(self.build_form(code, redirect_uri).encode()),
        };

        let response = self.transport.send(request).await?;
        let tokens = parse_token_response(&response)?;

        tracing::debug!(
            token_type = tokens.token_type.as_deref().unwrap_or(""),
            scope = tokens.scope.as_deref().unwrap_or(""),
            "Token exchange succeeded"
        );

        Ok(tokens)
    }
}

/// Interpret a token endpoint response.
///
/// An `error` field in the body is a provider failure whatever the status;
/// otherwise a non-2xx status or an unreadable body is ours.
pub fn parse_token_response(response: &HttpResponse) -> OidcResult<Tokens> {
    let parsed = serde_json::from_str::<Tokens>(&response.body);

    if let Ok(tokens) = &parsed {
        if let Some(error) = &tokens.error {
            tracing::warn!(error = %error, status = response.status, "Token endpoint returned an error");
            return Err(IdentityProviderError::TokenError {
                error: error.clone(),
                error_description: tokens.error_description.clone(),
                error_uri: tokens.error_uri.clone(),
                body: response.body.clone(),
            }
            .into());
        }
    }

    if !response.is_success() {
        return Err(RelyingPartyError::UnexpectedStatus {
            status: response.status,
            body: response.body.clone(),
        }
        .into());
    }

    parsed.map_err(|e| {
        RelyingPartyError::InvalidJson {
            message: e.to_string(),
        }
        .into()
    })
}
