//! OIDC Client
//!
//! Relying-party client registered with one issuer. Immutable once built;
//! safe to share across tasks for concurrent URL builds and callbacks.

use std::sync::Arc;

use url::Url;

use crate::core::TransportFactory;
use crate::error::OidcResult;
use crate::flows::{AuthorizationRequestBuilder, CallbackValidator, TokenExchange, UserinfoFetch};
use crate::issuer::Issuer;
use crate::types::{CallbackParameters, Checks, ClientCredentials, Tokens, UserInfo};

/// Client registration data and the operations of the Authorization Code flow.
pub struct Client {
    issuer: Arc<Issuer>,
    credentials: ClientCredentials,
    scope: String,
    redirect_uris: Vec<String>,
    http_client_factory: TransportFactory,
}

impl Client {
    pub(crate) fn new(
        issuer: Arc<Issuer>,
        credentials: ClientCredentials,
        scope: String,
        redirect_uris: Vec<String>,
        http_client_factory: TransportFactory,
    ) -> Self {
        Self {
            issuer,
            credentials,
            scope,
            redirect_uris,
            http_client_factory,
        }
    }

    pub fn issuer(&self) -> &Arc<Issuer> {
        &self.issuer
    }

    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Default scope for authorization requests.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Registered redirect URIs, as configured.
    pub fn redirect_uris(&self) -> &[String] {
        &self.redirect_uris
    }

    // ========== Authorization Request ==========

    /// Start building an authorization URL.
    pub fn authorization_url_builder(&self) -> AuthorizationRequestBuilder<'_> {
        AuthorizationRequestBuilder::new(self)
    }

    // ========== Callback ==========

    /// Validate callback parameters and return the authorization code.
    pub fn validate_callback<'p>(
        &self,
        parameters: &'p CallbackParameters,
        checks: &Checks,
    ) -> OidcResult<&'p str> {
        CallbackValidator::new(parameters, checks).validate()
    }

    /// Validate the callback, then exchange its code for tokens.
    ///
    /// `redirect_uri` must be the one sent in the authorization request.
    pub async fn oauth_callback(
        &self,
        redirect_uri: &str,
        parameters: &CallbackParameters,
        checks: &Checks,
    ) -> OidcResult<Tokens> {
        let code = self.validate_callback(parameters, checks)?;
        self.exchange_code(code, redirect_uri).await
    }

    /// Like [`Client::oauth_callback`], reading the parameters from the full
    /// URL the provider redirected to.
    pub async fn oauth_callback_url(
        &self,
        redirect_uri: &str,
        callback_url: &Url,
        checks: &Checks,
    ) -> OidcResult<Tokens> {
        let parameters = CallbackParameters::from_url(callback_url)?;
        self.oauth_callback(redirect_uri, &parameters, checks).await
    }

    // ========== Token Exchange ==========

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> OidcResult<Tokens> {
        let exchange = TokenExchange::new(
            &self.issuer,
            &self.credentials,
            (self.http_client_factory)(),
        );
        exchange.exchange(code, redirect_uri).await
    }

    // ========== Userinfo ==========

    /// Fetch userinfo claims for `tokens`.
    pub async fn userinfo(&self, tokens: &Tokens) -> OidcResult<UserInfo> {
        let fetch = UserinfoFetch::new(&self.issuer, (self.http_client_factory)());
        fetch.fetch(tokens).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("issuer", &self.issuer)
            .field("credentials", &self.credentials)
            .field("scope", &self.scope)
            .field("redirect_uris", &self.redirect_uris)
            .finish_non_exhaustive()
    }
}
