//! Authorization Request
//!
//! Builds the URL the user agent is redirected to. Parameters are layered,
//! lowest precedence first:
//!
//! 1. query parameters already on the issuer's authorization endpoint
//! 2. extra per-request parameters ([`AuthorizationRequestBuilder::param`])
//! 3. `client_id`, `scope`, `redirect_uri` and `state`
//!
//! Building is pure: no state is generated and no I/O is performed.

use crate::client::Client;
use crate::types::DEFAULT_SCOPE;

/// Per-request authorization URL builder.
#[derive(Clone, Debug)]
pub struct AuthorizationRequestBuilder<'a> {
    client: &'a Client,
    scope: Option<String>,
    redirect_uri: Option<String>,
    state: Option<String>,
    params: Vec<(String, String)>,
}

impl<'a> AuthorizationRequestBuilder<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self {
            client,
            scope: None,
            redirect_uri: None,
            state: None,
            params: Vec::new(),
        }
    }

    /// Override the client's default scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Redirect URI for this request, sent exactly as given.
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// CSRF state to be echoed back by the provider.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Additional parameter such as `nonce`, `prompt` or `response_type`.
    ///
    /// Cannot override `client_id`, `scope`, `redirect_uri` or `state`.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    fn resolve_scope(&self) -> &str {
        self.scope
            .as_deref()
            .or_else(|| Some(self.client.scope()).filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_SCOPE)
    }

    /// The single registered redirect URI is used by default; with several
    /// registered and no override, `redirect_uri` is left out.
    fn resolve_redirect_uri(&self) -> Option<&str> {
        if let Some(uri) = &self.redirect_uri {
            return Some(uri.as_str());
        }

        match self.client.redirect_uris() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    /// Build the authorization URL.
    pub fn build(&self) -> String {
        let endpoint = self.client.issuer().authorization_endpoint();
        let mut query = endpoint.query().clone();

        for (key, value) in &self.params {
            query.put(key.as_str(), value.as_str());
        }

        let redirect_uri = self.resolve_redirect_uri();

        query.put("client_id", self.client.client_id());
        query.put("scope", self.resolve_scope());
        query.put("redirect_uri", redirect_uri);
        query.put("state", self.state.as_deref());

        tracing::debug!(
            client_id = %self.client.client_id(),
            has_redirect_uri = redirect_uri.is_some(),
            has_state = self.state.is_some(),
            "Built authorization URL"
        );

        endpoint.with_query(&query)
    }
}
