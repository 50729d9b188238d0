//! Issuer Builder
//!
//! Fluent builder for identity provider endpoints.

use std::sync::Arc;

use crate::core::EndpointUrl;
use crate::error::{ConfigurationError, OidcError, OidcResult};
use crate::issuer::Issuer;
use crate::types::ProviderConfig;

/// Issuer builder. Endpoints are parsed when [`IssuerBuilder::build`] runs.
#[derive(Default)]
pub struct IssuerBuilder {
    authorization_endpoint: Option<String>,
    token_endpoint: Option<String>,
    userinfo_endpoint: Option<String>,
}

impl IssuerBuilder {
    /// Create new issuer builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set authorization endpoint. Query parameters on it are passed through
    /// to every authorization URL.
    pub fn authorization_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.authorization_endpoint = Some(endpoint.into());
        self
    }

    /// Set token endpoint.
    pub fn token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(endpoint.into());
        self
    }

    /// Set userinfo endpoint.
    pub fn userinfo_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.userinfo_endpoint = Some(endpoint.into());
        self
    }

    /// Configure from a provider config (e.g. loaded from a file).
    pub fn from_provider_config(mut self, provider: ProviderConfig) -> Self {
        self.authorization_endpoint = Some(provider.authorization_endpoint);
        self.token_endpoint = provider.token_endpoint;
        self.userinfo_endpoint = provider.userinfo_endpoint;
        self
    }

    /// Build the issuer.
    pub fn build(self) -> OidcResult<Arc<Issuer>> {
        let authorization_endpoint = self.authorization_endpoint.ok_or_else(|| {
            OidcError::Configuration(ConfigurationError::MissingField {
                field: "authorization_endpoint".to_string(),
            })
        })?;

        let authorization_endpoint = EndpointUrl::parse(&authorization_endpoint)?;
        let token_endpoint = self
            .token_endpoint
            .as_deref()
            .map(EndpointUrl::parse)
            .transpose()?;
        let userinfo_endpoint = self
            .userinfo_endpoint
            .as_deref()
            .map(EndpointUrl::parse)
            .transpose()?;

        Ok(Arc::new(Issuer::new(
            authorization_endpoint,
            token_endpoint,
            userinfo_endpoint,
        )))
    }
}

/// Create a new issuer builder.
pub fn issuer_builder() -> IssuerBuilder {
    IssuerBuilder::new()
}
