//! Issuer
//!
//! The identity provider's endpoints. Immutable once built and shared
//! read-only by every client registered against it.

use std::sync::Arc;

use crate::builders::{ClientBuilder, IssuerBuilder};
use crate::core::EndpointUrl;
use crate::error::{ConfigurationError, OidcResult};

/// Identity provider endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issuer {
    authorization_endpoint: EndpointUrl,
    token_endpoint: Option<EndpointUrl>,
    userinfo_endpoint: Option<EndpointUrl>,
}

impl Issuer {
    pub(crate) fn new(
        authorization_endpoint: EndpointUrl,
        token_endpoint: Option<EndpointUrl>,
        userinfo_endpoint: Option<EndpointUrl>,
    ) -> Self {
        Self {
            authorization_endpoint,
            token_endpoint,
            userinfo_endpoint,
        }
    }

    /// Create a new issuer builder.
    pub fn builder() -> IssuerBuilder {
        IssuerBuilder::new()
    }

    /// Start registering a client against this issuer.
    pub fn client_builder(self: &Arc<Self>) -> ClientBuilder {
        ClientBuilder::new(Arc::clone(self))
    }

    pub fn authorization_endpoint(&self) -> &EndpointUrl {
        &self.authorization_endpoint
    }

    /// Token endpoint; its absence is a configuration error.
    pub fn token_endpoint(&self) -> OidcResult<&EndpointUrl> {
        self.token_endpoint.as_ref().ok_or_else(|| {
            ConfigurationError::MissingEndpoint { endpoint: "token" }.into()
        })
    }

    /// Userinfo endpoint; its absence is a configuration error.
    pub fn userinfo_endpoint(&self) -> OidcResult<&EndpointUrl> {
        self.userinfo_endpoint.as_ref().ok_or_else(|| {
            ConfigurationError::MissingEndpoint {
                endpoint: "userinfo",
            }
            .into()
        })
    }
}
