//! Client Builder
//!
//! Fluent builder for client registration data.

use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use crate::client::Client;
use crate::core::{shared_transport_factory, HttpTransport, ReqwestHttpTransport, TransportFactory};
use crate::error::{ConfigurationError, OidcError, OidcResult};
use crate::issuer::Issuer;
use crate::types::{ClientAuthMethod, ClientCredentials, DEFAULT_SCOPE};

/// Client registration builder.
pub struct ClientBuilder {
    issuer: Arc<Issuer>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    auth_method: ClientAuthMethod,
    scope: Option<String>,
    redirect_uris: Vec<String>,
    http_client_factory: Option<TransportFactory>,
}

impl ClientBuilder {
    /// Create new client builder for `issuer`.
    pub fn new(issuer: Arc<Issuer>) -> Self {
        Self {
            issuer,
            client_id: None,
            client_secret: None,
            auth_method: ClientAuthMethod::default(),
            scope: None,
            redirect_uris: Vec::new(),
            http_client_factory: None,
        }
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set client authentication method.
    pub fn auth_method(mut self, method: ClientAuthMethod) -> Self {
        self.auth_method = method;
        self
    }

    /// Set default scope (`openid` if never set).
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Register a redirect URI.
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uris.push(uri.into());
        self
    }

    /// Replace the registered redirect URIs.
    pub fn redirect_uris<I, S>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirect_uris = uris.into_iter().map(Into::into).collect();
        self
    }

    /// Set the factory invoked for every token exchange and userinfo request.
    pub fn http_client_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn HttpTransport> + Send + Sync + 'static,
    {
        self.http_client_factory = Some(Arc::new(factory));
        self
    }

    /// Use one shared transport for every request.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.http_client_factory = Some(shared_transport_factory(transport));
        self
    }

    /// Build the client. Without a factory a reqwest transport is created and shared.
    pub fn build(self) -> OidcResult<Client> {
        let client_id = self.client_id.ok_or_else(|| {
            OidcError::Configuration(ConfigurationError::MissingField {
                field: "client_id".to_string(),
            })
        })?;

        if self.auth_method == ClientAuthMethod::ClientSecretBasic && self.client_secret.is_none()
        {
            return Err(OidcError::Configuration(ConfigurationError::MissingField {
                field: "client_secret".to_string(),
            }));
        }

        // Validated only; the registered text is what gets sent.
        for uri in &self.redirect_uris {
            Url::parse(uri).map_err(|e| {
                OidcError::Configuration(ConfigurationError::InvalidRedirectUri {
                    uri: uri.clone(),
                    message: e.to_string(),
                })
            })?;
        }

        let http_client_factory = match self.http_client_factory {
            Some(factory) => factory,
            None => shared_transport_factory(Arc::new(ReqwestHttpTransport::new()?)),
        };

        Ok(Client::new(
            self.issuer,
            ClientCredentials {
                client_id,
                client_secret: self.client_secret,
                auth_method: self.auth_method,
            },
            self.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            self.redirect_uris,
            http_client_factory,
        ))
    }
}
