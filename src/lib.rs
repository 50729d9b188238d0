//! OpenID Connect Relying Party
//!
//! Client side of the OAuth 2.0 / OpenID Connect Authorization Code flow.
//!
//! # Features
//!
//! - Authorization URL construction (RFC 6749 Section 4.1.1)
//! - Callback validation with CSRF state check (RFC 6749 Section 10.12)
//! - Authorization code exchange (RFC 6749 Section 4.1.3)
//! - Userinfo retrieval (OpenID Connect Core Section 5.3)
//!
//! # Example
//!
//! ```rust,ignore
//! use oidc_client::{issuer_builder, Checks, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let issuer = issuer_builder()
//!         .authorization_endpoint("https://github.com/login/oauth/authorize")
//!         .token_endpoint("https://github.com/login/oauth/access_token")
//!         .userinfo_endpoint("https://api.github.com/user")
//!         .build()?;
//!
//!     let client = issuer
//!         .client_builder()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .redirect_uri("https://myapp.com/callback")
//!         .build()?;
//!
//!     // Redirect the user agent here; keep the state for the callback.
//!     let url = client
//!         .authorization_url_builder()
//!         .scope("read:user")
//!         .state("per-session-random-value")
//!         .build();
//!     println!("Authorization URL: {}", url);
//!
//!     // Query string the provider sent back to the redirect URI.
//!     let parameters: QueryParams = "code=abc&state=per-session-random-value".parse()?;
//!     let checks = Checks::new().with_state("per-session-random-value");
//!
//!     let tokens = client
//!         .oauth_callback(&client.redirect_uris()[0], &parameters, &checks)
//!         .await?;
//!     let userinfo = client.userinfo(&tokens).await?;
//!     println!("Logged in as {:?}", userinfo.get("login"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `core`: query codec, endpoint URLs, HTTP transport
//! - `types`: configuration, callback and token data
//! - `error`: configuration / relying-party / identity-provider error classes
//! - `builders`: fluent builders for issuers and clients
//! - `flows`: authorization request, callback validation, token exchange, userinfo
//! - `issuer`, `client`: the provider and the registered client

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod issuer;
pub mod types;

// Re-export main types
pub use client::Client;
pub use issuer::Issuer;

// Re-export builders
pub use builders::{issuer_builder, ClientBuilder, IssuerBuilder};

// Re-export errors
pub use error::{
    get_user_message, ConfigurationError, IdentityProviderError, NetworkError, OidcError,
    OidcResult, RelyingPartyError,
};

// Re-export types
pub use types::{
    // Config
    ClientAuthMethod, ClientCredentials, ProviderConfig, DEFAULT_SCOPE,
    // Callback
    CallbackParameters, Checks,
    // Token
    Tokens, UserInfo,
};

// Re-export core components
pub use core::{
    // Query
    percent_decode, percent_encode, QueryParams,
    // Endpoint
    EndpointUrl,
    // Transport
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport, TransportFactory,
};

// Re-export flows
pub use flows::{
    validate_callback, AuthorizationRequestBuilder, CallbackState, CallbackValidator,
    TokenExchange, UserinfoFetch,
};
