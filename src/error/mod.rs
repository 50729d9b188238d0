//! OIDC Error Types
//!
//! Every failure is classified into one of three classes: configuration
//! (caller misuse, detected before any network I/O), relying party (the
//! response cannot be trusted or understood on our side) and identity
//! provider (the provider explicitly signalled failure).

use std::time::Duration;
use thiserror::Error;

use crate::core::QueryParams;

/// Root error type for the OIDC client.
#[derive(Error, Debug)]
pub enum OidcError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Relying party error: {0}")]
    RelyingParty(#[from] RelyingPartyError),

    #[error("Identity provider error: {0}")]
    IdentityProvider(#[from] IdentityProviderError),
}

impl OidcError {
    /// Stable error code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "OIDC_CONFIG",
            Self::RelyingParty(RelyingPartyError::Transport(_)) => "OIDC_NETWORK",
            Self::RelyingParty(_) => "OIDC_RELYING_PARTY",
            Self::IdentityProvider(_) => "OIDC_IDP",
        }
    }

    /// Caller misuse; never reaches the network.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_relying_party(&self) -> bool {
        matches!(self, Self::RelyingParty(_))
    }

    pub fn is_identity_provider(&self) -> bool {
        matches!(self, Self::IdentityProvider(_))
    }

    /// Check if the user has to start a fresh sign-in.
    pub fn needs_restart(&self) -> bool {
        matches!(
            self,
            Self::RelyingParty(
                RelyingPartyError::StateMissing | RelyingPartyError::StateMismatch { .. }
            ) | Self::IdentityProvider(_)
        )
    }
}

impl From<NetworkError> for OidcError {
    fn from(error: NetworkError) -> Self {
        Self::RelyingParty(RelyingPartyError::Transport(error))
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid endpoint URL {url}: {message}")]
    InvalidEndpoint { url: String, message: String },

    #[error("Invalid redirect URI {uri}: {message}")]
    InvalidRedirectUri { uri: String, message: String },

    #[error("Malformed query string {input:?}: {message}")]
    MalformedQuery { input: String, message: String },

    #[error("check.state is missing but the identity provider returned a state")]
    MissingExpectedState,

    #[error("Issuer has no {endpoint} endpoint")]
    MissingEndpoint { endpoint: &'static str },

    #[error("Tokens carry no access token")]
    MissingAccessToken,

    #[error("Failed to create HTTP client: {message}")]
    HttpClient { message: String },
}

/// Relying party error.
#[derive(Error, Debug)]
pub enum RelyingPartyError {
    #[error("`response.state` is missing")]
    StateMissing,

    #[error("state not equal; expected: [{}] actual: [{}]", display_opt(.expected), display_opt(.actual))]
    StateMismatch {
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Unexpected redirect to: {location}")]
    UnexpectedRedirect { location: String },

    #[error("Response too large: {size} bytes")]
    ResponseTooLarge { size: usize },

    #[error("Transport failure: {0}")]
    Transport(#[from] NetworkError),
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<absent>")
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },
}

/// Identity provider error.
#[derive(Error, Debug)]
pub enum IdentityProviderError {
    #[error("error from identity provider: {error}")]
    CallbackError {
        error: String,
        error_description: Option<String>,
        parameters: QueryParams,
    },

    #[error("code missing from identity provider response")]
    MissingCode { parameters: QueryParams },

    #[error("token endpoint returned error: {error}")]
    TokenError {
        error: String,
        error_description: Option<String>,
        error_uri: Option<String>,
        body: String,
    },
}

impl IdentityProviderError {
    /// Callback parameters received with the failure, if it came from the callback.
    pub fn parameters(&self) -> Option<&QueryParams> {
        match self {
            Self::CallbackError { parameters, .. } | Self::MissingCode { parameters } => {
                Some(parameters)
            }
            Self::TokenError { .. } => None,
        }
    }

    /// OAuth error code (`access_denied`, `invalid_grant`, ...).
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::CallbackError { error, .. } | Self::TokenError { error, .. } => Some(error),
            Self::MissingCode { .. } => None,
        }
    }
}

/// Result type for OIDC operations.
pub type OidcResult<T> = Result<T, OidcError>;

/// Get user-friendly error message.
pub fn get_user_message(error: &OidcError) -> String {
    match error {
        OidcError::IdentityProvider(IdentityProviderError::CallbackError { error, .. })
            if error == "access_denied" =>
        {
            "Access was denied. Please try signing in again and grant the requested permissions."
                .to_string()
        }
        OidcError::RelyingParty(
            RelyingPartyError::StateMismatch { .. } | RelyingPartyError::StateMissing,
        ) => "Security validation failed. Please restart the sign-in process.".to_string(),
        OidcError::RelyingParty(RelyingPartyError::Transport(NetworkError::Timeout { .. })) => {
            "The request timed out. Please check your connection and try again.".to_string()
        }
        OidcError::IdentityProvider(_) => {
            "The identity provider rejected the sign-in. Please try again.".to_string()
        }
        OidcError::Configuration(_) => {
            "Sign-in is not configured correctly. Please contact the administrator.".to_string()
        }
        _ => "An authentication error occurred. Please try again.".to_string(),
    }
}
