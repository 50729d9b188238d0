//! OIDC Flows
//!
//! The Authorization Code flow, split into its steps:
//!
//! - **Authorization request**: URL the user agent is redirected to
//! - **Callback validation**: CSRF state, error and code checks on the redirect back
//! - **Token exchange**: authorization code for tokens
//! - **Userinfo**: profile claims for an access token

pub mod authorization_request;
pub mod callback;
pub mod token_exchange;
pub mod userinfo;

pub use authorization_request::AuthorizationRequestBuilder;
pub use callback::{validate_callback, CallbackState, CallbackValidator};
pub use token_exchange::{parse_token_response, TokenExchange};
pub use userinfo::{parse_userinfo_response, UserinfoFetch};
