//! Integration tests using WireMock
//!
//! These tests drive a client backed by the reqwest transport against a mock
//! identity provider, covering the full request/response cycle of the token
//! and userinfo endpoints.

mod callback;
mod token_exchange;
mod userinfo;

use oidc_client::{issuer_builder, Client, ClientAuthMethod};
use wiremock::{MockServer, ResponseTemplate};

pub const CLIENT_ID: &str = "client_id_12345";
pub const CLIENT_SECRET: &str = "client_secret09876";
pub const REDIRECT_URI: &str = "https://app.example.com/redirect";

/// Helper to start a mock identity provider
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to build a client whose endpoints live on `server`
pub fn client_for(server: &MockServer, auth_method: ClientAuthMethod) -> Client {
    issuer_builder()
        .authorization_endpoint(format!("{}/authorize", server.uri()))
        .token_endpoint(format!("{}/token", server.uri()))
        .userinfo_endpoint(format!("{}/user", server.uri()))
        .build()
        .expect("Failed to build issuer")
        .client_builder()
        .client_id(CLIENT_ID)
        .client_secret(CLIENT_SECRET)
        .auth_method(auth_method)
        .redirect_uri(REDIRECT_URI)
        .build()
        .expect("Failed to build client")
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
