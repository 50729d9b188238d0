//! Integration tests for the token endpoint

use super::*;
use base64::Engine;
use oidc_client::{IdentityProviderError, NetworkError, OidcError, RelyingPartyError};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_exchange_posts_form_and_parses_tokens() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("accept", "application/json"))
        .and(body_string(
            "client_id=client_id_12345&client_secret=client_secret09876&code=code_from_idp_123456&redirect_uri=https%3A%2F%2Fapp.example.com%2Fredirect",
        ))
        .respond_with(success_response(json!({
            "access_token": "access_token_123456",
            "scope": "read:user",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let tokens = client
        .exchange_code("code_from_idp_123456", REDIRECT_URI)
        .await
        .unwrap();

    assert_eq!(tokens.access_token.as_deref(), Some("access_token_123456"));
    assert_eq!(tokens.scope.as_deref(), Some("read:user"));
    assert_eq!(tokens.token_type.as_deref(), Some("bearer"));
    assert!(tokens.error.is_none());
}

#[tokio::test]
async fn test_exchange_with_basic_auth() {
    let mock_server = setup_mock_server().await;
    let credentials = base64::engine::general_purpose::STANDARD
        .encode(format!("{}:{}", CLIENT_ID, CLIENT_SECRET));

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("authorization", format!("Basic {}", credentials).as_str()))
        .and(body_string(
            "client_id=client_id_12345&code=abc&redirect_uri=https%3A%2F%2Fapp.example.com%2Fredirect",
        ))
        .respond_with(success_response(json!({"access_token": "t", "expires_in": 3600})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretBasic);
    let tokens = client.exchange_code("abc", REDIRECT_URI).await.unwrap();

    assert_eq!(tokens.expires_in, Some(3600));
    assert!(!tokens.is_expired());
}

#[tokio::test]
async fn test_exchange_error_body() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(success_response(json!({
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired.",
            "error_uri": "https://docs.github.com/apps/troubleshooting"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let err = client.exchange_code("stale", REDIRECT_URI).await.unwrap_err();

    match err {
        OidcError::IdentityProvider(IdentityProviderError::TokenError {
            error, error_uri, ..
        }) => {
            assert_eq!(error, "bad_verification_code");
            assert_eq!(
                error_uri.as_deref(),
                Some("https://docs.github.com/apps/troubleshooting")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_exchange_server_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let err = client.exchange_code("c", REDIRECT_URI).await.unwrap_err();

    assert!(matches!(
        err,
        OidcError::RelyingParty(RelyingPartyError::UnexpectedStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_exchange_does_not_follow_redirects() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "https://evil.example.com/"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let err = client.exchange_code("c", REDIRECT_URI).await.unwrap_err();

    match err {
        OidcError::RelyingParty(RelyingPartyError::UnexpectedRedirect { location }) => {
            assert_eq!(location, "https://evil.example.com/");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_exchange_connection_refused() {
    let client = issuer_builder()
        .authorization_endpoint("http://127.0.0.1:1/authorize")
        .token_endpoint("http://127.0.0.1:1/token")
        .build()
        .unwrap()
        .client_builder()
        .client_id(CLIENT_ID)
        .build()
        .unwrap();

    let err = client.exchange_code("c", REDIRECT_URI).await.unwrap_err();

    assert!(err.is_relying_party());
    assert!(matches!(
        err,
        OidcError::RelyingParty(RelyingPartyError::Transport(
            NetworkError::ConnectionFailed { .. }
        ))
    ));
}
