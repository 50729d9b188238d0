//! Integration tests for the userinfo endpoint

use super::*;
use oidc_client::{OidcError, RelyingPartyError, Tokens};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn tokens(access_token: &str) -> Tokens {
    serde_json::from_value(json!({"access_token": access_token, "token_type": "bearer"})).unwrap()
}

#[tokio::test]
async fn test_userinfo_sends_bearer_token() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer access_token_123456"))
        .and(header("accept", "application/json"))
        .respond_with(success_response(json!({
            "login": "octocat",
            "id": 1,
            "site_admin": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let userinfo = client.userinfo(&tokens("access_token_123456")).await.unwrap();

    assert_eq!(userinfo.get("login").unwrap(), "octocat");
    assert_eq!(userinfo.get("id").unwrap(), 1);
    assert_eq!(userinfo.get("site_admin").unwrap(), false);
}

#[tokio::test]
async fn test_userinfo_unauthorized() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let err = client.userinfo(&tokens("revoked")).await.unwrap_err();

    match err {
        OidcError::RelyingParty(RelyingPartyError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
