//! Integration tests for the complete callback round trip

use super::*;
use oidc_client::{Checks, OidcError, RelyingPartyError};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_authorization_code_round_trip() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("code=code_from_idp_123456"))
        .respond_with(success_response(json!({
            "access_token": "access_token_123456",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(success_response(json!({"login": "octocat"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);

    let authorization_url = client
        .authorization_url_builder()
        .state("state_12345678")
        .build();
    assert!(authorization_url
        .as_str()
        .starts_with(&format!("{}/authorize?client_id=client_id_12345", mock_server.uri())));

    let callback = Url::parse(&format!(
        "{}?code=code_from_idp_123456&state=state_12345678",
        REDIRECT_URI
    ))
    .unwrap();
    let tokens = client
        .oauth_callback_url(
            REDIRECT_URI,
            &callback,
            &Checks::new().with_state("state_12345678"),
        )
        .await
        .unwrap();
    let userinfo = client.userinfo(&tokens).await.unwrap();

    assert_eq!(userinfo.get("login").unwrap(), "octocat");
}

#[tokio::test]
async fn test_forged_callback_makes_no_request() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(success_response(json!({"access_token": "t"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, ClientAuthMethod::ClientSecretPost);
    let callback = Url::parse(&format!("{}?code=c&state=forged", REDIRECT_URI)).unwrap();

    let err = client
        .oauth_callback_url(REDIRECT_URI, &callback, &Checks::new().with_state("expected"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        OidcError::RelyingParty(RelyingPartyError::StateMismatch { .. })
    ));
}
