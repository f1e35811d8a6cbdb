use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::test_util::{build_app, empty_request, json_request, prepare_store_and_test};
use crate::api::test_util::deserialize_body;
use crate::dto;
use crate::routing_utils::BasicErrorResponse;

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn logging_in_issues_a_profile_and_persists_the_session() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;

        let login_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/session",
                json!({ "username": "alice", "password": "hunter2" }),
            ))
            .await
            .expect("the login request should complete");
        assert_eq!(StatusCode::CREATED, login_response.status());
        let signed_in: dto::user::User = deserialize_body(login_response.into_body()).await;
        assert_eq!("0", signed_in.id);
        assert_eq!("alice", signed_in.name);
        assert_eq!("alice@example.com", signed_in.email);

        let session_response = app
            .oneshot(empty_request("GET", "/session"))
            .await
            .expect("the session request should complete");
        assert_eq!(StatusCode::OK, session_response.status());
        let current_user: dto::user::User = deserialize_body(session_response.into_body()).await;
        assert_eq!("alice", current_user.name);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn a_fresh_store_has_no_session() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;

        let session_response = app
            .oneshot(empty_request("GET", "/session"))
            .await
            .expect("the session request should complete");
        assert_eq!(StatusCode::NOT_FOUND, session_response.status());
        let error_body: BasicErrorResponse = deserialize_body(session_response.into_body()).await;
        assert_eq!("not_found", error_body.error_code);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn blank_credentials_do_not_create_a_session() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;

        let login_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/session",
                json!({ "username": "", "password": "" }),
            ))
            .await
            .expect("the login request should complete");
        assert_eq!(StatusCode::BAD_REQUEST, login_response.status());
        let error_body: BasicErrorResponse = deserialize_body(login_response.into_body()).await;
        assert_eq!("invalid_input", error_body.error_code);

        let session_response = app
            .oneshot(empty_request("GET", "/session"))
            .await
            .expect("the session request should complete");
        assert_eq!(StatusCode::NOT_FOUND, session_response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn logging_out_clears_the_persisted_session() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;

        let login_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/session",
                json!({ "username": "bob", "password": "swordfish" }),
            ))
            .await
            .expect("the login request should complete");
        assert_eq!(StatusCode::CREATED, login_response.status());

        let logout_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/session"))
            .await
            .expect("the logout request should complete");
        assert_eq!(StatusCode::OK, logout_response.status());

        let session_response = app
            .oneshot(empty_request("GET", "/session"))
            .await
            .expect("the session request should complete");
        assert_eq!(StatusCode::NOT_FOUND, session_response.status());
    });
}
