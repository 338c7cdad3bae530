//! Exact request shapes and error mapping, checked against wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workspace_api::{Api, ApiError};

async fn api_for(server: &MockServer) -> Api {
    Api::from_url(&server.uri()).unwrap()
}

fn build_body(transition: &str) -> serde_json::Value {
    json!({
        "id": "1",
        "created_at": "2022-05-17T17:39:01.382927298Z",
        "updated_at": "2022-05-17T17:39:01.382927298Z",
        "workspace_id": "ws-1",
        "workspace_name": "test-workspace",
        "workspace_owner_id": "test-user",
        "workspace_owner_name": "TestUser",
        "template_version_id": "tv-1",
        "build_number": 1,
        "name": "a-workspace-build",
        "transition": transition,
        "initiator_id": "test-user",
        "initiator_name": "TestUser",
        "job": {
            "id": "job-1",
            "created_at": "2022-05-17T17:39:01.382927298Z",
            "status": "pending"
        }
    })
}

#[tokio::test]
async fn start_stop_delete_post_fixed_transition() {
    let server = MockServer::start().await;

    for transition in ["start", "stop", "delete"] {
        Mock::given(method("POST"))
            .and(path("/api/v2/workspaces/ws-1/builds"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"transition": transition})))
            .respond_with(ResponseTemplate::new(200).set_body_json(build_body(transition)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = api_for(&server).await;
    let start = api.start_workspace("ws-1", None).await.unwrap();
    let stop = api.stop_workspace("ws-1", None).await.unwrap();
    let delete = api.delete_workspace("ws-1", None).await.unwrap();

    assert_eq!(start.transition.as_str(), "start");
    assert_eq!(stop.transition.as_str(), "stop");
    assert_eq!(delete.transition.as_str(), "delete");
}

#[tokio::test]
async fn build_with_template_version_sends_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/workspaces/ws-1/builds"))
        .and(body_json(json!({"transition": "start", "template_version_id": "tv-9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(build_body("start")))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    api.start_workspace("ws-1", Some("tv-9")).await.unwrap();
}

#[tokio::test]
async fn get_workspaces_sends_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/workspaces"))
        .and(query_param("organization_id", "org1"))
        .and(query_param("owner", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let filter = workspace_api::types::WorkspaceFilter {
        organization_id: Some("org1".to_string()),
        owner: Some("alice".to_string()),
    };
    assert!(api.get_workspaces(Some(&filter)).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_user_password_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/users/u-1/password"))
        .and(body_json(json!({"password": "s3cret"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    api.update_user_password("s3cret", "u-1").await.unwrap();
}

#[tokio::test]
async fn regenerate_ssh_key_defaults_to_me() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/users/me/gitsshkey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": "test-user",
            "created_at": "2022-05-16T14:30:34.148205897Z",
            "updated_at": "2022-05-16T15:29:10.302441433Z",
            "public_key": "ssh-ed25519 AAAA"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let key = api.regenerate_user_ssh_key(None).await.unwrap();
    assert_eq!(key.public_key, "ssh-ed25519 AAAA");
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/users/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "You must be logged in."})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let err = api.get_user().await.unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 401, .. }));
    assert_eq!(err.message(), Some("You must be logged in."));
}

#[tokio::test]
async fn unexpected_body_is_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/buildinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": 3})))
        .mount(&server)
        .await;

    let api = api_for(&server).await;
    let err = api.get_build_info().await.unwrap_err();
    assert!(matches!(err, ApiError::DeserializationError(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = Api::from_url(&format!("http://{addr}")).unwrap();
    let err = api.get_build_info().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.status().is_none());
}
