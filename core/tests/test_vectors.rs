//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use workspace_api::types::{Workspace, WorkspaceFilter, WorkspaceTransition};
use workspace_api::{workspaces_url, ApiClient, ApiError, HttpMethod, HttpResponse};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Workspace listing URL
// ---------------------------------------------------------------------------

#[test]
fn workspaces_url_test_vectors() {
    let raw = include_str!("../../test-vectors/workspaces_url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let filter: Option<WorkspaceFilter> = serde_json::from_value(case["filter"].clone()).unwrap();
        let expected = case["expected_path"].as_str().unwrap();

        assert_eq!(workspaces_url(filter.as_ref()), expected, "{name}: url");

        let req = client().build_get_workspaces(filter.as_ref());
        assert_eq!(req.method, HttpMethod::Get, "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{expected}"), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");
    }
}

// ---------------------------------------------------------------------------
// Workspace builds
// ---------------------------------------------------------------------------

#[test]
fn workspace_build_test_vectors() {
    let raw = include_str!("../../test-vectors/workspace_builds.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transition: WorkspaceTransition =
            serde_json::from_value(case["transition"].clone()).unwrap();
        let workspace_id = case["workspace_id"].as_str().unwrap();
        let template_version_id = case["template_version_id"].as_str();
        let expected_req = &case["expected_request"];

        let req = c
            .build_workspace_build(transition, workspace_id, template_version_id)
            .unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // The named wrapper must produce the same request.
        let wrapped = match transition {
            WorkspaceTransition::Start => c.build_start_workspace(workspace_id, template_version_id),
            WorkspaceTransition::Stop => c.build_stop_workspace(workspace_id, template_version_id),
            WorkspaceTransition::Delete => c.build_delete_workspace(workspace_id, template_version_id),
        }
        .unwrap();
        assert_eq!(wrapped, req, "{name}: wrapper");
    }
}

// ---------------------------------------------------------------------------
// Workspace lookup by owner and name
// ---------------------------------------------------------------------------

#[test]
fn workspace_lookup_test_vectors() {
    let raw = include_str!("../../test-vectors/workspace_lookup.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_get_workspace_by_owner_and_name(
            case["organization_id"].as_str().unwrap(),
            case["owner"].as_str(),
            case["workspace_name"].as_str().unwrap(),
        );
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_json::<Workspace>(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound { .. }), "{name}: expected NotFound"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            assert_eq!(err.message(), case["expected_message"].as_str(), "{name}: message");
        } else {
            let workspace = result.unwrap();
            assert_eq!(workspace.name, case["expected_name"].as_str().unwrap(), "{name}: parsed result");
            assert!(workspace.autostart_schedule.is_none(), "{name}: schedule");
        }
    }
}
