//! Task API integration tests
//!
//! Drives the task endpoints through the full router: auth middleware,
//! validation, positional ordering semantics, and response envelopes.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{create_test_user, get_request, json_request, response_json, test_app};

#[tokio::test]
async fn test_create_task_returns_created() {
    let (app, _state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "Write release notes", "project": project}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["title"], "Write release notes");
    assert_eq!(body["data"]["status"], "todo");
    assert_eq!(body["data"]["position"], 0);
    assert_eq!(body["data"]["createdBy"], user.id.to_string());
}

#[tokio::test]
async fn test_create_without_token_is_unauthorized() {
    let (app, _state) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"title": "t", "project": Uuid::new_v4()}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let (app, _state) = test_app();
    let user = create_test_user();

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "   ", "project": Uuid::new_v4()}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_creates_append_to_column_tail() {
    let (app, _state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    for title in ["first", "second", "third"] {
        let request = json_request(
            "POST",
            "/api/tasks",
            &user.token,
            &json!({"title": title, "project": project}),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(get_request(
            &format!("/api/tasks?project={}&status=todo", project),
            &user.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let tasks = body["data"]["tasks"].as_array().unwrap();
    let listed: Vec<(&str, u64)> = tasks
        .iter()
        .map(|t| (t["title"].as_str().unwrap(), t["position"].as_u64().unwrap()))
        .collect();
    assert_eq!(listed, vec![("first", 0), ("second", 1), ("third", 2)]);
    assert_eq!(body["data"]["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_move_to_front_shifts_neighbours() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let mut ids = Vec::new();
    for title in ["x", "y", "z"] {
        let request = json_request(
            "POST",
            "/api/tasks",
            &user.token,
            &json!({"title": title, "project": project}),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        let body = response_json(response).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // Move z to the head of the same column
    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/move", ids[2]),
        &user.token,
        &json!({"status": "todo", "position": 0}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = state
        .tasks
        .list(&milestonenest::tasks::TaskFilter {
            project: Some(project),
            ..Default::default()
        })
        .await;
    let order: Vec<(&str, u32)> = listed
        .iter()
        .map(|t| (t.title.as_str(), t.position))
        .collect();
    assert_eq!(order, vec![("z", 0), ("x", 1), ("y", 2)]);
}

#[tokio::test]
async fn test_move_rejects_unknown_status() {
    let (app, _state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "t", "project": project}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = response_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/move", id),
        &user.token,
        &json!({"status": "archived", "position": 0}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_unknown_task_is_not_found() {
    let (app, _state) = test_app();
    let user = create_test_user();

    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/move", Uuid::new_v4()),
        &user.token,
        &json!({"status": "done", "position": 0}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_leaves_position_gap() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let request = json_request(
            "POST",
            "/api/tasks",
            &user.token,
            &json!({"title": title, "project": project}),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        let body = response_json(response).await;
        ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/tasks/{}", ids[1]))
        .header("authorization", format!("Bearer {}", user.token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Survivors keep their positions, no renumbering
    let listed = state
        .tasks
        .list(&milestonenest::tasks::TaskFilter {
            project: Some(project),
            ..Default::default()
        })
        .await;
    let positions: Vec<u32> = listed.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0, 2]);
}

#[tokio::test]
async fn test_status_patch_keeps_position() {
    let (app, _state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "t", "project": project}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = response_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/status", id),
        &user.token,
        &json!({"status": "in-progress"}),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["status"], "in-progress");
    assert_eq!(body["data"]["position"], 0);
}

#[tokio::test]
async fn test_list_filters_by_priority() {
    let (app, _state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    for (title, priority) in [("urgent one", "urgent"), ("calm one", "low")] {
        let request = json_request(
            "POST",
            "/api/tasks",
            &user.token,
            &json!({"title": title, "project": project, "priority": priority}),
        );
        app.clone().oneshot(request).await.unwrap();
    }

    let response = app
        .oneshot(get_request(
            &format!("/api/tasks?project={}&priority=urgent", project),
            &user.token,
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let tasks = body["data"]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "urgent one");
}

#[tokio::test]
async fn test_list_rejects_bad_status_filter() {
    let (app, _state) = test_app();
    let user = create_test_user();

    let response = app
        .oneshot(get_request("/api/tasks?status=bogus", &user.token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_is_open() {
    let (app, _state) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
}
