//! Real-time room integration tests
//!
//! Drives REST mutations through the router while relay connections sit in
//! the target room, verifying the fan-out: REST-originated events reach every
//! member including one owned by the actor, while peer-relayed passthrough
//! events skip the sender.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use milestonenest::realtime::{EventName, RoomEvent};

use crate::common::{create_test_user, json_request, response_json, test_app};

#[tokio::test]
async fn test_rest_create_reaches_whole_room() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    // The actor's own socket and a second member, both in the room
    let (actor_conn, mut actor_rx) = state.relay.register(user.id, user.email.clone()).await;
    let (peer_conn, mut peer_rx) = state
        .relay
        .register(Uuid::new_v4(), "peer@example.com".to_string())
        .await;
    state.relay.join(actor_conn, project).await;
    state.relay.join(peer_conn, project).await;

    // The actor's socket saw the peer join
    let joined = actor_rx.recv().await.unwrap();
    assert_eq!(joined.name, EventName::UserJoined);

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "shared", "project": project}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;

    // REST mutations are echoed to the actor's socket as well
    for rx in [&mut actor_rx, &mut peer_rx] {
        let event = rx.recv().await.unwrap();
        assert_eq!(event.name, EventName::TaskCreated);
        assert_eq!(event.data["id"], body["data"]["id"]);
    }
}

#[tokio::test]
async fn test_move_event_carries_final_snapshot() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let (conn, mut rx) = state
        .relay
        .register(Uuid::new_v4(), "watcher@example.com".to_string())
        .await;
    state.relay.join(conn, project).await;

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "movable", "project": project}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = response_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(rx.recv().await.unwrap().name, EventName::TaskCreated);

    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/move", id),
        &user.token,
        &json!({"status": "done", "position": 0}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.name, EventName::TaskMoved);
    assert_eq!(event.data["status"], "done");
    assert_eq!(event.data["position"], 0);
}

#[tokio::test]
async fn test_failed_move_broadcasts_nothing() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project = Uuid::new_v4();

    let (conn, mut rx) = state
        .relay
        .register(Uuid::new_v4(), "watcher@example.com".to_string())
        .await;
    state.relay.join(conn, project).await;

    let request = json_request(
        "PATCH",
        &format!("/api/tasks/{}/move", Uuid::new_v4()),
        &user.token,
        &json!({"status": "done", "position": 0}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_passthrough_excludes_sender() {
    let (_app, state) = test_app();
    let project = Uuid::new_v4();

    let (sender_conn, mut sender_rx) = state
        .relay
        .register(Uuid::new_v4(), "sender@example.com".to_string())
        .await;
    let (peer_conn, mut peer_rx) = state
        .relay
        .register(Uuid::new_v4(), "peer@example.com".to_string())
        .await;
    state.relay.join(sender_conn, project).await;
    state.relay.join(peer_conn, project).await;
    assert_eq!(sender_rx.recv().await.unwrap().name, EventName::UserJoined);

    // A peer-relayed snapshot, as the socket layer forwards it
    let payload = json!({"projectId": project, "taskId": "abc", "title": "draft"});
    let delivered = state
        .relay
        .broadcast_except(
            project,
            RoomEvent::new(EventName::TaskUpdated, payload.clone()),
            sender_conn,
        )
        .await;
    assert_eq!(delivered, 1);

    let event = peer_rx.recv().await.unwrap();
    assert_eq!(event.name, EventName::TaskUpdated);
    assert_eq!(event.data, payload);
    assert!(sender_rx.try_recv().is_err());
}

/// Issue a raw WebSocket handshake against a live server and return the
/// HTTP status line of the response.
async fn ws_handshake_status(path: &str) -> (String, milestonenest::server::state::AppState) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let (app, state) = test_app();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {path} HTTP/1.1\r\n\
         Host: localhost\r\n\
         Connection: Upgrade\r\n\
         Upgrade: websocket\r\n\
         Sec-WebSocket-Version: 13\r\n\
         Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = vec![0u8; 1024];
    let n = stream.read(&mut buf).await.unwrap();
    let response = String::from_utf8_lossy(&buf[..n]).to_string();
    let status_line = response.lines().next().unwrap_or_default().to_string();
    (status_line, state)
}

#[tokio::test]
async fn test_ws_handshake_without_token_is_refused() {
    let (status_line, state) = ws_handshake_status("/ws").await;

    assert!(
        status_line.contains("401"),
        "expected 401, got {status_line:?}"
    );
    assert_eq!(state.relay.connection_count().await, 0);
}

#[tokio::test]
async fn test_ws_handshake_with_bad_token_is_refused() {
    let (status_line, state) = ws_handshake_status("/ws?token=not-a-real-token").await;

    assert!(
        status_line.contains("401"),
        "expected 401, got {status_line:?}"
    );
    assert_eq!(state.relay.connection_count().await, 0);
}

#[tokio::test]
async fn test_events_stay_inside_their_room() {
    let (app, state) = test_app();
    let user = create_test_user();
    let project_a = Uuid::new_v4();
    let project_b = Uuid::new_v4();

    let (conn_b, mut rx_b) = state
        .relay
        .register(Uuid::new_v4(), "other@example.com".to_string())
        .await;
    state.relay.join(conn_b, project_b).await;

    let request = json_request(
        "POST",
        "/api/tasks",
        &user.token,
        &json!({"title": "a-only", "project": project_a}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    assert!(rx_b.try_recv().is_err());
}
