/**
 * WebSocket Connection Handler
 *
 * Implements the `GET /ws` endpoint. The bearer token is presented as the
 * `token` query parameter of the handshake request and is verified once,
 * before the upgrade: a missing, malformed, or expired token refuses the
 * connection with the same generic authentication error, so no room
 * operation is ever reachable without an authenticated connection.
 *
 * After the upgrade the handler runs a select loop between the wire and the
 * connection's relay queue: inbound frames are parsed as `ClientMessage`
 * commands, outbound room events are serialized and written in queue order.
 */

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::auth::identity_from_token;
use crate::error::ApiError;
use crate::realtime::protocol::{self, ClientMessage, EventName, RoomEvent};
use crate::realtime::relay::{ConnectionId, EventRelay};
use crate::server::state::AppState;

/// Handshake auth data
#[derive(Debug, Deserialize)]
pub struct SocketAuthQuery {
    #[serde(default)]
    token: Option<String>,
}

/// Handle a WebSocket upgrade request (GET /ws)
///
/// Authentication runs once here, per connection, never per message.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<SocketAuthQuery>,
    State(state): State<AppState>,
) -> Response {
    let Some(token) = query.token else {
        tracing::warn!("[Socket] Connection refused: no credential presented");
        return ApiError::Unauthorized.into_response();
    };
    let (user_id, email) = match identity_from_token(&state.config.auth, &token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!("[Socket] Connection refused: credential rejected");
            return err.into_response();
        }
    };
    ws.on_upgrade(move |socket| handle_socket(socket, state.relay.clone(), user_id, email))
}

async fn handle_socket(mut socket: WebSocket, relay: EventRelay, user_id: Uuid, email: String) {
    let (conn_id, mut events) = relay.register(user_id, email).await;
    tracing::info!("[Socket] User connected: {}", user_id);

    loop {
        tokio::select! {
            ws_msg = socket.recv() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(msg) => handle_client_message(&relay, conn_id, msg).await,
                            Err(err) => {
                                tracing::debug!("[Socket] Ignoring malformed message: {}", err);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
            event = events.recv() => {
                match event {
                    Some(event) => {
                        match serde_json::to_string(&event) {
                            Ok(json) => {
                                if socket.send(Message::Text(json.into())).await.is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                tracing::error!("[Socket] Failed to serialize event: {}", err);
                            }
                        }
                    }
                    None => break,
                }
            }
        }
    }

    // Drops membership in every room; no user:left is emitted on disconnect.
    relay.unregister(conn_id).await;
    tracing::info!("[Socket] User disconnected: {}", user_id);
}

async fn handle_client_message(relay: &EventRelay, conn_id: ConnectionId, msg: ClientMessage) {
    match msg {
        ClientMessage::JoinProject(project) => {
            relay.join(conn_id, project).await;
        }
        ClientMessage::LeaveProject(project) => {
            relay.leave(conn_id, project).await;
        }
        ClientMessage::TaskUpdate(data) => {
            relay_passthrough(relay, conn_id, EventName::TaskUpdated, data).await;
        }
        ClientMessage::TaskMove(data) => {
            relay_passthrough(relay, conn_id, EventName::TaskMoved, data).await;
        }
        ClientMessage::MilestoneUpdate(data) => {
            relay_passthrough(relay, conn_id, EventName::MilestoneUpdated, data).await;
        }
    }
}

/// Relay a peer-originated payload to the other members of its room
///
/// The sender never receives its own echo. Payloads without a parseable
/// `projectId` are dropped.
async fn relay_passthrough(
    relay: &EventRelay,
    conn_id: ConnectionId,
    name: EventName,
    data: Value,
) {
    match protocol::project_id_of(&data) {
        Some(project) => {
            relay
                .broadcast_except(project, RoomEvent::new(name, data), conn_id)
                .await;
        }
        None => {
            tracing::warn!("[Socket] Dropping passthrough message without projectId");
        }
    }
}
