//! WebSocket connection handlers.
//!
//! This is the connection adapter: it maps the transport lifecycle onto the
//! presence usecases and owns the per-connection "current room" tag. The tag
//! is initialized to the default room on connect, updated on successful joins,
//! and used as the room to leave when the transport closes.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::{Mutex, mpsc};

use crate::{
    domain::{ConnectionId, RoomId, StudyTime},
    infrastructure::dto::websocket::ClientFrame,
    ui::state::AppState,
    usecase::ConnectError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub connection_id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> ConnectionId (Domain Model)
    let connection_id = match ConnectionId::try_from(query.connection_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid connection_id format: '{}'", query.connection_id);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this client to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Join the default room before upgrading; the membership snapshot for the
    // default room is already waiting in rx when the socket task starts.
    match state
        .connect_participant_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        Ok(default_room) => {
            tracing::info!(
                "Client '{}' connected to room '{}'",
                connection_id.as_str(),
                default_room.id.as_str()
            );
            Ok(ws.on_upgrade(move |socket| {
                handle_socket(socket, state, connection_id, rx, default_room.id)
            }))
        }
        Err(ConnectError::DuplicateConnectionId(_)) => {
            tracing::warn!(
                "Client with ID '{}' is already connected. Rejecting connection.",
                query.connection_id
            );
            Err(StatusCode::CONFLICT)
        }
        Err(ConnectError::Registry(e)) => {
            tracing::error!("Failed to connect '{}': {}", query.connection_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Spawns a task that receives events from the rx channel and pushes them to
/// the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
    initial_room_id: RoomId,
) {
    let (sender, mut receiver) = socket.split();

    // Per-connection current room tag. Updated on successful joins and read
    // back on disconnect; the value never comes from a request payload.
    let current_room = Arc::new(Mutex::new(initial_room_id));

    // Task pushing events from other clients to this client
    let mut send_task = pusher_loop(rx, sender);

    // Task receiving frames from this client
    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let recv_room = current_room.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let frame = match serde_json::from_str::<ClientFrame>(&text) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::warn!("Ignoring malformed frame: {}", e);
                            continue;
                        }
                    };
                    handle_frame(&recv_state, &recv_connection_id, &recv_room, frame).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Client '{}' requested close",
                        recv_connection_id.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Leave the last known room. The usecase tolerates a second disconnect
    // for the same connection, so a racing cleanup is harmless.
    let last_room = current_room.lock().await.clone();
    state
        .disconnect_participant_usecase
        .execute(connection_id.clone(), last_room)
        .await;
    tracing::info!(
        "Client '{}' disconnected and removed from registry",
        connection_id.as_str()
    );
}

async fn handle_frame(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    current_room: &Arc<Mutex<RoomId>>,
    frame: ClientFrame,
) {
    match frame {
        ClientFrame::JoinRoom { room_id } => {
            let target = match RoomId::try_from(room_id.clone()) {
                Ok(id) => id,
                Err(_) => {
                    tracing::warn!("Invalid room_id in join_room frame: '{}'", room_id);
                    return;
                }
            };

            // Resolve the previous room from the connection state, not from
            // the request payload.
            let previous = current_room.lock().await.clone();
            match state
                .join_room_usecase
                .execute(connection_id.clone(), target, Some(previous))
                .await
            {
                Ok(room) => {
                    *current_room.lock().await = room.id;
                }
                Err(e) => {
                    tracing::warn!(
                        "Join room failed for '{}': {}",
                        connection_id.as_str(),
                        e
                    );
                }
            }
        }
        ClientFrame::UpdateStatus {
            room_id,
            status,
            study_time,
        } => {
            let room_id = match RoomId::try_from(room_id.clone()) {
                Ok(id) => id,
                Err(_) => {
                    tracing::warn!("Invalid room_id in update_status frame: '{}'", room_id);
                    return;
                }
            };
            // A stale report racing a disconnect is silently ignored by the
            // usecase; nothing to handle here.
            state
                .update_status_usecase
                .execute(
                    connection_id.clone(),
                    room_id,
                    status,
                    StudyTime::new(study_time),
                )
                .await;
        }
    }
}
