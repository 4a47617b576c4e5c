//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{CreateRoomRequest, RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::{CreateRoomError, GetRoomDetailError},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms (creation order, with member counts)
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> =
        rooms.iter().map(RoomSummaryDto::from).collect();

    Json(room_summaries)
}

/// Create a new room
///
/// The creator is not joined automatically; joining happens through an
/// explicit join_room frame on the WebSocket connection.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomSummaryDto>), StatusCode> {
    match state.create_room_usecase.execute(request.name).await {
        Ok(room) => Ok((StatusCode::CREATED, Json(RoomSummaryDto::from(&room)))),
        Err(CreateRoomError::EmptyRoomName) => Err(StatusCode::BAD_REQUEST),
    }
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(GetRoomDetailError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
    }
}
