//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::MemberStatus;

/// Room summary for the room list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub name: String,
    pub member_count: usize,
    pub created_at: String,
}

/// Member detail for the room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    pub status: MemberStatus,
    pub study_time: u64,
    pub joined_at: String,
}

/// Room detail for the room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub name: String,
    pub members: Vec<MemberDetailDto>,
    pub created_at: String,
}

/// Request body for room creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}
