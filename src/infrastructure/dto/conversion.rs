//! Conversion logic between DTOs and domain entities.

use crate::common::time::timestamp_to_jst_rfc3339;
use crate::domain::{Member, Room};
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Room> for dto::RoomSummaryDto {
    fn from(model: &Room) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            member_count: model.member_count(),
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&Member> for dto::MemberDetailDto {
    fn from(model: &Member) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            status: model.status,
            study_time: model.study_time.seconds(),
            joined_at: timestamp_to_jst_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<&Room> for dto::RoomDetailDto {
    fn from(model: &Room) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            members: model.members.iter().map(dto::MemberDetailDto::from).collect(),
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}
