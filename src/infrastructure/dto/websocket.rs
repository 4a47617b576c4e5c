//! WebSocket message DTOs.
//!
//! Outbound events:
//! - `room_members`: one room's full membership snapshot, pushed to the
//!   members of that room whenever its membership or a member's presence
//!   changes.
//! - `room_count`: a room's current member count, pushed to every connected
//!   client so room listings can refresh without subscribing to each room.
//!
//! Inbound frames:
//! - `join_room`: explicit request to move this connection into a room.
//! - `update_status`: periodic presence report (status + accumulated study
//!   time, both client-reported).

use serde::{Deserialize, Serialize};

use crate::domain::{Member, MemberStatus, Room, RoomId};

/// Message type discriminator for outbound events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    RoomMembers,
    RoomCount,
}

/// Member snapshot as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    pub connection_id: String,
    pub status: MemberStatus,
    pub study_time: u64,
    pub joined_at: i64,
}

/// Outbound event: full membership snapshot of one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomMembersMessage {
    pub r#type: MessageType,
    pub room_id: String,
    pub members: Vec<MemberDto>,
}

impl RoomMembersMessage {
    pub fn from_room(room: &Room) -> Self {
        Self {
            r#type: MessageType::RoomMembers,
            room_id: room.id.as_str().to_string(),
            members: room.members.iter().cloned().map(MemberDto::from).collect(),
        }
    }
}

/// Outbound event: a room's current member count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCountMessage {
    pub r#type: MessageType,
    pub room_id: String,
    pub count: usize,
}

impl RoomCountMessage {
    pub fn new(room_id: &RoomId, count: usize) -> Self {
        Self {
            r#type: MessageType::RoomCount,
            room_id: room_id.as_str().to_string(),
            count,
        }
    }
}

/// Inbound frames from a connected client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    JoinRoom {
        room_id: String,
    },
    UpdateStatus {
        room_id: String,
        status: MemberStatus,
        study_time: u64,
    },
}

impl From<Member> for MemberDto {
    fn from(model: Member) -> Self {
        Self {
            connection_id: model.connection_id.into_string(),
            status: model.status,
            study_time: model.study_time.seconds(),
            joined_at: model.joined_at.value(),
        }
    }
}
