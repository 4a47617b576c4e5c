//! ドメイン層
//!
//! 学習室・メンバー・レジストリのエンティティと Value Object、
//! および下位層が実装するインターフェース（trait）を定義します。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod record;
pub mod repository;
pub mod value_object;

pub use entity::{DEFAULT_ROOM_NAME, Member, Room, RoomRegistry};
pub use error::{DomainError, EventPushError, RegistryError};
pub use pusher::{EventPusher, PusherChannel};
pub use record::StudyRecordSink;
pub use repository::RegistryRepository;
pub use value_object::{
    ConnectionId, DEFAULT_ROOM_ID, MemberStatus, RoomId, RoomIdFactory, RoomName, StudyTime,
    Timestamp,
};

#[cfg(test)]
pub use pusher::MockEventPusher;
#[cfg(test)]
pub use record::MockStudyRecordSink;
