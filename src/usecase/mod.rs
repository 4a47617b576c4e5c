//! UseCase 層（Presence Service）
//!
//! 在席管理の各操作を1ユースケース1構造体で提供します。各ユースケースは
//! レジストリの変更とイベント通知を同じ操作の中で順序付けるため、観測者が
//! 「通知のないレジストリ変更」を見ることはありません（通知自体は
//! ベストエフォートであり、永続化とのトランザクション性はない）。

pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod update_status;

pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, CreateRoomError, GetRoomDetailError, JoinRoomError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use update_status::UpdateStatusUseCase;
