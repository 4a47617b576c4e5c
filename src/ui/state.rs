//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, UpdateStatusUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// CreateRoomUseCase（学習室作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（学習室参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// UpdateStatusUseCase（ステータス更新のユースケース）
    pub update_status_usecase: Arc<UpdateStatusUseCase>,
    /// GetRoomsUseCase（学習室一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（学習室詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
