//! UseCase: 学習室作成処理
//!
//! 学習室を新規作成し、全クライアントに人数更新（0 人）を通知して
//! 学習室一覧の再取得を促します。作成者の自動入室は行いません（入室は
//! 明示的な参加リクエストで行う）。

use std::sync::Arc;

use crate::common::time::get_jst_timestamp;
use crate::domain::{EventPusher, RegistryRepository, Room, RoomName, Timestamp};
use crate::infrastructure::dto::websocket::RoomCountMessage;

use super::error::CreateRoomError;

/// 学習室作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
    /// EventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>, event_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// 学習室作成を実行
    ///
    /// # Arguments
    ///
    /// * `name` - 学習室の表示名（空文字はレジストリ変更前に拒否される）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成された学習室（メンバー 0 人）
    /// * `Err(CreateRoomError)` - 作成失敗
    pub async fn execute(&self, name: String) -> Result<Room, CreateRoomError> {
        // 1. 名前のバリデーション（レジストリは一切変更されない）
        let room_name = RoomName::new(name).map_err(|_| CreateRoomError::EmptyRoomName)?;

        // 2. レジストリに学習室を登録
        let created_at = Timestamp::new(get_jst_timestamp());
        let room = self.registry.create_room(room_name, created_at).await;
        tracing::info!(
            "Room created: {} ({})",
            room.name.as_str(),
            room.id.as_str()
        );

        // 3. 全クライアントに人数更新を通知（初期人数は 0）
        let payload =
            serde_json::to_string(&RoomCountMessage::new(&room.id, room.member_count())).unwrap();
        if let Err(e) = self.event_pusher.broadcast_all(&payload).await {
            tracing::warn!("Failed to broadcast room count: {}", e);
        }

        Ok(room)
    }
}
