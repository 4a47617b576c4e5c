//! UseCase: 学習室詳細取得処理

use std::sync::Arc;

use crate::domain::{RegistryRepository, Room, RoomId};

use super::error::GetRoomDetailError;

/// 学習室詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>) -> Self {
        Self { registry }
    }

    /// 学習室のスナップショットを取得する
    pub async fn execute(&self, room_id: String) -> Result<Room, GetRoomDetailError> {
        let room_id = RoomId::new(room_id.clone())
            .map_err(|_| GetRoomDetailError::RoomNotFound(room_id))?;
        self.registry
            .get_room(&room_id)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound(room_id.into_string()))
    }
}
