//! UseCase: 学習室一覧取得処理

use std::sync::Arc;

use crate::domain::{RegistryRepository, Room};

/// 学習室一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>) -> Self {
        Self { registry }
    }

    /// 作成順の学習室スナップショットリストを取得する
    pub async fn execute(&self) -> Vec<Room> {
        self.registry.list_rooms().await
    }
}
