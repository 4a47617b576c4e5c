//! UseCase: 参加者接続処理
//!
//! 新規接続をデフォルト学習室に入室させ、デフォルト学習室のメンバーリストと
//! 全クライアント向けの人数更新を通知します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続処理（重複チェック、デフォルト学習室への入室、イベント通知）
//!
//! ### なぜこのテストが必要か
//! - 単一所属の不変条件：同じ接続 ID の二重入室を防ぐ
//! - 入室直後のメンバーが Resting / 学習時間 0 であることを保証
//! - 新規接続者自身にもメンバーリストが届くこと（sender 登録 → 通知の順序）
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続がデフォルト学習室に入る
//! - 異常系：重複した接続 ID での接続試行

use std::sync::Arc;

use crate::common::time::get_jst_timestamp;
use crate::domain::{
    ConnectionId, EventPusher, PusherChannel, RegistryRepository, Room, RoomId, Timestamp,
};
use crate::infrastructure::dto::websocket::{RoomCountMessage, RoomMembersMessage};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
    /// EventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>, event_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続するクライアントの ID（Domain Model）
    /// * `sender` - クライアントへのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 接続成功（デフォルト学習室のスナップショットを返す）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Room, ConnectError> {
        // 1. 重複チェック（既にどこかの学習室に所属していれば拒否）
        if self.registry.room_of(&connection_id).await.is_some() {
            return Err(ConnectError::DuplicateConnectionId(
                connection_id.as_str().to_string(),
            ));
        }

        // 2. デフォルト学習室に入室（Resting、学習時間 0）
        let default_room_id = RoomId::default_room();
        let joined_at = Timestamp::new(get_jst_timestamp());
        self.registry
            .add_member(&default_room_id, connection_id.clone(), joined_at)
            .await?;

        // 3. EventPusher にクライアントを登録
        //    通知より先に登録することで、新規接続者自身もメンバーリストを受け取る
        self.event_pusher
            .register_client(connection_id, sender)
            .await;

        // 4. デフォルト学習室のメンバーリストと全体向け人数更新を通知
        let room = self.registry.get_room(&default_room_id).await?;
        self.notify_room_members(&room).await;
        self.notify_room_count(&room).await;

        Ok(room)
    }

    /// 学習室のメンバーにメンバーリストを通知する
    async fn notify_room_members(&self, room: &Room) {
        let targets: Vec<ConnectionId> = room
            .members
            .iter()
            .map(|m| m.connection_id.clone())
            .collect();
        let payload = serde_json::to_string(&RoomMembersMessage::from_room(room)).unwrap();
        if let Err(e) = self.event_pusher.broadcast(targets, &payload).await {
            tracing::warn!("Failed to broadcast room members: {}", e);
        }
    }

    /// 全クライアントに学習室の人数更新を通知する
    async fn notify_room_count(&self, room: &Room) {
        let payload =
            serde_json::to_string(&RoomCountMessage::new(&room.id, room.member_count())).unwrap();
        if let Err(e) = self.event_pusher.broadcast_all(&payload).await {
            tracing::warn!("Failed to broadcast room count: {}", e);
        }
    }
}
