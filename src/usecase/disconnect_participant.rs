//! UseCase: 参加者切断処理
//!
//! 切断した接続を学習室から退室させ、残ったメンバーへメンバーリストを、
//! 全クライアントへ人数更新を通知します。退室時に累積学習時間が残っていれば
//! StudyRecordSink へ fire-and-forget で引き渡します（シンクの失敗は退室を
//! 巻き戻さない）。
//!
//! 既に退室済みの接続への切断は no-op であり、2回目の呼び出しは状態を
//! 変えず、新しいイベントも発行しません（冪等）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, EventPusher, RegistryRepository, Room, RoomId, StudyRecordSink,
};
use crate::infrastructure::dto::websocket::{RoomCountMessage, RoomMembersMessage};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
    /// EventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn EventPusher>,
    /// StudyRecordSink（学習時間レコードの引き渡し先）
    record_sink: Arc<dyn StudyRecordSink>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<dyn RegistryRepository>,
        event_pusher: Arc<dyn EventPusher>,
        record_sink: Arc<dyn StudyRecordSink>,
    ) -> Self {
        Self {
            registry,
            event_pusher,
            record_sink,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断したクライアントの ID
    /// * `room_id` - 切断時にクライアントがいた学習室の ID
    ///   （Connection Adapter が保持していた最後の current room タグ）
    pub async fn execute(&self, connection_id: ConnectionId, room_id: RoomId) {
        // 1. 退室前に累積学習時間を控えておく（レコード引き渡し用）
        let final_study_time = self
            .registry
            .get_room(&room_id)
            .await
            .ok()
            .and_then(|room| room.find_member(&connection_id).map(|m| m.study_time));

        // 2. 退室（既に不在なら no-op）
        let removed = self.registry.remove_member(&room_id, &connection_id).await;

        // 3. EventPusher から登録解除（二重解除は無害）
        self.event_pusher.unregister_client(&connection_id).await;

        if !removed {
            tracing::debug!(
                "Disconnect for '{}' in room '{}' ignored (already absent)",
                connection_id.as_str(),
                room_id.as_str()
            );
            return;
        }
        tracing::info!(
            "Connection '{}' disconnected from room '{}'",
            connection_id.as_str(),
            room_id.as_str()
        );

        // 4. 学習時間レコードを引き渡す（fire-and-forget）
        if let Some(study_time) = final_study_time {
            if !study_time.is_zero() {
                self.record_sink.record(&connection_id, study_time).await;
            }
        }

        // 5. 残ったメンバーへメンバーリストを、全クライアントへ人数更新を通知
        if let Ok(room) = self.registry.get_room(&room_id).await {
            self.notify_room_members(&room).await;
            self.notify_room_count(&room).await;
        }
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
