//! UseCase: ステータス更新処理
//!
//! クライアントが報告したステータス（集中中 / 休憩中）と累積学習時間で
//! メンバーを更新し、その学習室のメンバーリストと人数更新を通知します。
//!
//! メンバーまたは学習室が存在しない場合は黙って無視します。切断と最後の
//! ステータス報告は競合し得るため、これはエラーではなく想定内のレースです
//! （イベントも発行されない）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, EventPusher, MemberStatus, RegistryRepository, Room, RoomId, StudyTime,
};
use crate::infrastructure::dto::websocket::{RoomCountMessage, RoomMembersMessage};

/// ステータス更新のユースケース
pub struct UpdateStatusUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
    /// EventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl UpdateStatusUseCase {
    /// 新しい UpdateStatusUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>, event_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// ステータス更新を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 報告元クライアントの ID
    /// * `room_id` - クライアントが現在いる学習室の ID
    /// * `status` - 新しいステータス
    /// * `study_time` - クライアント報告の累積学習時間（サーバー側で補正しない）
    ///
    /// # Returns
    ///
    /// 更新が行われたかどうか。false（学習室またはメンバー不在）は
    /// エラーではなく、通知も発行されない。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        status: MemberStatus,
        study_time: StudyTime,
    ) -> bool {
        // 1. 更新（不在なら no-op）
        let updated = self
            .registry
            .update_member(&room_id, &connection_id, status, study_time)
            .await;
        if !updated {
            tracing::debug!(
                "Status update for '{}' in room '{}' ignored (absent)",
                connection_id.as_str(),
                room_id.as_str()
            );
            return false;
        }

        // 2. 学習室のメンバーリストと人数更新を通知
        if let Ok(room) = self.registry.get_room(&room_id).await {
            self.notify_room_members(&room).await;
            self.notify_room_count(&room).await;
        }

        true
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
