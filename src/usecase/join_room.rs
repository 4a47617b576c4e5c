//! UseCase: 学習室参加処理
//!
//! 接続を現在の学習室から移動先の学習室へ移します。移動元からの退室と
//! 移動先への入室はレジストリ側の1つのクリティカルセクションで行われ、
//! 「どの学習室にも居ない」途中状態は外部から観測されません。
//! ステータス・学習時間は移動先へ引き継がれず、Resting / 0 に初期化されます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 学習室の移動（移動元からの退室、移動先への入室、双方への通知）
//!
//! ### なぜこのテストが必要か
//! - 単一所属の不変条件：移動後に移動元へメンバーが残らないことを保証
//! - 移動先でステータス・学習時間が初期化されることを確認
//! - 移動元・移動先の両方にメンバーリストと人数更新が通知されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：デフォルト学習室から別の学習室への移動
//! - 異常系：存在しない学習室への参加試行（移動元の状態は不変）

use std::sync::Arc;

use crate::common::time::get_jst_timestamp;
use crate::domain::{ConnectionId, EventPusher, RegistryRepository, Room, RoomId, Timestamp};
use crate::infrastructure::dto::websocket::{RoomCountMessage, RoomMembersMessage};

use super::error::JoinRoomError;

/// 学習室参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（レジストリアクセスの抽象化）
    registry: Arc<dyn RegistryRepository>,
    /// EventPusher（イベント通知の抽象化）
    event_pusher: Arc<dyn EventPusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RegistryRepository>, event_pusher: Arc<dyn EventPusher>) -> Self {
        Self {
            registry,
            event_pusher,
        }
    }

    /// 学習室参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加するクライアントの ID（Domain Model）
    /// * `target_room_id` - 移動先の学習室 ID
    /// * `previous_room_id` - 接続がそれまで所属していた学習室 ID
    ///   （Connection Adapter が自身の接続状態から解決した値。リクエスト
    ///   ペイロード由来の値を渡してはならない）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 移動先の学習室スナップショット
    /// * `Err(JoinRoomError)` - 移動先が存在しない（移動元の状態は不変）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        target_room_id: RoomId,
        previous_room_id: Option<RoomId>,
    ) -> Result<Room, JoinRoomError> {
        // 1. 移動（退室 + 入室を1操作で行う）
        let joined_at = Timestamp::new(get_jst_timestamp());
        self.registry
            .move_member(connection_id.clone(), &target_room_id, joined_at)
            .await?;
        tracing::info!(
            "Connection '{}' joined room '{}'",
            connection_id.as_str(),
            target_room_id.as_str()
        );

        // 2. 移動元の学習室に残ったメンバーへ通知
        if let Some(previous) = previous_room_id.filter(|p| p != &target_room_id) {
            if let Ok(previous_room) = self.registry.get_room(&previous).await {
                self.notify_room_members(&previous_room).await;
                self.notify_room_count(&previous_room).await;
            }
        }

        // 3. 移動先の学習室へ通知（参加者自身もメンバーリストを受け取る）
        let room = self
            .registry
            .get_room(&target_room_id)
            .await
            .map_err(JoinRoomError::from)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemberStatus, RoomName, RoomRegistry, StudyTime};
    use crate::infrastructure::{
        message_pusher::WebSocketEventPusher, repository::InMemoryRegistryRepository,
    };
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_test_registry() -> Arc<InMemoryRegistryRepository> {
        let registry = Arc::new(Mutex::new(RoomRegistry::new(Timestamp::new(
            get_jst_timestamp(),
        ))));
        Arc::new(InMemoryRegistryRepository::new(registry))
    }

    fn create_test_pusher() -> Arc<WebSocketEventPusher> {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        Arc::new(WebSocketEventPusher::new(clients))
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    async fn add_to_default(registry: &InMemoryRegistryRepository, id: &str) {
        registry
            .add_member(
                &RoomId::default_room(),
                conn(id),
                Timestamp::new(get_jst_timestamp()),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_join_room_moves_member_and_resets_presence() {
        // テスト項目: 移動後、移動元から消え、移動先に Resting / 0 で現れる
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher();
        let usecase = JoinRoomUseCase::new(registry.clone(), pusher);

        let math = registry
            .create_room(
                RoomName::new("数学".to_string()).unwrap(),
                Timestamp::new(get_jst_timestamp()),
            )
            .await;
        add_to_default(&registry, "alice").await;
        // 集中中・学習時間ありの状態から移動する
        registry
            .update_member(
                &RoomId::default_room(),
                &conn("alice"),
                MemberStatus::Focused,
                StudyTime::new(300),
            )
            .await;

        // when (操作):
        let result = usecase
            .execute(conn("alice"), math.id.clone(), Some(RoomId::default_room()))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let room = result.unwrap();
        assert_eq!(room.id, math.id);
        assert_eq!(room.member_count(), 1);
        assert_eq!(room.members[0].status, MemberStatus::Resting);
        assert!(room.members[0].study_time.is_zero());

        assert_eq!(registry.member_count(&RoomId::default_room()).await, 0);
        assert_eq!(registry.room_of(&conn("alice")).await, Some(math.id));
    }

    #[tokio::test]
    async fn test_join_unknown_room_fails_without_side_effects() {
        // テスト項目: 存在しない学習室への参加が失敗し、移動元の状態が変わらない
        // given (前提条件):
        let registry = create_test_registry();
        let pusher = create_test_pusher();
        let usecase = JoinRoomUseCase::new(registry.clone(), pusher);
        add_to_default(&registry, "alice").await;

        // when (操作):
        let unknown = RoomId::new("no-such-room".to_string()).unwrap();
        let result = usecase
            .execute(conn("alice"), unknown, Some(RoomId::default_room()))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::RoomNotFound("no-such-room".to_string()))
        );
        assert_eq!(registry.member_count(&RoomId::default_room()).await, 1);
    }

    #[tokio::test]
    async fn test_join_notifies_both_rooms() {
        // テスト項目: 移動元の残メンバーと移動先の双方に通知が届く
        // given (前提条件):
        let registry = create_test_registry();
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = Arc::new(WebSocketEventPusher::new(clients));
        let usecase = JoinRoomUseCase::new(registry.clone(), pusher.clone());

        let math = registry
            .create_room(
                RoomName::new("数学".to_string()).unwrap(),
                Timestamp::new(get_jst_timestamp()),
            )
            .await;
        add_to_default(&registry, "alice").await;
        add_to_default(&registry, "bob").await;

        use crate::domain::EventPusher;
        let (tx_bob, mut rx_bob) = mpsc::unbounded_channel();
        pusher.register_client(conn("bob"), tx_bob).await;
        let (tx_alice, mut rx_alice) = mpsc::unbounded_channel();
        pusher.register_client(conn("alice"), tx_alice).await;

        // when (操作): alice がデフォルト学習室から数学へ移動する
        usecase
            .execute(conn("alice"), math.id.clone(), Some(RoomId::default_room()))
            .await
            .unwrap();

        // then (期待する結果): bob（移動元）には1人分のメンバーリストが届く
        let bob_members: serde_json::Value =
            serde_json::from_str(&rx_bob.try_recv().unwrap()).unwrap();
        assert_eq!(bob_members["type"], "room_members");
        assert_eq!(bob_members["room_id"], RoomId::default_room().as_str());
        assert_eq!(bob_members["members"].as_array().unwrap().len(), 1);
        assert_eq!(bob_members["members"][0]["connection_id"], "bob");

        // alice（移動先）には数学のメンバーリストが届く
        // （最初のイベントは移動元の人数更新 broadcast_all）
        let mut alice_events = Vec::new();
        while let Ok(event) = rx_alice.try_recv() {
            alice_events.push(serde_json::from_str::<serde_json::Value>(&event).unwrap());
        }
        let math_members = alice_events
            .iter()
            .find(|e| e["type"] == "room_members" && e["room_id"] == math.id.as_str())
            .expect("alice should receive the target room member list");
        assert_eq!(math_members["members"][0]["connection_id"], "alice");
        assert_eq!(math_members["members"][0]["status"], "resting");
        assert_eq!(math_members["members"][0]["study_time"], 0);
    }
}
