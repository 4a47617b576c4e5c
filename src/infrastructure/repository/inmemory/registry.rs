//! InMemory Registry Repository 実装
//!
//! ドメイン層が定義する RegistryRepository trait の具体的な実装。
//! RoomRegistry 集約を単一の Mutex で保護し、インメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! 全ての操作は1回のロック取得の中で完結します。特に move_member は
//! 「移動元からの削除」と「移動先への追加」を同じクリティカルセクション内で
//! 行うため、途中状態が他のタスクから観測されることはありません。
//! 読み取りは同じロックの下で取得したスナップショットのクローンを返します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Member, MemberStatus, RegistryError, RegistryRepository, Room, RoomId,
    RoomName, RoomRegistry, StudyTime, Timestamp,
};

/// インメモリ Registry Repository 実装
pub struct InMemoryRegistryRepository {
    /// RoomRegistry ドメインモデル
    registry: Arc<Mutex<RoomRegistry>>,
}

impl InMemoryRegistryRepository {
    /// 新しい InMemoryRegistryRepository を作成
    pub fn new(registry: Arc<Mutex<RoomRegistry>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RegistryRepository for InMemoryRegistryRepository {
    async fn create_room(&self, name: RoomName, created_at: Timestamp) -> Room {
        let mut registry = self.registry.lock().await;
        registry.create_room(name, created_at)
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError> {
        let registry = self.registry.lock().await;
        registry
            .get(room_id)
            .cloned()
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let registry = self.registry.lock().await;
        registry.rooms().to_vec()
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError> {
        let mut registry = self.registry.lock().await;
        registry.add_member(room_id, connection_id, joined_at)
    }

    async fn remove_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let mut registry = self.registry.lock().await;
        registry.remove_member(room_id, connection_id)
    }

    async fn update_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        status: MemberStatus,
        study_time: StudyTime,
    ) -> bool {
        let mut registry = self.registry.lock().await;
        registry.update_member(room_id, connection_id, status, study_time)
    }

    async fn move_member(
        &self,
        connection_id: ConnectionId,
        to_room_id: &RoomId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError> {
        let mut registry = self.registry.lock().await;
        registry.move_member(connection_id, to_room_id, joined_at)
    }

    async fn member_count(&self, room_id: &RoomId) -> usize {
        let registry = self.registry.lock().await;
        registry.member_count(room_id)
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let registry = self.registry.lock().await;
        registry.room_of(connection_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::get_jst_timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRegistryRepository の基本的な CRUD 操作
    // - メンバーの追加・削除・移動がレジストリに反映されること
    // - 読み取りがスナップショットであること（内部状態を晒さない）
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるデータアクセス層の中核
    // - 単一所属の不変条件を Repository 境界でも保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 学習室作成と一覧取得
    // 2. メンバー追加・削除の成功ケース
    // 3. 存在しない学習室への操作（エラーケース）
    // 4. move_member による移動とスナップショットの独立性
    // ========================================

    fn create_test_repository() -> InMemoryRegistryRepository {
        let registry = Arc::new(Mutex::new(RoomRegistry::new(Timestamp::new(
            get_jst_timestamp(),
        ))));
        InMemoryRegistryRepository::new(registry)
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_room_and_list() {
        // テスト項目: 学習室を作成すると一覧に作成順で現れる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let math = repo
            .create_room(
                RoomName::new("数学".to_string()).unwrap(),
                Timestamp::new(get_jst_timestamp()),
            )
            .await;

        // then (期待する結果):
        let rooms = repo.list_rooms().await;
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].id, RoomId::default_room());
        assert_eq!(rooms[1].id, math.id);
        assert_eq!(rooms[1].name.as_str(), "数学");
        assert_eq!(rooms[1].member_count(), 0);
    }

    #[tokio::test]
    async fn test_add_and_remove_member() {
        // テスト項目: メンバーの追加と削除がレジストリに反映される
        // given (前提条件):
        let repo = create_test_repository();
        let default_id = RoomId::default_room();
        let timestamp = Timestamp::new(get_jst_timestamp());

        // when (操作):
        let member = repo
            .add_member(&default_id, conn("alice"), timestamp)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(member.connection_id.as_str(), "alice");
        assert_eq!(repo.member_count(&default_id).await, 1);

        let removed = repo.remove_member(&default_id, &conn("alice")).await;
        assert!(removed);
        assert_eq!(repo.member_count(&default_id).await, 0);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_member_is_noop() {
        // テスト項目: 存在しないメンバーを削除しても問題なく処理される（冪等性）
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let removed = repo
            .remove_member(&RoomId::default_room(), &conn("nonexistent"))
            .await;

        // then (期待する結果): エラーにならず false が返る
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_get_room_not_found() {
        // テスト項目: 存在しない学習室の取得が RoomNotFound になる
        // given (前提条件):
        let repo = create_test_repository();
        let unknown = RoomId::new("no-such-room".to_string()).unwrap();

        // when (操作):
        let result = repo.get_room(&unknown).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::RoomNotFound("no-such-room".to_string()))
        );
    }

    #[tokio::test]
    async fn test_move_member_between_rooms() {
        // テスト項目: move_member で移動元から消え移動先に現れる
        // given (前提条件):
        let repo = create_test_repository();
        let default_id = RoomId::default_room();
        let timestamp = Timestamp::new(get_jst_timestamp());
        let math = repo
            .create_room(RoomName::new("数学".to_string()).unwrap(), timestamp)
            .await;
        repo.add_member(&default_id, conn("alice"), timestamp)
            .await
            .unwrap();

        // when (操作):
        repo.move_member(conn("alice"), &math.id, timestamp)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(repo.member_count(&default_id).await, 0);
        assert_eq!(repo.member_count(&math.id).await, 1);
        assert_eq!(repo.room_of(&conn("alice")).await, Some(math.id));
    }

    #[tokio::test]
    async fn test_snapshots_are_detached_from_registry() {
        // テスト項目: 取得したスナップショットがレジストリの内部状態と独立している
        // given (前提条件):
        let repo = create_test_repository();
        let default_id = RoomId::default_room();
        let timestamp = Timestamp::new(get_jst_timestamp());
        repo.add_member(&default_id, conn("alice"), timestamp)
            .await
            .unwrap();

        // when (操作): スナップショット取得後にレジストリを変更する
        let snapshot = repo.get_room(&default_id).await.unwrap();
        repo.remove_member(&default_id, &conn("alice")).await;

        // then (期待する結果): スナップショットは変更の影響を受けない
        assert_eq!(snapshot.member_count(), 1);
        assert_eq!(repo.member_count(&default_id).await, 0);
    }

    #[tokio::test]
    async fn test_update_member_status_and_time() {
        // テスト項目: ステータスと学習時間の更新が反映される
        // given (前提条件):
        let repo = create_test_repository();
        let default_id = RoomId::default_room();
        let timestamp = Timestamp::new(get_jst_timestamp());
        repo.add_member(&default_id, conn("alice"), timestamp)
            .await
            .unwrap();

        // when (操作):
        let updated = repo
            .update_member(
                &default_id,
                &conn("alice"),
                MemberStatus::Focused,
                StudyTime::new(120),
            )
            .await;

        // then (期待する結果):
        assert!(updated);
        let room = repo.get_room(&default_id).await.unwrap();
        let member = room.find_member(&conn("alice")).unwrap();
        assert_eq!(member.status, MemberStatus::Focused);
        assert_eq!(member.study_time, StudyTime::new(120));
    }
}
