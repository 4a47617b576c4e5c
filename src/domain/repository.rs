//! Repository trait 定義
//!
//! ドメイン層が必要とするレジストリアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御の契約
//!
//! read-then-write を伴う操作（move_member の2段階移動、update_member、
//! remove_member）は、実装側で1つのクリティカルセクションとして実行される
//! こと。途中状態が他の呼び出しから観測されてはならない。

use async_trait::async_trait;

use super::{
    ConnectionId, Member, MemberStatus, RegistryError, Room, RoomId, RoomName, StudyTime,
    Timestamp,
};

/// Registry Repository trait
///
/// ドメイン層が必要とするレジストリへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RegistryRepository: Send + Sync {
    /// 学習室を新規作成する（空文字の名前は Value Object 側で拒否済み）
    async fn create_room(&self, name: RoomName, created_at: Timestamp) -> Room;

    /// 学習室のスナップショットを取得する
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RegistryError>;

    /// 作成順の学習室スナップショットリストを取得する
    async fn list_rooms(&self) -> Vec<Room>;

    /// 学習室にメンバーを追加する（既所属なら冪等）
    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError>;

    /// 学習室からメンバーを削除する（不在なら no-op で false）
    async fn remove_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool;

    /// メンバーのステータスと学習時間を更新する（不在なら false）
    async fn update_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        status: MemberStatus,
        study_time: StudyTime,
    ) -> bool;

    /// メンバーを移動先の学習室へ1操作で移す（移動先不在なら RoomNotFound）
    async fn move_member(
        &self,
        connection_id: ConnectionId,
        to_room_id: &RoomId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError>;

    /// 学習室の現在のメンバー数を取得する（不在なら 0）
    async fn member_count(&self, room_id: &RoomId) -> usize;

    /// 接続が現在所属している学習室の ID を取得する
    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId>;
}
