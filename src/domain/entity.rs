//! ドメインエンティティ定義
//!
//! 学習室（Room）・メンバー（Member）・レジストリ（RoomRegistry）を定義します。
//! RoomRegistry は全学習室の集約であり、以下の不変条件を強制します：
//!
//! - 1つの接続 ID は同時に高々1つの学習室にのみ所属する
//! - デフォルト学習室はプロセス起動時に作成され、削除されない
//! - 学習室の並び順は作成順、メンバーの並び順は入室順

use super::error::RegistryError;
use super::value_object::{
    ConnectionId, MemberStatus, RoomId, RoomIdFactory, RoomName, StudyTime, Timestamp,
};

/// デフォルト学習室の表示名
pub const DEFAULT_ROOM_NAME: &str = "デフォルト学習室";

/// 学習室内の1メンバーの在席レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// 所有するコネクションの ID
    pub connection_id: ConnectionId,
    /// 在席ステータス（入室時は Resting）
    pub status: MemberStatus,
    /// クライアント報告の累積学習時間
    pub study_time: StudyTime,
    /// 入室時刻
    pub joined_at: Timestamp,
}

impl Member {
    /// 入室直後のメンバーを作成（Resting、学習時間 0）
    pub fn new(connection_id: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            status: MemberStatus::Resting,
            study_time: StudyTime::zero(),
            joined_at,
        }
    }
}

/// 学習室
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: RoomName,
    pub created_at: Timestamp,
    /// 入室順のメンバーリスト（接続 ID でキー付け、室内で一意）
    pub members: Vec<Member>,
}

impl Room {
    pub fn new(id: RoomId, name: RoomName, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            created_at,
            members: Vec::new(),
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members
            .iter()
            .any(|m| &m.connection_id == connection_id)
    }

    pub fn find_member(&self, connection_id: &ConnectionId) -> Option<&Member> {
        self.members
            .iter()
            .find(|m| &m.connection_id == connection_id)
    }

    /// メンバーを追加する
    ///
    /// 同じ接続 ID が既に存在する場合は重複登録せず、既存エントリを返す
    /// （ステータス・学習時間は保持される）。
    pub fn add_member(&mut self, member: Member) -> Member {
        if let Some(existing) = self.find_member(&member.connection_id) {
            return existing.clone();
        }
        self.members.push(member.clone());
        member
    }

    /// メンバーを削除する
    ///
    /// 存在しないメンバーの削除は no-op であり、false を返す（エラーではない）。
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() < before
    }

    /// メンバーのステータスと学習時間を更新する
    ///
    /// メンバーが存在しない場合は false を返す。
    pub fn update_member(
        &mut self,
        connection_id: &ConnectionId,
        status: MemberStatus,
        study_time: StudyTime,
    ) -> bool {
        match self
            .members
            .iter_mut()
            .find(|m| &m.connection_id == connection_id)
        {
            Some(member) => {
                member.status = status;
                member.study_time = study_time;
                true
            }
            None => false,
        }
    }
}

/// 全学習室のレジストリ（集約ルート）
///
/// Presence 系のユースケースのみが書き込みアクセスを持つ。読み取りは常に
/// スナップショットのクローンで提供され、内部の可変状態を外部に晒さない。
#[derive(Debug)]
pub struct RoomRegistry {
    /// 作成順の学習室リスト。先頭は必ずデフォルト学習室。
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// レジストリを作成し、デフォルト学習室を登録する
    pub fn new(created_at: Timestamp) -> Self {
        let default_room = Room::new(
            RoomId::default_room(),
            RoomName::new(DEFAULT_ROOM_NAME.to_string())
                .expect("default room name is a non-empty literal"),
            created_at,
        );
        Self {
            rooms: vec![default_room],
        }
    }

    /// 学習室を新規作成する
    ///
    /// 衝突しない ID を採番し、メンバー 0 人の学習室を登録して返す。
    pub fn create_room(&mut self, name: RoomName, created_at: Timestamp) -> Room {
        let room = Room::new(RoomIdFactory::generate(), name, created_at);
        self.rooms.push(room.clone());
        room
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == room_id)
    }

    fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| &r.id == room_id)
    }

    /// 作成順の学習室リスト
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// 指定の学習室にメンバーを追加する
    ///
    /// 学習室が存在しなければ RoomNotFound。既に所属していれば冪等
    /// （既存エントリを返し、ステータス・学習時間は保持）。
    pub fn add_member(
        &mut self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError> {
        let room = self
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.as_str().to_string()))?;
        Ok(room.add_member(Member::new(connection_id, joined_at)))
    }

    /// 指定の学習室からメンバーを削除する（不在なら no-op で false）
    pub fn remove_member(&mut self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        match self.get_mut(room_id) {
            Some(room) => room.remove_member(connection_id),
            None => false,
        }
    }

    /// 指定の学習室のメンバーを更新する（学習室またはメンバー不在なら false）
    pub fn update_member(
        &mut self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
        status: MemberStatus,
        study_time: StudyTime,
    ) -> bool {
        match self.get_mut(room_id) {
            Some(room) => room.update_member(connection_id, status, study_time),
            None => false,
        }
    }

    /// メンバーを移動先の学習室へ移す
    ///
    /// 移動元からの削除と移動先への追加を1つの操作として行う。途中状態
    /// （どの学習室にも居ない状態）は外部から観測できない。移動先では
    /// ステータス・学習時間が初期化される（Resting、0）。
    ///
    /// 単一所属の不変条件を守るため、削除は所属中の全学習室を対象にする。
    pub fn move_member(
        &mut self,
        connection_id: ConnectionId,
        to_room_id: &RoomId,
        joined_at: Timestamp,
    ) -> Result<Member, RegistryError> {
        let Some(target_index) = self.rooms.iter().position(|r| &r.id == to_room_id) else {
            return Err(RegistryError::RoomNotFound(to_room_id.as_str().to_string()));
        };

        for room in &mut self.rooms {
            room.remove_member(&connection_id);
        }

        Ok(self.rooms[target_index].add_member(Member::new(connection_id, joined_at)))
    }

    /// 指定の学習室の現在のメンバー数（学習室不在なら 0）
    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.get(room_id).map_or(0, Room::member_count)
    }

    /// 指定の接続が現在所属している学習室の ID
    pub fn room_of(&self, connection_id: &ConnectionId) -> Option<&RoomId> {
        self.rooms
            .iter()
            .find(|r| r.contains(connection_id))
            .map(|r| &r.id)
    }
}
