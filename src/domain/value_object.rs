//! Value Object 定義
//!
//! 学習室ドメインで使用する値オブジェクトを定義します。
//! いずれも生成時にバリデーションを行い、不正な値を持つインスタンスが
//! 存在しないことを保証します。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;

/// デフォルト学習室の固定 ID
pub const DEFAULT_ROOM_ID: &str = "default-room";

/// 学習室 ID
///
/// 不透明な一意トークン。ユーザー作成の学習室には `RoomIdFactory` が
/// UUID v4 を割り当てる。デフォルト学習室のみ固定 ID を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyRoomId);
        }
        Ok(Self(value))
    }

    /// デフォルト学習室の ID
    pub fn default_room() -> Self {
        Self(DEFAULT_ROOM_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// RoomId の生成器
///
/// レジストリの生存期間中、衝突しない ID を生成する。
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> RoomId {
        RoomId(Uuid::new_v4().to_string())
    }
}

/// 学習室の表示名
///
/// 空文字・空白のみの名前は生成時に拒否される。作成後は変更不可。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 接続 ID
///
/// トランスポート層のコネクションを識別する。コネクションの生存期間中は不変。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// メンバーの在席ステータス
///
/// 集中中（Focused）または休憩中（Resting）の2状態。遷移はクライアント駆動のみで、
/// サーバー側のタイムアウトによる遷移は存在しない。入室時は常に Resting。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Resting,
    Focused,
}

/// 累積学習時間（秒）
///
/// クライアントが報告した値をそのまま保持する。サーバー側で計測・補正はしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StudyTime(u64);

impl StudyTime {
    pub fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn seconds(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
