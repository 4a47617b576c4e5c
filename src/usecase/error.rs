//! UseCase 層のエラー定義
//!
//! いずれも呼び出し元（HTTP / WebSocket ハンドラ）へ同期的に返され、
//! ステータスコード等へ変換される。自動リトライは行わない。

use thiserror::Error;

use crate::domain::RegistryError;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ接続 ID が既にいずれかの学習室に所属している
    #[error("connection id '{0}' is already connected")]
    DuplicateConnectionId(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// 学習室作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    /// 空文字・空白のみの学習室名は作成前に拒否され、レジストリは変更されない
    #[error("room name must not be empty")]
    EmptyRoomName,
}

/// 学習室参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

impl From<RegistryError> for JoinRoomError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::RoomNotFound(id) => JoinRoomError::RoomNotFound(id),
        }
    }
}

/// 学習室詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}
