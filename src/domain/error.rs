//! ドメイン層のエラー定義

use thiserror::Error;

/// Value Object のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("connection id must not be empty")]
    EmptyConnectionId,
}

/// レジストリ操作のエラー
///
/// いずれも呼び出し元に同期的に返されるローカルなエラーであり、
/// プロセスを停止させることはない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room not found: {0}")]
    RoomNotFound(String),
}

/// イベント送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventPushError {
    #[error("client not found: {0}")]
    ClientNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),
}
