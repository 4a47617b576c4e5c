//! EventPusher trait 定義
//!
//! 在席イベントのファンアウト（ブロードキャスト）のインターフェースを定義します。
//! 配信はベストエフォート・高々1回であり、配信失敗がレジストリの状態を
//! 巻き戻すことはありません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, EventPushError};

/// クライアントごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Event Pusher trait
///
/// 接続中のクライアントへのイベント送信を抽象化する。
/// UseCase 層はこの trait に依存し、WebSocket などの具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// クライアントの送信チャンネルを登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除する
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定のクライアントにイベントを送信する
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), EventPushError>;

    /// 指定したクライアント群にイベントをブロードキャストする
    ///
    /// 一部クライアントへの送信失敗は許容され、残りへの配信は継続される。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), EventPushError>;

    /// 接続中の全クライアントにイベントをブロードキャストする
    async fn broadcast_all(&self, content: &str) -> Result<(), EventPushError>;
}
