//! StudyRecordSink trait 定義
//!
//! 「接続が N 秒の学習時間を積み上げた」という記録を外部の永続化
//! コラボレータへ引き渡すための fire-and-forget なシンク。
//! 記録の失敗が在席状態の更新を巻き戻したりブロックしたりしてはならない。

use async_trait::async_trait;

use super::{ConnectionId, StudyTime};

/// Study Record Sink trait
///
/// 戻り値を持たないことが契約の一部：呼び出し元は結果を待たず、
/// 失敗はシンク実装の内部で処理される。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudyRecordSink: Send + Sync {
    /// 学習時間レコードを引き渡す
    async fn record(&self, connection_id: &ConnectionId, study_time: StudyTime);
}
