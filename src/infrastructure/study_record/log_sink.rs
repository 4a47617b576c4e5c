//! ログ出力による StudyRecordSink 実装
//!
//! 学習時間レコードを構造化ログとして出力するだけの fire-and-forget 実装。
//! 永続化は外部のコラボレータの責務であり、ここでの失敗が在席状態の
//! 更新をブロックすることはない。

use async_trait::async_trait;

use crate::domain::{ConnectionId, StudyRecordSink, StudyTime};

/// ログ出力による StudyRecordSink 実装
pub struct LogStudyRecordSink;

impl LogStudyRecordSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogStudyRecordSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudyRecordSink for LogStudyRecordSink {
    async fn record(&self, connection_id: &ConnectionId, study_time: StudyTime) {
        tracing::info!(
            connection_id = connection_id.as_str(),
            study_time_seconds = study_time.seconds(),
            "study record"
        );
    }
}
