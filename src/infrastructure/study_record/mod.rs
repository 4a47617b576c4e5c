//! 学習時間レコードのシンク実装

pub mod log_sink;

pub use log_sink::LogStudyRecordSink;
