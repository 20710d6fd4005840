// アプリケーション層
// ユースケースの調整役。ドメインのポート越しに永続化へアクセスする

pub mod error;
pub mod service;

pub use error::ApplicationError;
