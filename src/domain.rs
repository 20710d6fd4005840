// ドメイン層
// ビジネスルールとポート定義を持ち、外部技術に依存しない

pub mod error;
pub mod model;
pub mod port;
pub mod service;
