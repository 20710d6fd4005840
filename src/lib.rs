// 書店在庫管理システム
// 書籍カタログのCRUD・売上記録・低在庫アラートを提供するRESTバックエンド

pub mod adapter;
pub mod application;
pub mod domain;
