// ドメインモデル（エンティティと値オブジェクト）

mod book;
mod sale;
mod value_objects;

pub use value_objects::{BookId, Money, SaleId};

pub use book::{Book, BookDraft, BookPatch, LowStockAlert, DEFAULT_THRESHOLD};
pub use sale::{Sale, SaleRecord};
