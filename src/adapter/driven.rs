// ドリブンアダプター（出力側）
// ドメインのポートをMySQL・インメモリ・コンソールで実装する

pub mod book_repository;
pub mod console_logger;
pub mod in_memory;
pub mod sale_repository;

pub use book_repository::MySqlBookRepository;
pub use console_logger::ConsoleLogger;
pub use in_memory::{InMemoryBookRepository, InMemorySaleRepository, InMemoryStore};
pub use sale_repository::MySqlSaleRepository;
