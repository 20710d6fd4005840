// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{Book, BookId, Sale, SaleId, SaleRecord};
use async_trait::async_trait;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// 情報レベルのログを出力
    fn info(&self, component: &str, message: &str);

    /// 警告レベルのログを出力
    fn warn(&self, component: &str, message: &str);

    /// エラーレベルのログを出力
    fn error(&self, component: &str, message: &str);
}

/// リポジトリエラー型
/// リポジトリ操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// データベース接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
    /// 一意制約違反（ISBNの重複）
    UniqueViolation(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            RepositoryError::UniqueViolation(msg) => write!(f, "Unique violation: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// 書籍リポジトリトレイト
/// カタログの永続化を抽象化する
/// ISBNの一意性はストア側の一意インデックスで保証される
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 書籍を新規登録する
    ///
    /// # Returns
    /// * `Ok(())` - 登録成功
    /// * `Err(RepositoryError::UniqueViolation)` - ISBNが既に存在する
    /// * `Err(RepositoryError)` - 登録失敗
    async fn insert(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 書籍IDで書籍を検索する
    ///
    /// # Returns
    /// * `Ok(Some(Book))` - 書籍が見つかった
    /// * `Ok(None)` - 書籍が見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// すべての書籍を取得する
    /// タイトルの昇順で並べて返す
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 書籍を更新する（全フィールドの上書き）
    ///
    /// # Returns
    /// * `Ok(())` - 更新成功
    /// * `Err(RepositoryError::UniqueViolation)` - 新しいISBNが他の書籍と衝突
    /// * `Err(RepositoryError)` - 更新失敗
    async fn update(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 書籍を物理削除する
    ///
    /// # Returns
    /// * `Ok(true)` - 削除した
    /// * `Ok(false)` - 対象が存在しなかった
    async fn delete(&self, book_id: BookId) -> Result<bool, RepositoryError>;

    /// 新しい一意の書籍IDを生成する
    fn next_identity(&self) -> BookId;
}

/// 売上リポジトリトレイト
/// 追記専用の売上台帳を抽象化する
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// 在庫の条件付き減算と売上の追記を単一のアトミックな単位として実行する
    /// 「在庫が数量以上ある場合のみ減算する」条件付き書き込みのため、
    /// 同一書籍への並行販売でも在庫が負になることはない
    ///
    /// # Returns
    /// * `Ok(Some(updated_stock))` - 両方の書き込みが成功した（減算後の在庫数）
    /// * `Ok(None)` - 在庫条件を満たさず、どちらの書き込みも行われなかった
    /// * `Err(RepositoryError)` - 永続化失敗（書き込みは一切行われない）
    async fn append_with_stock_decrement(
        &self,
        sale: &Sale,
    ) -> Result<Option<u32>, RepositoryError>;

    /// すべての売上を取得する
    /// 販売日時の降順（新しい順）で並べ、クエリ時点の書籍タイトルを結合して返す
    async fn find_all(&self) -> Result<Vec<SaleRecord>, RepositoryError>;

    /// 新しい一意の売上IDを生成する
    fn next_identity(&self) -> SaleId;
}
