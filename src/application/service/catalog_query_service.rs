use crate::application::ApplicationError;
use crate::domain::model::{Book, BookId, LowStockAlert};
use crate::domain::port::BookRepository;
use crate::domain::service::collect_alerts;
use std::sync::Arc;

/// カタログクエリサービス
/// 読み取り専用の書籍操作とアラート導出を提供する
pub struct CatalogQueryService {
    book_repository: Arc<dyn BookRepository>,
}

impl CatalogQueryService {
    /// 新しいカタログクエリサービスを作成
    ///
    /// # Arguments
    /// * `book_repository` - 書籍リポジトリ
    pub fn new(book_repository: Arc<dyn BookRepository>) -> Self {
        Self { book_repository }
    }

    /// 書籍IDで書籍を取得
    ///
    /// # Returns
    /// * `Ok(Some(Book))` - 書籍が見つかった
    /// * `Ok(None)` - 書籍が見つからなかった
    /// * `Err(ApplicationError)` - 取得失敗
    pub async fn get_book_by_id(
        &self,
        book_id: BookId,
    ) -> Result<Option<Book>, ApplicationError> {
        self.book_repository
            .find_by_id(book_id)
            .await
            .map_err(ApplicationError::from)
    }

    /// すべての書籍を取得
    /// タイトルの昇順で並べて返す
    pub async fn get_all_books(&self) -> Result<Vec<Book>, ApplicationError> {
        self.book_repository
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }

    /// 低在庫アラートの一覧を取得
    /// 書籍の現在状態からクエリのたびに再計算する。保存はしない
    pub async fn get_low_stock_alerts(&self) -> Result<Vec<LowStockAlert>, ApplicationError> {
        let books = self.book_repository.find_all().await?;
        Ok(collect_alerts(&books))
    }
}
