pub mod catalog_query_service;
pub mod sales_query_service;

pub use catalog_query_service::CatalogQueryService;
pub use sales_query_service::SalesQueryService;

use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::{Book, BookDraft, BookId, BookPatch, Sale};
use crate::domain::port::{BookRepository, Logger, SaleRepository};
use std::sync::Arc;

/// カタログアプリケーションサービス
/// 書籍のCRUDを担当する
pub struct CatalogApplicationService {
    book_repository: Arc<dyn BookRepository>,
}

impl CatalogApplicationService {
    /// 新しいカタログアプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `book_repository` - 書籍リポジトリ
    pub fn new(book_repository: Arc<dyn BookRepository>) -> Self {
        Self { book_repository }
    }

    /// 新しい書籍を登録
    /// 必須フィールドの欠落は検証エラー、ISBNの重複は競合エラーになる
    /// どちらの場合もストアには何も書き込まれない
    ///
    /// # Arguments
    /// * `draft` - 登録ドラフト
    ///
    /// # Returns
    /// * `Ok(Book)` - 採番済みIDを含む登録された書籍
    /// * `Err(ApplicationError)` - 登録失敗
    pub async fn create_book(&self, draft: BookDraft) -> Result<Book, ApplicationError> {
        let id = self.book_repository.next_identity();
        let book = Book::from_draft(id, draft)?;
        self.book_repository.insert(&book).await?;
        Ok(book)
    }

    /// 書籍を部分更新
    /// パッチに含まれるフィールドのみを変更する（stock=0なども適用される）
    ///
    /// # Arguments
    /// * `book_id` - 書籍ID
    /// * `patch` - 部分更新の内容
    ///
    /// # Returns
    /// * `Ok(Book)` - 更新後の書籍
    /// * `Err(ApplicationError)` - 更新失敗
    pub async fn update_book(
        &self,
        book_id: BookId,
        patch: BookPatch,
    ) -> Result<Book, ApplicationError> {
        if patch.is_empty() {
            return Err(DomainError::EmptyUpdate.into());
        }
        let mut book = self
            .book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("Book not found: {}", book_id))
            })?;
        book.apply_patch(patch)?;
        self.book_repository.update(&book).await?;
        Ok(book)
    }

    /// 書籍を削除
    /// 物理削除であり、過去の売上レコードには影響しない
    ///
    /// # Arguments
    /// * `book_id` - 書籍ID
    ///
    /// # Returns
    /// * `Ok(Book)` - 削除された書籍
    /// * `Err(ApplicationError)` - 削除失敗
    pub async fn delete_book(&self, book_id: BookId) -> Result<Book, ApplicationError> {
        let book = self
            .book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("Book not found: {}", book_id))
            })?;
        let removed = self.book_repository.delete(book_id).await?;
        if !removed {
            return Err(ApplicationError::NotFound(format!(
                "Book not found: {}",
                book_id
            )));
        }
        Ok(book)
    }
}

/// 売上記録の結果
/// 作成された売上と減算後の在庫状態を返す
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    pub sale: Sale,
    pub updated_stock: u32,
    pub is_low_stock: bool,
}

/// 在庫アプリケーションサービス
/// 売上記録を調整する。在庫減算と台帳追記はアトミックな単位として扱う
pub struct InventoryApplicationService {
    book_repository: Arc<dyn BookRepository>,
    sale_repository: Arc<dyn SaleRepository>,
    logger: Arc<dyn Logger>,
}

impl InventoryApplicationService {
    /// 新しい在庫アプリケーションサービスを作成
    ///
    /// # Arguments
    /// * `book_repository` - 書籍リポジトリ
    /// * `sale_repository` - 売上リポジトリ
    /// * `logger` - ロガー
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        sale_repository: Arc<dyn SaleRepository>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            book_repository,
            sale_repository,
            logger,
        }
    }

    /// 売上を記録する
    ///
    /// 1. 数量を検証（0は無効）
    /// 2. 書籍を取得（存在しなければNotFound）
    /// 3. 在庫不足を事前チェック（フェイルファスト）
    /// 4. 在庫減算と売上追記を単一のアトミックな単位として永続化
    ///    確定判定はストアの条件付き書き込みが行うため、
    ///    並行する販売が同じ在庫を二重に引き当てることはない
    /// 5. 減算後の在庫からアラートフラグを再計算して返す
    ///
    /// # Arguments
    /// * `book_id` - 販売する書籍のID
    /// * `quantity` - 販売数量
    ///
    /// # Returns
    /// * `Ok(SaleReceipt)` - 作成された売上・減算後の在庫・アラートフラグ
    /// * `Err(ApplicationError)` - 記録失敗（失敗時は在庫も台帳も変化しない）
    pub async fn record_sale(
        &self,
        book_id: BookId,
        quantity: u32,
    ) -> Result<SaleReceipt, ApplicationError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity.into());
        }

        let book = self
            .book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!("Book not found: {}", book_id))
            })?;

        if !book.has_available_stock(quantity) {
            self.logger.warn(
                "InventoryApplicationService",
                &format!(
                    "在庫不足のため販売を拒否しました: book_id={} stock={} quantity={}",
                    book_id,
                    book.stock(),
                    quantity
                ),
            );
            return Err(DomainError::InsufficientStock.into());
        }

        let sale = Sale::new(
            self.sale_repository.next_identity(),
            book_id,
            quantity,
            book.price(),
        )?;

        let updated_stock = self
            .sale_repository
            .append_with_stock_decrement(&sale)
            .await?
            // 条件付き書き込みが不成立（並行販売に先を越されたなど）
            .ok_or(ApplicationError::DomainError(DomainError::InsufficientStock))?;

        let is_low_stock = updated_stock <= book.threshold();

        self.logger.info(
            "InventoryApplicationService",
            &format!(
                "売上を記録しました: sale_id={} book_id={} quantity={} updated_stock={}",
                sale.id(),
                book_id,
                quantity,
                updated_stock
            ),
        );
        if is_low_stock {
            self.logger.warn(
                "InventoryApplicationService",
                &format!(
                    "在庫が閾値以下になりました: book_id={} stock={} threshold={}",
                    book_id,
                    updated_stock,
                    book.threshold()
                ),
            );
        }

        Ok(SaleReceipt {
            sale,
            updated_stock,
            is_low_stock,
        })
    }
}
