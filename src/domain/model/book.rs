use crate::domain::error::DomainError;
use crate::domain::model::{BookId, Money};

/// 在庫アラートのデフォルト閾値
pub const DEFAULT_THRESHOLD: u32 = 5;

/// 書籍集約
/// カタログの1エントリと在庫数を管理する
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    price: Money,
    isbn: String,
    stock: u32,
    threshold: u32,
}

impl Book {
    /// 新しい書籍を作成
    /// タイトル・著者・ISBNは空であってはならない
    ///
    /// # Arguments
    /// * `id` - 書籍ID
    /// * `title` - タイトル
    /// * `author` - 著者
    /// * `price` - 価格
    /// * `isbn` - ISBN（カタログ全体で一意）
    /// * `stock` - 初期在庫数
    /// * `threshold` - アラート閾値（省略時は5）
    pub fn new(
        id: BookId,
        title: String,
        author: String,
        price: Money,
        isbn: String,
        stock: u32,
        threshold: Option<u32>,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "タイトルは空にできません".to_string(),
            ));
        }
        if author.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "著者は空にできません".to_string(),
            ));
        }
        if isbn.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "ISBNは空にできません".to_string(),
            ));
        }
        Ok(Self {
            id,
            title,
            author,
            price,
            isbn,
            stock,
            threshold: threshold.unwrap_or(DEFAULT_THRESHOLD),
        })
    }

    /// 登録ドラフトから書籍を作成
    /// 必須フィールドの欠落を検証する
    pub fn from_draft(id: BookId, draft: BookDraft) -> Result<Self, DomainError> {
        let title = draft
            .title
            .ok_or_else(|| DomainError::MissingField("title".to_string()))?;
        let author = draft
            .author
            .ok_or_else(|| DomainError::MissingField("author".to_string()))?;
        let price = draft
            .price
            .ok_or_else(|| DomainError::MissingField("price".to_string()))?;
        let isbn = draft
            .isbn
            .ok_or_else(|| DomainError::MissingField("isbn".to_string()))?;
        let stock = draft
            .stock
            .ok_or_else(|| DomainError::MissingField("stock".to_string()))?;
        Self::new(id, title, author, price, isbn, stock, draft.threshold)
    }

    /// データベースから取得したデータで書籍を再構築
    /// リポジトリでの使用を想定
    pub fn reconstruct(
        id: BookId,
        title: String,
        author: String,
        price: Money,
        isbn: String,
        stock: u32,
        threshold: u32,
    ) -> Self {
        Self {
            id,
            title,
            author,
            price,
            isbn,
            stock,
            threshold,
        }
    }

    /// 書籍IDを取得
    pub fn id(&self) -> BookId {
        self.id
    }

    /// タイトルを取得
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 著者を取得
    pub fn author(&self) -> &str {
        &self.author
    }

    /// 価格を取得
    pub fn price(&self) -> Money {
        self.price
    }

    /// ISBNを取得
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// 在庫数を取得
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// アラート閾値を取得
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// 指定された数量の在庫が利用可能かチェック
    pub fn has_available_stock(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }

    /// 在庫を減算する
    /// 在庫が不足している場合は失敗し、在庫数は変化しない
    pub fn decrement_stock(&mut self, quantity: u32) -> Result<(), DomainError> {
        if !self.has_available_stock(quantity) {
            return Err(DomainError::InsufficientStock);
        }
        self.stock -= quantity;
        Ok(())
    }

    /// 在庫が閾値以下かどうか
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.threshold
    }

    /// 部分更新を適用する
    /// パッチに含まれるフィールドのみを変更する（0などの値も適用される）
    /// 空のパッチは拒否する
    pub fn apply_patch(&mut self, patch: BookPatch) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(DomainError::InvalidValue(
                    "タイトルは空にできません".to_string(),
                ));
            }
            self.title = title;
        }
        if let Some(author) = patch.author {
            if author.trim().is_empty() {
                return Err(DomainError::InvalidValue(
                    "著者は空にできません".to_string(),
                ));
            }
            self.author = author;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(isbn) = patch.isbn {
            if isbn.trim().is_empty() {
                return Err(DomainError::InvalidValue(
                    "ISBNは空にできません".to_string(),
                ));
            }
            self.isbn = isbn;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(threshold) = patch.threshold {
            self.threshold = threshold;
        }
        Ok(())
    }
}

/// 書籍登録用のドラフト
/// 必須フィールドの検証前の状態を表す
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Money>,
    pub isbn: Option<String>,
    pub stock: Option<u32>,
    pub threshold: Option<u32>,
}

/// 書籍の部分更新
/// Noneのフィールドは「未指定」を意味する
/// 真偽値的な判定ではなくフィールドの有無で適用を決める
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Money>,
    pub isbn: Option<String>,
    pub stock: Option<u32>,
    pub threshold: Option<u32>,
}

impl BookPatch {
    /// 更新対象フィールドが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.price.is_none()
            && self.isbn.is_none()
            && self.stock.is_none()
            && self.threshold.is_none()
    }
}

/// 低在庫アラート
/// 書籍の現在状態から導出される。永続化されない
#[derive(Debug, Clone, PartialEq)]
pub struct LowStockAlert {
    pub book_id: BookId,
    pub title: String,
    pub stock: u32,
    pub threshold: u32,
}

impl LowStockAlert {
    /// 在庫が閾値以下の場合のみアラートを生成
    pub fn from_book(book: &Book) -> Option<Self> {
        if book.is_low_stock() {
            Some(Self {
                book_id: book.id(),
                title: book.title().to_string(),
                stock: book.stock(),
                threshold: book.threshold(),
            })
        } else {
            None
        }
    }
}
