use crate::adapter::database_error::map_sqlx_error;
use crate::domain::model::{Book, BookId, Money};
use crate::domain::port::{BookRepository, RepositoryError};
use async_trait::async_trait;

// MySQL関連のインポート
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};

/// MySQL書籍リポジトリ
/// MySQLデータベースを使用してカタログを永続化する
/// ISBNの一意性はbooksテーブルの一意インデックスで保証される
#[derive(Clone)]
pub struct MySqlBookRepository {
    pool: Pool<MySql>,
}

impl MySqlBookRepository {
    /// 新しいMySQL書籍リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

/// 行データから書籍を再構築
pub(crate) fn book_from_row(row: &MySqlRow) -> Result<Book, RepositoryError> {
    let book_id = BookId::from_string(row.get("id"))
        .map_err(|e| RepositoryError::FetchFailed(format!("書籍IDの解析に失敗しました: {}", e)))?;

    Ok(Book::reconstruct(
        book_id,
        row.get("title"),
        row.get("author"),
        Money::from_cents(row.get::<i64, _>("price_cents")),
        row.get("isbn"),
        row.get::<u32, _>("stock"),
        row.get::<u32, _>("threshold"),
    ))
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn insert(&self, book: &Book) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, price_cents, isbn, stock, threshold)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.id().to_string())
        .bind(book.title())
        .bind(book.author())
        .bind(book.price().cents())
        .bind(book.isbn())
        .bind(book.stock())
        .bind(book.threshold())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, title, author, price_cents, isbn, stock, threshold FROM books WHERE id = ?",
        )
        .bind(book_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        match row {
            Some(row) => Ok(Some(book_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        // タイトルの昇順で並べる
        let rows = sqlx::query(
            "SELECT id, title, author, price_cents, isbn, stock, threshold FROM books ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        let mut books = Vec::new();
        for row in rows {
            books.push(book_from_row(&row)?);
        }

        Ok(books)
    }

    async fn update(&self, book: &Book) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, price_cents = ?, isbn = ?, stock = ?, threshold = ?
            WHERE id = ?
            "#,
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.price().cents())
        .bind(book.isbn())
        .bind(book.stock())
        .bind(book.threshold())
        .bind(book.id().to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)
            .map_err(RepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }

    fn next_identity(&self) -> BookId {
        BookId::new()
    }
}
