use crate::adapter::database_error::map_sqlx_error;
use crate::domain::model::{BookId, Money, Sale, SaleId, SaleRecord};
use crate::domain::port::{RepositoryError, SaleRepository};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

// MySQL関連のインポート
use sqlx::{MySql, Pool, Row};

/// MySQL売上リポジトリ
/// 売上台帳の永続化と、在庫減算＋台帳追記のトランザクションを担当する
#[derive(Clone)]
pub struct MySqlSaleRepository {
    pool: Pool<MySql>,
}

impl MySqlSaleRepository {
    /// 新しいMySQL売上リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleRepository for MySqlSaleRepository {
    async fn append_with_stock_decrement(
        &self,
        sale: &Sale,
    ) -> Result<Option<u32>, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx_error)
            .map_err(RepositoryError::from)?;

        // 条件付き減算: 在庫が数量以上ある場合のみ行が更新される
        // 同一書籍への並行販売はこの1文の中で直列化される
        let result = sqlx::query("UPDATE books SET stock = stock - ? WHERE id = ? AND stock >= ?")
            .bind(sale.quantity())
            .bind(sale.book_id().to_string())
            .bind(sale.quantity())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)
            .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            // 条件不成立。トランザクションを破棄し、何も書き込まない
            tx.rollback()
                .await
                .map_err(map_sqlx_error)
                .map_err(RepositoryError::from)?;
            return Ok(None);
        }

        let row = sqlx::query("SELECT stock FROM books WHERE id = ?")
            .bind(sale.book_id().to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)
            .map_err(RepositoryError::from)?;
        let updated_stock = row.get::<u32, _>("stock");

        sqlx::query(
            r#"
            INSERT INTO sales (id, book_id, quantity, total_amount_cents, occurred_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.id().to_string())
        .bind(sale.book_id().to_string())
        .bind(sale.quantity())
        .bind(sale.total_amount().cents())
        .bind(sale.occurred_at().naive_utc())
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        // 減算と追記は両方成功した場合のみ確定する
        tx.commit()
            .await
            .map_err(map_sqlx_error)
            .map_err(RepositoryError::from)?;

        Ok(Some(updated_stock))
    }

    async fn find_all(&self) -> Result<Vec<SaleRecord>, RepositoryError> {
        // クエリ時点の書籍タイトルを結合する（非正規化はしない）
        // 書籍が削除済みの場合、タイトルはNULLになる
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.book_id, s.quantity, s.total_amount_cents, s.occurred_at, b.title
            FROM sales s
            LEFT JOIN books b ON s.book_id = b.id
            ORDER BY s.occurred_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
        .map_err(RepositoryError::from)?;

        let mut records = Vec::new();
        for row in rows {
            let sale_id = SaleId::from_string(row.get("id")).map_err(|e| {
                RepositoryError::FetchFailed(format!("売上IDの解析に失敗しました: {}", e))
            })?;
            let book_id = BookId::from_string(row.get("book_id")).map_err(|e| {
                RepositoryError::FetchFailed(format!("書籍IDの解析に失敗しました: {}", e))
            })?;
            let occurred_at = DateTime::<Utc>::from_naive_utc_and_offset(
                row.get::<NaiveDateTime, _>("occurred_at"),
                Utc,
            );

            let sale = Sale::reconstruct(
                sale_id,
                book_id,
                row.get::<u32, _>("quantity"),
                Money::from_cents(row.get::<i64, _>("total_amount_cents")),
                occurred_at,
            );
            records.push(SaleRecord {
                sale,
                book_title: row.get::<Option<String>, _>("title"),
            });
        }

        Ok(records)
    }

    fn next_identity(&self) -> SaleId {
        SaleId::new()
    }
}
