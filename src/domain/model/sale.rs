use crate::domain::error::DomainError;
use crate::domain::model::{BookId, Money, SaleId};
use chrono::{DateTime, Utc};

/// 売上レコード
/// 1回の在庫払い出しを表す不変のレコード
/// 作成後に更新・削除されることはない
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    id: SaleId,
    book_id: BookId,
    quantity: u32,
    total_amount: Money,
    occurred_at: DateTime<Utc>,
}

impl Sale {
    /// 新しい売上を作成
    /// 合計金額は販売時点の単価 × 数量で確定し、以後再計算されない
    ///
    /// # Arguments
    /// * `id` - 売上ID
    /// * `book_id` - 販売された書籍のID
    /// * `quantity` - 販売数量（1以上）
    /// * `unit_price` - 販売時点の単価
    pub fn new(
        id: SaleId,
        book_id: BookId,
        quantity: u32,
        unit_price: Money,
    ) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity);
        }
        Ok(Self {
            id,
            book_id,
            quantity,
            total_amount: unit_price.multiply(quantity)?,
            occurred_at: Utc::now(),
        })
    }

    /// データベースから取得したデータで売上を再構築
    /// リポジトリでの使用を想定
    pub fn reconstruct(
        id: SaleId,
        book_id: BookId,
        quantity: u32,
        total_amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            book_id,
            quantity,
            total_amount,
            occurred_at,
        }
    }

    /// 売上IDを取得
    pub fn id(&self) -> SaleId {
        self.id
    }

    /// 書籍IDを取得
    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    /// 数量を取得
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// 合計金額を取得
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// 販売日時を取得
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// 売上一覧の1行
/// クエリ時点で書籍タイトルを結合した読み取りビュー
/// 参照先の書籍が削除済みの場合、タイトルはNoneになる
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sale: Sale,
    pub book_title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_creation_computes_total() {
        let book_id = BookId::new();
        let unit_price = Money::from_major(12.99).unwrap();
        let sale = Sale::new(SaleId::new(), book_id, 12, unit_price).unwrap();

        assert_eq!(sale.book_id(), book_id);
        assert_eq!(sale.quantity(), 12);
        assert_eq!(sale.total_amount(), Money::from_cents(15588));
    }

    #[test]
    fn test_sale_zero_quantity_fails() {
        let result = Sale::new(SaleId::new(), BookId::new(), 0, Money::from_cents(1000));
        assert_eq!(result.unwrap_err(), DomainError::InvalidQuantity);
    }

    #[test]
    fn test_sale_total_overflow_fails() {
        // 合計がi64に収まらない売上は作成できない（負の合計にもならない）
        let result = Sale::new(SaleId::new(), BookId::new(), 12, Money::from_cents(i64::MAX));
        assert!(matches!(result.unwrap_err(), DomainError::InvalidValue(_)));
    }

    #[test]
    fn test_sale_single_quantity() {
        let sale = Sale::new(
            SaleId::new(),
            BookId::new(),
            1,
            Money::from_major(14.99).unwrap(),
        )
        .unwrap();
        assert_eq!(sale.total_amount(), Money::from_cents(1499));
    }
}
