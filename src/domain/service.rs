// ドメインサービス
// 書籍の現在状態から低在庫アラートを導出する
// アラートは永続化されず、問い合わせのたびに再計算される

use crate::domain::model::{Book, LowStockAlert};

/// 書籍が低在庫かどうかを判定する純粋関数
/// 在庫数が閾値以下の場合にtrue（境界値も含む）
pub fn is_low_stock(book: &Book) -> bool {
    book.stock() <= book.threshold()
}

/// 書籍一覧からアラート一覧を導出する
/// 入力の順序を保持する
pub fn collect_alerts(books: &[Book]) -> Vec<LowStockAlert> {
    books.iter().filter_map(LowStockAlert::from_book).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookId, Money};

    fn book(title: &str, stock: u32, threshold: u32) -> Book {
        Book::new(
            BookId::new(),
            title.to_string(),
            "author".to_string(),
            Money::from_cents(1000),
            format!("isbn-{}", title),
            stock,
            Some(threshold),
        )
        .unwrap()
    }

    #[test]
    fn test_is_low_stock_matches_book_state() {
        assert!(is_low_stock(&book("a", 0, 0)));
        assert!(is_low_stock(&book("b", 5, 5)));
        assert!(!is_low_stock(&book("c", 6, 5)));
    }

    #[test]
    fn test_collect_alerts_filters_and_preserves_order() {
        let books = vec![
            book("low1", 2, 5),
            book("ok", 10, 5),
            book("low2", 5, 5),
        ];
        let alerts = collect_alerts(&books);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "low1");
        assert_eq!(alerts[1].title, "low2");
    }

    #[test]
    fn test_collect_alerts_empty_catalog() {
        assert!(collect_alerts(&[]).is_empty());
    }
}
