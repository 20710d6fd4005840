use crate::application::service::SaleReceipt;
use crate::domain::model::{Book, LowStockAlert, Sale, SaleRecord};
use serde::Serialize;

/// 書籍用のレスポンスDTO
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub isbn: String,
    pub stock: u32,
    pub threshold: u32,
}

impl BookResponse {
    /// ドメインオブジェクトからBookResponseを作成
    pub fn from_book(book: &Book) -> Self {
        Self {
            id: book.id().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            price: book.price().to_major(),
            isbn: book.isbn().to_string(),
            stock: book.stock(),
            threshold: book.threshold(),
        }
    }
}

/// 低在庫アラート用のレスポンスDTO
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResponse {
    pub id: String,
    pub title: String,
    pub stock: u32,
    pub threshold: u32,
}

impl AlertResponse {
    /// ドメインオブジェクトからAlertResponseを作成
    pub fn from_alert(alert: &LowStockAlert) -> Self {
        Self {
            id: alert.book_id.to_string(),
            title: alert.title.clone(),
            stock: alert.stock,
            threshold: alert.threshold,
        }
    }
}

/// 書籍一覧用のレスポンスDTO
/// 一覧と同時に、現在状態から導出したアラートを返す
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub books: Vec<BookResponse>,
    pub alerts: Vec<AlertResponse>,
}

/// 売上用のレスポンスDTO
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub id: String,
    pub book_id: String,
    pub quantity: u32,
    pub total_amount: f64,
    pub date: String,
}

impl SaleResponse {
    /// ドメインオブジェクトからSaleResponseを作成
    pub fn from_sale(sale: &Sale) -> Self {
        Self {
            id: sale.id().to_string(),
            book_id: sale.book_id().to_string(),
            quantity: sale.quantity(),
            total_amount: sale.total_amount().to_major(),
            date: sale.occurred_at().to_rfc3339(),
        }
    }
}

/// 売上一覧の1行用のレスポンスDTO
/// クエリ時点の書籍タイトルを含む。書籍が削除済みの場合はnull
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecordResponse {
    pub id: String,
    pub book_id: String,
    pub book_title: Option<String>,
    pub quantity: u32,
    pub total_amount: f64,
    pub date: String,
}

impl SaleRecordResponse {
    /// ドメインオブジェクトからSaleRecordResponseを作成
    pub fn from_record(record: &SaleRecord) -> Self {
        Self {
            id: record.sale.id().to_string(),
            book_id: record.sale.book_id().to_string(),
            book_title: record.book_title.clone(),
            quantity: record.sale.quantity(),
            total_amount: record.sale.total_amount().to_major(),
            date: record.sale.occurred_at().to_rfc3339(),
        }
    }
}

/// 売上記録の結果用のレスポンスDTO
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleResponse {
    pub sale: SaleResponse,
    pub updated_stock: u32,
    pub is_low_stock: bool,
}

impl RecordSaleResponse {
    /// アプリケーション層の結果からRecordSaleResponseを作成
    pub fn from_receipt(receipt: &SaleReceipt) -> Self {
        Self {
            sale: SaleResponse::from_sale(&receipt.sale),
            updated_stock: receipt.updated_stock,
            is_low_stock: receipt.is_low_stock,
        }
    }
}
