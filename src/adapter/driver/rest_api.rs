use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapter::driver::request_dto::{
    CreateBookRequest, RecordSaleRequest, UpdateBookRequest,
};
use crate::adapter::driver::response_dto::{
    AlertResponse, BookListResponse, BookResponse, RecordSaleResponse, SaleRecordResponse,
};
use crate::application::service::{
    CatalogApplicationService, CatalogQueryService, InventoryApplicationService, SalesQueryService,
};
use crate::application::ApplicationError;
use crate::domain::error::DomainError;
use crate::domain::model::BookId;

/// エラーレスポンス
/// `{"message": "..."}` の形で返す
#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

// アプリケーションサービスを含む状態
pub type AppState = AppStateInner;

#[derive(Clone)]
pub struct AppStateInner {
    pub catalog_service: Arc<CatalogApplicationService>,
    pub inventory_service: Arc<InventoryApplicationService>,
    pub catalog_query_service: Arc<CatalogQueryService>,
    pub sales_query_service: Arc<SalesQueryService>,
}

// REST APIルーターを作成
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/books", get(get_books).post(create_book))
        .route(
            "/books/:book_id",
            get(get_book_by_id).put(update_book).delete(delete_book),
        )
        .route("/sales", get(get_sales).post(record_sale))
        .route("/alerts", get(get_alerts))
}

// ヘルスチェックエンドポイント
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "bookstore-inventory-management",
        "version": "0.1.0"
    }))
}

// 書籍一覧取得エンドポイント
// 一覧と同時に、現在状態から導出した低在庫アラートを返す
async fn get_books(
    State(state): State<AppState>,
) -> Result<Json<BookListResponse>, (StatusCode, Json<ApiError>)> {
    let books = state
        .catalog_query_service
        .get_all_books()
        .await
        .map_err(map_application_error)?;
    let alerts = state
        .catalog_query_service
        .get_low_stock_alerts()
        .await
        .map_err(map_application_error)?;

    Ok(Json(BookListResponse {
        books: books.iter().map(BookResponse::from_book).collect(),
        alerts: alerts.iter().map(AlertResponse::from_alert).collect(),
    }))
}

// 書籍詳細取得エンドポイント
async fn get_book_by_id(
    State(state): State<AppState>,
    book_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookResponse>, (StatusCode, Json<ApiError>)> {
    let book_id = parse_book_id(book_id)?;

    match state.catalog_query_service.get_book_by_id(book_id).await {
        Ok(Some(book)) => Ok(Json(BookResponse::from_book(&book))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: "Book not found".to_string(),
            }),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 書籍登録エンドポイント
async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    let draft = request.into_draft().map_err(map_domain_error)?;

    match state.catalog_service.create_book(draft).await {
        Ok(book) => Ok((StatusCode::CREATED, Json(BookResponse::from_book(&book)))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 書籍更新エンドポイント
// ペイロードに存在するフィールドのみを適用する部分更新
async fn update_book(
    State(state): State<AppState>,
    book_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, (StatusCode, Json<ApiError>)> {
    let book_id = parse_book_id(book_id)?;
    let Json(request) = payload.map_err(invalid_body)?;
    let patch = request.into_patch().map_err(map_domain_error)?;

    match state.catalog_service.update_book(book_id, patch).await {
        Ok(book) => Ok(Json(BookResponse::from_book(&book))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 書籍削除エンドポイント
// 削除されたレコードを返す
async fn delete_book(
    State(state): State<AppState>,
    book_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<BookResponse>, (StatusCode, Json<ApiError>)> {
    let book_id = parse_book_id(book_id)?;

    match state.catalog_service.delete_book(book_id).await {
        Ok(book) => Ok(Json(BookResponse::from_book(&book))),
        Err(err) => Err(map_application_error(err)),
    }
}

// 売上記録エンドポイント
async fn record_sale(
    State(state): State<AppState>,
    payload: Result<Json<RecordSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordSaleResponse>), (StatusCode, Json<ApiError>)> {
    let Json(request) = payload.map_err(invalid_body)?;

    let book_id = request
        .book_id
        .ok_or_else(|| map_domain_error(DomainError::MissingField("bookId".to_string())))?;
    let quantity = request
        .quantity
        .ok_or_else(|| map_domain_error(DomainError::MissingField("quantity".to_string())))?;

    // 形式が不正なIDはどの書籍にも一致しないため、存在しない書籍と同じ扱い
    let book_id = match BookId::from_string(&book_id) {
        Ok(id) => id,
        Err(_) => {
            return Err((
                StatusCode::NOT_FOUND,
                Json(ApiError {
                    message: "Book not found".to_string(),
                }),
            ))
        }
    };

    match state.inventory_service.record_sale(book_id, quantity).await {
        Ok(receipt) => Ok((
            StatusCode::CREATED,
            Json(RecordSaleResponse::from_receipt(&receipt)),
        )),
        Err(err) => Err(map_application_error(err)),
    }
}

// 売上一覧取得エンドポイント
// 新しい順に、クエリ時点の書籍タイトルを結合して返す
async fn get_sales(
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleRecordResponse>>, (StatusCode, Json<ApiError>)> {
    let records = state
        .sales_query_service
        .get_all_sales()
        .await
        .map_err(map_application_error)?;

    Ok(Json(
        records.iter().map(SaleRecordResponse::from_record).collect(),
    ))
}

// アラート一覧取得エンドポイント
async fn get_alerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlertResponse>>, (StatusCode, Json<ApiError>)> {
    let alerts = state
        .catalog_query_service
        .get_low_stock_alerts()
        .await
        .map_err(map_application_error)?;

    Ok(Json(alerts.iter().map(AlertResponse::from_alert).collect()))
}

// パスパラメータの書籍IDを解析
// 形式が不正なIDはどの書籍にも一致しないため、存在しない書籍と同じ扱い
fn parse_book_id(
    book_id: Result<Path<Uuid>, PathRejection>,
) -> Result<BookId, (StatusCode, Json<ApiError>)> {
    let Path(uuid) = book_id.map_err(|_| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: "Book not found".to_string(),
            }),
        )
    })?;
    Ok(BookId::from_uuid(uuid))
}

// 不正なリクエストボディを400にマッピング
fn invalid_body(_: JsonRejection) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            message: "Invalid request body".to_string(),
        }),
    )
}

// ドメインエラーを400にマッピング
fn map_domain_error(err: DomainError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}

// アプリケーションエラーをHTTPエラーにマッピング
// ストレージ障害の詳細は呼び出し側に漏らさない
fn map_application_error(err: ApplicationError) -> (StatusCode, Json<ApiError>) {
    match err {
        ApplicationError::DomainError(domain_err) => map_domain_error(domain_err),
        ApplicationError::Conflict(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError { message: msg }),
        ),
        ApplicationError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                message: "Book not found".to_string(),
            }),
        ),
        ApplicationError::RepositoryError(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError {
                message: "Internal storage error".to_string(),
            }),
        ),
    }
}
