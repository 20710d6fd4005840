use bookstore_inventory_management::adapter::driven::{
    InMemoryBookRepository, InMemorySaleRepository, InMemoryStore,
};
use bookstore_inventory_management::adapter::driver::rest_api::{create_router, AppStateInner};
use bookstore_inventory_management::application::service::{
    CatalogApplicationService, CatalogQueryService, InventoryApplicationService, SalesQueryService,
};
use bookstore_inventory_management::domain::port::Logger;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

// テストではログ出力を捨てる
struct NullLogger;

impl Logger for NullLogger {
    fn info(&self, _component: &str, _message: &str) {}
    fn warn(&self, _component: &str, _message: &str) {}
    fn error(&self, _component: &str, _message: &str) {}
}

// インメモリリポジトリで構成したテストサーバーを作成
fn test_server() -> TestServer {
    let store = Arc::new(InMemoryStore::new());
    let book_repository = Arc::new(InMemoryBookRepository::new(store.clone()));
    let sale_repository = Arc::new(InMemorySaleRepository::new(store));

    let state = AppStateInner {
        catalog_service: Arc::new(CatalogApplicationService::new(book_repository.clone())),
        inventory_service: Arc::new(InventoryApplicationService::new(
            book_repository.clone(),
            sale_repository.clone(),
            Arc::new(NullLogger),
        )),
        catalog_query_service: Arc::new(CatalogQueryService::new(book_repository)),
        sales_query_service: Arc::new(SalesQueryService::new(sale_repository)),
    };

    let app = create_router().with_state(state);
    TestServer::new(app).unwrap()
}

fn gatsby_payload() -> Value {
    json!({
        "title": "The Great Gatsby",
        "author": "F. Scott Fitzgerald",
        "price": 12.99,
        "isbn": "9780743273565",
        "stock": 15,
        "threshold": 5
    })
}

async fn create_book(server: &TestServer, payload: &Value) -> Value {
    let response = server.post("/books").json(payload).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_list_books() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    assert_eq!(created["title"], "The Great Gatsby");
    assert_eq!(created["price"], 12.99);
    assert_eq!(created["stock"], 15);
    assert_eq!(created["threshold"], 5);
    assert!(created["id"].is_string());

    let response = server.get("/books").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
    // 在庫が閾値を上回っている間はアラートなし
    assert_eq!(body["alerts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_books_are_listed_in_title_order() {
    let server = test_server();

    for (title, isbn) in [("Zorba", "isbn-z"), ("Anna Karenina", "isbn-a"), ("Moby Dick", "isbn-m")] {
        let mut payload = gatsby_payload();
        payload["title"] = json!(title);
        payload["isbn"] = json!(isbn);
        create_book(&server, &payload).await;
    }

    let body = server.get("/books").await.json::<Value>();
    let titles: Vec<&str> = body["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Anna Karenina", "Moby Dick", "Zorba"]);
}

#[tokio::test]
async fn test_create_book_missing_field() {
    let server = test_server();

    let response = server
        .post("/books")
        .json(&json!({
            "title": "The Great Gatsby",
            "price": 12.99,
            "isbn": "9780743273565",
            "stock": 15
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Missing required field: author");
}

#[tokio::test]
async fn test_create_book_duplicate_isbn() {
    let server = test_server();

    create_book(&server, &gatsby_payload()).await;

    let mut duplicate = gatsby_payload();
    duplicate["title"] = json!("Another Edition");
    let response = server.post("/books").json(&duplicate).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "A book with this ISBN already exists");
}

#[tokio::test]
async fn test_create_book_rejects_unrepresentable_price() {
    // セント表現がi64に収まらない価格は登録を拒否する
    // 後続の売上記録で合計が壊れることもない
    let server = test_server();

    let mut payload = gatsby_payload();
    payload["price"] = json!(1.0e300);
    let response = server.post("/books").json(&payload).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid value"));
}

#[tokio::test]
async fn test_create_book_accepts_numeric_strings() {
    // フォーム由来のクライアントは数値を文字列で送ることがある
    let server = test_server();

    let created = create_book(
        &server,
        &json!({
            "title": "1984",
            "author": "George Orwell",
            "price": "11.99",
            "isbn": "9780451524935",
            "stock": "3"
        }),
    )
    .await;

    assert_eq!(created["price"], 11.99);
    assert_eq!(created["stock"], 3);
    // 閾値未指定はデフォルトの5
    assert_eq!(created["threshold"], 5);
}

#[tokio::test]
async fn test_get_book_by_id() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/books/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isbn"], "9780743273565");
}

#[tokio::test]
async fn test_get_unknown_book_returns_not_found() {
    let server = test_server();

    let response = server
        .get("/books/00000000-0000-0000-0000-000000000000")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");
}

#[tokio::test]
async fn test_get_book_malformed_id_treated_as_missing() {
    // 形式が不正なIDはどの書籍にも一致せず、売上記録と同じ404になる
    let server = test_server();

    let response = server.get("/books/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");

    let response = server.put("/books/not-a-uuid").json(&json!({ "stock": 1 })).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");

    let response = server.delete("/books/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");
}

#[tokio::test]
async fn test_partial_update_applies_zero_stock() {
    // stock=0は「未指定」ではなく明示的な更新として扱う
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/books/{}", id))
        .json(&json!({ "stock": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let updated = response.json::<Value>();
    assert_eq!(updated["stock"], 0);
    // 他のフィールドは変わらない
    assert_eq!(updated["title"], "The Great Gatsby");
    assert_eq!(updated["price"], 12.99);

    // 在庫0は閾値以下なのでアラート対象
    let body = server.get("/books").await.json::<Value>();
    assert_eq!(body["alerts"].as_array().unwrap().len(), 1);
    assert_eq!(body["alerts"][0]["stock"], 0);
}

#[tokio::test]
async fn test_update_with_empty_body_fails() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.put(&format!("/books/{}", id)).json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "No fields to update");
}

#[tokio::test]
async fn test_delete_book() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server.delete(&format!("/books/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["id"], *id);

    // 再削除はNotFound
    let response = server.delete(&format!("/books/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_record_sale_flow() {
    // stock:15, threshold:5 の書籍を12冊販売すると
    // 在庫3・低在庫・合計155.88になる
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .post("/sales")
        .json(&json!({ "bookId": id, "quantity": 12 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["updatedStock"], 3);
    assert_eq!(body["isLowStock"], true);
    assert_eq!(body["sale"]["bookId"], *id);
    assert_eq!(body["sale"]["quantity"], 12);
    assert_eq!(body["sale"]["totalAmount"], 155.88);
    assert!(body["sale"]["date"].is_string());

    // 続く5冊の販売は在庫不足で失敗し、在庫は3のまま
    let response = server
        .post("/sales")
        .json(&json!({ "bookId": id, "quantity": 5 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Insufficient stock");

    let book = server.get(&format!("/books/{}", id)).await.json::<Value>();
    assert_eq!(book["stock"], 3);

    // アラートにも反映される
    let alerts = server.get("/alerts").await.json::<Value>();
    assert_eq!(alerts.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["stock"], 3);
    assert_eq!(alerts[0]["threshold"], 5);
}

#[tokio::test]
async fn test_record_sale_unknown_book() {
    let server = test_server();

    let response = server
        .post("/sales")
        .json(&json!({
            "bookId": "00000000-0000-0000-0000-000000000000",
            "quantity": 1
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");
}

#[tokio::test]
async fn test_record_sale_malformed_book_id() {
    // 形式が不正なIDはどの書籍にも一致しない
    let server = test_server();

    let response = server
        .post("/sales")
        .json(&json!({ "bookId": "not-a-uuid", "quantity": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Book not found");
}

#[tokio::test]
async fn test_record_sale_zero_quantity() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .post("/sales")
        .json(&json!({ "bookId": id, "quantity": 0 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Invalid quantity");
}

#[tokio::test]
async fn test_record_sale_missing_quantity() {
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .post("/sales")
        .json(&json!({ "bookId": id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing required field: quantity"
    );
}

#[tokio::test]
async fn test_sales_listed_newest_first_with_title() {
    let server = test_server();

    let gatsby = create_book(&server, &gatsby_payload()).await;
    let gatsby_id = gatsby["id"].as_str().unwrap();

    let mut orwell = gatsby_payload();
    orwell["title"] = json!("1984");
    orwell["isbn"] = json!("9780451524935");
    let orwell = create_book(&server, &orwell).await;
    let orwell_id = orwell["id"].as_str().unwrap();

    for (id, quantity) in [(gatsby_id, 1), (orwell_id, 2)] {
        let response = server
            .post("/sales")
            .json(&json!({ "bookId": id, "quantity": quantity }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let sales = server.get("/sales").await.json::<Value>();
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 2);
    // 新しい順
    assert_eq!(sales[0]["bookTitle"], "1984");
    assert_eq!(sales[1]["bookTitle"], "The Great Gatsby");
}

#[tokio::test]
async fn test_sales_survive_book_deletion() {
    // 書籍を削除しても過去の売上は残り、タイトルはnullになる
    let server = test_server();

    let created = create_book(&server, &gatsby_payload()).await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .post("/sales")
        .json(&json!({ "bookId": id, "quantity": 2 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server.delete(&format!("/books/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let sales = server.get("/sales").await.json::<Value>();
    let sales = sales.as_array().unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["bookId"], *id);
    assert!(sales[0]["bookTitle"].is_null());
}

#[tokio::test]
async fn test_alerts_include_boundary_stock() {
    // 在庫が閾値と等しい場合もアラート対象
    let server = test_server();

    let mut payload = gatsby_payload();
    payload["stock"] = json!(5);
    create_book(&server, &payload).await;

    let alerts = server.get("/alerts").await.json::<Value>();
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["stock"], 5);
    assert_eq!(alerts[0]["threshold"], 5);
    assert_eq!(alerts[0]["title"], "The Great Gatsby");
}
