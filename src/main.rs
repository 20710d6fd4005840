use bookstore_inventory_management::adapter::driven::{
    ConsoleLogger, MySqlBookRepository, MySqlSaleRepository,
};
use bookstore_inventory_management::adapter::driver::rest_api::{create_router, AppStateInner};
use bookstore_inventory_management::adapter::{DatabaseConfig, DatabaseMigration};
use bookstore_inventory_management::application::service::{
    CatalogApplicationService, CatalogQueryService, InventoryApplicationService, SalesQueryService,
};
use bookstore_inventory_management::domain::model::{BookDraft, Money};
use bookstore_inventory_management::domain::port::BookRepository;

use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 書店在庫管理システム REST API ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // データベース設定を読み込む
    let config = DatabaseConfig::from_env()?;
    println!(
        "データベース設定を読み込みました: {}:{}",
        config.host, config.port
    );

    // 接続プールを作成
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await?;
    println!("データベース接続プールを作成しました");

    // マイグレーションを実行
    let migration = DatabaseMigration::new(pool.clone());
    migration.run().await?;
    println!("データベースマイグレーションを実行しました");

    // MySQLリポジトリを作成
    let book_repository = Arc::new(MySqlBookRepository::new(pool.clone()));
    let sale_repository = Arc::new(MySqlSaleRepository::new(pool.clone()));

    // ロガーを作成
    let logger = Arc::new(ConsoleLogger::new());

    // アプリケーションサービスを作成
    let catalog_service = Arc::new(CatalogApplicationService::new(book_repository.clone()));
    let inventory_service = Arc::new(InventoryApplicationService::new(
        book_repository.clone(),
        sale_repository.clone(),
        logger,
    ));
    let catalog_query_service = Arc::new(CatalogQueryService::new(book_repository.clone()));
    let sales_query_service = Arc::new(SalesQueryService::new(sale_repository));

    // カタログが空ならサンプルデータを投入
    seed_sample_books(book_repository.as_ref(), &catalog_service).await?;

    // アプリケーション状態を作成
    let app_state = AppStateInner {
        catalog_service,
        inventory_service,
        catalog_query_service,
        sales_query_service,
    };

    // REST APIルーターを作成
    let app = create_router()
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // サーバーを起動
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
    println!("REST APIサーバーが起動しました: http://localhost:3001");
    println!("ヘルスチェック: GET http://localhost:3001/health");
    println!("API仕様:");
    println!("  GET    /books - 書籍一覧とアラート取得");
    println!("  GET    /books/:id - 書籍詳細取得");
    println!("  POST   /books - 書籍登録");
    println!("  PUT    /books/:id - 書籍更新（部分更新）");
    println!("  DELETE /books/:id - 書籍削除");
    println!("  POST   /sales - 売上記録");
    println!("  GET    /sales - 売上一覧取得");
    println!("  GET    /alerts - 低在庫アラート取得");
    println!();

    axum::serve(listener, app).await?;

    Ok(())
}

/// カタログが空の場合にサンプルの書籍を投入する
async fn seed_sample_books(
    book_repository: &MySqlBookRepository,
    catalog_service: &CatalogApplicationService,
) -> Result<(), Box<dyn std::error::Error>> {
    if !book_repository.find_all().await?.is_empty() {
        return Ok(());
    }

    let samples = [
        ("The Great Gatsby", "F. Scott Fitzgerald", 12.99, "9780743273565", 15),
        ("To Kill a Mockingbird", "Harper Lee", 14.99, "9780061120084", 8),
        ("1984", "George Orwell", 11.99, "9780451524935", 3),
    ];

    for (title, author, price, isbn, stock) in samples {
        catalog_service
            .create_book(BookDraft {
                title: Some(title.to_string()),
                author: Some(author.to_string()),
                price: Some(Money::from_major(price)?),
                isbn: Some(isbn.to_string()),
                stock: Some(stock),
                threshold: None,
            })
            .await?;
    }
    println!("サンプルデータを投入しました");

    Ok(())
}
