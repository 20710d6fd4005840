use crate::domain::model::{Book, BookId, Sale, SaleId, SaleRecord};
use crate::domain::port::{BookRepository, RepositoryError, SaleRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// インメモリストア
/// 書籍と売上を1つのロックの下に保持する
/// 在庫減算と台帳追記は同じロック内で行われるため、
/// MySQL実装のトランザクションと同じアトミック性が得られる
/// テストおよび永続化なしでの起動に使用する
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

struct StoreState {
    books: HashMap<BookId, Book>,
    sales: Vec<Sale>,
}

impl InMemoryStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                books: HashMap::new(),
                sales: Vec::new(),
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// インメモリ書籍リポジトリ
#[derive(Clone)]
pub struct InMemoryBookRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryBookRepository {
    /// ストアを共有する書籍リポジトリを作成
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn insert(&self, book: &Book) -> Result<(), RepositoryError> {
        let mut state = self.store.state.lock().unwrap();
        // 一意インデックス相当のISBN重複チェック
        if state.books.values().any(|b| b.isbn() == book.isbn()) {
            return Err(RepositoryError::UniqueViolation(
                "A book with this ISBN already exists".to_string(),
            ));
        }
        state.books.insert(book.id(), book.clone());
        Ok(())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>, RepositoryError> {
        let state = self.store.state.lock().unwrap();
        Ok(state.books.get(&book_id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let state = self.store.state.lock().unwrap();
        let mut books: Vec<Book> = state.books.values().cloned().collect();
        // タイトルの昇順。同名の場合はIDで安定させる
        books.sort_by(|a, b| {
            a.title()
                .cmp(b.title())
                .then_with(|| a.id().to_string().cmp(&b.id().to_string()))
        });
        Ok(books)
    }

    async fn update(&self, book: &Book) -> Result<(), RepositoryError> {
        let mut state = self.store.state.lock().unwrap();
        if state
            .books
            .values()
            .any(|b| b.id() != book.id() && b.isbn() == book.isbn())
        {
            return Err(RepositoryError::UniqueViolation(
                "A book with this ISBN already exists".to_string(),
            ));
        }
        state.books.insert(book.id(), book.clone());
        Ok(())
    }

    async fn delete(&self, book_id: BookId) -> Result<bool, RepositoryError> {
        let mut state = self.store.state.lock().unwrap();
        Ok(state.books.remove(&book_id).is_some())
    }

    fn next_identity(&self) -> BookId {
        BookId::new()
    }
}

/// インメモリ売上リポジトリ
#[derive(Clone)]
pub struct InMemorySaleRepository {
    store: Arc<InMemoryStore>,
}

impl InMemorySaleRepository {
    /// ストアを共有する売上リポジトリを作成
    /// 書籍リポジトリと同じ`InMemoryStore`を渡すこと
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SaleRepository for InMemorySaleRepository {
    async fn append_with_stock_decrement(
        &self,
        sale: &Sale,
    ) -> Result<Option<u32>, RepositoryError> {
        // 減算と追記を同じロックの下で行う
        let mut state = self.store.state.lock().unwrap();
        let book = match state.books.get_mut(&sale.book_id()) {
            Some(book) => book,
            None => return Ok(None),
        };
        if book.decrement_stock(sale.quantity()).is_err() {
            return Ok(None);
        }
        let updated_stock = book.stock();
        state.sales.push(sale.clone());
        Ok(Some(updated_stock))
    }

    async fn find_all(&self) -> Result<Vec<SaleRecord>, RepositoryError> {
        let state = self.store.state.lock().unwrap();
        // 追記順の逆順から安定ソートすることで、
        // 同時刻の売上も新しい追記が先に並ぶ
        let mut sales: Vec<Sale> = state.sales.iter().rev().cloned().collect();
        sales.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));

        Ok(sales
            .into_iter()
            .map(|sale| {
                let book_title = state
                    .books
                    .get(&sale.book_id())
                    .map(|b| b.title().to_string());
                SaleRecord { sale, book_title }
            })
            .collect())
    }

    fn next_identity(&self) -> SaleId {
        SaleId::new()
    }
}
