use crate::application::ApplicationError;
use crate::domain::model::SaleRecord;
use crate::domain::port::SaleRepository;
use std::sync::Arc;

/// 売上クエリサービス
/// 読み取り専用の売上操作を提供する
pub struct SalesQueryService {
    sale_repository: Arc<dyn SaleRepository>,
}

impl SalesQueryService {
    /// 新しい売上クエリサービスを作成
    ///
    /// # Arguments
    /// * `sale_repository` - 売上リポジトリ
    pub fn new(sale_repository: Arc<dyn SaleRepository>) -> Self {
        Self { sale_repository }
    }

    /// すべての売上を取得
    /// 販売日時の降順で並べ、クエリ時点の書籍タイトルを結合して返す
    /// 参照先の書籍が削除済みの場合、タイトルはNoneになる
    pub async fn get_all_sales(&self) -> Result<Vec<SaleRecord>, ApplicationError> {
        self.sale_repository
            .find_all()
            .await
            .map_err(ApplicationError::from)
    }
}
