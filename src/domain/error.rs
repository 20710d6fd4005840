/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 必須フィールドの欠落（例: タイトルなしで書籍を登録しようとした）
    MissingField(String),
    /// 無効な値（例: 空のタイトル、負の価格）
    InvalidValue(String),
    /// 無効な数量（0以下の販売数量）
    InvalidQuantity,
    /// 更新対象フィールドが1つもない部分更新
    EmptyUpdate,
    /// 在庫不足
    InsufficientStock,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::MissingField(field) => write!(f, "Missing required field: {}", field),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            DomainError::InvalidQuantity => write!(f, "Invalid quantity"),
            DomainError::EmptyUpdate => write!(f, "No fields to update"),
            DomainError::InsufficientStock => write!(f, "Insufficient stock"),
        }
    }
}

impl std::error::Error for DomainError {}
