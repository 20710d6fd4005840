use crate::domain::error::DomainError;
use crate::domain::port::RepositoryError;

/// アプリケーション層のエラー型
/// ドメインエラーとリポジトリエラーをラップする
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反、呼び出し側で修正可能）
    DomainError(DomainError),
    /// リポジトリエラー（永続化の失敗、呼び出し側には不透明）
    RepositoryError(RepositoryError),
    /// エンティティが見つからない
    NotFound(String),
    /// 一意性違反（ISBNの重複）
    Conflict(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::DomainError(err) => write!(f, "Domain error: {}", err),
            ApplicationError::RepositoryError(err) => write!(f, "Repository error: {}", err),
            ApplicationError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApplicationError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::DomainError(err)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // 一意インデックス違反はビジネス上の競合として扱う
            RepositoryError::UniqueViolation(msg) => ApplicationError::Conflict(msg),
            other => ApplicationError::RepositoryError(other),
        }
    }
}
