use crate::domain::error::DomainError;
use crate::domain::model::{BookDraft, BookPatch, Money};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// 数値または数値文字列
/// 緩く型付けされたクライアント入力を書き込み境界で数値型に正規化する
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientNumber {
    Number(f64),
    Text(String),
}

/// JSON数値・数値文字列のどちらも受け付けるf64デシリアライザ
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LenientNumber::Number(n)) => Ok(Some(n)),
        Some(LenientNumber::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid numeric value: {}", s))),
    }
}

/// JSON数値・数値文字列のどちらも受け付けるu32デシリアライザ
/// 負数や小数は拒否する
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LenientNumber::Number(n)) => {
            if n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n) {
                Ok(Some(n as u32))
            } else {
                Err(de::Error::custom(format!(
                    "invalid non-negative integer: {}",
                    n
                )))
            }
        }
        Some(LenientNumber::Text(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid non-negative integer: {}", s))),
    }
}

/// 書籍登録用のリクエストDTO
/// 必須フィールドの検証はアプリケーション層で行うため、すべてOption
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

impl CreateBookRequest {
    /// 登録ドラフトへ変換
    /// 価格の負値などはここで拒否される
    pub fn into_draft(self) -> Result<BookDraft, DomainError> {
        Ok(BookDraft {
            title: self.title,
            author: self.author,
            price: self.price.map(Money::from_major).transpose()?,
            isbn: self.isbn,
            stock: self.stock,
            threshold: self.threshold,
        })
    }
}

/// 書籍更新用のリクエストDTO
/// ペイロードに存在するフィールドのみが適用される
/// 0などの値も「指定あり」として扱う
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

impl UpdateBookRequest {
    /// 部分更新パッチへ変換
    pub fn into_patch(self) -> Result<BookPatch, DomainError> {
        Ok(BookPatch {
            title: self.title,
            author: self.author,
            price: self.price.map(Money::from_major).transpose()?,
            isbn: self.isbn,
            stock: self.stock,
            threshold: self.threshold,
        })
    }
}

/// 売上記録用のリクエストDTO
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleRequest {
    pub book_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}
