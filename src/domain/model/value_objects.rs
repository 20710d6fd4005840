use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 書籍の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    /// 新しい一意のBookIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// UUIDから BookId を作成
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 文字列からBookIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 売上の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleId(Uuid);

impl SaleId {
    /// 新しい一意のSaleIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 文字列からSaleIdを作成
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        let uuid = Uuid::parse_str(s)?;
        Ok(Self(uuid))
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for SaleId {
    fn default() -> Self {
        Self::new()
    }
}

/// 金額を表す値オブジェクト
/// 丸め誤差を避けるためセント単位の整数で保持する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// セント単位の金額から作成
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// 小数表記の金額（例: 12.99）から作成
    /// 最も近いセントに丸める
    /// 負の値・非有限値・セント表現がi64に収まらない値は拒否する
    pub fn from_major(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue(format!(
                "金額が数値として不正です: {}",
                value
            )));
        }
        if value < 0.0 {
            return Err(DomainError::InvalidValue(format!(
                "金額は0以上である必要があります: {}",
                value
            )));
        }
        let cents = (value * 100.0).round();
        // キャストの飽和に頼らず、収まらない金額は明示的に拒否する
        if cents >= i64::MAX as f64 {
            return Err(DomainError::InvalidValue(format!(
                "金額が大きすぎます: {}",
                value
            )));
        }
        Ok(Self { cents: cents as i64 })
    }

    /// セント単位の金額を取得
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// 小数表記の金額を取得
    pub fn to_major(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Money {
        Money {
            cents: self.cents + other.cents,
        }
    }

    /// 金額を乗算
    /// i64に収まらない場合は失敗する
    pub fn multiply(&self, factor: u32) -> Result<Money, DomainError> {
        self.cents
            .checked_mul(factor as i64)
            .map(|cents| Money { cents })
            .ok_or_else(|| {
                DomainError::InvalidValue(format!(
                    "金額の乗算がオーバーフローしました: {} × {}",
                    self.cents, factor
                ))
            })
    }
}
