//! 采购价格值对象

use fabrica_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 价格下限校验失败时的消息
pub const PRICE_TOO_LOW_MESSAGE: &str = "Material Buy Price cannot be less than 100.";

/// 采购价格
///
/// 业务规则: 价格不得低于 100，恰好 100 是允许的。
/// 构造时即校验，之后持有的值一定满足下限。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BuyPrice(Decimal);

impl BuyPrice {
    pub const MINIMUM: Decimal = Decimal::ONE_HUNDRED;

    pub fn new(value: Decimal) -> AppResult<Self> {
        Self::check(value)?;
        Ok(Self(value))
    }

    /// 只校验，不构造
    ///
    /// API 层在检查必填字段之前先用它拦截过低的价格
    pub fn check(value: Decimal) -> AppResult<()> {
        if value < Self::MINIMUM {
            return Err(AppError::validation(PRICE_TOO_LOW_MESSAGE));
        }
        Ok(())
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for BuyPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        BuyPrice::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for BuyPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_boundary_is_inclusive() {
        assert!(BuyPrice::new(dec("100")).is_ok());
        assert!(BuyPrice::new(dec("100.00")).is_ok());
        assert!(BuyPrice::new(dec("150.5")).is_ok());
    }

    #[test]
    fn test_price_below_minimum() {
        let err = BuyPrice::new(dec("99.99")).unwrap_err();
        assert_eq!(err, AppError::validation(PRICE_TOO_LOW_MESSAGE));

        assert!(BuyPrice::check(Decimal::ZERO).is_err());
        assert!(BuyPrice::check(dec("-5")).is_err());
    }

    #[test]
    fn test_deserialize_rejects_low_price() {
        let price: BuyPrice = serde_json::from_str("250.75").unwrap();
        assert_eq!(price.value(), dec("250.75"));

        assert!(serde_json::from_str::<BuyPrice>("50").is_err());
    }
}
