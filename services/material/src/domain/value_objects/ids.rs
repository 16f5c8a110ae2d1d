//! 强类型 ID 定义
//!
//! 主键由数据库序列分配，新建物料在持久化之前没有 ID。

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 物料 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct MaterialId(pub i64);

impl MaterialId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 供应商 ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct SupplierId(pub i64);

impl SupplierId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_display_as_plain_numbers() {
        assert_eq!(MaterialId(42).to_string(), "42");
        assert_eq!(SupplierId::from(7).to_string(), "7");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_value(MaterialId(3)).unwrap(), serde_json::json!(3));
        let id: SupplierId = serde_json::from_str("12").unwrap();
        assert_eq!(id.value(), 12);
    }
}
