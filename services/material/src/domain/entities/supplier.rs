//! 供应商（只读引用）

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SupplierId;

/// 供应商
///
/// 由合作伙伴数据维护，物料服务只读取它
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub supplier_rank: i32,
}

impl Supplier {
    pub fn new(id: SupplierId, name: impl Into<String>, supplier_rank: i32) -> Self {
        Self {
            id,
            name: name.into(),
            supplier_rank,
        }
    }

    /// 是否可作为物料的供货方
    pub fn is_goods_supplier(&self) -> bool {
        self.supplier_rank > 0
    }
}
