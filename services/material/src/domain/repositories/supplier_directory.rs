//! 供应商目录接口

use async_trait::async_trait;
use fabrica_errors::AppResult;

use crate::domain::entities::Supplier;
use crate::domain::value_objects::SupplierId;

/// 供应商目录
#[async_trait]
pub trait SupplierDirectory: Send + Sync {
    async fn find_by_id(&self, id: SupplierId) -> AppResult<Option<Supplier>>;

    /// 批量查找，不存在的 ID 直接忽略
    async fn find_by_ids(&self, ids: &[SupplierId]) -> AppResult<Vec<Supplier>>;
}
