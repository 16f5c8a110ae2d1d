//! 物料仓储接口

use async_trait::async_trait;
use fabrica_errors::AppResult;

use crate::domain::entities::{Material, MaterialFilter, MaterialPatch, NewMaterial};
use crate::domain::value_objects::{MaterialCode, MaterialId};

/// 物料仓储接口
///
/// 编码唯一性由存储层最终保证，违反时返回 `AppError::Conflict`
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    // ========== CRUD ==========

    /// 根据 ID 查找物料
    async fn find_by_id(&self, id: MaterialId) -> AppResult<Option<Material>>;

    /// 保存新物料，返回带 ID 的实体
    async fn save(&self, material: &NewMaterial) -> AppResult<Material>;

    /// 原子地写入补丁中给出的字段，返回更新后的物料
    ///
    /// 只改动补丁里的列，并发的不同字段更新互不覆盖。记录不存在时返回 `None`
    async fn update(&self, id: MaterialId, patch: &MaterialPatch) -> AppResult<Option<Material>>;

    /// 删除物料，返回是否确实删除了记录
    async fn delete(&self, id: MaterialId) -> AppResult<bool>;

    // ========== 查询 ==========

    /// 按条件查询，结果按 ID 升序
    async fn search(&self, filter: &MaterialFilter) -> AppResult<Vec<Material>>;

    /// 检查编码是否已被占用（`exclude` 为更新时的自身 ID）
    async fn exists_by_code(
        &self,
        code: &MaterialCode,
        exclude: Option<MaterialId>,
    ) -> AppResult<bool>;

    /// 物料总数
    async fn count(&self) -> AppResult<u64>;
}
