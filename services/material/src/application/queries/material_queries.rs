//! Material queries

use crate::domain::entities::{Material, MaterialFilter};
use crate::domain::value_objects::MaterialId;

/// 获取物料查询
#[derive(Debug, Clone)]
pub struct GetMaterialQuery {
    pub material_id: MaterialId,
}

/// 列表物料查询
#[derive(Debug, Clone, Default)]
pub struct ListMaterialsQuery {
    pub filter: MaterialFilter,
}

/// 物料及其供应商名称
#[derive(Debug, Clone)]
pub struct MaterialDetails {
    pub material: Material,
    /// 供应商记录缺失时为 `None`
    pub supplier_name: Option<String>,
}
