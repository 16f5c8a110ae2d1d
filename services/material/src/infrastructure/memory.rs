//! 内存仓储实现
//!
//! 用于测试和本地演示，行为与 PostgreSQL 实现保持一致：
//! ID 单调递增、编码唯一、列表按 ID 升序。

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use fabrica_common::types::AuditInfo;
use fabrica_errors::{AppError, AppResult};
use tokio::sync::RwLock;

use crate::domain::entities::{Material, MaterialFilter, MaterialPatch, NewMaterial, Supplier};
use crate::domain::repositories::{MaterialRepository, SupplierDirectory};
use crate::domain::value_objects::{CODE_NOT_UNIQUE_MESSAGE, MaterialCode, MaterialId, SupplierId};

#[derive(Default)]
struct MaterialTable {
    last_id: i64,
    rows: BTreeMap<MaterialId, Material>,
}

impl MaterialTable {
    fn code_taken(&self, code: &MaterialCode, exclude: Option<MaterialId>) -> bool {
        self.rows
            .values()
            .any(|m| m.code() == code && Some(m.id()) != exclude)
    }
}

/// 内存物料仓储
#[derive(Default)]
pub struct InMemoryMaterialRepository {
    table: RwLock<MaterialTable>,
}

impl InMemoryMaterialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn find_by_id(&self, id: MaterialId) -> AppResult<Option<Material>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, material: &NewMaterial) -> AppResult<Material> {
        let mut table = self.table.write().await;
        if table.code_taken(&material.code, None) {
            return Err(AppError::conflict(CODE_NOT_UNIQUE_MESSAGE));
        }

        table.last_id += 1;
        let id = MaterialId(table.last_id);
        let saved = material.clone().into_material(id, AuditInfo::new());
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: MaterialId, patch: &MaterialPatch) -> AppResult<Option<Material>> {
        let mut table = self.table.write().await;
        if let Some(code) = &patch.code {
            if table.code_taken(code, Some(id)) {
                return Err(AppError::conflict(CODE_NOT_UNIQUE_MESSAGE));
            }
        }

        Ok(table.rows.get_mut(&id).map(|existing| {
            existing.apply_patch(patch);
            existing.clone()
        }))
    }

    async fn delete(&self, id: MaterialId) -> AppResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn search(&self, filter: &MaterialFilter) -> AppResult<Vec<Material>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn exists_by_code(
        &self,
        code: &MaterialCode,
        exclude: Option<MaterialId>,
    ) -> AppResult<bool> {
        Ok(self.table.read().await.code_taken(code, exclude))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.read().await.rows.len() as u64)
    }
}

/// 内存供应商目录
#[derive(Default)]
pub struct InMemorySupplierDirectory {
    suppliers: RwLock<HashMap<SupplierId, Supplier>>,
}

impl InMemorySupplierDirectory {
    pub fn with_suppliers(suppliers: Vec<Supplier>) -> Self {
        Self {
            suppliers: RwLock::new(suppliers.into_iter().map(|s| (s.id, s)).collect()),
        }
    }

    pub async fn insert(&self, supplier: Supplier) {
        self.suppliers.write().await.insert(supplier.id, supplier);
    }
}

#[async_trait]
impl SupplierDirectory for InMemorySupplierDirectory {
    async fn find_by_id(&self, id: SupplierId) -> AppResult<Option<Supplier>> {
        Ok(self.suppliers.read().await.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[SupplierId]) -> AppResult<Vec<Supplier>> {
        let suppliers = self.suppliers.read().await;
        Ok(ids.iter().filter_map(|id| suppliers.get(id).cloned()).collect())
    }
}
