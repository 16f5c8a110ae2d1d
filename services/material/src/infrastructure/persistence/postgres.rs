//! PostgreSQL repository implementation

use async_trait::async_trait;
use fabrica_adapter_postgres::is_unique_violation;
use fabrica_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::entities::{Material, MaterialFilter, MaterialPatch, NewMaterial, Supplier};
use crate::domain::repositories::{MaterialRepository, SupplierDirectory};
use crate::domain::value_objects::{CODE_NOT_UNIQUE_MESSAGE, MaterialCode, MaterialId, SupplierId};

use super::converters::{material_from_row, supplier_from_row};
use super::rows::{MaterialRow, SupplierRow};

/// 写入失败时区分唯一约束冲突和其他数据库错误
fn write_error(action: &str, e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::conflict(CODE_NOT_UNIQUE_MESSAGE)
    } else {
        AppError::database(format!("{}物料失败: {}", action, e))
    }
}

// ============================================================================
// MaterialRepository 实现
// ============================================================================

pub struct PostgresMaterialRepository {
    pool: PgPool,
}

impl PostgresMaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for PostgresMaterialRepository {
    async fn find_by_id(&self, id: MaterialId) -> AppResult<Option<Material>> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, material_code, material_name, material_type, material_buy_price,
                   supplier_id, created_at, updated_at
            FROM materials
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询物料失败: {}", e)))?;

        row.map(material_from_row).transpose()
    }

    async fn save(&self, material: &NewMaterial) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO materials (
                material_code, material_name, material_type, material_buy_price, supplier_id
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id, material_code, material_name, material_type, material_buy_price,
                      supplier_id, created_at, updated_at
            "#,
        )
        .bind(material.code.as_str())
        .bind(&material.name)
        .bind(material.material_type.as_str())
        .bind(material.buy_price.value())
        .bind(material.supplier_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error("保存", e))?;

        material_from_row(row)
    }

    async fn update(&self, id: MaterialId, patch: &MaterialPatch) -> AppResult<Option<Material>> {
        // 单条语句内逐列合并，未给出的列沿用当前行的值
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            UPDATE materials SET
                material_code = COALESCE($2, material_code),
                material_name = COALESCE($3, material_name),
                material_type = COALESCE($4, material_type),
                material_buy_price = COALESCE($5, material_buy_price),
                supplier_id = COALESCE($6, supplier_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, material_code, material_name, material_type, material_buy_price,
                      supplier_id, created_at, updated_at
            "#,
        )
        .bind(id.0)
        .bind(patch.code.as_ref().map(|c| c.as_str()))
        .bind(patch.name.as_deref())
        .bind(patch.material_type.map(|t| t.as_str()))
        .bind(patch.buy_price.map(|p| p.value()))
        .bind(patch.supplier_id.map(|s| s.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error("更新", e))?;

        row.map(material_from_row).transpose()
    }

    async fn delete(&self, id: MaterialId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM materials WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("删除物料失败: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, filter: &MaterialFilter) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT id, material_code, material_name, material_type, material_buy_price,
                   supplier_id, created_at, updated_at
            FROM materials
            WHERE ($1::text IS NULL OR material_type = $1)
            ORDER BY id
            "#,
        )
        .bind(filter.material_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询物料列表失败: {}", e)))?;

        rows.into_iter().map(material_from_row).collect()
    }

    async fn exists_by_code(
        &self,
        code: &MaterialCode,
        exclude: Option<MaterialId>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM materials
                WHERE material_code = $1 AND ($2::bigint IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(code.as_str())
        .bind(exclude.map(|id| id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("检查物料编码失败: {}", e)))?;

        Ok(exists)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM materials")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("统计物料失败: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}

// ============================================================================
// SupplierDirectory 实现
// ============================================================================

pub struct PostgresSupplierDirectory {
    pool: PgPool,
}

impl PostgresSupplierDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplierDirectory for PostgresSupplierDirectory {
    async fn find_by_id(&self, id: SupplierId) -> AppResult<Option<Supplier>> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, supplier_rank FROM suppliers WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询供应商失败: {}", e)))?;

        Ok(row.map(supplier_from_row))
    }

    async fn find_by_ids(&self, ids: &[SupplierId]) -> AppResult<Vec<Supplier>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, supplier_rank FROM suppliers WHERE id = ANY($1) ORDER BY id",
        )
        .bind(raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("批量查询供应商失败: {}", e)))?;

        Ok(rows.into_iter().map(supplier_from_row).collect())
    }
}
