//! 数据库行映射结构

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// 物料数据库行
#[derive(Debug, FromRow)]
pub struct MaterialRow {
    pub id: i64,
    pub material_code: String,
    pub material_name: String,
    pub material_type: String,
    pub material_buy_price: Decimal,
    pub supplier_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 供应商数据库行
#[derive(Debug, FromRow)]
pub struct SupplierRow {
    pub id: i64,
    pub name: String,
    pub supplier_rank: i32,
}
