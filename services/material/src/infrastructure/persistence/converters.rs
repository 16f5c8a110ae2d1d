//! 数据库行到领域对象的转换

use fabrica_common::types::AuditInfo;
use fabrica_errors::{AppError, AppResult};

use crate::domain::entities::{Material, Supplier};
use crate::domain::value_objects::{BuyPrice, MaterialCode, MaterialId, SupplierId};

use super::rows::{MaterialRow, SupplierRow};

/// 将 MaterialRow 转换为 Material
///
/// 表上的约束保证了这些校验正常情况下不会失败，失败说明数据被绕过约束写入
pub fn material_from_row(row: MaterialRow) -> AppResult<Material> {
    let corrupt = |detail: String| {
        AppError::internal(format!("物料 {} 数据损坏: {}", row.id, detail))
    };

    let code = MaterialCode::new(row.material_code.clone()).map_err(|e| corrupt(e.to_string()))?;
    let material_type = row
        .material_type
        .parse()
        .map_err(|_| corrupt(format!("未知物料类型 {}", row.material_type)))?;
    let buy_price = BuyPrice::new(row.material_buy_price).map_err(|e| corrupt(e.to_string()))?;

    Ok(Material::from_parts(
        MaterialId(row.id),
        code,
        row.material_name,
        material_type,
        buy_price,
        SupplierId(row.supplier_id),
        AuditInfo::from_timestamps(row.created_at, row.updated_at),
    ))
}

/// 将 SupplierRow 转换为 Supplier
pub fn supplier_from_row(row: SupplierRow) -> Supplier {
    Supplier::new(SupplierId(row.id), row.name, row.supplier_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::MaterialType;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn row() -> MaterialRow {
        MaterialRow {
            id: 7,
            material_code: "COT-01".to_string(),
            material_name: "Organic Cotton".to_string(),
            material_type: "cotton".to_string(),
            material_buy_price: Decimal::new(12050, 2),
            supplier_id: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_material_from_row() {
        let material = material_from_row(row()).unwrap();
        assert_eq!(material.id(), MaterialId(7));
        assert_eq!(material.material_type(), MaterialType::Cotton);
        assert_eq!(material.buy_price().value(), Decimal::new(12050, 2));
        assert_eq!(material.supplier_id(), SupplierId(3));
    }

    #[test]
    fn test_corrupt_row_is_internal_error() {
        let mut bad = row();
        bad.material_type = "silk".to_string();
        let err = material_from_row(bad).unwrap_err();
        assert!(err.is_server_error());
    }
}
