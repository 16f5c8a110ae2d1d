//! 物料实体

use fabrica_common::types::AuditInfo;
use fabrica_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Supplier;
use crate::domain::enums::MaterialType;
use crate::domain::value_objects::{BuyPrice, MaterialCode, MaterialId, SupplierId};

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Material name cannot be empty"));
    }
    Ok(())
}

fn validate_supplier(supplier: &Supplier) -> AppResult<()> {
    if !supplier.is_goods_supplier() {
        return Err(AppError::validation(format!(
            "Partner {} is not a supplier",
            supplier.id
        )));
    }
    Ok(())
}

/// 待创建的物料
///
/// 所有字段在构造时校验，ID 由仓储在保存时分配
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    pub code: MaterialCode,
    pub name: String,
    pub material_type: MaterialType,
    pub buy_price: BuyPrice,
    pub supplier_id: SupplierId,
}

impl NewMaterial {
    pub fn new(
        code: MaterialCode,
        name: impl Into<String>,
        material_type: MaterialType,
        buy_price: Decimal,
        supplier: &Supplier,
    ) -> AppResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        let buy_price = BuyPrice::new(buy_price)?;
        validate_supplier(supplier)?;

        Ok(Self {
            code,
            name,
            material_type,
            buy_price,
            supplier_id: supplier.id,
        })
    }

    /// 分配 ID 后转为物料实体
    pub fn into_material(self, id: MaterialId, audit_info: AuditInfo) -> Material {
        Material {
            id,
            code: self.code,
            name: self.name,
            material_type: self.material_type,
            buy_price: self.buy_price,
            supplier_id: self.supplier_id,
            audit_info,
        }
    }
}

/// 物料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    id: MaterialId,
    /// 物料编码（业务主键）
    code: MaterialCode,
    name: String,
    material_type: MaterialType,
    buy_price: BuyPrice,
    supplier_id: SupplierId,
    audit_info: AuditInfo,
}

/// 部分更新（未校验）
///
/// `None` 表示保持原值。供应商由调用方预先解析为实体。
#[derive(Debug, Clone, Default)]
pub struct MaterialChanges {
    pub code: Option<MaterialCode>,
    pub name: Option<String>,
    pub material_type: Option<MaterialType>,
    pub buy_price: Option<Decimal>,
    pub supplier: Option<Supplier>,
}

impl MaterialChanges {
    /// 校验全部给定字段，得到可直接写入的补丁
    pub fn validate(self) -> AppResult<MaterialPatch> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        let buy_price = self.buy_price.map(BuyPrice::new).transpose()?;
        if let Some(supplier) = &self.supplier {
            validate_supplier(supplier)?;
        }

        Ok(MaterialPatch {
            code: self.code,
            name: self.name,
            material_type: self.material_type,
            buy_price,
            supplier_id: self.supplier.map(|s| s.id),
        })
    }
}

/// 已校验的部分更新
///
/// 仓储只写入 `Some` 字段，未给出的列保持数据库中的当前值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialPatch {
    pub code: Option<MaterialCode>,
    pub name: Option<String>,
    pub material_type: Option<MaterialType>,
    pub buy_price: Option<BuyPrice>,
    pub supplier_id: Option<SupplierId>,
}

impl MaterialPatch {
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.material_type.is_none()
            && self.buy_price.is_none()
            && self.supplier_id.is_none()
    }
}

impl Material {
    /// 从各部分构建物料（用于从数据库加载）
    pub fn from_parts(
        id: MaterialId,
        code: MaterialCode,
        name: String,
        material_type: MaterialType,
        buy_price: BuyPrice,
        supplier_id: SupplierId,
        audit_info: AuditInfo,
    ) -> Self {
        Self {
            id,
            code,
            name,
            material_type,
            buy_price,
            supplier_id,
            audit_info,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> MaterialId {
        self.id
    }

    pub fn code(&self) -> &MaterialCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material_type(&self) -> MaterialType {
        self.material_type
    }

    pub fn buy_price(&self) -> BuyPrice {
        self.buy_price
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    /// 应用已校验的补丁，空补丁不更新时间戳
    pub fn apply_patch(&mut self, patch: &MaterialPatch) {
        if patch.is_empty() {
            return;
        }

        if let Some(code) = &patch.code {
            self.code = code.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(material_type) = patch.material_type {
            self.material_type = material_type;
        }
        if let Some(buy_price) = patch.buy_price {
            self.buy_price = buy_price;
        }
        if let Some(supplier_id) = patch.supplier_id {
            self.supplier_id = supplier_id;
        }
        self.audit_info.touch();
    }
}

/// 物料过滤条件
#[derive(Debug, Clone, Default)]
pub struct MaterialFilter {
    /// 物料类型
    pub material_type: Option<MaterialType>,
}

impl MaterialFilter {
    pub fn by_type(material_type: MaterialType) -> Self {
        Self {
            material_type: Some(material_type),
        }
    }

    pub fn matches(&self, material: &Material) -> bool {
        self.material_type
            .is_none_or(|t| t == material.material_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PRICE_TOO_LOW_MESSAGE;

    fn supplier() -> Supplier {
        Supplier::new(SupplierId(1), "Acme Textiles", 1)
    }

    fn material() -> Material {
        NewMaterial::new(
            MaterialCode::new("FAB001").unwrap(),
            "Blue Denim",
            MaterialType::Jeans,
            Decimal::new(15000, 2),
            &supplier(),
        )
        .unwrap()
        .into_material(MaterialId(10), AuditInfo::new())
    }

    #[test]
    fn test_new_material() {
        let m = material();
        assert_eq!(m.id(), MaterialId(10));
        assert_eq!(m.code().as_str(), "FAB001");
        assert_eq!(m.material_type(), MaterialType::Jeans);
        assert_eq!(m.buy_price().value(), Decimal::new(150, 0));
        assert_eq!(m.supplier_id(), SupplierId(1));
    }

    #[test]
    fn test_new_material_rejects_low_price() {
        let err = NewMaterial::new(
            MaterialCode::new("FAB002").unwrap(),
            "Cheap Cotton",
            MaterialType::Cotton,
            Decimal::new(9999, 2),
            &supplier(),
        )
        .unwrap_err();
        assert_eq!(err, AppError::validation(PRICE_TOO_LOW_MESSAGE));
    }

    #[test]
    fn test_new_material_rejects_non_supplier() {
        let customer = Supplier::new(SupplierId(5), "Walk-in Customer", 0);
        let err = NewMaterial::new(
            MaterialCode::new("FAB003").unwrap(),
            "Canvas",
            MaterialType::Fabric,
            Decimal::ONE_HUNDRED,
            &customer,
        )
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_new_material_rejects_blank_name() {
        let result = NewMaterial::new(
            MaterialCode::new("FAB004").unwrap(),
            "   ",
            MaterialType::Fabric,
            Decimal::ONE_HUNDRED,
            &supplier(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_material_accepts_long_name() {
        let name = "Heavyweight ".repeat(40);
        let m = NewMaterial::new(
            MaterialCode::new("FAB005").unwrap(),
            name.clone(),
            MaterialType::Fabric,
            Decimal::ONE_HUNDRED,
            &supplier(),
        )
        .unwrap();
        assert_eq!(m.name, name);
    }

    #[test]
    fn test_apply_patch_updates_only_given_fields() {
        let mut m = material();
        let patch = MaterialChanges {
            name: Some("Dark Denim".to_string()),
            buy_price: Some(Decimal::new(200, 0)),
            ..Default::default()
        }
        .validate()
        .unwrap();
        m.apply_patch(&patch);

        assert_eq!(m.name(), "Dark Denim");
        assert_eq!(m.buy_price().value(), Decimal::new(200, 0));
        assert_eq!(m.code().as_str(), "FAB001");
        assert_eq!(m.material_type(), MaterialType::Jeans);
    }

    #[test]
    fn test_validate_changes_rejects_any_bad_field() {
        let err = MaterialChanges {
            name: Some("Renamed".to_string()),
            material_type: Some(MaterialType::Cotton),
            buy_price: Some(Decimal::new(50, 0)),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AppError::validation(PRICE_TOO_LOW_MESSAGE));

        let err = MaterialChanges {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AppError::validation("Material name cannot be empty"));
    }

    #[test]
    fn test_validate_changes_resolves_supplier_id() {
        let patch = MaterialChanges {
            supplier: Some(Supplier::new(SupplierId(7), "Loom Works", 2)),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.supplier_id, Some(SupplierId(7)));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_apply_empty_patch_keeps_timestamps() {
        let mut m = material();
        let before = m.audit_info().clone();
        m.apply_patch(&MaterialPatch::default());
        assert_eq!(m.audit_info(), &before);
    }

    #[test]
    fn test_filter_matches() {
        let m = material();
        assert!(MaterialFilter::default().matches(&m));
        assert!(MaterialFilter::by_type(MaterialType::Jeans).matches(&m));
        assert!(!MaterialFilter::by_type(MaterialType::Fabric).matches(&m));
    }
}
