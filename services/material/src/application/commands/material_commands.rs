//! Material commands

use fabrica_errors::{AppError, AppResult};
use rust_decimal::Decimal;

use crate::domain::enums::MaterialType;
use crate::domain::value_objects::{BuyPrice, MaterialId, SupplierId};

/// 创建物料命令
#[derive(Debug, Clone)]
pub struct CreateMaterialCommand {
    pub material_code: String,
    pub material_name: String,
    pub material_type: MaterialType,
    pub buy_price: Decimal,
    pub supplier_id: SupplierId,
}

impl CreateMaterialCommand {
    pub fn validate(&self) -> AppResult<()> {
        BuyPrice::check(self.buy_price)?;

        if self.material_code.trim().is_empty() {
            return Err(AppError::validation("Material code cannot be empty"));
        }
        if self.material_name.trim().is_empty() {
            return Err(AppError::validation("Material name cannot be empty"));
        }

        Ok(())
    }
}

/// 更新物料命令
///
/// 只有 `Some` 的字段会被写入
#[derive(Debug, Clone)]
pub struct UpdateMaterialCommand {
    pub material_id: MaterialId,
    pub material_code: Option<String>,
    pub material_name: Option<String>,
    pub material_type: Option<MaterialType>,
    pub buy_price: Option<Decimal>,
    pub supplier_id: Option<SupplierId>,
}

impl UpdateMaterialCommand {
    pub fn new(material_id: MaterialId) -> Self {
        Self {
            material_id,
            material_code: None,
            material_name: None,
            material_type: None,
            buy_price: None,
            supplier_id: None,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(price) = self.buy_price {
            BuyPrice::check(price)?;
        }
        Ok(())
    }
}

/// 删除物料命令
#[derive(Debug, Clone)]
pub struct DeleteMaterialCommand {
    pub material_id: MaterialId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PRICE_TOO_LOW_MESSAGE;

    fn create_command() -> CreateMaterialCommand {
        CreateMaterialCommand {
            material_code: "FAB001".to_string(),
            material_name: "Blue Denim".to_string(),
            material_type: MaterialType::Jeans,
            buy_price: Decimal::new(150, 0),
            supplier_id: SupplierId(1),
        }
    }

    #[test]
    fn test_create_command_validation() {
        assert!(create_command().validate().is_ok());

        let mut cmd = create_command();
        cmd.buy_price = Decimal::new(99, 0);
        assert_eq!(
            cmd.validate().unwrap_err(),
            AppError::validation(PRICE_TOO_LOW_MESSAGE)
        );

        let mut cmd = create_command();
        cmd.material_name = " ".to_string();
        assert!(cmd.validate().is_err());
    }

    #[test]
    fn test_update_command_only_checks_present_price() {
        let mut cmd = UpdateMaterialCommand::new(MaterialId(1));
        assert!(cmd.validate().is_ok());

        cmd.buy_price = Some(Decimal::new(10, 0));
        assert!(cmd.validate().is_err());
    }
}
