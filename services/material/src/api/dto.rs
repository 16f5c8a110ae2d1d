//! 请求与响应结构（schema v1）
//!
//! 响应字段是对外契约，调整字段必须同时升级版本。

use fabrica_errors::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{CreateMaterialCommand, MaterialDetails, UpdateMaterialCommand};
use crate::domain::enums::MaterialType;
use crate::domain::value_objects::{BuyPrice, MaterialId, SupplierId};

/// 必填字段缺失时的消息
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields. Please provide: material_code, material_name, material_type, material_buy_price, supplier_id";

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListMaterialsParams {
    pub material_type: Option<String>,
}

impl ListMaterialsParams {
    /// 空字符串视为未过滤
    pub fn material_type(&self) -> AppResult<Option<MaterialType>> {
        match self.material_type.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse::<MaterialType>()?)),
        }
    }
}

/// 创建物料请求
///
/// 字段全部可选，缺失检查在 `into_command` 中按固定顺序进行
#[derive(Debug, Default, Deserialize)]
pub struct CreateMaterialRequest {
    pub material_code: Option<String>,
    pub material_name: Option<String>,
    pub material_type: Option<String>,
    pub material_buy_price: Option<Decimal>,
    pub supplier_id: Option<i64>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl CreateMaterialRequest {
    /// 依次检查: 价格下限、必填字段、物料类型
    pub fn into_command(self) -> AppResult<CreateMaterialCommand> {
        if let Some(price) = self.material_buy_price {
            BuyPrice::check(price)?;
        }

        let (Some(code), Some(name), Some(material_type), Some(buy_price), Some(supplier_id)) = (
            present(self.material_code),
            present(self.material_name),
            present(self.material_type),
            self.material_buy_price,
            self.supplier_id.filter(|id| *id != 0),
        ) else {
            return Err(AppError::validation(MISSING_FIELDS_MESSAGE));
        };

        Ok(CreateMaterialCommand {
            material_code: code,
            material_name: name,
            material_type: material_type.parse()?,
            buy_price,
            supplier_id: SupplierId(supplier_id),
        })
    }
}

/// 更新物料请求（部分字段）
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMaterialRequest {
    pub material_code: Option<String>,
    pub material_name: Option<String>,
    pub material_type: Option<String>,
    pub material_buy_price: Option<Decimal>,
    pub supplier_id: Option<i64>,
}

impl UpdateMaterialRequest {
    /// 依次检查: 价格下限、物料类型
    pub fn into_command(self, material_id: MaterialId) -> AppResult<UpdateMaterialCommand> {
        if let Some(price) = self.material_buy_price {
            BuyPrice::check(price)?;
        }

        let material_type = self
            .material_type
            .map(|t| t.parse::<MaterialType>())
            .transpose()?;

        Ok(UpdateMaterialCommand {
            material_id,
            material_code: self.material_code,
            material_name: self.material_name,
            material_type,
            buy_price: self.material_buy_price,
            supplier_id: self.supplier_id.map(SupplierId),
        })
    }
}

/// 物料记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub id: i64,
    pub material_code: String,
    pub material_name: String,
    pub material_type: MaterialType,
    #[serde(with = "rust_decimal::serde::float")]
    pub material_buy_price: Decimal,
    pub supplier_name: Option<String>,
    pub supplier_id: i64,
}

impl From<MaterialDetails> for MaterialResponse {
    fn from(details: MaterialDetails) -> Self {
        let material = details.material;
        Self {
            id: material.id().value(),
            material_code: material.code().as_str().to_string(),
            material_name: material.name().to_string(),
            material_type: material.material_type(),
            material_buy_price: material.buy_price().value(),
            supplier_name: details.supplier_name,
            supplier_id: material.supplier_id().value(),
        }
    }
}

/// 错误响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 消息响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
