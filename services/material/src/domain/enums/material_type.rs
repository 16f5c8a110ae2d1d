//! 物料类型

use std::str::FromStr;

use fabrica_errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 物料类型无效时的消息
pub const INVALID_TYPE_MESSAGE: &str =
    "Invalid material_type. Allowed types are: fabric, jeans, cotton.";

/// 物料类型
///
/// 封闭集合，对外统一使用小写名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Fabric,
    Jeans,
    Cotton,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [Self::Fabric, Self::Jeans, Self::Cotton];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fabric => "fabric",
            Self::Jeans => "jeans",
            Self::Cotton => "cotton",
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的物料类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{INVALID_TYPE_MESSAGE}")]
pub struct UnknownMaterialType(pub String);

impl From<UnknownMaterialType> for AppError {
    fn from(_: UnknownMaterialType) -> Self {
        AppError::validation(INVALID_TYPE_MESSAGE)
    }
}

impl FromStr for MaterialType {
    type Err = UnknownMaterialType;

    /// 大小写不敏感
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMaterialType(s.to_string()))
    }
}
