//! 物料编码值对象

use fabrica_errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 编码重复时返回给调用方的消息
pub const CODE_NOT_UNIQUE_MESSAGE: &str = "Material Code must be unique!";

/// 物料编码错误
#[derive(Debug, Error)]
pub enum MaterialCodeError {
    #[error("Material code cannot be empty")]
    Empty,
}

impl From<MaterialCodeError> for AppError {
    fn from(err: MaterialCodeError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// 物料编码值对象
///
/// 唯一的格式规则是不能为空白。编码按原样保存，
/// 不做大小写转换，也不限制长度和字符集。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MaterialCode(String);

impl MaterialCode {
    pub fn new(code: impl Into<String>) -> Result<Self, MaterialCodeError> {
        let code = code.into();

        if code.trim().is_empty() {
            return Err(MaterialCodeError::Empty);
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MaterialCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MaterialCode {
    type Error = MaterialCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MaterialCode> for String {
    fn from(code: MaterialCode) -> Self {
        code.0
    }
}
