//! 物料服务
//!
//! 提供物料记录的增删改查 HTTP 接口：
//! - 价格下限、物料类型、供应商等规则由领域层保证
//! - 物料编码全局唯一
//! - 错误按分类映射到状态码

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
