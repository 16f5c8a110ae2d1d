//! 仓储接口

mod material_repository;
mod supplier_directory;

pub use material_repository::*;
pub use supplier_directory::*;
