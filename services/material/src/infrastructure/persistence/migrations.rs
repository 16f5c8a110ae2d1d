//! 物料服务的数据库迁移

use fabrica_adapter_postgres::Migration;

/// 本服务使用的迁移记录表
pub const MIGRATION_TABLE: &str = "_material_migrations";

/// 按版本排列的迁移脚本
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_suppliers",
            include_str!("../../../migrations/0001_create_suppliers.sql"),
        ),
        Migration::new(
            2,
            "create_materials",
            include_str!("../../../migrations/0002_create_materials.sql"),
        ),
    ]
}
