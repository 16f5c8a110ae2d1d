//! Persistence implementations

mod converters;
mod migrations;
mod postgres;
mod rows;

pub use migrations::{MIGRATION_TABLE, migrations};
pub use postgres::{PostgresMaterialRepository, PostgresSupplierDirectory};
