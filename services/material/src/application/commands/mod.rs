//! Commands module

pub mod material_commands;

pub use material_commands::*;
