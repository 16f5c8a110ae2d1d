//! HTTP API 层

pub mod dto;
mod responses;
mod routes;

pub use responses::{ApiError, CommandResult};
pub use routes::material_routes;
