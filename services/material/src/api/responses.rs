//! 响应构造

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fabrica_errors::AppError;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use super::dto::ErrorResponse;

fn log_failure(err: &AppError) {
    if err.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
}

/// 使用真实 HTTP 状态码的错误（查询和删除）
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        log_failure(&err);
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// 状态码内嵌在响应体中的结果（创建和更新）
///
/// 传输层始终返回 HTTP 200，调用方读取 `status_code` 判断结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status_code: u16,
}

impl CommandResult {
    pub fn success(id: i64, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            id: Some(id),
            message: Some(message.into()),
            error: None,
            status_code,
        }
    }
}

impl From<AppError> for CommandResult {
    fn from(err: AppError) -> Self {
        log_failure(&err);
        Self {
            id: None,
            message: None,
            error: Some(err.to_string()),
            status_code: err.status_code(),
        }
    }
}

impl IntoResponse for CommandResult {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
