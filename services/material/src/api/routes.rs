//! 物料路由

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use fabrica_errors::AppError;
use tracing::info;

use super::dto::{
    CreateMaterialRequest, ListMaterialsParams, MaterialResponse, MessageResponse,
    UpdateMaterialRequest,
};
use super::responses::{ApiError, CommandResult};
use crate::application::{
    DeleteMaterialCommand, GetMaterialQuery, ListMaterialsQuery, MaterialHandler,
    handler::MATERIAL_NOT_FOUND,
};
use crate::domain::entities::MaterialFilter;
use crate::domain::value_objects::MaterialId;

/// 查询和删除时物料不存在的消息
const RECORD_NOT_FOUND: &str = "Material not found.";

/// 物料路由
pub fn material_routes(handler: Arc<MaterialHandler>) -> Router {
    Router::new()
        .route("/api/materials", get(list_materials).post(create_material))
        .route(
            "/api/materials/{id}",
            get(get_material).put(update_material).delete(delete_material),
        )
        .fallback(route_not_found)
        .with_state(handler)
}

/// 路径参数不是整数时按不存在处理
fn material_id(path: Result<Path<i64>, PathRejection>) -> Option<MaterialId> {
    path.ok().map(|Path(id)| MaterialId(id))
}

/// 查询和删除的错误：不存在时使用固定消息
fn record_error(err: AppError) -> ApiError {
    match err {
        AppError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND),
        other => other.into(),
    }
}

/// 列出物料
async fn list_materials(
    State(handler): State<Arc<MaterialHandler>>,
    params: Result<Query<ListMaterialsParams>, QueryRejection>,
) -> Result<Json<Vec<MaterialResponse>>, ApiError> {
    let Query(params) =
        params.map_err(|e| ApiError::from(AppError::validation(e.body_text())))?;
    let material_type = params.material_type().map_err(ApiError::from)?;
    info!(material_type = ?material_type, "List materials request");

    let filter = MaterialFilter { material_type };
    let materials = handler
        .list_materials(ListMaterialsQuery { filter })
        .await
        .map_err(ApiError::from)?;

    Ok(Json(materials.into_iter().map(MaterialResponse::from).collect()))
}

/// 获取单个物料
async fn get_material(
    State(handler): State<Arc<MaterialHandler>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MaterialResponse>, ApiError> {
    let material_id = material_id(path)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND))?;
    info!(%material_id, "Get material request");

    let details = handler
        .get_material(GetMaterialQuery { material_id })
        .await
        .map_err(record_error)?;

    Ok(Json(details.into()))
}

/// 创建物料
async fn create_material(
    State(handler): State<Arc<MaterialHandler>>,
    body: Result<Json<CreateMaterialRequest>, JsonRejection>,
) -> CommandResult {
    info!("Create material request");

    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => return AppError::validation(e.body_text()).into(),
    };
    let cmd = match request.into_command() {
        Ok(cmd) => cmd,
        Err(e) => return e.into(),
    };

    match handler.create_material(cmd).await {
        Ok(id) => CommandResult::success(id.value(), "Material created successfully!", 201),
        Err(e) => e.into(),
    }
}

/// 更新物料
///
/// 先确认物料存在，再解析请求体
async fn update_material(
    State(handler): State<Arc<MaterialHandler>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateMaterialRequest>, JsonRejection>,
) -> CommandResult {
    let Some(material_id) = material_id(path) else {
        return AppError::not_found(MATERIAL_NOT_FOUND).into();
    };
    info!(%material_id, "Update material request");

    match handler.material_exists(material_id).await {
        Ok(true) => {}
        Ok(false) => return AppError::not_found(MATERIAL_NOT_FOUND).into(),
        Err(e) => return e.into(),
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(e) => return AppError::validation(e.body_text()).into(),
    };
    let cmd = match request.into_command(material_id) {
        Ok(cmd) => cmd,
        Err(e) => return e.into(),
    };

    match handler.update_material(cmd).await {
        Ok(material) => {
            CommandResult::success(material.id().value(), "Material updated successfully!", 200)
        }
        Err(e) => e.into(),
    }
}

/// 删除物料
async fn delete_material(
    State(handler): State<Arc<MaterialHandler>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let material_id = material_id(path)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, RECORD_NOT_FOUND))?;
    info!(%material_id, "Delete material request");

    handler
        .delete_material(DeleteMaterialCommand { material_id })
        .await
        .map_err(record_error)?;

    Ok(Json(MessageResponse {
        message: "Material deleted successfully!".to_string(),
    }))
}

async fn route_not_found(uri: Uri) -> impl IntoResponse {
    let problem = AppError::not_found(format!("No route for {}", uri.path()))
        .to_problem_details()
        .with_instance(uri.path());
    (StatusCode::NOT_FOUND, Json(problem))
}
