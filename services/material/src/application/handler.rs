//! Business logic handler

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use fabrica_errors::{AppError, AppResult};
use tracing::{info, warn};

use crate::domain::entities::{Material, MaterialChanges, NewMaterial, Supplier};
use crate::domain::repositories::{MaterialRepository, SupplierDirectory};
use crate::domain::value_objects::{
    CODE_NOT_UNIQUE_MESSAGE, MaterialCode, MaterialId, SupplierId,
};

use super::commands::*;
use super::queries::*;

/// 指标中的服务名
const SERVICE_NAME: &str = "material";

/// 更新时物料不存在的消息
pub const MATERIAL_NOT_FOUND: &str = "Material not found";

/// 按结果记录一次操作
fn record<T>(operation: &'static str, result: &AppResult<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) if e.is_server_error() => "error",
        Err(_) => "rejected",
    };
    fabrica_telemetry::record_operation(SERVICE_NAME, operation, outcome);
}

pub struct MaterialHandler {
    material_repo: Arc<dyn MaterialRepository>,
    suppliers: Arc<dyn SupplierDirectory>,
}

impl MaterialHandler {
    pub fn new(
        material_repo: Arc<dyn MaterialRepository>,
        suppliers: Arc<dyn SupplierDirectory>,
    ) -> Self {
        Self {
            material_repo,
            suppliers,
        }
    }

    // ========== 查询 ==========

    /// 列出物料（可按类型过滤）
    pub async fn list_materials(&self, query: ListMaterialsQuery) -> AppResult<Vec<MaterialDetails>> {
        let result = self.load_materials(query).await;
        record("list", &result);
        result
    }

    async fn load_materials(&self, query: ListMaterialsQuery) -> AppResult<Vec<MaterialDetails>> {
        let materials = self.material_repo.search(&query.filter).await?;

        let supplier_ids: Vec<SupplierId> = materials
            .iter()
            .map(|m| m.supplier_id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names: HashMap<SupplierId, String> = self
            .suppliers
            .find_by_ids(&supplier_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        Ok(materials
            .into_iter()
            .map(|material| {
                let supplier_name = names.get(&material.supplier_id()).cloned();
                MaterialDetails {
                    material,
                    supplier_name,
                }
            })
            .collect())
    }

    /// 获取单个物料
    pub async fn get_material(&self, query: GetMaterialQuery) -> AppResult<MaterialDetails> {
        let result = self.load_material(query.material_id).await;
        record("get", &result);
        result
    }

    async fn load_material(&self, id: MaterialId) -> AppResult<MaterialDetails> {
        let material = self.find_material(id).await?;
        let supplier_name = self
            .suppliers
            .find_by_id(material.supplier_id())
            .await?
            .map(|s| s.name);

        Ok(MaterialDetails {
            material,
            supplier_name,
        })
    }

    // ========== 命令 ==========

    /// 创建物料
    pub async fn create_material(&self, cmd: CreateMaterialCommand) -> AppResult<MaterialId> {
        let result = self.do_create(cmd).await;
        record("create", &result);
        result
    }

    async fn do_create(&self, cmd: CreateMaterialCommand) -> AppResult<MaterialId> {
        info!("Creating material: {}", cmd.material_code);

        // 1. 验证命令
        cmd.validate()?;

        // 2. 检查物料编码是否已存在
        let code = MaterialCode::new(cmd.material_code)?;
        if self.material_repo.exists_by_code(&code, None).await? {
            warn!("Material code {} already exists", code);
            return Err(AppError::conflict(CODE_NOT_UNIQUE_MESSAGE));
        }

        // 3. 解析供应商并构建实体
        let supplier = self.resolve_supplier(cmd.supplier_id).await?;
        let new_material = NewMaterial::new(
            code,
            cmd.material_name,
            cmd.material_type,
            cmd.buy_price,
            &supplier,
        )?;

        // 4. 保存（并发创建同一编码时由唯一索引兜底）
        let material = self.material_repo.save(&new_material).await?;

        info!("Material created: {} ({})", material.id(), material.code());
        Ok(material.id())
    }

    /// 更新物料
    ///
    /// 先确认物料存在，再校验字段
    pub async fn update_material(&self, cmd: UpdateMaterialCommand) -> AppResult<Material> {
        let result = self.do_update(cmd).await;
        record("update", &result);
        result
    }

    async fn do_update(&self, cmd: UpdateMaterialCommand) -> AppResult<Material> {
        info!("Updating material: {}", cmd.material_id);

        let current = self.find_material(cmd.material_id).await?;
        cmd.validate()?;

        let code = cmd.material_code.map(MaterialCode::new).transpose()?;
        if let Some(code) = &code {
            if code != current.code()
                && self
                    .material_repo
                    .exists_by_code(code, Some(current.id()))
                    .await?
            {
                warn!("Material code {} already exists", code);
                return Err(AppError::conflict(CODE_NOT_UNIQUE_MESSAGE));
            }
        }

        let supplier = match cmd.supplier_id {
            Some(id) => Some(self.resolve_supplier(id).await?),
            None => None,
        };

        let patch = MaterialChanges {
            code,
            name: cmd.material_name,
            material_type: cmd.material_type,
            buy_price: cmd.buy_price,
            supplier,
        }
        .validate()?;

        if patch.is_empty() {
            return Ok(current);
        }

        // 只写补丁中的列，读取后的并发修改不会被旧值覆盖
        let material = self
            .material_repo
            .update(current.id(), &patch)
            .await?
            .ok_or_else(|| AppError::not_found(MATERIAL_NOT_FOUND))?;

        info!("Material updated: {}", material.id());
        Ok(material)
    }

    /// 删除物料
    pub async fn delete_material(&self, cmd: DeleteMaterialCommand) -> AppResult<()> {
        let result = self.do_delete(cmd).await;
        record("delete", &result);
        result
    }

    async fn do_delete(&self, cmd: DeleteMaterialCommand) -> AppResult<()> {
        info!("Deleting material: {}", cmd.material_id);

        if !self.material_repo.delete(cmd.material_id).await? {
            return Err(AppError::not_found(MATERIAL_NOT_FOUND));
        }

        info!("Material deleted: {}", cmd.material_id);
        Ok(())
    }

    /// 物料是否存在（不计入操作指标）
    pub async fn material_exists(&self, id: MaterialId) -> AppResult<bool> {
        Ok(self.material_repo.find_by_id(id).await?.is_some())
    }

    // ========== 辅助 ==========

    async fn find_material(&self, id: MaterialId) -> AppResult<Material> {
        self.material_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(MATERIAL_NOT_FOUND))
    }

    async fn resolve_supplier(&self, id: SupplierId) -> AppResult<Supplier> {
        self.suppliers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Supplier {} does not exist", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MaterialFilter, MaterialPatch};
    use crate::domain::enums::MaterialType;
    use crate::domain::value_objects::PRICE_TOO_LOW_MESSAGE;
    use crate::infrastructure::memory::{InMemoryMaterialRepository, InMemorySupplierDirectory};
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    fn setup() -> (MaterialHandler, Arc<InMemoryMaterialRepository>) {
        let repo = Arc::new(InMemoryMaterialRepository::new());
        let suppliers = Arc::new(InMemorySupplierDirectory::with_suppliers(vec![
            Supplier::new(SupplierId(1), "Acme Textiles", 1),
            Supplier::new(SupplierId(2), "Denim Works", 3),
            Supplier::new(SupplierId(9), "Walk-in Customer", 0),
        ]));
        (MaterialHandler::new(repo.clone(), suppliers), repo)
    }

    fn create_cmd(code: &str, material_type: MaterialType, price: i64) -> CreateMaterialCommand {
        CreateMaterialCommand {
            material_code: code.to_string(),
            material_name: format!("{} name", code),
            material_type,
            buy_price: Decimal::new(price, 0),
            supplier_id: SupplierId(1),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_material() {
        let (handler, _) = setup();

        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let details = handler
            .get_material(GetMaterialQuery { material_id: id })
            .await
            .unwrap();
        assert_eq!(details.material.code().as_str(), "FAB001");
        assert_eq!(details.supplier_name.as_deref(), Some("Acme Textiles"));
    }

    #[tokio::test]
    async fn test_create_duplicate_code_conflicts() {
        let (handler, repo) = setup();
        handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let err = handler
            .create_material(create_cmd("FAB001", MaterialType::Cotton, 300))
            .await
            .unwrap_err();

        assert_eq!(err, AppError::conflict(CODE_NOT_UNIQUE_MESSAGE));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_low_price_and_bad_supplier() {
        let (handler, repo) = setup();

        let err = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 99))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::validation(PRICE_TOO_LOW_MESSAGE));

        let mut cmd = create_cmd("FAB002", MaterialType::Fabric, 150);
        cmd.supplier_id = SupplierId(404);
        assert_eq!(handler.create_material(cmd).await.unwrap_err().status_code(), 400);

        let mut cmd = create_cmd("FAB003", MaterialType::Fabric, 150);
        cmd.supplier_id = SupplierId(9);
        assert_eq!(handler.create_material(cmd).await.unwrap_err().status_code(), 400);

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_type_in_id_order() {
        let (handler, _) = setup();
        for (code, t) in [
            ("J1", MaterialType::Jeans),
            ("F1", MaterialType::Fabric),
            ("J2", MaterialType::Jeans),
        ] {
            handler.create_material(create_cmd(code, t, 120)).await.unwrap();
        }

        let all = handler.list_materials(ListMaterialsQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let jeans = handler
            .list_materials(ListMaterialsQuery {
                filter: MaterialFilter::by_type(MaterialType::Jeans),
            })
            .await
            .unwrap();
        let codes: Vec<&str> = jeans.iter().map(|d| d.material.code().as_str()).collect();
        assert_eq!(codes, vec!["J1", "J2"]);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let (handler, _) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let mut cmd = UpdateMaterialCommand::new(id);
        cmd.buy_price = Some(Decimal::new(200, 0));
        cmd.supplier_id = Some(SupplierId(2));
        let updated = handler.update_material(cmd).await.unwrap();

        assert_eq!(updated.buy_price().value(), Decimal::new(200, 0));
        assert_eq!(updated.supplier_id(), SupplierId(2));
        assert_eq!(updated.name(), "FAB001 name");
    }

    #[tokio::test]
    async fn test_update_missing_material_wins_over_bad_fields() {
        let (handler, _) = setup();

        let mut cmd = UpdateMaterialCommand::new(MaterialId(999));
        cmd.buy_price = Some(Decimal::new(1, 0));
        let err = handler.update_material(cmd).await.unwrap_err();

        assert_eq!(err, AppError::not_found(MATERIAL_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_rejected_leaves_material_unchanged() {
        let (handler, _) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();
        handler
            .create_material(create_cmd("FAB002", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let mut cmd = UpdateMaterialCommand::new(id);
        cmd.material_code = Some("FAB002".to_string());
        cmd.material_name = Some("Renamed".to_string());
        let err = handler.update_material(cmd).await.unwrap_err();
        assert_eq!(err.status_code(), 409);

        let details = handler
            .get_material(GetMaterialQuery { material_id: id })
            .await
            .unwrap();
        assert_eq!(details.material.name(), "FAB001 name");
    }

    #[tokio::test]
    async fn test_update_to_own_code_is_allowed() {
        let (handler, _) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let mut cmd = UpdateMaterialCommand::new(id);
        cmd.material_code = Some("FAB001".to_string());
        assert!(handler.update_material(cmd).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_empty_body_keeps_material() {
        let (handler, _) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();
        let before = handler
            .get_material(GetMaterialQuery { material_id: id })
            .await
            .unwrap()
            .material;

        let updated = handler
            .update_material(UpdateMaterialCommand::new(id))
            .await
            .unwrap();
        assert_eq!(updated, before);
    }

    /// 读取时延迟，放大并发更新的交错窗口
    struct SlowReadRepository {
        inner: Arc<InMemoryMaterialRepository>,
    }

    #[async_trait]
    impl MaterialRepository for SlowReadRepository {
        async fn find_by_id(&self, id: MaterialId) -> AppResult<Option<Material>> {
            let found = self.inner.find_by_id(id).await;
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            found
        }

        async fn save(&self, material: &NewMaterial) -> AppResult<Material> {
            self.inner.save(material).await
        }

        async fn update(
            &self,
            id: MaterialId,
            patch: &MaterialPatch,
        ) -> AppResult<Option<Material>> {
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: MaterialId) -> AppResult<bool> {
            self.inner.delete(id).await
        }

        async fn search(&self, filter: &MaterialFilter) -> AppResult<Vec<Material>> {
            self.inner.search(filter).await
        }

        async fn exists_by_code(
            &self,
            code: &MaterialCode,
            exclude: Option<MaterialId>,
        ) -> AppResult<bool> {
            self.inner.exists_by_code(code, exclude).await
        }

        async fn count(&self) -> AppResult<u64> {
            self.inner.count().await
        }
    }

    #[tokio::test]
    async fn test_concurrent_updates_of_different_fields_both_persist() {
        let inner = Arc::new(InMemoryMaterialRepository::new());
        let handler = MaterialHandler::new(
            Arc::new(SlowReadRepository {
                inner: inner.clone(),
            }),
            Arc::new(InMemorySupplierDirectory::with_suppliers(vec![
                Supplier::new(SupplierId(1), "Acme Textiles", 1),
            ])),
        );
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        let mut rename = UpdateMaterialCommand::new(id);
        rename.material_name = Some("Renamed".to_string());
        let mut reprice = UpdateMaterialCommand::new(id);
        reprice.buy_price = Some(Decimal::new(300, 0));

        let (renamed, repriced) = tokio::join!(
            handler.update_material(rename),
            handler.update_material(reprice)
        );
        renamed.unwrap();
        repriced.unwrap();

        let stored = inner.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Renamed");
        assert_eq!(stored.buy_price().value(), Decimal::new(300, 0));
    }

    #[tokio::test]
    async fn test_material_exists() {
        let (handler, _) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        assert!(handler.material_exists(id).await.unwrap());
        assert!(!handler.material_exists(MaterialId(999)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_material() {
        let (handler, repo) = setup();
        let id = handler
            .create_material(create_cmd("FAB001", MaterialType::Fabric, 150))
            .await
            .unwrap();

        handler
            .delete_material(DeleteMaterialCommand { material_id: id })
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = handler
            .delete_material(DeleteMaterialCommand { material_id: id })
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    struct MockFailingRepository;

    #[async_trait]
    impl MaterialRepository for MockFailingRepository {
        async fn find_by_id(&self, _id: MaterialId) -> AppResult<Option<Material>> {
            Err(AppError::database("connection refused"))
        }

        async fn save(&self, _material: &NewMaterial) -> AppResult<Material> {
            Err(AppError::database("connection refused"))
        }

        async fn update(
            &self,
            _id: MaterialId,
            _patch: &MaterialPatch,
        ) -> AppResult<Option<Material>> {
            Err(AppError::database("connection refused"))
        }

        async fn delete(&self, _id: MaterialId) -> AppResult<bool> {
            Err(AppError::database("connection refused"))
        }

        async fn search(&self, _filter: &MaterialFilter) -> AppResult<Vec<Material>> {
            Err(AppError::database("connection refused"))
        }

        async fn exists_by_code(
            &self,
            _code: &MaterialCode,
            _exclude: Option<MaterialId>,
        ) -> AppResult<bool> {
            Err(AppError::database("connection refused"))
        }

        async fn count(&self) -> AppResult<u64> {
            Err(AppError::database("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let handler = MaterialHandler::new(
            Arc::new(MockFailingRepository),
            Arc::new(InMemorySupplierDirectory::default()),
        );

        let err = handler
            .list_materials(ListMaterialsQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_server_error());
    }
}
