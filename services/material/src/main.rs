//! Material Service

use std::sync::Arc;

use fabrica_bootstrap::{Infrastructure, run_http};
use fabrica_errors::AppError;
use material_service::api::material_routes;
use material_service::application::MaterialHandler;
use material_service::infrastructure::persistence::{
    MIGRATION_TABLE, PostgresMaterialRepository, PostgresSupplierDirectory, migrations,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_http("config", |infra: Infrastructure| async move {
        info!("Initializing material service");

        infra.run_migrations(MIGRATION_TABLE, &migrations()).await?;

        let pool = infra.postgres_pool();
        let material_repo = Arc::new(PostgresMaterialRepository::new(pool.clone()));
        let suppliers = Arc::new(PostgresSupplierDirectory::new(pool));
        let handler = Arc::new(MaterialHandler::new(material_repo, suppliers));

        Ok::<_, AppError>(material_routes(handler))
    })
    .await
}
