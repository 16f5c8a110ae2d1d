//! 基础设施资源管理
//!
//! 由 bootstrap 统一初始化，服务通过闭包参数拿到

use fabrica_adapter_postgres::{Migration, MigrationManager, PostgresConfig, create_pool};
use fabrica_common::{RetryConfig, with_retry};
use fabrica_config::AppConfig;
use fabrica_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);
        let postgres_pool = with_retry(&retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取 PostgreSQL 连接池（克隆开销很小）
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 执行服务自带的迁移脚本
    ///
    /// `database.run_migrations = false` 时跳过
    pub async fn run_migrations(&self, table_name: &str, migrations: &[Migration]) -> AppResult<()> {
        if !self.config.database.run_migrations {
            info!("Migrations disabled by configuration");
            return Ok(());
        }

        let result = MigrationManager::new(self.postgres_pool())
            .with_table_name(table_name)
            .migrate(migrations)
            .await?;

        info!(
            applied = result.applied_count(),
            skipped = result.skipped.len(),
            "Migrations finished"
        );
        Ok(())
    }
}
