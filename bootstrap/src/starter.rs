//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use fabrica_config::AppConfig;
use fabrica_errors::AppResult;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::MetricsRecorder;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 所有服务的统一入口点：
/// 1. 读取 `.env` 并加载配置
/// 2. 初始化运行时（日志）
/// 3. 安装 Prometheus recorder
/// 4. 创建基础设施资源（PostgreSQL，带重试）
/// 5. 在 `server.port + 1000` 上启动健康检查服务器
/// 6. 调用闭包构建业务路由
/// 7. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// use fabrica_bootstrap::run_http;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http("config", |infra| async move {
///         Ok(my_routes(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_http<F, Fut>(config_dir: &str, router_builder: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 本地开发时 .env 可选
    let _ = dotenvy::dotenv();

    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = match MetricsRecorder::install() {
        Ok(recorder) => Some(recorder),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            None
        }
    };

    let infra = Infrastructure::from_config(config.clone()).await?;

    let health_server = HealthServer::new(
        HealthChecker::new(infra.postgres_pool()),
        metrics,
        config.server.health_port(),
    );
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    let app = router_builder(infra).await?.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    health_handle.abort();
    info!("Service stopped");

    Ok(())
}
