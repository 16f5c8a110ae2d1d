//! Metrics 模块
//!
//! Prometheus recorder 的持有者，供健康检查服务器渲染 `/metrics`

use metrics_exporter_prometheus::{BuildError, PrometheusHandle};

/// Metrics 记录器
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 recorder（每个进程只能调用一次）
    pub fn install() -> Result<Self, BuildError> {
        let handle = fabrica_telemetry::init_metrics()?;
        Ok(Self { handle })
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
