//! 可观测性模块
//!
//! 提供 Prometheus 指标、结构化日志和健康检查。

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};
use crate::services::chatbot::Resolution;
use crate::storage::repository::CollegeRepository;

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub chat_requests_total: AtomicU64,
    pub invalid_queries_total: AtomicU64,
    pub greeting_replies_total: AtomicU64,
    pub topic_replies_total: AtomicU64,
    pub search_requests_total: AtomicU64,
    pub search_latency_ms_sum: AtomicU64,
    pub no_match_total: AtomicU64,
    pub store_errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录一次问答请求的结果
    pub fn record_resolution(&self, resolution: &Resolution, duration_ms: u64) {
        self.chat_requests_total.fetch_add(1, Ordering::Relaxed);
        match resolution {
            Resolution::InvalidQuery => {
                self.invalid_queries_total.fetch_add(1, Ordering::Relaxed);
            }
            Resolution::Greeting(_) => {
                self.greeting_replies_total.fetch_add(1, Ordering::Relaxed);
            }
            Resolution::Topic { .. } => {
                self.topic_replies_total.fetch_add(1, Ordering::Relaxed);
            }
            Resolution::Colleges { .. } => self.record_search(duration_ms),
            Resolution::NoMatch => {
                self.no_match_total.fetch_add(1, Ordering::Relaxed);
                self.record_search(duration_ms);
            }
            Resolution::StoreFailure => {
                self.store_errors_total.fetch_add(1, Ordering::Relaxed);
                self.record_search(duration_ms);
            }
        }
    }

    fn record_search(&self, duration_ms: u64) {
        self.search_requests_total.fetch_add(1, Ordering::Relaxed);
        self.search_latency_ms_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP chat_requests_total Total chatbot requests
# TYPE chat_requests_total counter
chat_requests_total {}
# HELP invalid_queries_total Requests rejected as empty
# TYPE invalid_queries_total counter
invalid_queries_total {}
# HELP greeting_replies_total Requests answered with a greeting
# TYPE greeting_replies_total counter
greeting_replies_total {}
# HELP topic_replies_total Requests answered with a topic reply
# TYPE topic_replies_total counter
topic_replies_total {}
# HELP search_requests_total Requests that reached the college search
# TYPE search_requests_total counter
search_requests_total {}
# HELP search_latency_seconds College search latency in seconds
# TYPE search_latency_seconds summary
search_latency_seconds_sum {}
search_latency_seconds_count {}
# HELP no_match_total Searches without results
# TYPE no_match_total counter
no_match_total {}
# HELP store_errors_total Searches that failed in the database
# TYPE store_errors_total counter
store_errors_total {}
"#,
            self.chat_requests_total.load(Ordering::Relaxed),
            self.invalid_queries_total.load(Ordering::Relaxed),
            self.greeting_replies_total.load(Ordering::Relaxed),
            self.topic_replies_total.load(Ordering::Relaxed),
            self.search_requests_total.load(Ordering::Relaxed),
            self.search_latency_ms_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            self.search_requests_total.load(Ordering::Relaxed),
            self.no_match_total.load(Ordering::Relaxed),
            self.store_errors_total.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub repository: Arc<dyn CollegeRepository>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(
        version: String,
        metrics: Arc<AppMetrics>,
        repository: Arc<dyn CollegeRepository>,
    ) -> Self {
        Self {
            metrics,
            repository,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 检查数据库
    async fn check_database(&self) -> HealthCheck {
        let start = Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheck {
                name: "database".to_string(),
                status: "healthy".to_string(),
                message: Some("Connected".to_string()),
                latency_ms: Some(latency_ms),
            },
            Err(e) => {
                tracing::warn!("Database health check failed: {}", e);
                HealthCheck {
                    name: "database".to_string(),
                    status: "unhealthy".to_string(),
                    message: Some(e.to_string()),
                    latency_ms: Some(latency_ms),
                }
            }
        }
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<ObservabilityState>) -> impl IntoResponse {
    let checks = vec![state.check_database().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查数据库）
///
/// 失败时由 `AppError` 的状态码映射决定响应：连接失败 503，超时 504。
pub async fn readiness(
    State(state): State<ObservabilityState>,
) -> std::result::Result<&'static str, AppError> {
    state.repository.ping().await.map_err(|e| {
        tracing::warn!("Readiness check failed: {}", e);
        e
    })?;
    Ok("Ready")
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<ObservabilityState>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<ObservabilityState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: ObservabilityState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的日志级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要保持到进程退出。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!("{},{}={}", config.level, service_name, config.level))
        })
        .map_err(|e| AppError::Config(format!("日志级别无效: {}", e)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Internal(format!("日志初始化失败: {}", e)))?;

    Ok(guard)
}
