//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(String),

    /// 连接错误
    #[error("连接错误: {0}")]
    Connection(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl From<tokio_postgres::Error> for AppError {
    fn from(e: tokio_postgres::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<bb8::RunError<tokio_postgres::Error>> for AppError {
    fn from(e: bb8::RunError<tokio_postgres::Error>) -> Self {
        match e {
            bb8::RunError::User(e) => AppError::Connection(e.to_string()),
            bb8::RunError::TimedOut => AppError::Timeout("等待数据库连接超时".to_string()),
        }
    }
}

impl From<openssl::error::ErrorStack> for AppError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        AppError::Config(format!("TLS 初始化失败: {}", e))
    }
}

/// 运维端点的错误响应
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::Timeout(_) => (504, "TIMEOUT".to_string()),
            AppError::Connection(_) => (503, "SERVICE_UNAVAILABLE".to_string()),
            AppError::Database(_) => (500, "DATABASE_ERROR".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
