use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 连接地址
    pub url: String,
    /// 连接池最大大小
    pub max_connections: u32,
    /// 连接池最小空闲连接数
    pub min_idle: Option<u32>,
    /// 连接超时（秒）
    pub connection_timeout: u64,
    /// 查询超时（秒）
    pub query_timeout: u64,
    /// SSL 模式: "disable"、"prefer" 或 "require"
    pub ssl_mode: String,
    /// 是否校验服务端证书
    pub verify_certificates: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_idle: None,
            connection_timeout: 10,
            query_timeout: 5,
            ssl_mode: "require".into(),
            verify_certificates: false,
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 允许的跨域来源，"*" 表示任意来源
    pub cors_origins: Vec<String>,
    /// 最大请求体大小（字节）
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            cors_origins: vec!["*".into()],
            max_request_size: 64 * 1024,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            app_name: "polyassist".into(),
            environment: "development".into(),
        }
    }
}

impl AppConfig {
    /// 服务监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
