use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "POLYASSIST_";

/// 数据库连接地址环境变量
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// 支持的 SSL 模式
const SSL_MODES: [&str; 3] = ["disable", "prefer", "require"];

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索顺序（后者覆盖前者）：
    /// 1. 内置默认值
    /// 2. `POLYASSIST_CONFIG` 指定的文件，否则 ./polyassist.toml
    /// 3. `POLYASSIST_` 前缀的环境变量（`__` 分隔层级）
    /// 4. `DATABASE_URL`
    pub fn load() -> Result<AppConfig, figment::Error> {
        let path = std::env::var(format!("{}CONFIG", ENV_PREFIX))
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .ignore(&["CONFIG"])
                    .split("__"),
            )
            .merge(
                Env::raw()
                    .only(&[DATABASE_URL_VAR])
                    .map(|_| "database.url".into()),
            )
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.url.trim().is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigValidationError::InvalidPoolSize);
        }

        if !SSL_MODES.contains(&config.database.ssl_mode.as_str()) {
            return Err(ConfigValidationError::InvalidSslMode(
                config.database.ssl_mode.clone(),
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置，请设置 DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("连接池大小无效，必须大于 0")]
    InvalidPoolSize,

    #[error("不支持的 SSL 模式: {0}")]
    InvalidSslMode(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("polyassist.toml")
}
