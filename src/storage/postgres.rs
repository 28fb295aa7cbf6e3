use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use bb8_postgres::PostgresConnectionManager;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use postgres_openssl::MakeTlsConnector;
use std::str::FromStr;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tracing::info;

/// 连接管理器类型
pub type PgConnectionManager = PostgresConnectionManager<MakeTlsConnector>;

/// 池中取出的连接
pub type PgConnection<'a> = bb8::PooledConnection<'a, PgConnectionManager>;

/// PostgreSQL 连接池
///
/// 每次查询独占一个连接，连接在离开作用域时归还。
#[derive(Clone)]
pub struct PgPool {
    pool: bb8::Pool<PgConnectionManager>,
    /// 连接配置
    config: DatabaseConfig,
}

impl std::fmt::Debug for PgPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPool")
            .field("state", &self.pool.state())
            .field("max_connections", &self.config.max_connections)
            .finish()
    }
}

impl PgPool {
    /// 创建连接池并验证数据库可达
    pub async fn connect(config: DatabaseConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::from_str(&config.url)
            .map_err(|e| AppError::Config(format!("数据库 URL 无效: {}", e)))?;
        pg_config.ssl_mode(parse_ssl_mode(&config.ssl_mode)?);
        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout));

        let manager = PostgresConnectionManager::new(pg_config, tls_connector(&config)?);

        let pool = bb8::Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_idle)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(manager)
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;

        let pool = Self { pool, config };
        pool.ping().await?;
        info!(
            "PostgreSQL pool ready (max_connections: {})",
            pool.config.max_connections
        );

        Ok(pool)
    }

    /// 获取连接
    pub async fn get(&self) -> Result<PgConnection<'_>> {
        Ok(self.pool.get().await?)
    }

    /// 执行 `SELECT 1` 检查连接
    pub async fn ping(&self) -> Result<()> {
        let conn = self.get().await?;
        conn.simple_query("SELECT 1").await?;
        Ok(())
    }

    /// 查询超时时间
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.config.query_timeout)
    }
}

fn parse_ssl_mode(mode: &str) -> Result<SslMode> {
    match mode {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(AppError::Config(format!("不支持的 SSL 模式: {}", other))),
    }
}

// `require` follows libpq: the channel is encrypted but the certificate is not checked
// unless verification is switched on.
fn tls_connector(config: &DatabaseConfig) -> Result<MakeTlsConnector> {
    let mut builder = SslConnector::builder(SslMethod::tls())?;
    if !config.verify_certificates {
        builder.set_verify(SslVerifyMode::NONE);
    }
    Ok(MakeTlsConnector::new(builder.build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssl_mode() {
        assert!(matches!(parse_ssl_mode("disable"), Ok(SslMode::Disable)));
        assert!(matches!(parse_ssl_mode("require"), Ok(SslMode::Require)));
        assert!(matches!(parse_ssl_mode("allow"), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: "not a url at all ::".into(),
            ..DatabaseConfig::default()
        };
        let err = PgPool::connect(config).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
