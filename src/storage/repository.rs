use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::college::CollegeRecord;
use crate::storage::postgres::PgPool;

/// 按名称、地区或课程名模糊检索学院
///
/// `$1` 是已转义的 `%term%`，每个学院聚合为一行，
/// 无课程或设施的学院得到空数组。
pub const SEARCH_COLLEGES_SQL: &str = r#"
SELECT c.Name::text,
       c.Code::text,
       c.Address::text,
       c.District::text,
       c.Email::text,
       c.Phone::text,
       ARRAY_REMOVE(ARRAY_AGG(DISTINCT co.CourseName || ' (' || co.Seats || ' seats)'), NULL)::text[] AS Courses,
       ARRAY_REMOVE(ARRAY_AGG(DISTINCT f.FacilityName::text), NULL)::text[] AS Facilities
FROM Colleges c
LEFT JOIN Courses co ON c.CollegeID = co.CollegeID
LEFT JOIN Facilities f ON c.CollegeID = f.CollegeID
WHERE LOWER(c.Name) LIKE $1 OR LOWER(c.District) LIKE $1 OR LOWER(co.CourseName) LIKE $1
GROUP BY c.CollegeID
ORDER BY c.Name
"#;

/// 学院检索仓储 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollegeRepository: Send + Sync {
    /// 检索名称、地区或课程名包含 `term` 的学院（不区分大小写）
    async fn search(&self, term: &str) -> Result<Vec<CollegeRecord>>;

    /// 检查存储是否可用
    async fn ping(&self) -> Result<()>;
}

/// PostgreSQL 学院仓储实现
#[derive(Debug, Clone)]
pub struct PgCollegeRepository {
    pool: PgPool,
}

impl PgCollegeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_search(&self, pattern: &str) -> Result<Vec<CollegeRecord>> {
        let conn = self.pool.get().await?;
        let rows = conn.query(SEARCH_COLLEGES_SQL, &[&pattern]).await?;
        rows.iter()
            .map(college_from_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(AppError::from)
    }
}

#[async_trait]
impl CollegeRepository for PgCollegeRepository {
    async fn search(&self, term: &str) -> Result<Vec<CollegeRecord>> {
        let pattern = like_pattern(term);
        debug!("Searching colleges with pattern: {}", pattern);

        let timeout = self.pool.query_timeout();
        tokio::time::timeout(timeout, self.run_search(&pattern))
            .await
            .map_err(|_| AppError::Timeout(format!("学院检索超过 {:?}", timeout)))?
    }

    async fn ping(&self) -> Result<()> {
        let timeout = self.pool.query_timeout();
        tokio::time::timeout(timeout, self.pool.ping())
            .await
            .map_err(|_| AppError::Timeout(format!("数据库检查超过 {:?}", timeout)))?
    }
}

/// 构造不区分锚点的 LIKE 模式，转义 `\`、`%`、`_`
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn college_from_row(row: &Row) -> std::result::Result<CollegeRecord, tokio_postgres::Error> {
    Ok(CollegeRecord {
        name: row.try_get(0)?,
        code: row.try_get(1)?,
        address: row.try_get(2)?,
        district: row.try_get(3)?,
        email: row.try_get(4)?,
        phone: row.try_get(5)?,
        courses: row.try_get::<_, Option<Vec<String>>>(6)?.unwrap_or_default(),
        facilities: row.try_get::<_, Option<Vec<String>>>(7)?.unwrap_or_default(),
    })
}
