//! 存储层模块
//!
//! 提供只读的学院数据访问，基于 PostgreSQL 连接池。

pub mod postgres;
pub mod repository;

pub use postgres::PgPool;
pub use repository::{CollegeRepository, PgCollegeRepository};
