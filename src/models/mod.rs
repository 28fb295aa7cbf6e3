//! 核心数据模型模块
//!
//! 定义学院检索结果等只读数据结构。

pub mod college;

pub use college::*;
