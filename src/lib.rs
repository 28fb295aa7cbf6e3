//! Polyassist - 高职院校问答服务
//!
//! 通过单个 HTTP 接口回答关于高职（Polytechnic）院校、课程和地区的自然语言查询：
//! 问候语和常见主题直接返回预置答复，其余查询在学院数据库中模糊检索。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
