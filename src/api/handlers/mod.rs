//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod chatbot_handler;

pub use chatbot_handler::*;
