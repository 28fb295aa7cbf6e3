//! 问答 DTO
//!
//! 定义 `/chatbot` 的请求和响应数据结构。

use serde::{Deserialize, Serialize};

/// 问答请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatbotRequest {
    /// 用户消息
    pub message: Option<String>,
}

/// 问答响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatbotResponse {
    /// 回复文本
    pub response: String,
}

impl ChatbotResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
