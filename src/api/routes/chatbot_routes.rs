//! Chatbot Routes
//!
//! 定义问答相关的 API 路由。

use crate::api::handlers::chatbot_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建问答路由器
pub fn create_chatbot_router() -> Router<AppState> {
    Router::new().route("/chatbot", post(chatbot))
}
