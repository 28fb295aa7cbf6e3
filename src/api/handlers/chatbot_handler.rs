use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::time::Instant;
use tracing::debug;

use crate::api::{app_state::AppState, dto::chatbot_dto::*};

/// `POST /chatbot`
///
/// 始终返回 200；输入错误、无结果和数据库错误都通过 `response` 文本告知。
pub async fn chatbot(
    State(state): State<AppState>,
    payload: Result<Json<ChatbotRequest>, JsonRejection>,
) -> Json<ChatbotResponse> {
    let message = match payload {
        Ok(Json(request)) => request.message,
        Err(rejection) => {
            debug!("Unreadable chatbot payload: {}", rejection.body_text());
            None
        }
    };

    let start = Instant::now();
    let resolution = state.chatbot_service.resolve(message.as_deref()).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    debug!(
        "Resolved chatbot message as {} in {}ms",
        resolution.kind(),
        duration_ms
    );
    state.metrics.record_resolution(&resolution, duration_ms);

    Json(ChatbotResponse::new(resolution.into_text()))
}
