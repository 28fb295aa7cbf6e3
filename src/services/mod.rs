//! 服务模块

pub mod chatbot;
pub mod formatter;
pub mod normalizer;
pub mod responder;

pub use chatbot::{ChatbotService, Resolution, create_chatbot_service};
pub use responder::{StaticReply, StaticResponder};
