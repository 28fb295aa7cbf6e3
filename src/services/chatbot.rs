//! 问答服务
//!
//! 按固定顺序解析一条消息：输入校验 → 规范化 → 静态应答 → 数据库检索 → 格式化。
//! 每次调用相互独立，不保留任何会话状态。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use crate::services::formatter::format_colleges;
use crate::services::normalizer::normalize;
use crate::services::responder::{StaticReply, StaticResponder};
use crate::storage::repository::CollegeRepository;

pub const INVALID_QUERY_REPLY: &str = "Please enter a valid query.";
pub const NO_MATCH_REPLY: &str =
    "No matching colleges found. Try searching by district, course, or college name.";
pub const STORE_FAILURE_REPLY: &str = "Database error. Please try again later.";

/// 消息解析结果，每个分支都是终止状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 空消息或仅含填充短语
    InvalidQuery,
    /// 问候语
    Greeting(&'static str),
    /// 主题关键字
    Topic {
        keyword: &'static str,
        reply: &'static str,
    },
    /// 检索到的学院，已格式化
    Colleges { count: usize, text: String },
    /// 检索无结果
    NoMatch,
    /// 数据库访问失败
    StoreFailure,
}

impl Resolution {
    /// 返回给用户的文本
    pub fn text(&self) -> &str {
        match self {
            Resolution::InvalidQuery => INVALID_QUERY_REPLY,
            Resolution::Greeting(reply) => *reply,
            Resolution::Topic { reply, .. } => *reply,
            Resolution::Colleges { text, .. } => text.as_str(),
            Resolution::NoMatch => NO_MATCH_REPLY,
            Resolution::StoreFailure => STORE_FAILURE_REPLY,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Resolution::Colleges { text, .. } => text,
            other => other.text().to_string(),
        }
    }

    /// 用于日志和指标的分类名
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::InvalidQuery => "invalid_query",
            Resolution::Greeting(_) => "greeting",
            Resolution::Topic { .. } => "topic",
            Resolution::Colleges { .. } => "colleges",
            Resolution::NoMatch => "no_match",
            Resolution::StoreFailure => "store_failure",
        }
    }
}

impl From<StaticReply> for Resolution {
    fn from(reply: StaticReply) -> Self {
        match reply {
            StaticReply::Greeting(reply) => Resolution::Greeting(reply),
            StaticReply::Topic { keyword, reply } => Resolution::Topic { keyword, reply },
        }
    }
}

/// 问答服务 trait
#[async_trait]
pub trait ChatbotService: Send + Sync {
    /// 解析一条原始消息
    async fn resolve(&self, message: Option<&str>) -> Resolution;
}

/// 问答服务实现
pub struct ChatbotServiceImpl {
    responder: StaticResponder,
    repository: Arc<dyn CollegeRepository>,
}

impl ChatbotServiceImpl {
    pub fn new(responder: StaticResponder, repository: Arc<dyn CollegeRepository>) -> Self {
        Self {
            responder,
            repository,
        }
    }
}

#[async_trait]
impl ChatbotService for ChatbotServiceImpl {
    async fn resolve(&self, message: Option<&str>) -> Resolution {
        let raw = match message {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Resolution::InvalidQuery,
        };

        let query = normalize(raw);
        if query.is_empty() {
            debug!("Message reduced to nothing after normalization: {:?}", raw);
            return Resolution::InvalidQuery;
        }

        if let Some(reply) = self.responder.respond(&query) {
            debug!("Static reply for query: {}", query);
            return reply.into();
        }

        match self.repository.search(&query).await {
            Ok(colleges) if colleges.is_empty() => Resolution::NoMatch,
            Ok(colleges) => Resolution::Colleges {
                count: colleges.len(),
                text: format_colleges(&colleges),
            },
            Err(e) => {
                error!("College search failed for query {:?}: {}", query, e);
                Resolution::StoreFailure
            }
        }
    }
}

/// 创建问答服务
pub fn create_chatbot_service(repository: Arc<dyn CollegeRepository>) -> Box<dyn ChatbotService> {
    Box::new(ChatbotServiceImpl::new(StaticResponder::default(), repository))
}
