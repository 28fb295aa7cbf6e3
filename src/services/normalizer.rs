//! 查询规范化
//!
//! 去除首尾空白、转小写，并删除常见的口语化前缀（如 "tell me about"）。

use once_cell::sync::Lazy;
use regex::Regex;

/// 需要删除的填充短语，较长的短语在前
pub const FILLER_PHRASES: &[&str] = &[
    "can you tell me about",
    "could you tell me about",
    "i want to know about",
    "tell me about",
    "information about",
    "information on",
    "details about",
    "details of",
    "show me",
];

// Matches a filler phrase on word boundaries together with its surrounding whitespace.
static FILLER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives = FILLER_PHRASES
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\s*\b(?:{})\b\s*", alternatives)).expect("filler pattern is valid")
});

/// 规范化用户输入
///
/// 删除操作重复执行直到结果不再变化，因此对已规范化的字符串再次调用结果不变。
pub fn normalize(raw: &str) -> String {
    let mut current = raw.trim().to_lowercase();
    loop {
        let stripped = FILLER_PATTERN.replace_all(&current, " ");
        let next = stripped.trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}
