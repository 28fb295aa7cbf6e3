//! 检索结果格式化

use crate::models::college::CollegeRecord;

/// 学院之间的分隔线
pub const BLOCK_SEPARATOR: &str =
    "\n\n------------------------------------------------------\n\n";

/// 缺失联系方式时的占位文本
pub const MISSING_PLACEHOLDER: &str = "N/A";

/// 将检索结果渲染为单个文本块
///
/// 课程和设施按检索返回的顺序输出，不再排序。
pub fn format_colleges(colleges: &[CollegeRecord]) -> String {
    colleges
        .iter()
        .map(format_college)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// 渲染单个学院
pub fn format_college(college: &CollegeRecord) -> String {
    let mut lines = Vec::with_capacity(8 + college.courses.len() + college.facilities.len());

    lines.push(format!("🏫 College Name: {}", college.name));
    lines.push("📜 Courses Offered:".to_string());
    lines.extend(college.courses.iter().map(|course| bullet(course)));
    lines.push(format!("🏷 College Code: {}", college.code));
    lines.push(format!("📍 Location: {}, {}", college.address, college.district));
    lines.push(format!("📧 Email: {}", or_placeholder(college.email.as_deref())));
    lines.push(format!("📞 Phone: {}", or_placeholder(college.phone.as_deref())));
    lines.push("🏢 Facilities Available:".to_string());
    lines.extend(college.facilities.iter().map(|facility| bullet(facility)));

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

fn bullet(item: &str) -> String {
    format!("   - {}", item)
}

// NULL and blank values both render as the placeholder.
fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => MISSING_PLACEHOLDER,
    }
}
