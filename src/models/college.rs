use serde::{Deserialize, Serialize};

/// 学院检索结果
///
/// 每个学院在一次检索中只出现一次，课程与设施已去重聚合。
/// 课程条目的格式为 `"{CourseName} ({Seats} seats)"`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeRecord {
    /// 学院名称
    pub name: String,
    /// 学院代码
    pub code: String,
    /// 地址
    pub address: String,
    /// 所在地区
    pub district: String,
    /// 邮箱
    pub email: Option<String>,
    /// 电话
    pub phone: Option<String>,
    /// 开设课程（含招生名额）
    pub courses: Vec<String>,
    /// 校内设施
    pub facilities: Vec<String>,
}

impl CollegeRecord {
    /// 创建不含课程与设施的学院记录
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        address: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            address: address.into(),
            district: district.into(),
            email: None,
            phone: None,
            courses: Vec::new(),
            facilities: Vec::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// 添加课程，格式与数据库聚合结果一致
    pub fn with_course(mut self, course_name: &str, seats: i32) -> Self {
        self.courses.push(course_label(course_name, seats));
        self
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facilities.push(facility.into());
        self
    }
}

/// 课程展示文本
pub fn course_label(course_name: &str, seats: i32) -> String {
    format!("{} ({} seats)", course_name, seats)
}
