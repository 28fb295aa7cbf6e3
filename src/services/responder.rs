//! 静态应答
//!
//! 问候语按完全相等匹配，主题关键字按子串匹配（按表顺序，首个命中生效）。
//! 子串匹配可能误命中：关键字偶然出现在无关查询中时也会返回主题应答。

/// 问候语表：规范化后的短语 → 应答
pub const GREETINGS: &[(&str, &str)] = &[
    ("hi", "Hello! How can I assist you today?"),
    ("hello", "Hi there! What information do you need?"),
    (
        "hlo",
        "Hey! Ask me about polytechnic colleges, courses, or facilities.",
    ),
    ("hey", "Hey! How can I help you today?"),
    ("good morning", "Good morning! What can I do for you?"),
    ("good afternoon", "Good afternoon! How can I assist you?"),
    ("good evening", "Good evening! Let me know what you need."),
    (
        "how are you",
        "I'm just a chatbot, but I'm always ready to help!",
    ),
];

pub const SBTET_REPLY: &str = "📘 State Board of Technical Education and Training (SBTET), Andhra Pradesh\n
SBTET is responsible for the development of technical education in Andhra Pradesh. It oversees diploma courses, polytechnic colleges, curriculum development, and AP POLYCET admissions.\n
🔹 Official Website: [https://sbtetap.gov.in](https://sbtetap.gov.in)\n
🔹 Roles & Responsibilities:
   - Conducts AP POLYCET entrance exams for diploma admissions.
   - Frames syllabus and academic regulations for polytechnic courses.
   - Oversees diploma exams, results, and certifications.
   - Provides accreditation and affiliations to polytechnic colleges.\n
🔹 Contact Details:
   - 📍 Location: Vijayawada, Andhra Pradesh
   - 📞 Phone: +91-866-2489933
   - 📧 Email: support@sbtetap.gov.in
";

pub const POLYCET_REPLY: &str = "📝 AP POLYCET (Polytechnic Common Entrance Test)\n
AP POLYCET is the state-level entrance test conducted by SBTET, Andhra Pradesh for admission into diploma courses offered by government, aided and private polytechnic colleges.\n
🔹 Official Website: [https://polycetap.nic.in](https://polycetap.nic.in)\n
🔹 Eligibility:
   - Passed or appearing for SSC (10th class) or an equivalent examination.
   - Mathematics as a subject in the qualifying examination.\n
🔹 Exam Pattern:
   - 120 objective questions, 120 marks, 2 hours.
   - Mathematics: 50 marks, Physics: 40 marks, Chemistry: 30 marks.
   - No negative marking.\n
🔹 Admission:
   - Seats are allotted through web-based counselling on the basis of POLYCET rank.
   - Reservation rules of the Government of Andhra Pradesh apply.
";

pub const POLYTECHNIC_ADVANTAGES_REPLY: &str = "🎓 Advantages of Polytechnic Compared to Other Courses\n
Polytechnic courses provide practical, industry-oriented education and offer several benefits over other traditional degree programs:\n
✅ Shorter Duration: Most diploma courses last 3 years, compared to 4-5 years for engineering degrees.\n
✅ Affordable Fees: Lower tuition costs compared to B.Tech or other professional degrees.\n
✅ Early Job Opportunities: Polytechnic graduates can enter the workforce earlier and start earning.\n
✅ Practical Learning: Focus on hands-on training and real-world applications rather than just theoretical concepts.\n
✅ Industry Demand: Skilled diploma holders in engineering, computer science, and electronics are highly sought after.\n
✅ Lateral Entry to B.Tech: Polytechnic students can directly enter the second year of B.Tech, saving time and costs.\n
✅ Government & Private Jobs: Eligible for government sector jobs (like JE, ITI, PSU) and private company placements.\n
✅ Entrepreneurial Opportunities: With practical skills, students can start their own businesses or work as freelancers.\n
Polytechnic courses are a great choice for students looking for early employment and skill-based education. 🚀
";

/// 主题表：关键字 → 应答，顺序即匹配优先级
pub const TOPICS: &[(&str, &str)] = &[
    ("sbtet", SBTET_REPLY),
    ("polycet", POLYCET_REPLY),
    ("advantages of polytechnic", POLYTECHNIC_ADVANTAGES_REPLY),
];

/// 静态匹配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticReply {
    Greeting(&'static str),
    Topic {
        keyword: &'static str,
        reply: &'static str,
    },
}

impl StaticReply {
    pub fn text(&self) -> &'static str {
        match self {
            StaticReply::Greeting(reply) => *reply,
            StaticReply::Topic { reply, .. } => *reply,
        }
    }
}

/// 基于问候语表和主题表的静态应答器
#[derive(Debug, Clone, Copy)]
pub struct StaticResponder {
    greetings: &'static [(&'static str, &'static str)],
    topics: &'static [(&'static str, &'static str)],
}

impl Default for StaticResponder {
    fn default() -> Self {
        Self::new(GREETINGS, TOPICS)
    }
}

impl StaticResponder {
    pub fn new(
        greetings: &'static [(&'static str, &'static str)],
        topics: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self { greetings, topics }
    }

    /// 匹配规范化后的查询；`None` 表示需要继续检索数据库
    pub fn respond(&self, query: &str) -> Option<StaticReply> {
        if let Some(&(_, reply)) = self.greetings.iter().find(|(phrase, _)| *phrase == query) {
            return Some(StaticReply::Greeting(reply));
        }

        self.topics
            .iter()
            .find(|(keyword, _)| query.contains(keyword))
            .map(|&(keyword, reply)| StaticReply::Topic { keyword, reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hi", "Hello! How can I assist you today?")]
    #[case("good evening", "Good evening! Let me know what you need.")]
    #[case("how are you", "I'm just a chatbot, but I'm always ready to help!")]
    fn test_greeting_exact_match(#[case] query: &str, #[case] expected: &str) {
        let responder = StaticResponder::default();
        let reply = responder.respond(query).expect("greeting");
        assert!(matches!(reply, StaticReply::Greeting(_)));
        assert_eq!(reply.text(), expected);
    }

    #[test]
    fn test_greeting_requires_equality() {
        let responder = StaticResponder::default();
        // "hi" inside a longer query is not a greeting
        assert_eq!(responder.respond("hi there colleges"), None);
        assert_eq!(responder.respond("chittoor"), None);
    }

    #[test]
    fn test_topic_substring_match() {
        let responder = StaticResponder::default();
        let reply = responder.respond("what is polycet exam").expect("topic");
        assert_eq!(
            reply,
            StaticReply::Topic {
                keyword: "polycet",
                reply: POLYCET_REPLY
            }
        );
    }

    #[test]
    fn test_first_defined_topic_wins() {
        let responder = StaticResponder::default();
        let reply = responder.respond("polycet conducted by sbtet").expect("topic");
        assert_eq!(reply.text(), SBTET_REPLY);

        let reply = responder
            .respond("advantages of polytechnic after polycet")
            .expect("topic");
        assert_eq!(reply.text(), POLYCET_REPLY);
    }

    #[test]
    fn test_topic_order_is_table_order() {
        static GREETS: &[(&str, &str)] = &[];
        static ORDERED: &[(&str, &str)] = &[("b", "second"), ("a", "first")];
        let responder = StaticResponder::new(GREETS, ORDERED);
        assert_eq!(responder.respond("a b").map(|r| r.text()), Some("second"));
    }

    #[test]
    fn test_no_static_match() {
        let responder = StaticResponder::default();
        assert_eq!(responder.respond("vijayawada"), None);
        assert_eq!(responder.respond("zzzznotfound"), None);
        // entrance tests without a topic entry fall through to the college search
        assert_eq!(responder.respond("ecet coaching"), None);
    }
}
