use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::ParsedContent;

const MAX_TAGS: usize = 4;
pub const DEFAULT_TAG: &str = "Tech";
const CJK_CHARS_PER_MINUTE: f64 = 200.0;
const WORDS_PER_MINUTE: f64 = 250.0;

/// Tag name and the keywords (matched case-insensitively as substrings)
/// that earn it.
const KEYWORD_TAGS: &[(&str, &[&str])] = &[
    ("React", &["react", "jsx", "component", "hook", "state"]),
    ("Vue", &["vue", "composition", "directive", "reactive"]),
    ("TypeScript", &["typescript", "type", "interface", "generic"]),
    ("JavaScript", &["javascript", "js", "function", "async", "promise"]),
    ("CSS", &["css", "style", "flexbox", "grid", "animation"]),
    ("HTML", &["html", "element", "attribute", "semantic"]),
    ("Node.js", &["node", "npm", "express", "server"]),
    ("Tailwind CSS", &["tailwind", "utility", "responsive"]),
    ("Vite", &["vite", "build", "bundler"]),
    ("Frontend", &["frontend", "前端", "网页", "界面"]),
    ("Backend", &["backend", "后端", "服务器", "数据库", "api"]),
    ("Mobile", &["mobile", "移动", "手机", "app"]),
    ("Performance", &["performance", "性能", "优化", "加载"]),
    ("User Experience", &["ux", "用户", "体验"]),
    ("Design", &["design", "设计", "交互", "视觉"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    pub read_minutes: u32,
}

impl BlogPost {
    pub fn from_parsed(parsed: &ParsedContent, author: &str, published_at: NaiveDate) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            title: parsed.title.clone(),
            content: parsed.raw_text.clone(),
            excerpt: parsed.summary.clone(),
            author: author.to_string(),
            published_at,
            tags: keyword_tags(&parsed.raw_text),
            read_minutes: blog_read_minutes(&parsed.raw_text),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Up to four tags from the keyword table, or the default tag.
pub fn keyword_tags(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut tags: Vec<String> = KEYWORD_TAGS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .take(MAX_TAGS)
        .collect();

    if tags.is_empty() {
        tags.push(DEFAULT_TAG.to_string());
    }
    tags
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// CJK characters at 200 a minute plus other words at 250 a minute.
pub fn blog_read_minutes(text: &str) -> u32 {
    let cjk = text.chars().filter(|c| is_cjk(*c)).count();
    let without_cjk: String = text.chars().filter(|c| !is_cjk(*c)).collect();
    let words = without_cjk.split_whitespace().count();

    let minutes = (cjk as f64 / CJK_CHARS_PER_MINUTE + words as f64 / WORDS_PER_MINUTE).ceil();
    (minutes as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Nothing relevant here", vec!["Tech"])]
    #[case("A React component", vec!["React"])]
    #[case("前端界面设计", vec!["Frontend", "Design"])]
    #[case("TAILWIND utilities", vec!["Tailwind CSS"])]
    fn picks_keyword_tags(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(keyword_tags(text), expected);
    }

    #[test]
    fn at_most_four_tags() {
        let tags = keyword_tags("react vue typescript css html vite");
        assert_eq!(tags, vec!["React", "Vue", "TypeScript", "CSS"]);
    }

    #[rstest]
    #[case(String::new(), 1)]
    #[case("one two three".to_string(), 1)]
    #[case("word ".repeat(251), 2)]
    #[case("字".repeat(400), 2)]
    #[case(format!("{}{}", "字".repeat(200), " w".repeat(250)), 2)]
    fn read_time_mixes_scripts(#[case] text: String, #[case] minutes: u32) {
        assert_eq!(blog_read_minutes(&text), minutes);
    }

    #[test]
    fn tag_lookup_ignores_case() {
        let post = BlogPost {
            id: "x".into(),
            title: "t".into(),
            content: "c".into(),
            excerpt: "e".into(),
            author: "a".into(),
            published_at: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            tags: vec!["React".into()],
            read_minutes: 1,
        };
        assert!(post.has_tag("react"));
        assert!(!post.has_tag("vue"));
    }
}
