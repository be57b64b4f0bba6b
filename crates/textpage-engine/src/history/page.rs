use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Local, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::ParsedContent;
use crate::generate::GenerationMode;

const PREVIEW_CHARS: usize = 100;
const FALLBACK_TITLE_MAX_CHARS: usize = 100;
const LONG_CHARS: usize = 5000;
const MEDIUM_CHARS: usize = 1000;

/// One generated page as kept in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPage {
    pub id: String,
    pub title: String,
    /// The text the page was generated from.
    pub content: String,
    pub html_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub character_count: usize,
    pub estimated_read_minutes: u32,
    pub tags: Vec<PageTag>,
    pub generation_mode: GenerationMode,
    pub preview: String,
}

impl GeneratedPage {
    /// A fresh record for `parsed`, stamped with `now`. Not stored anywhere.
    pub fn new(
        parsed: &ParsedContent,
        original_text: &str,
        mode: GenerationMode,
        title: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_page_id(),
            title,
            content: original_text.to_string(),
            html_content: parsed.rendered_html.clone(),
            created_at: now,
            updated_at: now,
            character_count: parsed.character_count,
            estimated_read_minutes: parsed.estimated_read_minutes,
            tags: PageTag::derive(original_text),
            generation_mode: mode,
            preview: preview(original_text),
        }
    }
}

pub(crate) fn new_page_id() -> String {
    format!("page_{}", uuid::Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageTag {
    Long,
    Medium,
    Short,
    HasCode,
    HasList,
    HasLinks,
    HasHeadings,
}

impl PageTag {
    pub fn label(self) -> &'static str {
        match self {
            PageTag::Long => "long",
            PageTag::Medium => "medium",
            PageTag::Short => "short",
            PageTag::HasCode => "code",
            PageTag::HasList => "list",
            PageTag::HasLinks => "links",
            PageTag::HasHeadings => "headings",
        }
    }

    /// Tags for a page's source text. The length tag always comes first.
    pub fn derive(text: &str) -> Vec<PageTag> {
        static NUMBERED: OnceLock<Regex> = OnceLock::new();
        let numbered = NUMBERED.get_or_init(|| Regex::new(r"\d+\. ").expect("Invalid list regex"));

        let length = text.chars().count();
        let mut tags = vec![if length > LONG_CHARS {
            PageTag::Long
        } else if length > MEDIUM_CHARS {
            PageTag::Medium
        } else {
            PageTag::Short
        }];

        if text.contains('`') {
            tags.push(PageTag::HasCode);
        }
        if text.contains("- ") || text.contains("* ") || numbered.is_match(text) {
            tags.push(PageTag::HasList);
        }
        if text.contains("http") || (text.contains('[') && text.contains("](")) {
            tags.push(PageTag::HasLinks);
        }
        if text.contains('#') {
            tags.push(PageTag::HasHeadings);
        }
        tags
    }
}

impl fmt::Display for PageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Source text with anything tag-like removed, cut to 100 characters.
pub fn preview(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
    tag.replace_all(text, "").chars().take(PREVIEW_CHARS).collect()
}

/// Title used when neither the caller nor the converter supplied one.
pub fn fallback_title(text: &str, now: DateTime<Utc>) -> String {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    static EMPHASIS: OnceLock<Regex> = OnceLock::new();
    let heading = HEADING.get_or_init(|| Regex::new(r"^#+\s*").expect("Invalid heading regex"));
    let emphasis = EMPHASIS.get_or_init(|| Regex::new(r"\*\*|\*|`").expect("Invalid emphasis regex"));

    let first = text.trim().lines().next().unwrap_or_default().trim();
    if !first.is_empty() && first.chars().count() <= FALLBACK_TITLE_MAX_CHARS {
        let without_heading = heading.replace(first, "");
        return emphasis.replace_all(&without_heading, "").into_owned();
    }

    format!(
        "Generated page - {}",
        now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    )
}
