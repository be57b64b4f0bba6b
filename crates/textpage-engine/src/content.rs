//! Document assembly: rendered HTML plus the metadata derived from the text.

use std::sync::OnceLock;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parsing::render_html;
use crate::validate::ConvertError;

const TITLE_MAX_CHARS: usize = 100;
const SUMMARY_MAX_CHARS: usize = 150;
const SUMMARY_SENTENCES: usize = 2;
const CHARS_PER_MINUTE: usize = 200;

pub const UNTITLED: &str = "Untitled document";
pub const NO_SUMMARY: &str = "No summary available";
pub const GENERATED_TITLE: &str = "Generated by AI";
pub const GENERATED_SUMMARY: &str = "Page generated by the remote model from the supplied text.";

/// The result of converting one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub title: String,
    pub raw_text: String,
    pub rendered_html: String,
    pub summary: String,
    pub character_count: usize,
    pub estimated_read_minutes: u32,
}

impl ParsedContent {
    /// Wraps HTML produced elsewhere (the remote generator) with metadata
    /// computed from the text it was generated from.
    pub fn from_generated(raw_text: &str, html: String) -> Self {
        let character_count = raw_text.chars().count();
        Self {
            title: GENERATED_TITLE.to_string(),
            raw_text: raw_text.to_string(),
            rendered_html: html,
            summary: GENERATED_SUMMARY.to_string(),
            character_count,
            estimated_read_minutes: read_minutes(character_count),
        }
    }
}

/// Converts `text` using the wall clock for the title fallback.
pub fn convert(text: &str) -> Result<ParsedContent, ConvertError> {
    convert_at(text, Local::now())
}

/// Converts `text` with an injected clock; the output depends only on the
/// two arguments.
pub fn convert_at(text: &str, now: DateTime<Local>) -> Result<ParsedContent, ConvertError> {
    if text.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let character_count = text.chars().count();
    log::debug!("Converting {character_count} characters");

    Ok(ParsedContent {
        title: derive_title(text, now),
        raw_text: text.to_string(),
        rendered_html: render_html(text),
        summary: derive_summary(text),
        character_count,
        estimated_read_minutes: read_minutes(character_count),
    })
}

/// Picks a title from the first non-blank line.
pub fn derive_title(text: &str, now: DateTime<Local>) -> String {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    let heading = HEADING.get_or_init(|| Regex::new(r"^#+\s+(.+)$").expect("Invalid title regex"));

    let Some(first) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return UNTITLED.to_string();
    };

    if let Some(caps) = heading.captures(first) {
        return caps[1].to_string();
    }

    if first.chars().count() < TITLE_MAX_CHARS && !first.contains('.') && !first.contains('。') {
        return first.to_string();
    }

    format!("Generated document - {}", now.format("%Y-%m-%d %H:%M:%S"))
}

/// First two sentences of the text with markup characters removed.
pub fn derive_summary(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '>' | '-' | '+' | '.') && !c.is_ascii_digit())
        .collect();

    let sentences: Vec<&str> = cleaned
        .split(['。', '！', '？', '.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(SUMMARY_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return NO_SUMMARY.to_string();
    }

    let summary = sentences.join("。");
    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let cut: String = summary.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        format!("{summary}。")
    }
}

/// Whole minutes to read `characters`, never less than one.
pub fn read_minutes(characters: usize) -> u32 {
    let minutes = characters.div_ceil(CHARS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixed_now;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("# Weekly notes\nbody", "Weekly notes")]
    #[case("\n\n  ### Deep heading  \n", "Deep heading")]
    #[case("Shopping list\n- milk", "Shopping list")]
    #[case("中文标题\n正文", "中文标题")]
    #[case("   \n", "Untitled document")]
    fn title_from_first_line(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(derive_title(text, fixed_now()), expected);
    }

    #[rstest]
    #[case("This line ends with a period.")]
    #[case("这是一个句子。")]
    fn sentence_first_line_falls_back_to_timestamp(#[case] text: &str) {
        assert_eq!(
            derive_title(text, fixed_now()),
            "Generated document - 2024-03-01 09:30:00"
        );
    }

    #[test]
    fn long_first_line_falls_back_to_timestamp() {
        let line = "x".repeat(100);
        assert_eq!(
            derive_title(&line, fixed_now()),
            "Generated document - 2024-03-01 09:30:00"
        );
        assert_eq!(derive_title(&"x".repeat(99), fixed_now()), "x".repeat(99));
    }

    #[test]
    fn summary_takes_two_sentences() {
        assert_eq!(
            derive_summary("# Title\nFirst point! Second point? Third point"),
            "Title\nFirst point。Second point。"
        );
    }

    #[test]
    fn summary_strips_markup_and_digits() {
        assert_eq!(derive_summary("1. **Bold** item"), "Bold item。");
    }

    #[test]
    fn long_summary_is_truncated() {
        let text = "word ".repeat(60);
        let summary = derive_summary(&text);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[test]
    fn only_markup_has_no_summary() {
        assert_eq!(derive_summary("# ---\n> **"), NO_SUMMARY);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(200, 1)]
    #[case(201, 2)]
    #[case(50_000, 250)]
    fn read_time_rounds_up(#[case] chars: usize, #[case] minutes: u32) {
        assert_eq!(read_minutes(chars), minutes);
    }

    #[test]
    fn convert_rejects_blank() {
        assert_eq!(convert_at(" \n ", fixed_now()), Err(ConvertError::EmptyInput));
    }

    #[test]
    fn convert_fills_every_field() {
        let text = "# Hello\n\nA *short* note.";
        let parsed = convert_at(text, fixed_now()).unwrap();
        assert_eq!(
            parsed,
            ParsedContent {
                title: "Hello".into(),
                raw_text: text.into(),
                rendered_html: "<h1>Hello</h1>\n<br/>\n<p>A <em>short</em> note.</p>\n".into(),
                summary: "Hello\n\nA short note。".into(),
                character_count: 24,
                estimated_read_minutes: 1,
            }
        );
    }

    #[test]
    fn character_count_is_in_characters() {
        let parsed = convert_at("你好世界", fixed_now()).unwrap();
        assert_eq!(parsed.character_count, 4);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let parsed = convert_at("Hi", fixed_now()).unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["renderedHtml"], "<p>Hi</p>\n");
        assert_eq!(json["estimatedReadMinutes"], 1);
        assert_eq!(json["characterCount"], 2);
    }

    #[test]
    fn generated_content_uses_input_metrics() {
        let parsed = ParsedContent::from_generated(&"a".repeat(450), "<p>x</p>".into());
        assert_eq!(parsed.title, GENERATED_TITLE);
        assert_eq!(parsed.character_count, 450);
        assert_eq!(parsed.estimated_read_minutes, 3);
        assert_eq!(parsed.rendered_html, "<p>x</p>");
    }
}
