use std::borrow::Cow;

/// Escapes the five HTML-significant characters (`&`, `<`, `>`, `"`, `'`).
///
/// Every piece of user text goes through here before any markup is added,
/// so angle brackets typed by the user can never become tags.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_html("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn escapes_all_reserved_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn script_tag_is_neutralised() {
        let out = escape_html("<script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn leaves_non_ascii_alone() {
        assert_eq!(escape_html("中文 – ok"), "中文 – ok");
    }
}
