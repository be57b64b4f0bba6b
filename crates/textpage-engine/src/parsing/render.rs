use super::blocks::{Block, ListKind};
use super::escape::escape_html;
use super::inline::transform_inline;

/// Renders blocks to HTML, one fragment per block, each ending in a newline.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(block, &mut out);
    }
    out
}

/// Appends the HTML fragment for one block.
///
/// Only paragraphs get inline markup; headings, list items and quotes are
/// escaped only, and code bodies are escaped verbatim.
pub fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, text } => {
            out.push_str(&format!("<h{level}>{}</h{level}>", escape_html(text)));
        }
        Block::List { kind, items } => {
            let tag = match kind {
                ListKind::Unordered => "ul",
                ListKind::Ordered => "ol",
            };
            out.push_str(&format!("<{tag}>"));
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape_html(item)));
            }
            out.push_str(&format!("</{tag}>"));
        }
        Block::Quote { text } => {
            out.push_str(&format!("<blockquote>{}</blockquote>", escape_html(text)));
        }
        Block::Code { language, body } => {
            out.push_str(&format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(language),
                escape_html(body)
            ));
        }
        Block::Paragraph { text } => {
            out.push_str(&format!("<p>{}</p>", transform_inline(text)));
        }
        Block::Break => out.push_str("<br/>"),
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(block: Block) -> String {
        let mut out = String::new();
        render_block(&block, &mut out);
        out
    }

    #[test]
    fn heading_is_escaped_not_transformed() {
        assert_eq!(
            render(Block::Heading {
                level: 2,
                text: "**a** <b>".into()
            }),
            "<h2>**a** &lt;b&gt;</h2>\n"
        );
    }

    #[test]
    fn lists_render_items() {
        assert_eq!(
            render(Block::List {
                kind: ListKind::Ordered,
                items: vec!["one".into(), "*two*".into()],
            }),
            "<ol><li>one</li><li>*two*</li></ol>\n"
        );
        assert_eq!(
            render(Block::List {
                kind: ListKind::Unordered,
                items: vec!["x & y".into()],
            }),
            "<ul><li>x &amp; y</li></ul>\n"
        );
    }

    #[test]
    fn code_is_escaped_verbatim() {
        assert_eq!(
            render(Block::Code {
                language: "html".into(),
                body: "<p>**hi**</p>".into(),
            }),
            "<pre><code class=\"language-html\">&lt;p&gt;**hi**&lt;/p&gt;</code></pre>\n"
        );
    }

    #[test]
    fn paragraph_gets_inline_markup() {
        assert_eq!(
            render(Block::Paragraph {
                text: "a *b*".into()
            }),
            "<p>a <em>b</em></p>\n"
        );
    }

    #[test]
    fn quote_and_break() {
        assert_eq!(
            render(Block::Quote {
                text: "wise".into()
            }),
            "<blockquote>wise</blockquote>\n"
        );
        assert_eq!(render(Block::Break), "<br/>\n");
    }
}
