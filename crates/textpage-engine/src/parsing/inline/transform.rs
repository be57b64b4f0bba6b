use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::parsing::escape::escape_html;

use super::kinds::{CodeSpan, Emphasis, Link, Strong};

/// Compiled inline patterns, built once per process.
struct InlineRules {
    code: Regex,
    strong: [Regex; 2],
    emphasis: [Regex; 2],
    link: Regex,
}

impl InlineRules {
    fn get() -> &'static InlineRules {
        static RULES: OnceLock<InlineRules> = OnceLock::new();
        RULES.get_or_init(|| {
            let compile = |pattern: &str| Regex::new(pattern).expect("Invalid inline regex");
            InlineRules {
                code: compile(CodeSpan::PATTERN),
                strong: Strong::PATTERNS.map(compile),
                emphasis: Emphasis::PATTERNS.map(compile),
                link: compile(Link::PATTERN),
            }
        })
    }

    /// Applies bold, italic and link rules (in that order) to text outside code spans.
    fn markup(&self, text: &str) -> String {
        let mut out = text.to_string();
        for re in &self.strong {
            out = wrap_all(re, &out, Strong::TAG);
        }
        for re in &self.emphasis {
            out = wrap_all(re, &out, Emphasis::TAG);
        }
        self.link
            .replace_all(&out, |caps: &Captures<'_>| {
                format!(
                    r#"<a href="{}" target="{}" rel="{}">{}</a>"#,
                    &caps[2],
                    Link::TARGET,
                    Link::REL,
                    &caps[1]
                )
            })
            .into_owned()
    }
}

fn wrap_all(re: &Regex, text: &str, tag: &str) -> String {
    re.replace_all(text, |caps: &Captures<'_>| {
        format!("<{tag}>{}</{tag}>", &caps[1])
    })
    .into_owned()
}

/// Transforms one paragraph line into inline HTML.
///
/// The line is escaped first, then code spans are cut out as raw zones and
/// the remaining text gets bold, italic and link markup. The caller wraps the
/// result in a paragraph element.
///
/// # Examples
///
/// ```rust
/// # use textpage_engine::parsing::inline::transform_inline;
/// assert_eq!(
///     transform_inline("use `a<b` for **speed**"),
///     "use <code>a&lt;b</code> for <strong>speed</strong>"
/// );
/// ```
pub fn transform_inline(line: &str) -> String {
    let escaped = escape_html(line);
    let rules = InlineRules::get();

    let mut out = String::with_capacity(escaped.len() + 16);
    let mut text_start = 0;

    for caps in rules.code.captures_iter(&escaped) {
        let (Some(full), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&rules.markup(&escaped[text_start..full.start()]));
        out.push_str(&format!(
            "<{tag}>{}</{tag}>",
            inner.as_str(),
            tag = CodeSpan::TAG
        ));
        text_start = full.end();
    }

    out.push_str(&rules.markup(&escaped[text_start..]));
    out
}
