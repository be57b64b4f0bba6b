//! Full HTML documents and file names for exporting pages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};

use crate::content::ParsedContent;
use crate::generate::GenerationMode;
use crate::history::GeneratedPage;
use crate::parsing::escape::escape_html;
use crate::storage::StorageError;

const DISPLAY_TIME: &str = "%Y-%m-%d %H:%M:%S";

const STANDALONE_STYLE: &str = "\
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; background: linear-gradient(135deg, #fff5f0 0%, #ffffff 50%, #fff5f0 100%); min-height: 100vh; padding: 2rem; }
.container { max-width: 800px; margin: 0 auto; background: white; border-radius: 16px; box-shadow: 0 20px 40px rgba(0, 0, 0, 0.1); overflow: hidden; }
.header { background: linear-gradient(135deg, #f97316 0%, #ea580c 100%); color: white; padding: 2rem; text-align: center; }
.header h1 { font-size: 2rem; font-weight: 700; margin-bottom: 0.5rem; }
.header .meta { opacity: 0.9; font-size: 0.9rem; }
.content { padding: 2rem; }
.content h1, .content h2, .content h3, .content h4, .content h5, .content h6 { color: #f97316; margin: 1.5rem 0 0.75rem; font-weight: 600; }
.content p { margin-bottom: 1rem; }
.content ul, .content ol { margin-bottom: 1rem; padding-left: 1.5rem; }
.content blockquote { border-left: 4px solid #f97316; padding: 0.5rem 1rem; margin: 1rem 0; background: #fff7ed; }
.content pre { background: #1f2937; color: #f9fafb; padding: 1rem; border-radius: 8px; overflow-x: auto; margin-bottom: 1rem; }
.content code { font-family: 'Fira Code', monospace; }
.content a { color: #ea580c; }
.footer { text-align: center; padding: 1rem; font-size: 0.8rem; color: #999; border-top: 1px solid #f3f4f6; }
@media (max-width: 768px) { body { padding: 1rem; } .header, .content { padding: 1.25rem; } }";

const PROTOTYPE_STYLE: &str = "\
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f3f4f6; }
.toolbar { padding: 0.75rem 1.5rem; background: #111827; color: #f9fafb; font-size: 0.9rem; }
.stage { display: flex; justify-content: center; padding: 2rem 1rem; }
.frame { background: white; border-radius: 12px; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.12); padding: 2rem; transition: width 0.3s ease; }
.frame blockquote { border-left: 4px solid #3b82f6; padding-left: 1rem; color: #4b5563; }
.frame pre { background: #111827; color: #f9fafb; padding: 1rem; border-radius: 8px; overflow-x: auto; }";

/// Preview width for the prototype page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    pub fn width(self) -> &'static str {
        match self {
            Viewport::Desktop => "100%",
            Viewport::Tablet => "768px",
            Viewport::Mobile => "375px",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Viewport::Desktop => "desktop",
            Viewport::Tablet => "tablet",
            Viewport::Mobile => "mobile",
        };
        f.write_str(name)
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Viewport::Desktop),
            "tablet" => Ok(Viewport::Tablet),
            "mobile" => Ok(Viewport::Mobile),
            other => Err(format!(
                "Unknown viewport: {other} (expected desktop, tablet or mobile)"
            )),
        }
    }
}

fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Local => "Local parser",
        GenerationMode::Remote => "AI generated",
    }
}

/// A complete document for one page: header with title and metadata, the
/// page HTML, and a footer stamped with `generated_at`.
pub fn standalone_document(page: &GeneratedPage, generated_at: DateTime<Local>) -> String {
    let title = escape_html(&page.title);
    let created = page.created_at.with_timezone(&Local).format(DISPLAY_TIME);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
{STANDALONE_STYLE}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>{title}</h1>
      <div class="meta">Created: {created} | Mode: {mode} | Characters: {chars} | Read time: {minutes} min</div>
    </div>
    <div class="content">
{html}
    </div>
    <div class="footer">
      <p>Generated by textpage | {generated}</p>
    </div>
  </div>
</body>
</html>
"#,
        mode = mode_label(page.generation_mode),
        chars = page.character_count,
        minutes = page.estimated_read_minutes,
        html = page.html_content,
        generated = generated_at.format(DISPLAY_TIME),
    )
}

/// A UI prototype page showing the rendered HTML in a frame sized for
/// `viewport`.
pub fn prototype_document(parsed: &ParsedContent, viewport: Viewport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Prototype - {title}</title>
  <style>
{PROTOTYPE_STYLE}
  </style>
</head>
<body>
  <div class="toolbar">{title} | {viewport} preview ({width})</div>
  <div class="stage">
    <div class="frame" data-viewport="{viewport}" style="width: {width}; max-width: 100%;">
{html}
    </div>
  </div>
</body>
</html>
"#,
        title = escape_html(&parsed.title),
        width = viewport.width(),
        html = parsed.rendered_html,
    )
}

/// `<title>_<timestamp>.<ext>` with every character that is not ASCII
/// alphanumeric or CJK replaced by `_`.
pub fn download_file_name<Tz: TimeZone>(title: &str, at: &DateTime<Tz>, ext: &str) -> String
where
    Tz::Offset: fmt::Display,
{
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fa5}').contains(&c) {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_{}.{ext}", at.format("%Y-%m-%d-%H-%M-%S"))
}

pub fn page_json(page: &GeneratedPage) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(page)?)
}
