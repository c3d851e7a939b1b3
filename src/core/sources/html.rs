//! HTML to markdown-flavoured plain text.
//!
//! The output keeps the structure the field extractor looks for:
//! headings become `#` lines, `<pre>` becomes fenced code, `<code>`
//! becomes backticks and anchors become `[label](href)`. Everything
//! else is reduced to text with common entities decoded.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Regex patterns compiled once at startup
static DROPPED_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["script", "style", "noscript", "svg", "template"]
        .iter()
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
        .collect()
});

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").unwrap());

static PRE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").unwrap());

static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<code\b[^>]*>(.*?)</code\s*>").unwrap());

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#).unwrap()
});

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<li\b[^>]*>").unwrap());

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)</?(p|div|br|ul|ol|li|tr|table|section|article|header|footer|nav|main",
        r"|aside|blockquote|dl|dt|dd|hr)\b[^>]*>"
    ))
    .unwrap()
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Heuristic for bodies served without a useful content type
pub fn looks_like_html(body: &str) -> bool {
    let head = body
        .trim_start()
        .chars()
        .take(512)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html") || head.contains("<head")
}

/// Text of the `<title>` element, if any
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| collapse_inline(&decode_entities(&strip_tags(m.as_str()))))
        .filter(|title| !title.is_empty())
}

/// Convert an HTML page to text the field extractor understands
pub fn html_to_text(html: &str) -> String {
    let mut text = COMMENT.replace_all(html, "").into_owned();
    for pattern in DROPPED_BLOCKS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text = TITLE.replace_all(&text, "").into_owned();

    text = PRE
        .replace_all(&text, |caps: &Captures| {
            let code = strip_tags(&caps[1]);
            format!("\n```\n{}\n```\n", code.trim_matches('\n'))
        })
        .into_owned();

    text = HEADING
        .replace_all(&text, |caps: &Captures| {
            let level: usize = caps[1].parse().unwrap_or(1);
            let heading = collapse_inline(&strip_tags(&caps[2]));
            format!("\n{} {}\n", "#".repeat(level), heading)
        })
        .into_owned();

    text = CODE
        .replace_all(&text, |caps: &Captures| {
            let code = collapse_inline(&strip_tags(&caps[1]));
            if code.is_empty() {
                String::new()
            } else {
                format!("`{code}`")
            }
        })
        .into_owned();

    text = ANCHOR
        .replace_all(&text, |caps: &Captures| {
            let label = collapse_inline(&strip_tags(&caps[2]));
            if label.is_empty() {
                String::new()
            } else {
                format!("[{}]({})", label, &caps[1])
            }
        })
        .into_owned();

    text = LIST_ITEM.replace_all(&text, "\n- ").into_owned();
    text = BLOCK_BREAK.replace_all(&text, "\n").into_owned();
    text = strip_tags(&text);
    text = decode_entities(&text);

    tidy_lines(&text)
}

/// Decode named and numeric character references
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse().ok().and_then(char::from_u32).map(String::from);
    }

    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "-",
        "mdash" => "-",
        "hellip" => "...",
        "lsquo" | "rsquo" => "'",
        "ldquo" | "rdquo" => "\"",
        "copy" => "(c)",
        _ => return None,
    };
    Some(decoded.to_string())
}

fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

fn collapse_inline(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim trailing whitespace per line (code indentation is kept) and
/// squeeze runs of blank lines.
fn tidy_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let joined = lines.join("\n");
    BLANK_LINES
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}
