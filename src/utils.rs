use chrono::Utc;

/// Correlation id for one generation request.
pub fn new_api_id() -> String {
    format!("api-{}", Utc::now().timestamp_millis())
}

/// Returns the body of the first Markdown fenced block, or the trimmed text when there is none.
///
/// The opening fence may carry a language tag (```json, ```typescript) which is dropped.
/// Content on the same line as the tag is kept. An unterminated fence keeps the tail.
pub fn strip_code_fences(text: &str) -> String {
    let Some(start) = text.find("```") else {
        return text.trim().to_string();
    };
    let after_open = &text[start + 3..];
    let is_tag = |line: &str| line.trim().chars().all(|c| c.is_ascii_alphanumeric());
    let body = match after_open.find('\n') {
        Some(nl) if is_tag(&after_open[..nl]) => &after_open[nl + 1..],
        _ => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let body = match body.find("```") {
        Some(end) => &body[..end],
        None => body,
    };
    body.trim().to_string()
}

/// Minimal HTML text escaping for values interpolated into generated pages.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
