use serde_json::Value;

const SNIPPET_MAX_CHARS: usize = 200;

const HTML_HINT: &str = "The server returned an HTML page instead of JSON; \
    the API base URL is probably wrong or the request was redirected to a login page";

/// A response body read exactly once and classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// 204, or a 2xx with nothing in it.
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parses JSON when the content type says so or the text looks like an object/array.
    /// Falls back to raw text when parsing fails.
    pub fn decode(content_type: &str, text: String) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ResponseBody::Empty;
        }
        if content_type.to_ascii_lowercase().contains("json") || looks_like_json(trimmed) {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(text)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

pub fn looks_like_json(text: &str) -> bool {
    let t = text.trim_start();
    t.starts_with('{') || t.starts_with('[')
}

pub fn looks_like_html(text: &str) -> bool {
    let t = text.trim_start().to_ascii_lowercase();
    t.starts_with("<!doctype html") || t.starts_with("<html") || t.contains("<body")
}

/// Whitespace-collapsed prefix of a body for diagnostics.
pub fn snippet(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
    cut.push('…');
    cut
}

/// `message`, `error`, or `error.message` from a JSON error payload.
pub fn server_message(body: &ResponseBody) -> Option<String> {
    let value = body.as_json()?;
    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    value
        .get("message")
        .and_then(non_empty)
        .or_else(|| value.get("error").and_then(non_empty))
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(non_empty)
        })
}

/// Human-readable message for a non-2xx response.
pub fn failure_message(status: u16, url: &str, raw: &str, body: &ResponseBody) -> String {
    if let Some(message) = server_message(body) {
        return message;
    }
    let mut message = format!("Request failed with status {status} ({url})");
    if looks_like_html(raw) {
        message.push_str(". ");
        message.push_str(HTML_HINT);
    }
    let snip = snippet(raw);
    if !snip.is_empty() {
        message.push_str(". Response: ");
        message.push_str(&snip);
    }
    message
}
