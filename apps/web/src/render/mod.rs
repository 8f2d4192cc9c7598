//! Server-side HTML rendering. Pages are plain strings assembled here; every
//! piece of user or database text goes through `escape` first.

pub mod pages;

pub use pages::*;

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes `value` for embedding inside a `<script>` element.
pub(crate) fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
nav { background: #1f2937; padding: 0.75rem 1.5rem; }
nav a { color: #e5e7eb; margin-right: 1rem; text-decoration: none; }
main { max-width: 960px; margin: 2rem auto; background: #fff; padding: 2rem; border-radius: 8px; }
textarea { width: 100%; min-height: 10rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e5e7eb; vertical-align: top; }
.error { color: #b91c1c; font-weight: 600; }
.fake { color: #b91c1c; }
.real { color: #15803d; }
.stats span { display: inline-block; margin-right: 2rem; }
"#;

/// Wraps `body` in the shared page chrome.
pub(crate) fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} · JobGuard</title>
<style>{STYLE}</style>
</head>
<body>
<nav>
<a href="/">Home</a>
<a href="/history">History</a>
<a href="/admin_dashboard">Dashboard</a>
<a href="/retrain_logs">Retrain logs</a>
<a href="/logout">Logout</a>
</nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}
