//! Text -> display-safe markup conversion for message bodies and errors.
//!
//! The whole accumulated buffer is reformatted on every streaming chunk, so
//! everything here must be pure and cheap. An unterminated fence mid-stream
//! simply leaves its backticks literal until the closing fence arrives.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w*)(.*?)```").expect("fence regex"))
}

fn inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("inline code regex"))
}

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Convert raw message text to display markup.
///
/// Applied in order: fenced code blocks (optional language token after the
/// opening fence) with escaped, trimmed bodies; single-backtick inline code;
/// newlines to `<br>`. Inline code content is passed through unescaped;
/// hosts depend on that, so it stays even though fenced bodies are escaped.
pub fn format_content(content: &str) -> String {
    let fenced = fence_re().replace_all(content, |caps: &Captures| {
        let language = &caps[1];
        let code = caps[2].trim();
        format!(
            "<pre class=\"code-block {language}\"><code>{}</code></pre>",
            escape_html(code)
        )
    });
    let inlined = inline_re().replace_all(&fenced, "<code>$1</code>");
    inlined.replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(escaped: &str) -> String {
        escaped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#039;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn fenced_block_round_trips_through_escaping() {
        let formatted = format_content("```js\nconst x=1;\n```");
        assert_eq!(
            formatted,
            "<pre class=\"code-block js\"><code>const x=1;</code></pre>"
        );
        let inner = formatted
            .strip_prefix("<pre class=\"code-block js\"><code>")
            .and_then(|rest| rest.strip_suffix("</code></pre>"))
            .expect("code element wrapper");
        assert_eq!(unescape(inner), "const x=1;");
    }

    #[test]
    fn fence_body_escapes_html_significant_chars() {
        let formatted = format_content("```\n<b>&\"'</b>\n```");
        assert!(formatted.contains("&lt;b&gt;&amp;&quot;&#039;&lt;/b&gt;"));
        assert!(!formatted.contains("<b>"));
    }

    #[test]
    fn fence_without_language_keeps_bare_class() {
        let formatted = format_content("```\nok\n```");
        assert!(formatted.starts_with("<pre class=\"code-block \"><code>"));
    }

    #[test]
    fn inline_code_is_wrapped_but_not_escaped() {
        assert_eq!(format_content("use `<id>` here"), "use <code><id></code> here");
    }

    #[test]
    fn newlines_become_breaks() {
        assert_eq!(format_content("a\nb\nc"), "a<br>b<br>c");
    }

    #[test]
    fn unterminated_fence_stays_literal() {
        let formatted = format_content("```js\nconst x");
        assert!(formatted.contains("```js"));
        assert!(!formatted.contains("<pre"));
    }

    #[test]
    fn reformatting_the_same_buffer_is_stable() {
        let text = "start ```py\nprint(1)\n``` end `x<1`";
        assert_eq!(format_content(text), format_content(text));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(format_content("hello"), "hello");
    }
}
