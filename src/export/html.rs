//! Conversion of rich-text (HTML) cells to markdown.

use regex::Regex;
use std::sync::LazyLock;

/// Converts an HTML fragment to markdown.
pub trait HtmlConverter {
    fn convert(&self, html: &str) -> String;
}

/// A small regex-driven converter covering the markup Quiver's rich-text
/// editor produces. Unknown tags are dropped, their text kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicHtmlConverter;

struct Rule {
    re: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        re: Regex::new(pattern).unwrap(),
        replacement,
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"\r\n?", "\n"),
        rule(r"(?is)<(script|style)[^>]*>.*?</(script|style)>", ""),
        rule(r"(?i)<br\s*/?>", "\n"),
        rule(r"(?is)<h1[^>]*>(.*?)</h1>", "\n\n# $1\n\n"),
        rule(r"(?is)<h2[^>]*>(.*?)</h2>", "\n\n## $1\n\n"),
        rule(r"(?is)<h3[^>]*>(.*?)</h3>", "\n\n### $1\n\n"),
        rule(r"(?is)<h4[^>]*>(.*?)</h4>", "\n\n#### $1\n\n"),
        rule(r"(?is)<h5[^>]*>(.*?)</h5>", "\n\n##### $1\n\n"),
        rule(r"(?is)<h6[^>]*>(.*?)</h6>", "\n\n###### $1\n\n"),
        rule(r"(?is)<(?:b|strong)(?:\s[^>]*)?>(.*?)</(?:b|strong)>", "**$1**"),
        rule(r"(?is)<(?:i|em)(?:\s[^>]*)?>(.*?)</(?:i|em)>", "*$1*"),
        rule(r"(?is)<code(?:\s[^>]*)?>(.*?)</code>", "`$1`"),
        rule(
            r#"(?is)<img\s[^>]*?src\s*=\s*["']([^"']*)["'][^>]*>"#,
            "![]($1)",
        ),
        rule(
            r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a>"#,
            "[$2]($1)",
        ),
        rule(r"(?i)<li(?:\s[^>]*)?>", "\n- "),
        rule(r"(?i)</(?:p|div|ul|ol|blockquote|pre|table|tr)>", "\n\n"),
        rule(r"(?s)<[^>]+>", ""),
        rule(r"&nbsp;", " "),
        rule(r"&lt;", "<"),
        rule(r"&gt;", ">"),
        rule(r"&quot;", "\""),
        rule(r"&#39;|&apos;", "'"),
        rule(r"&amp;", "&"),
        rule(r"[ \t]+\n", "\n"),
        rule(r"\n{3,}", "\n\n"),
    ]
});

impl HtmlConverter for BasicHtmlConverter {
    fn convert(&self, html: &str) -> String {
        let markdown = RULES.iter().fold(html.to_string(), |text, rule| {
            rule.re.replace_all(&text, rule.replacement).into_owned()
        });
        markdown.trim().to_string()
    }
}
