//! # 行内替换
//!
//! 处理属性引用 `{name}`、特殊字符转义和行内标记
//! (`*strong*`, `_emphasis_`, `` `mono` ``, 链接)。
//!
//! ## 依赖关系
//! - 被 `parsers/asciidoc.rs` 调用（属性替换）
//! - 被 `converters/` 调用（转义与行内标记）

use crate::models::Attributes;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ATTRIBUTE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_][A-Za-z0-9_-]*)\}").expect("valid regex"));

static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:link:([^\s\["]+)|(https?://[^\s\["]+))\[([^\]]*)\]"#).expect("valid regex")
});

static MONOSPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"));

static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("valid regex"));

static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_\n]+?)_").expect("valid regex"));

/// 各后端的行内标记输出方式
///
/// `text` 已转义；`link` 的 `target` 为原始文本，由实现负责转义为属性值。
pub trait InlineStyle {
    fn strong(&self, text: &str) -> String;
    fn emphasis(&self, text: &str) -> String;
    fn monospace(&self, text: &str) -> String;
    fn link(&self, target: &str, text: &str) -> String;
}

/// 替换属性引用，未定义的引用保持原样
pub fn substitute_attributes(text: &str, attributes: &Attributes) -> String {
    if !text.contains('{') {
        return text.to_string();
    }
    ATTRIBUTE_REF
        .replace_all(text, |caps: &Captures| match attributes.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// 转义 XML/HTML 特殊字符
pub fn escape_special(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 转义后应用行内标记
///
/// 链接和等宽片段先切出，其内容不再参与强调替换。
pub fn format_inline(text: &str, style: &impl InlineStyle) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in LINK.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        let target = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let label = if caps[3].is_empty() { target } else { &caps[3] };

        out.push_str(&format_spans(&text[last..m.start()], style));
        out.push_str(&style.link(target, &escape_special(label)));
        last = m.end();
    }

    out.push_str(&format_spans(&text[last..], style));
    out
}

fn format_spans(text: &str, style: &impl InlineStyle) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in MONOSPACE.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        out.push_str(&format_quotes(&text[last..m.start()], style));
        out.push_str(&style.monospace(&escape_special(&caps[1])));
        last = m.end();
    }

    out.push_str(&format_quotes(&text[last..], style));
    out
}

fn format_quotes(text: &str, style: &impl InlineStyle) -> String {
    let escaped = escape_special(text);
    let strong = replace_constrained(&escaped, &STRONG, |t| style.strong(t));
    replace_constrained(&strong, &EMPHASIS, |t| style.emphasis(t))
}

/// 仅替换两侧不紧邻单词字符的标记
fn replace_constrained(text: &str, re: &Regex, render: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if before.is_some_and(char::is_alphanumeric) || after.is_some_and(char::is_alphanumeric) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&render(&caps[1]));
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tags;

    impl InlineStyle for Tags {
        fn strong(&self, text: &str) -> String {
            format!("<b>{}</b>", text)
        }
        fn emphasis(&self, text: &str) -> String {
            format!("<i>{}</i>", text)
        }
        fn monospace(&self, text: &str) -> String {
            format!("<tt>{}</tt>", text)
        }
        fn link(&self, target: &str, text: &str) -> String {
            format!("<a {}>{}</a>", target, text)
        }
    }

    #[test]
    fn test_substitute_attributes() {
        let mut attrs = Attributes::new();
        attrs.insert("version".to_string(), "1.2".to_string());
        assert_eq!(
            substitute_attributes("Release {version} ({missing})", &attrs),
            "Release 1.2 ({missing})"
        );
    }

    #[test]
    fn test_escape_special() {
        assert_eq!(escape_special("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_format_inline_markup() {
        assert_eq!(
            format_inline("a *bold* and _it_ with `code`", &Tags),
            "a <b>bold</b> and <i>it</i> with <tt>code</tt>"
        );
        assert_eq!(format_inline("*a* *b*", &Tags), "<b>a</b> <b>b</b>");
    }

    #[test]
    fn test_format_inline_constrained() {
        assert_eq!(format_inline("snake_case_name", &Tags), "snake_case_name");
        assert_eq!(format_inline("2*3*4", &Tags), "2*3*4");
    }

    #[test]
    fn test_format_inline_links() {
        assert_eq!(
            format_inline("see https://example.org[the site]", &Tags),
            "see <a https://example.org>the site</a>"
        );
        assert_eq!(
            format_inline("link:other.adoc[]", &Tags),
            "<a other.adoc>other.adoc</a>"
        );
    }

    #[test]
    fn test_format_inline_link_target_untouched() {
        assert_eq!(
            format_inline("https://example.org/_tmp_/*x*[label] and _it_", &Tags),
            "<a https://example.org/_tmp_/*x*>label</a> and <i>it</i>"
        );
        assert_eq!(format_inline("`_raw_` _it_", &Tags), "<tt>_raw_</tt> <i>it</i>");
    }

    #[test]
    fn test_format_inline_rejects_quoted_target() {
        assert_eq!(
            format_inline("link:a\"onmouseover=\"x[label]", &Tags),
            "link:a\"onmouseover=\"x[label]"
        );
    }

    #[test]
    fn test_format_inline_escapes_label() {
        assert_eq!(
            format_inline("https://example.org[a <b>]", &Tags),
            "<a https://example.org>a &lt;b&gt;</a>"
        );
    }
}
