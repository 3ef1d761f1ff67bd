//! # HTML5 转换器
//!
//! 生成 HTML5 页面（含页眉页脚）或嵌入式 HTML 片段。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 使用
//! - 使用 `parsers/inline.rs`

use super::{escape_attribute_value, Converter};
use crate::document::Document;
use crate::models::Block;
use crate::parsers::inline::{escape_special, format_inline, InlineStyle};

/// HTML5 转换器
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5Converter;

impl InlineStyle for Html5Converter {
    fn strong(&self, text: &str) -> String {
        format!("<strong>{}</strong>", text)
    }

    fn emphasis(&self, text: &str) -> String {
        format!("<em>{}</em>", text)
    }

    fn monospace(&self, text: &str) -> String {
        format!("<code>{}</code>", text)
    }

    fn link(&self, target: &str, text: &str) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            escape_attribute_value(target),
            text
        )
    }
}

impl Converter for Html5Converter {
    fn convert(&self, doc: &Document) -> String {
        let mut body = String::new();
        for block in doc.blocks() {
            self.block(block, &mut body);
        }

        if !doc.header_footer() {
            return body;
        }

        let mut out = String::new();
        let lang = doc.attr("lang").unwrap_or("en");
        let page_title = doc
            .title()
            .or_else(|| doc.docname())
            .unwrap_or("Untitled");

        out.push_str("<!DOCTYPE html>\n");
        out.push_str(&format!("<html lang=\"{}\">\n", escape_attribute_value(lang)));
        out.push_str("<head>\n<meta charset=\"UTF-8\">\n");
        out.push_str(&format!(
            "<meta name=\"generator\" content=\"adoc-batch {}\">\n",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(author) = doc.attr("author") {
            out.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                escape_attribute_value(author)
            ));
        }
        out.push_str(&format!("<title>{}</title>\n", escape_special(page_title)));
        out.push_str("</head>\n");
        out.push_str(&format!(
            "<body class=\"{}\">\n",
            escape_attribute_value(doc.attr("doctype").unwrap_or("article"))
        ));

        out.push_str("<div id=\"header\">\n");
        if let Some(title) = doc.title() {
            out.push_str(&format!("<h1>{}</h1>\n", format_inline(title, self)));
        }
        if let Some(author) = doc.attr("author") {
            out.push_str(&format!(
                "<div class=\"details\">\n<span id=\"author\" class=\"author\">{}</span>\n</div>\n",
                escape_special(author)
            ));
        }
        out.push_str("</div>\n");

        out.push_str("<div id=\"content\">\n");
        out.push_str(&body);
        out.push_str("</div>\n");

        out.push_str("<div id=\"footer\">\n<div id=\"footer-text\">\n");
        if let Some(updated) = doc.attr("docdatetime") {
            out.push_str(&format!("Last updated {}\n", escape_special(updated)));
        }
        out.push_str("</div>\n</div>\n</body>\n</html>\n");
        out
    }
}

impl Html5Converter {
    fn block(&self, block: &Block, out: &mut String) {
        match block {
            Block::Section {
                level,
                id,
                title,
                blocks,
            } => {
                let heading = (level + 1).min(6);
                out.push_str(&format!("<div class=\"sect{}\">\n", level));
                out.push_str(&format!(
                    "<h{h} id=\"{}\">{}</h{h}>\n",
                    escape_attribute_value(id),
                    format_inline(title, self),
                    h = heading
                ));
                if *level == 1 {
                    out.push_str("<div class=\"sectionbody\">\n");
                }
                for child in blocks {
                    self.block(child, out);
                }
                if *level == 1 {
                    out.push_str("</div>\n");
                }
                out.push_str("</div>\n");
            }
            Block::Paragraph { title, text } => {
                out.push_str("<div class=\"paragraph\">\n");
                self.title(title, out);
                out.push_str(&format!("<p>{}</p>\n", format_inline(text, self)));
                out.push_str("</div>\n");
            }
            Block::Listing { title, lines } => {
                self.verbatim("listingblock", title, lines, out);
            }
            Block::Literal { title, lines } => {
                self.verbatim("literalblock", title, lines, out);
            }
            Block::UnorderedList { title, items } => {
                out.push_str("<div class=\"ulist\">\n");
                self.title(title, out);
                out.push_str("<ul>\n");
                self.items(items, out);
                out.push_str("</ul>\n</div>\n");
            }
            Block::OrderedList { title, items } => {
                out.push_str("<div class=\"olist arabic\">\n");
                self.title(title, out);
                out.push_str("<ol class=\"arabic\">\n");
                self.items(items, out);
                out.push_str("</ol>\n</div>\n");
            }
            Block::Admonition { kind, title, text } => {
                out.push_str(&format!("<div class=\"admonitionblock {}\">\n", kind.name()));
                out.push_str("<table>\n<tr>\n<td class=\"icon\">\n");
                out.push_str(&format!("<div class=\"title\">{}</div>\n", kind.caption()));
                out.push_str("</td>\n<td class=\"content\">\n");
                self.title(title, out);
                out.push_str(&format!("{}\n", format_inline(text, self)));
                out.push_str("</td>\n</tr>\n</table>\n</div>\n");
            }
        }
    }

    fn title(&self, title: &Option<String>, out: &mut String) {
        if let Some(title) = title {
            out.push_str(&format!("<div class=\"title\">{}</div>\n", format_inline(title, self)));
        }
    }

    fn items(&self, items: &[String], out: &mut String) {
        for item in items {
            out.push_str(&format!("<li>\n<p>{}</p>\n</li>\n", format_inline(item, self)));
        }
    }

    fn verbatim(&self, class: &str, title: &Option<String>, lines: &[String], out: &mut String) {
        out.push_str(&format!("<div class=\"{}\">\n", class));
        self.title(title, out);
        out.push_str("<div class=\"content\">\n");
        out.push_str(&format!("<pre>{}</pre>\n", escape_special(&lines.join("\n"))));
        out.push_str("</div>\n</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderOptions;

    fn render(text: &str, header_footer: bool) -> String {
        let lines = text.lines().map(str::to_string).collect();
        let options = RenderOptions::new().with_header_footer(header_footer);
        Html5Converter.convert(&Document::new(lines, options).unwrap())
    }

    #[test]
    fn test_embedded_paragraph() {
        let html = render("Hello <world> & *friends*.", false);
        assert_eq!(
            html,
            "<div class=\"paragraph\">\n<p>Hello &lt;world&gt; &amp; <strong>friends</strong>.</p>\n</div>\n"
        );
    }

    #[test]
    fn test_full_page() {
        let html = render("= My Title\nAda Lovelace\n:lang: fr\n\nBody.", true);
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"fr\">"));
        assert!(html.contains("<title>My Title</title>"));
        assert!(html.contains("<h1>My Title</h1>"));
        assert!(html.contains("<span id=\"author\" class=\"author\">Ada Lovelace</span>"));
        assert!(html.contains("<div id=\"content\">\n<div class=\"paragraph\">"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_embedded_omits_title() {
        let html = render("= My Title\n\nBody.", false);
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn test_sections_and_listing() {
        let html = render("== Setup\n\n.Install\n----\ncargo install <x>\n----\n", false);
        assert!(html.starts_with("<div class=\"sect1\">\n<h2 id=\"_setup\">Setup</h2>"));
        assert!(html.contains("<div class=\"sectionbody\">"));
        assert!(html.contains("<div class=\"title\">Install</div>"));
        assert!(html.contains("<pre>cargo install &lt;x&gt;</pre>"));
    }

    #[test]
    fn test_lists_and_admonition() {
        let html = render("* a\n* b\n\n. one\n\nNOTE: Careful.", false);
        assert!(html.contains("<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>"));
        assert!(html.contains("<ol class=\"arabic\">"));
        assert!(html.contains("<div class=\"admonitionblock note\">"));
        assert!(html.contains("Careful."));
    }

    #[test]
    fn test_link_target_is_attribute_escaped() {
        let html = render("See https://example.org/?a=1&b=2[q & a].", false);
        assert!(html.contains("<a href=\"https://example.org/?a=1&amp;b=2\">q &amp; a</a>"));

        let html = render("link:a\"onmouseover=\"x[label]", false);
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_link_target_keeps_markup_characters() {
        let html = render("https://example.org/_tmp_/x[label]", false);
        assert!(html.contains("<a href=\"https://example.org/_tmp_/x\">label</a>"));
        assert!(!html.contains("<em>"));
    }
}
