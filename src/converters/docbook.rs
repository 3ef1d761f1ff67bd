//! # DocBook 5 转换器
//!
//! 生成 DocBook 5 `<article>` 文档或嵌入式片段。
//!
//! ## 依赖关系
//! - 被 `converters/mod.rs` 使用
//! - 使用 `parsers/inline.rs`

use super::{escape_attribute_value, Converter};
use crate::document::Document;
use crate::models::Block;
use crate::parsers::inline::{escape_special, format_inline, InlineStyle};

/// DocBook 5 转换器
#[derive(Debug, Clone, Copy, Default)]
pub struct Docbook5Converter;

impl InlineStyle for Docbook5Converter {
    fn strong(&self, text: &str) -> String {
        format!("<emphasis role=\"strong\">{}</emphasis>", text)
    }

    fn emphasis(&self, text: &str) -> String {
        format!("<emphasis>{}</emphasis>", text)
    }

    fn monospace(&self, text: &str) -> String {
        format!("<literal>{}</literal>", text)
    }

    fn link(&self, target: &str, text: &str) -> String {
        format!(
            "<link xl:href=\"{}\">{}</link>",
            escape_attribute_value(target),
            text
        )
    }
}

impl Converter for Docbook5Converter {
    fn convert(&self, doc: &Document) -> String {
        let mut body = String::new();
        for block in doc.blocks() {
            self.block(block, &mut body);
        }

        if !doc.header_footer() {
            return body;
        }

        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<article xmlns=\"http://docbook.org/ns/docbook\" \
             xmlns:xl=\"http://www.w3.org/1999/xlink\" version=\"5.0\" xml:lang=\"{}\">\n",
            escape_attribute_value(doc.attr("lang").unwrap_or("en"))
        ));

        out.push_str("<info>\n");
        if let Some(title) = doc.title() {
            out.push_str(&format!("<title>{}</title>\n", format_inline(title, self)));
        }
        if let Some(date) = doc.attr("docdate") {
            out.push_str(&format!("<date>{}</date>\n", escape_special(date)));
        }
        if let Some(author) = doc.attr("author") {
            out.push_str(&format!(
                "<author>\n<personname>{}</personname>\n</author>\n",
                escape_special(author)
            ));
        }
        out.push_str("</info>\n");

        out.push_str(&body);
        out.push_str("</article>\n");
        out
    }
}

impl Docbook5Converter {
    fn block(&self, block: &Block, out: &mut String) {
        match block {
            Block::Section {
                id, title, blocks, ..
            } => {
                out.push_str(&format!("<section xml:id=\"{}\">\n", escape_attribute_value(id)));
                out.push_str(&format!("<title>{}</title>\n", format_inline(title, self)));
                for child in blocks {
                    self.block(child, out);
                }
                out.push_str("</section>\n");
            }
            Block::Paragraph { title, text } => match title {
                Some(title) => {
                    out.push_str("<formalpara>\n");
                    out.push_str(&format!("<title>{}</title>\n", format_inline(title, self)));
                    out.push_str(&format!("<para>{}</para>\n", format_inline(text, self)));
                    out.push_str("</formalpara>\n");
                }
                None => {
                    out.push_str(&format!("<simpara>{}</simpara>\n", format_inline(text, self)));
                }
            },
            Block::Listing { title, lines } => {
                self.verbatim("<programlisting>", "</programlisting>", title, lines, out);
            }
            Block::Literal { title, lines } => {
                self.verbatim(
                    "<literallayout class=\"monospaced\">",
                    "</literallayout>",
                    title,
                    lines,
                    out,
                );
            }
            Block::UnorderedList { title, items } => {
                out.push_str("<itemizedlist>\n");
                self.title(title, out);
                self.items(items, out);
                out.push_str("</itemizedlist>\n");
            }
            Block::OrderedList { title, items } => {
                out.push_str("<orderedlist numeration=\"arabic\">\n");
                self.title(title, out);
                self.items(items, out);
                out.push_str("</orderedlist>\n");
            }
            Block::Admonition { kind, title, text } => {
                out.push_str(&format!("<{}>\n", kind.name()));
                self.title(title, out);
                out.push_str(&format!("<simpara>{}</simpara>\n", format_inline(text, self)));
                out.push_str(&format!("</{}>\n", kind.name()));
            }
        }
    }

    fn title(&self, title: &Option<String>, out: &mut String) {
        if let Some(title) = title {
            out.push_str(&format!("<title>{}</title>\n", format_inline(title, self)));
        }
    }

    fn items(&self, items: &[String], out: &mut String) {
        for item in items {
            out.push_str(&format!(
                "<listitem>\n<simpara>{}</simpara>\n</listitem>\n",
                format_inline(item, self)
            ));
        }
    }

    fn verbatim(
        &self,
        open: &str,
        close: &str,
        title: &Option<String>,
        lines: &[String],
        out: &mut String,
    ) {
        let content = escape_special(&lines.join("\n"));
        match title {
            Some(title) => {
                out.push_str("<formalpara>\n");
                out.push_str(&format!("<title>{}</title>\n", format_inline(title, self)));
                out.push_str(&format!("<para>\n{}{}{}\n</para>\n", open, content, close));
                out.push_str("</formalpara>\n");
            }
            None => {
                out.push_str(&format!("{}{}{}\n", open, content, close));
            }
        }
    }
}
