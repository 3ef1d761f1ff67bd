//! # AsciiDoc 解析器
//!
//! 将文档行解析为标题、属性表和块结构。
//!
//! ## 处理流程
//! ```text
//! 原始行 -> 预处理 (注释 / include) -> 文档头 -> 块结构
//! ```
//!
//! ## 支持的语法
//! - 文档头：`= Title`、作者行、属性条目
//! - 属性条目 `:name: value` / `:name!:`，属性引用 `{name}`
//! - 章节 `==` ~ `======`（嵌套）
//! - 段落、提示段落 (`NOTE:` 等)、块标题 `.Title`
//! - 代码块 `----`、字面块 `....`
//! - 无序列表 `*` / `-`，有序列表 `.`
//! - `include::target[]`，受安全模式约束
//!
//! ## 依赖关系
//! - 被 `document/model.rs` 调用
//! - 使用 `models/block.rs`, `parsers/inline.rs`

use crate::error::{RenderError, Result};
use crate::models::block::section_id;
use crate::models::{AdmonitionKind, Attributes, Block, SafeMode};
use crate::parsers::inline::substitute_attributes;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// include 最大嵌套深度
const MAX_INCLUDE_DEPTH: usize = 64;

static DOCUMENT_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^=\s+(\S.*)$").expect("valid regex"));

static SECTION_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(={2,6})\s+(\S.*)$").expect("valid regex"));

static ATTRIBUTE_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:(!)?([A-Za-z0-9_][A-Za-z0-9_-]*)(!)?:(?:\s+(.*))?$").expect("valid regex")
});

static BLOCK_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.([^.\s].*)$").expect("valid regex"));

static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[*-]\s+(\S.*)$").expect("valid regex"));

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\.\s+(\S.*)$").expect("valid regex"));

static ADMONITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(NOTE|TIP|IMPORTANT|WARNING|CAUTION):\s+(.*)$").expect("valid regex")
});

static INCLUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^include::([^\[\s][^\[]*)\[[^\]]*\]\s*$").expect("valid regex"));

const LISTING_DELIMITER: &str = "----";
const LITERAL_DELIMITER: &str = "....";
const COMMENT_DELIMITER: &str = "////";

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

/// 解析上下文
pub struct ParseContext<'a> {
    /// 文档属性表（解析过程中被属性条目更新）
    pub attributes: &'a mut Attributes,
    /// 调用方锁定的属性名，文档内条目不可修改
    pub locked: &'a BTreeSet<String>,
    pub safe: SafeMode,
    /// include 的安全边界
    pub base_dir: &'a Path,
    /// 相对 include 的起始目录
    pub docdir: &'a Path,
}

/// 解析文档行
pub fn parse(lines: &[String], ctx: ParseContext<'_>) -> Result<ParsedDocument> {
    let mut parser = Parser {
        lines: Vec::new(),
        cursor: 0,
        attributes: ctx.attributes,
        locked: ctx.locked,
        safe: ctx.safe,
        base_dir: ctx.base_dir,
    };

    parser.lines = parser.preprocess(lines, ctx.docdir, 0)?;
    let title = parser.parse_header();
    let blocks = parser.parse_blocks(0);

    Ok(ParsedDocument { title, blocks })
}

struct Parser<'a> {
    lines: Vec<String>,
    cursor: usize,
    attributes: &'a mut Attributes,
    locked: &'a BTreeSet<String>,
    safe: SafeMode,
    base_dir: &'a Path,
}

impl Parser<'_> {
    // ─────────────────────────────────────────────────────────────
    // 预处理
    // ─────────────────────────────────────────────────────────────

    /// 移除注释并展开 include
    fn preprocess(&self, lines: &[String], dir: &Path, depth: usize) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(lines.len());
        let mut in_comment = false;
        let mut verbatim: Option<&str> = None;

        for line in lines {
            let trimmed = line.trim_end();

            if let Some(delimiter) = verbatim {
                if trimmed == delimiter {
                    verbatim = None;
                }
                out.push(line.clone());
                continue;
            }

            if trimmed == COMMENT_DELIMITER {
                in_comment = !in_comment;
                continue;
            }
            if in_comment || (trimmed.starts_with("//") && !trimmed.starts_with("///")) {
                continue;
            }

            if let Some(caps) = INCLUDE.captures(trimmed) {
                let target = substitute_attributes(caps[1].trim(), self.attributes);
                out.extend(self.include(&target, line, dir, depth)?);
                continue;
            }

            if trimmed == LISTING_DELIMITER || trimmed == LITERAL_DELIMITER {
                verbatim = Some(if trimmed == LISTING_DELIMITER {
                    LISTING_DELIMITER
                } else {
                    LITERAL_DELIMITER
                });
            }
            out.push(line.clone());
        }

        Ok(out)
    }

    /// 展开单个 include 指令
    fn include(&self, target: &str, line: &str, dir: &Path, depth: usize) -> Result<Vec<String>> {
        if depth >= MAX_INCLUDE_DEPTH {
            return Ok(vec![line.to_string()]);
        }

        if self.safe >= SafeMode::Secure {
            return Ok(vec![format!("link:{}[{}]", target, target)]);
        }

        let path = dir.join(target);
        let resolved = fs::canonicalize(&path).map_err(|_| RenderError::IncludeNotFound {
            target: target.to_string(),
            path: path.display().to_string(),
        })?;

        if self.safe > SafeMode::Unsafe {
            let base = fs::canonicalize(self.base_dir)
                .unwrap_or_else(|_| self.base_dir.to_path_buf());
            if !resolved.starts_with(&base) {
                return Err(RenderError::IncludeOutsideBaseDir {
                    target: target.to_string(),
                    base_dir: self.base_dir.display().to_string(),
                });
            }
        }

        let content = fs::read_to_string(&resolved).map_err(|e| RenderError::FileReadError {
            path: resolved.display().to_string(),
            source: e,
        })?;
        let included: Vec<String> = content.lines().map(str::to_string).collect();
        let include_dir = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        self.preprocess(&included, &include_dir, depth + 1)
    }

    // ─────────────────────────────────────────────────────────────
    // 文档头
    // ─────────────────────────────────────────────────────────────

    /// 解析文档标题、作者行与头部属性条目
    fn parse_header(&mut self) -> Option<String> {
        self.skip_blank();

        let title = {
            let line = self.peek()?;
            let caps = DOCUMENT_TITLE.captures(line)?;
            self.subs(&caps[1])
        };
        self.cursor += 1;
        self.set_attribute("doctitle", Some(title.clone()));

        if let Some(line) = self.peek() {
            let line = line.trim();
            if !line.is_empty() && !line.starts_with(':') && !SECTION_TITLE.is_match(line) {
                let author = self.subs(line);
                self.set_attribute("author", Some(author));
                self.cursor += 1;
            }
        }

        while let Some(line) = self.peek() {
            if !ATTRIBUTE_ENTRY.is_match(line) {
                break;
            }
            let line = line.to_string();
            self.apply_attribute_entry(&line);
            self.cursor += 1;
        }

        Some(title)
    }

    // ─────────────────────────────────────────────────────────────
    // 块结构
    // ─────────────────────────────────────────────────────────────

    /// 解析块序列，遇到不深于 `parent_level` 的章节标题时返回
    fn parse_blocks(&mut self, parent_level: usize) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut pending_title: Option<String> = None;

        while let Some(line) = self.peek() {
            let line = line.trim_end().to_string();

            if line.trim().is_empty() {
                self.cursor += 1;
                continue;
            }

            if let Some((level, title)) = section_heading(&line) {
                if level <= parent_level {
                    break;
                }
                self.cursor += 1;
                let title = self.subs(&title);
                let id = section_id(&title);
                let children = self.parse_blocks(level);
                blocks.push(Block::Section {
                    level,
                    id,
                    title,
                    blocks: children,
                });
                pending_title = None;
                continue;
            }

            if ATTRIBUTE_ENTRY.is_match(&line) {
                self.apply_attribute_entry(&line);
                self.cursor += 1;
                continue;
            }

            if let Some(caps) = BLOCK_TITLE.captures(&line) {
                pending_title = Some(self.subs(&caps[1]));
                self.cursor += 1;
                continue;
            }

            let title = pending_title.take();
            let block = if line == LISTING_DELIMITER {
                Block::Listing {
                    title,
                    lines: self.take_delimited(LISTING_DELIMITER),
                }
            } else if line == LITERAL_DELIMITER {
                Block::Literal {
                    title,
                    lines: self.take_delimited(LITERAL_DELIMITER),
                }
            } else if UNORDERED_ITEM.is_match(&line) {
                Block::UnorderedList {
                    title,
                    items: self.take_list(&UNORDERED_ITEM),
                }
            } else if ORDERED_ITEM.is_match(&line) {
                Block::OrderedList {
                    title,
                    items: self.take_list(&ORDERED_ITEM),
                }
            } else {
                let text = self.take_paragraph();
                match ADMONITION.captures(&text) {
                    Some(caps) => match AdmonitionKind::from_label(&caps[1]) {
                        Some(kind) => Block::Admonition {
                            kind,
                            title,
                            text: caps[2].to_string(),
                        },
                        None => Block::Paragraph { title, text },
                    },
                    None => Block::Paragraph { title, text },
                }
            };
            blocks.push(block);
        }

        blocks
    }

    /// 读取分隔块内容（不做替换），游标移到结束分隔符之后
    fn take_delimited(&mut self, delimiter: &str) -> Vec<String> {
        self.cursor += 1;
        let mut content = Vec::new();
        while let Some(line) = self.peek().map(str::to_string) {
            self.cursor += 1;
            if line.trim_end() == delimiter {
                break;
            }
            content.push(line);
        }
        content
    }

    /// 读取列表项；条目间的空行不结束列表
    fn take_list(&mut self, item: &Regex) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();

        while let Some(line) = self.peek() {
            let line = line.trim_end().to_string();

            if line.trim().is_empty() {
                let continues = self.next_non_blank().is_some_and(|next| item.is_match(next));
                if !continues {
                    break;
                }
                self.skip_blank();
                continue;
            }

            if let Some(caps) = item.captures(&line) {
                items.push(self.subs(&caps[1]));
            } else if is_block_boundary(&line)
                || UNORDERED_ITEM.is_match(&line)
                || ORDERED_ITEM.is_match(&line)
            {
                break;
            } else if let Some(last) = items.last_mut() {
                let continuation = substitute_attributes(line.trim(), self.attributes);
                last.push(' ');
                last.push_str(&continuation);
            }
            self.cursor += 1;
        }

        items
    }

    /// 读取段落直到空行或块边界
    fn take_paragraph(&mut self) -> String {
        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            let line = line.trim_end();
            if line.trim().is_empty() || (!lines.is_empty() && is_block_boundary(line)) {
                break;
            }
            lines.push(line.trim_start().to_string());
            self.cursor += 1;
        }
        self.subs(&lines.join("\n"))
    }

    // ─────────────────────────────────────────────────────────────
    // 属性
    // ─────────────────────────────────────────────────────────────

    fn apply_attribute_entry(&mut self, line: &str) {
        let Some(caps) = ATTRIBUTE_ENTRY.captures(line) else {
            return;
        };
        let name = caps[2].to_string();
        let unset = caps.get(1).is_some() || caps.get(3).is_some();
        let value = if unset {
            None
        } else {
            let raw = caps.get(4).map(|m| m.as_str().trim()).unwrap_or_default();
            Some(self.subs(raw))
        };
        self.set_attribute(&name, value);
    }

    /// 设置或取消属性；锁定属性保持不变
    fn set_attribute(&mut self, name: &str, value: Option<String>) {
        if self.locked.contains(name) {
            return;
        }
        match value {
            Some(value) => {
                self.attributes.insert(name.to_string(), value);
            }
            None => {
                self.attributes.remove(name);
            }
        }
    }

    fn subs(&self, text: &str) -> String {
        substitute_attributes(text, self.attributes)
    }

    // ─────────────────────────────────────────────────────────────
    // 游标
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.cursor).map(String::as_str)
    }

    fn skip_blank(&mut self) {
        while self.peek().is_some_and(|l| l.trim().is_empty()) {
            self.cursor += 1;
        }
    }

    fn next_non_blank(&self) -> Option<&str> {
        self.lines[self.cursor..]
            .iter()
            .map(String::as_str)
            .find(|l| !l.trim().is_empty())
    }
}

/// 识别章节标题，返回 (层级, 标题)
fn section_heading(line: &str) -> Option<(usize, String)> {
    let caps = SECTION_TITLE.captures(line)?;
    Some((caps[1].len() - 1, caps[2].trim().to_string()))
}

/// 段落与列表的终止行
fn is_block_boundary(line: &str) -> bool {
    line == LISTING_DELIMITER
        || line == LITERAL_DELIMITER
        || SECTION_TITLE.is_match(line)
        || BLOCK_TITLE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn parse_with(
        text: &str,
        attributes: &mut Attributes,
        locked: &BTreeSet<String>,
        safe: SafeMode,
        dir: &Path,
    ) -> Result<ParsedDocument> {
        parse(
            &lines(text),
            ParseContext {
                attributes,
                locked,
                safe,
                base_dir: dir,
                docdir: dir,
            },
        )
    }

    fn parse_text(text: &str) -> (ParsedDocument, Attributes) {
        let mut attrs = Attributes::new();
        let doc = parse_with(
            text,
            &mut attrs,
            &BTreeSet::new(),
            SafeMode::Secure,
            Path::new("."),
        )
        .unwrap();
        (doc, attrs)
    }

    #[test]
    fn test_parse_header() {
        let (doc, attrs) = parse_text(
            "= User Guide\nJane Doe\n:version: 2.1\n:toc:\n\nRelease {version}.\n",
        );
        assert_eq!(doc.title.as_deref(), Some("User Guide"));
        assert_eq!(attrs.get("author").map(String::as_str), Some("Jane Doe"));
        assert_eq!(attrs.get("toc").map(String::as_str), Some(""));
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                title: None,
                text: "Release 2.1.".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_without_header() {
        let (doc, _) = parse_text("Just a paragraph\nspanning two lines.");
        assert_eq!(doc.title, None);
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                title: None,
                text: "Just a paragraph\nspanning two lines.".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_nested_sections() {
        let (doc, _) = parse_text(
            "= Doc\n\n== Intro\n\nHello.\n\n=== Detail\n\nMore.\n\n== Usage\n\nRun it.\n",
        );
        assert_eq!(doc.blocks.len(), 2);
        match &doc.blocks[0] {
            Block::Section {
                level,
                id,
                title,
                blocks,
            } => {
                assert_eq!(*level, 1);
                assert_eq!(id, "_intro");
                assert_eq!(title, "Intro");
                assert_eq!(blocks.len(), 2);
                assert!(matches!(blocks[1], Block::Section { level: 2, .. }));
            }
            other => panic!("expected section, got {:?}", other),
        }
        assert!(matches!(doc.blocks[1], Block::Section { level: 1, .. }));
    }

    #[test]
    fn test_parse_listing_keeps_comments() {
        let (doc, _) = parse_text(".Example\n----\n// not a comment\nlet x = {y};\n----\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Listing {
                title: Some("Example".to_string()),
                lines: vec!["// not a comment".to_string(), "let x = {y};".to_string()],
            }]
        );
    }

    #[test]
    fn test_parse_delimited_blocks_resume_after_close() {
        let (doc, _) = parse_text("....\n  indented\n....\nAfter.\n\n----\nopen\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Literal {
                    title: None,
                    lines: vec!["  indented".to_string()],
                },
                Block::Paragraph {
                    title: None,
                    text: "After.".to_string()
                },
                Block::Listing {
                    title: None,
                    lines: vec!["open".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_parse_comments_removed() {
        let (doc, _) = parse_text("// line comment\nkept\n\n////\nhidden\n////\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                title: None,
                text: "kept".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_lists() {
        let (doc, _) = parse_text("* one\n* two\ncontinued\n\n* three\n\n. first\n. second\n");
        assert_eq!(
            doc.blocks,
            vec![
                Block::UnorderedList {
                    title: None,
                    items: vec![
                        "one".to_string(),
                        "two continued".to_string(),
                        "three".to_string()
                    ],
                },
                Block::OrderedList {
                    title: None,
                    items: vec!["first".to_string(), "second".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_parse_admonition() {
        let (doc, _) = parse_text("WARNING: Mind the gap.");
        assert_eq!(
            doc.blocks,
            vec![Block::Admonition {
                kind: AdmonitionKind::Warning,
                title: None,
                text: "Mind the gap.".to_string()
            }]
        );
    }

    #[test]
    fn test_locked_attribute_not_overridden() {
        let mut attrs = Attributes::new();
        attrs.insert("backend".to_string(), "html5".to_string());
        let locked: BTreeSet<String> = ["backend".to_string()].into_iter().collect();

        parse_with(
            ":backend: docbook5\n:other: x\n",
            &mut attrs,
            &locked,
            SafeMode::Secure,
            Path::new("."),
        )
        .unwrap();

        assert_eq!(attrs.get("backend").map(String::as_str), Some("html5"));
        assert_eq!(attrs.get("other").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_attribute_unset() {
        let (_, attrs) = parse_text(":a: 1\n:b: 2\n:a!:\n:!b:\n");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_include_unsafe() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("part.adoc"), "Included text.\n").unwrap();

        let mut attrs = Attributes::new();
        let doc = parse_with(
            "include::part.adoc[]\n",
            &mut attrs,
            &BTreeSet::new(),
            SafeMode::Unsafe,
            dir.path(),
        )
        .unwrap();

        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                title: None,
                text: "Included text.".to_string()
            }]
        );
    }

    #[test]
    fn test_include_secure_becomes_link() {
        let (doc, _) = parse_text("include::part.adoc[]\n");
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                title: None,
                text: "link:part.adoc[part.adoc]".to_string()
            }]
        );
    }

    #[test]
    fn test_include_missing() {
        let dir = tempdir().unwrap();
        let mut attrs = Attributes::new();
        let result = parse_with(
            "include::missing.adoc[]\n",
            &mut attrs,
            &BTreeSet::new(),
            SafeMode::Unsafe,
            dir.path(),
        );
        assert!(matches!(
            result,
            Err(RenderError::IncludeNotFound { target, .. }) if target == "missing.adoc"
        ));
    }

    #[test]
    fn test_include_outside_base_dir_in_safe_mode() {
        let outer = tempdir().unwrap();
        let base = outer.path().join("docs");
        fs::create_dir(&base).unwrap();
        fs::write(outer.path().join("secret.txt"), "secret\n").unwrap();

        let mut attrs = Attributes::new();
        let result = parse_with(
            "include::../secret.txt[]\n",
            &mut attrs,
            &BTreeSet::new(),
            SafeMode::Safe,
            &base,
        );
        assert!(matches!(
            result,
            Err(RenderError::IncludeOutsideBaseDir { .. })
        ));

        let result = parse_with(
            "include::../secret.txt[]\n",
            &mut attrs,
            &BTreeSet::new(),
            SafeMode::Unsafe,
            &base,
        );
        assert!(result.is_ok());
    }
}
