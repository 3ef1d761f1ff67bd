//! # 文档模型
//!
//! 已解析的文档：属性表、标题和块结构，提供 `render()`。
//!
//! ## 依赖关系
//! - 被 `document/loader.rs` 构造
//! - 使用 `parsers/asciidoc.rs` 解析，`converters/` 输出

use crate::converters;
use crate::error::Result;
use crate::models::{Attributes, Backend, Block, RenderOptions};
use crate::parsers::{self, ParseContext};

use std::collections::BTreeSet;
use std::path::PathBuf;

/// 已解析文档
#[derive(Debug, Clone)]
pub struct Document {
    attributes: Attributes,
    title: Option<String>,
    blocks: Vec<Block>,
    backend: Backend,
    header_footer: bool,
}

impl Document {
    /// 由行序列和渲染选项构造文档
    ///
    /// 选项中设置或取消的属性被锁定，文档内的属性条目不能覆盖。
    pub fn new(lines: Vec<String>, options: RenderOptions) -> Result<Self> {
        let backend = options.resolved_backend()?;
        let safe = options.safe;

        let mut attributes = options.attributes;
        for name in &options.unset_attributes {
            attributes.remove(name);
        }
        attributes.insert("backend".to_string(), backend.name().to_string());
        attributes
            .entry("outfilesuffix".to_string())
            .or_insert_with(|| backend.outfilesuffix().to_string());
        attributes.insert("safe-mode-name".to_string(), safe.name().to_string());
        attributes.insert("safe-mode-level".to_string(), safe.level().to_string());
        attributes
            .entry("doctype".to_string())
            .or_insert_with(|| "article".to_string());
        let mut locked: BTreeSet<String> = attributes.keys().cloned().collect();
        locked.extend(options.unset_attributes);

        let base_dir = options
            .base_dir
            .or_else(|| attributes.get("docdir").map(PathBuf::from))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        let docdir = attributes
            .get("docdir")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.clone());

        let parsed = parsers::parse(
            &lines,
            ParseContext {
                attributes: &mut attributes,
                locked: &locked,
                safe,
                base_dir: &base_dir,
                docdir: &docdir,
            },
        )?;

        Ok(Self {
            attributes,
            title: parsed.title,
            blocks: parsed.blocks,
            backend,
            header_footer: options.header_footer.unwrap_or(false),
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn docname(&self) -> Option<&str> {
        self.attr("docname")
    }

    pub fn outfilesuffix(&self) -> &str {
        self.attr("outfilesuffix")
            .unwrap_or_else(|| self.backend.outfilesuffix())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// 是否输出完整文档（含页眉页脚）
    pub fn header_footer(&self) -> bool {
        self.header_footer
    }

    /// 按文档后端渲染
    pub fn render(&self) -> String {
        converters::converter_for(self.backend).convert(self)
    }
}
