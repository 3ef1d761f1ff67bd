//! # 解析器模块
//!
//! AsciiDoc 块结构解析与行内替换。
//!
//! ## 依赖关系
//! - 被 `document/` 和 `converters/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: asciidoc, inline

pub mod asciidoc;
pub mod inline;

pub use asciidoc::{parse, ParseContext};
