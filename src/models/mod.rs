//! # 数据模型模块
//!
//! 定义输入源、渲染选项和文档块结构。
//!
//! ## 依赖关系
//! - 被 `document/`, `parsers/`, `converters/`, `batch/` 和 `commands/` 使用
//! - 子模块: source, options, block

pub mod block;
pub mod options;
pub mod source;

pub use block::{AdmonitionKind, Block};
pub use options::{AttributeOverrides, Attributes, Backend, RenderOptions, SafeMode};
pub use source::Source;
