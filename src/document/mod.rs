//! # 文档模块
//!
//! 文档加载、文档模型和渲染入口。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 使用 `models/`, `parsers/`, `converters/`
//! - 子模块: loader, model, renderer

pub mod loader;
pub mod model;
pub mod renderer;

pub use loader::document_load;
pub use model::Document;
pub use renderer::{document_render, render_document, RenderOutput};
