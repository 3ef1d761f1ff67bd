//! # 转换器模块
//!
//! 将已解析文档转换为目标后端格式。
//!
//! ## 依赖关系
//! - 被 `document/model.rs` 调用
//! - 使用 `parsers/inline.rs` 处理行内标记
//! - 子模块: html5, docbook

pub mod docbook;
pub mod html5;

use crate::document::Document;
use crate::models::Backend;

pub use docbook::Docbook5Converter;
pub use html5::Html5Converter;

/// 后端转换器
pub trait Converter {
    /// 输出完整文档或嵌入式片段（取决于 `header_footer`）
    fn convert(&self, doc: &Document) -> String;
}

/// 按后端选择转换器
pub fn converter_for(backend: Backend) -> Box<dyn Converter> {
    match backend {
        Backend::Html5 => Box::new(Html5Converter),
        Backend::Docbook5 => Box::new(Docbook5Converter),
    }
}

/// 转义属性值中的引号
pub(crate) fn escape_attribute_value(text: &str) -> String {
    crate::parsers::inline::escape_special(text).replace('"', "&quot;")
}
