//! # 文档渲染器
//!
//! 加载并渲染文档：返回渲染文本，或写入输出文件后返回 `None`。
//!
//! ## 输出路径
//! 1. `in_place` 且输入为文件：源文件同目录下 `<docname><outfilesuffix>`
//! 2. `to_file` 为已存在目录：`<目录>/<docname><outfilesuffix>`
//! 3. `to_file` 为其他路径：直接使用
//! 4. 其他情况：不写文件，返回文本
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs`, `commands/convert.rs` 调用
//! - 使用 `document/loader.rs`

use crate::document::{document_load, Document};
use crate::error::{RenderError, Result};
use crate::models::{RenderOptions, Source};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 未派生 `docname` 时使用的输出文件名
const FALLBACK_DOCNAME: &str = "untitled";

/// 渲染结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    /// 未解析出输出路径，返回渲染文本
    Text(String),
    /// 已写入的输出文件
    Written(PathBuf),
}

/// 渲染文档：返回文本，或写入文件后返回 `None`
pub fn document_render(source: Source<'_>, options: RenderOptions) -> Result<Option<String>> {
    match render_document(source, options)? {
        RenderOutput::Text(text) => Ok(Some(text)),
        RenderOutput::Written(_) => Ok(None),
    }
}

/// 渲染文档并报告实际写入的路径
pub fn render_document(source: Source<'_>, mut options: RenderOptions) -> Result<RenderOutput> {
    let in_place = std::mem::take(&mut options.in_place);
    let to_file = options.to_file.take();

    if options.header_footer.is_none() && (in_place || to_file.is_some()) {
        options.header_footer = Some(true);
    }

    let source_path = source.path().map(Path::to_path_buf);
    let doc = document_load(source, options)?;

    match resolve_output_path(&doc, in_place, source_path.as_deref(), to_file) {
        Some(path) => {
            write_output(&path, &doc.render())?;
            Ok(RenderOutput::Written(path))
        }
        None => Ok(RenderOutput::Text(doc.render())),
    }
}

fn resolve_output_path(
    doc: &Document,
    in_place: bool,
    source_path: Option<&Path>,
    to_file: Option<PathBuf>,
) -> Option<PathBuf> {
    if in_place {
        if let Some(source) = source_path {
            let dir = source.parent().unwrap_or(Path::new(""));
            return Some(dir.join(output_file_name(doc)));
        }
    }

    let to_file = to_file?;
    if to_file.is_dir() {
        Some(to_file.join(output_file_name(doc)))
    } else {
        Some(to_file)
    }
}

fn output_file_name(doc: &Document) -> String {
    format!(
        "{}{}",
        doc.docname().unwrap_or(FALLBACK_DOCNAME),
        doc.outfilesuffix()
    )
}

/// 写入输出文件，句柄在作用域结束时关闭
fn write_output(path: &Path, content: &str) -> Result<()> {
    let write_error = |e: std::io::Error| RenderError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    };

    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)
}
