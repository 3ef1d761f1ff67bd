//! # 文档加载器
//!
//! 将任意输入源规整为行序列，文件输入额外注入派生属性，最后构造 [`Document`]。
//!
//! ## 派生属性（仅文件输入）
//! - `docfile` / `docdir` / `docname`
//! - `docdate` / `doctime` / `docdatetime`（取自文件修改时间）
//! - `backend` / `outfilesuffix`（跟随请求的后端）
//!
//! ## 依赖关系
//! - 被 `document/renderer.rs` 调用
//! - 使用 `models/source.rs`, `document/model.rs`
//! - 使用 `chrono` 格式化修改时间

use crate::document::Document;
use crate::error::{RenderError, Result};
use crate::models::{Attributes, Backend, RenderOptions, Source};

use chrono::{DateTime, Local};
use std::fs::{self, Metadata};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek};
use std::path::Path;

/// 加载文档
pub fn document_load(source: Source<'_>, mut options: RenderOptions) -> Result<Document> {
    let lines = match source {
        Source::File(path) => {
            let metadata = regular_file_metadata(&path)?;
            let lines = read_file_lines(&path)?;
            let backend = options.resolved_backend()?;
            let derived = derived_attributes(&path, &metadata, backend)?;
            for (name, value) in derived {
                // 调用方显式传入的后缀优先
                if name == "outfilesuffix" && options.attributes.contains_key(&name) {
                    continue;
                }
                options.attributes.insert(name, value);
            }
            lines
        }
        Source::SeekableStream(mut stream) => {
            stream.rewind().ok();
            read_stream_lines(stream, "seekable stream")?
        }
        Source::Stream(stream) => read_stream_lines(stream, "stream")?,
        Source::Text(text) => text.lines().map(str::to_string).collect(),
        Source::Lines(lines) => lines,
    };

    Document::new(lines, options)
}

/// 检查路径为普通文件
fn regular_file_metadata(path: &Path) -> Result<Metadata> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => RenderError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => RenderError::FileReadError {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    if metadata.is_dir() {
        return Err(RenderError::UnsupportedInput {
            kind: "directory".to_string(),
        });
    }
    if !metadata.is_file() {
        return Err(RenderError::UnsupportedInput {
            kind: "special file".to_string(),
        });
    }

    Ok(metadata)
}

fn read_file_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| RenderError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

fn read_stream_lines(stream: impl Read, kind: &str) -> Result<Vec<String>> {
    BufReader::new(stream)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| RenderError::StreamReadError {
            kind: kind.to_string(),
            source: e,
        })
}

/// 计算文件输入的派生属性
fn derived_attributes(path: &Path, metadata: &Metadata, backend: Backend) -> Result<Attributes> {
    let docfile = std::path::absolute(path).map_err(|e| RenderError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let docdir = docfile.parent().unwrap_or(Path::new("/"));
    let docname = docfile
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let modified = metadata
        .modified()
        .map_err(|e| RenderError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    let mtime: DateTime<Local> = modified.into();
    let docdate = mtime.format("%Y-%m-%d").to_string();
    let doctime = mtime.format("%H:%M:%S %Z").to_string();

    let mut attrs = Attributes::new();
    attrs.insert("docfile".to_string(), docfile.display().to_string());
    attrs.insert("docdir".to_string(), docdir.display().to_string());
    attrs.insert("docname".to_string(), docname);
    attrs.insert("docdatetime".to_string(), format!("{} {}", docdate, doctime));
    attrs.insert("docdate".to_string(), docdate);
    attrs.insert("doctime".to_string(), doctime);
    attrs.insert("backend".to_string(), backend.name().to_string());
    attrs.insert(
        "outfilesuffix".to_string(),
        backend.outfilesuffix().to_string(),
    );
    Ok(attrs)
}
