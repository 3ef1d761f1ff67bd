//! # 输入源数据模型
//!
//! 渲染输入的统一表示：文件、可读流、原始文本或已拆分的行序列。
//!
//! ## 依赖关系
//! - 被 `document/loader.rs`, `document/renderer.rs`, `commands/convert.rs` 使用

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// 可回绕的读取流
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// 渲染输入源
pub enum Source<'a> {
    /// 文件系统路径
    File(PathBuf),
    /// 只读流（如 stdin），无法回绕
    Stream(Box<dyn Read + 'a>),
    /// 可回绕流，读取前先回到起点
    SeekableStream(Box<dyn ReadSeek + 'a>),
    /// 原始文本
    Text(String),
    /// 已拆分的行
    Lines(Vec<String>),
}

impl<'a> Source<'a> {
    /// 从命令行路径构造输入源，`-` 表示标准输入
    pub fn from_path(path: &Path) -> Source<'static> {
        if path == Path::new("-") {
            Source::stdin()
        } else {
            Source::File(path.to_path_buf())
        }
    }

    /// 标准输入；重定向自普通文件时作为可回绕流
    pub fn stdin() -> Source<'static> {
        #[cfg(unix)]
        {
            use std::os::fd::AsFd;
            if let Ok(fd) = std::io::stdin().as_fd().try_clone_to_owned() {
                if let Some(source) = Source::seekable_file(File::from(fd)) {
                    return source;
                }
            }
        }
        Source::Stream(Box::new(std::io::stdin().lock()))
    }

    /// 普通文件句柄作为可回绕流，其它类型（管道、终端、目录）返回 `None`
    pub fn seekable_file(file: File) -> Option<Source<'static>> {
        match file.metadata() {
            Ok(meta) if meta.is_file() => Some(Source::SeekableStream(Box::new(file))),
            _ => None,
        }
    }

    /// 输入源类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            Source::File(_) => "file",
            Source::Stream(_) => "stream",
            Source::SeekableStream(_) => "seekable stream",
            Source::Text(_) => "text",
            Source::Lines(_) => "lines",
        }
    }

    /// 文件输入源的路径
    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            _ => None,
        }
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => f.debug_tuple("File").field(path).finish(),
            Source::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Source::Lines(lines) => f.debug_tuple("Lines").field(lines).finish(),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl From<&str> for Source<'_> {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<Vec<String>> for Source<'_> {
    fn from(lines: Vec<String>) -> Self {
        Source::Lines(lines)
    }
}
