//! # 统一错误处理模块
//!
//! 定义 adoc-batch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// adoc-batch 统一错误类型
#[derive(Error, Debug)]
pub enum RenderError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read from {kind}")]
    StreamReadError {
        kind: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to walk directory: {path}")]
    WalkError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unsupported input type: {kind}")]
    UnsupportedInput { kind: String },

    // ─────────────────────────────────────────────────────────────
    // 渲染错误
    // ─────────────────────────────────────────────────────────────
    #[error("Include file not found: {target} (resolved to {path})")]
    IncludeNotFound { target: String, path: String },

    #[error("Include target '{target}' is outside the base directory {base_dir}")]
    IncludeOutsideBaseDir { target: String, base_dir: String },

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RenderError>;
