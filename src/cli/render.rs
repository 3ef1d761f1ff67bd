//! # render 子命令 CLI 定义
//!
//! 批量渲染源目录中的 AsciiDoc 文档到输出目录。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/render.rs`

use crate::models::{Backend, SafeMode};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 基准目录策略
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum BaseDirMode {
    /// Resolve includes against the source directory
    #[default]
    SourceDir,
    /// Resolve includes against each document's directory
    SourceFile,
}

impl std::fmt::Display for BaseDirMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseDirMode::SourceDir => write!(f, "source-dir"),
            BaseDirMode::SourceFile => write!(f, "source-file"),
        }
    }
}

/// render 子命令参数
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory containing AsciiDoc sources
    #[arg(short, long, env = "ADOC_SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Directory for rendered output
    #[arg(short, long, env = "ADOC_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Output backend, repeat for several (default: html5)
    #[arg(
        short,
        long = "backend",
        value_enum,
        env = "ADOC_BACKEND",
        value_delimiter = ','
    )]
    pub backends: Vec<Backend>,

    /// Document attribute NAME[=VALUE], or NAME! to unset
    #[arg(short = 'a', long = "attribute", value_name = "NAME[=VALUE]")]
    pub attributes: Vec<String>,

    /// Safe mode for include processing
    #[arg(long, value_enum, default_value_t = SafeMode::Unsafe)]
    pub safe: SafeMode,

    /// Base directory strategy for includes
    #[arg(long, value_enum, default_value_t = BaseDirMode::SourceDir)]
    pub base_dir_strategy: BaseDirMode,

    /// Fixed base directory (overrides --base-dir-strategy)
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Only render documents matching these glob patterns
    #[arg(long = "sources", value_name = "GLOB")]
    pub sources: Vec<String>,

    /// Copy non-document files matching these glob patterns
    #[arg(long = "resources", value_name = "GLOB")]
    pub resources: Vec<String>,

    /// Copy resources only for these backends
    #[arg(long, value_enum, conflicts_with = "no_resources")]
    pub copy_resources_only_if: Vec<Backend>,

    /// Never copy resources
    #[arg(long, default_value_t = false)]
    pub no_resources: bool,

    /// Print each rendered document
    #[arg(long, default_value_t = false)]
    pub log_documents: bool,

    /// Print a summary table when finished
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}
