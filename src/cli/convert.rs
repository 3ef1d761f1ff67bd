//! # convert 子命令 CLI 定义
//!
//! 渲染单个 AsciiDoc 文档（文件或 `-` 表示标准输入）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use crate::models::{Backend, SafeMode};

use clap::Args;
use std::path::PathBuf;

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file, or '-' for standard input
    pub input: PathBuf,

    /// Write output next to the input file
    #[arg(long, default_value_t = false, conflicts_with = "to_file")]
    pub in_place: bool,

    /// Output file or existing directory
    #[arg(short = 'o', long)]
    pub to_file: Option<PathBuf>,

    /// Output backend
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Document attribute NAME[=VALUE], or NAME! to unset
    #[arg(short = 'a', long = "attribute", value_name = "NAME[=VALUE]")]
    pub attributes: Vec<String>,

    /// Safe mode for include processing
    #[arg(long, value_enum, default_value_t = SafeMode::Secure)]
    pub safe: SafeMode,

    /// Render a full document with header and footer
    #[arg(long, default_value_t = false, conflicts_with = "embedded")]
    pub header_footer: bool,

    /// Render an embeddable fragment without header and footer
    #[arg(short, long, default_value_t = false)]
    pub embedded: bool,

    /// Base directory for resolving includes
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
}
