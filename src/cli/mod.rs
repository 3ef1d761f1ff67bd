//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `render`: 批量渲染源目录中的 AsciiDoc 文档
//! - `convert`: 渲染单个文档（文件或标准输入）
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: render, convert

pub mod convert;
pub mod render;

use clap::{Parser, Subcommand};

/// adoc-batch - AsciiDoc 批量渲染工具
#[derive(Parser)]
#[command(name = "adoc-batch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Batch renderer for AsciiDoc source trees", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Render every AsciiDoc document under a source directory
    Render(render::RenderArgs),

    /// Render a single AsciiDoc file or standard input
    Convert(convert::ConvertArgs),
}
