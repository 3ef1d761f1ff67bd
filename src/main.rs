//! # adoc-batch - AsciiDoc 批量渲染工具
//!
//! 遍历源目录，将 AsciiDoc 文档逐个渲染为 HTML5 或 DocBook5。
//!
//! ## 子命令
//! - `render`  - 批量渲染源目录
//! - `convert` - 渲染单个文件或标准输入
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (收集、调度、资源复制)
//!   │     └── document/  (文档加载与渲染)
//!   │           ├── parsers/    (AsciiDoc 解析)
//!   │           ├── converters/ (后端转换器)
//!   │           └── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod converters;
mod document;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
