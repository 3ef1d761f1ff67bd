//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `document/`, `models/`, `utils/`
//! - 子模块: render, convert

pub mod convert;
pub mod render;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render(args) => render::execute(args),
        Commands::Convert(args) => convert::execute(args),
    }
}
