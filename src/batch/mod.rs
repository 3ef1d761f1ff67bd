//! # 批量处理模块
//!
//! 将源目录中的 AsciiDoc 文档批量渲染到输出目录。
//!
//! ## 功能
//! - 递归收集文档，统计跳过的文件
//! - 顺序渲染，首个错误即终止
//! - 多后端输出与资源复制
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/render.rs` 使用
//! - 使用 `walkdir`/`glob` 遍历与匹配
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod config;
pub mod dispatcher;
pub mod resources;
pub mod runner;

pub use config::{BaseDir, BatchConfig};
pub use dispatcher::dispatch;
pub use runner::BatchResult;
