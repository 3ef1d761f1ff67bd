//! # 批量执行器
//!
//! 按顺序逐个处理文档，首个错误即终止。
//!
//! ## 功能
//! - 进度条显示（可隐藏）
//! - 逐文档回显渲染结果
//! - 结果统计
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `utils/output.rs` 回显

use crate::error::Result;
use crate::utils::{output, progress};

use std::path::{Path, PathBuf};

/// 单个文档处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 已写入输出文件
    Written { source: PathBuf, target: PathBuf },
    /// 未写文件，返回渲染文本
    Text { source: PathBuf, text: String },
}

/// 批量处理结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// 渲染次数（每个文档每个后端一次）
    pub rendered: usize,
    /// 跳过的非文档文件
    pub skipped: usize,
    /// 复制的资源文件
    pub resources_copied: usize,
    /// (源文件, 输出) 明细
    pub outputs: Vec<(PathBuf, Option<PathBuf>)>,
}

impl BatchResult {
    /// 合并单个处理结果
    pub fn merge(&mut self, result: &ProcessResult) {
        self.rendered += 1;
        match result {
            ProcessResult::Written { source, target } => {
                self.outputs.push((source.clone(), Some(target.clone())));
            }
            ProcessResult::Text { source, .. } => {
                self.outputs.push((source.clone(), None));
            }
        }
    }

    /// 合并另一批次的统计
    pub fn absorb(&mut self, other: BatchResult) {
        self.rendered += other.rendered;
        self.skipped += other.skipped;
        self.resources_copied += other.resources_copied;
        self.outputs.extend(other.outputs);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.rendered + self.skipped
    }
}

/// 批量执行器
#[derive(Debug, Default)]
pub struct BatchRunner {
    /// 显示进度条
    show_progress: bool,
    /// 逐个打印已渲染文档
    log_documents: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn log_documents(mut self, log: bool) -> Self {
        self.log_documents = log;
        self
    }

    /// 顺序处理文件列表
    pub fn run<F>(&self, files: &[PathBuf], message: &str, mut processor: F) -> Result<BatchResult>
    where
        F: FnMut(&Path) -> Result<ProcessResult>,
    {
        let pb = progress::create_optional_bar(self.show_progress, files.len() as u64, message);
        let mut batch_result = BatchResult::default();

        for file in files {
            let result = match processor(file) {
                Ok(result) => result,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };

            pb.suspend(|| self.report(&result));
            batch_result.merge(&result);
            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(batch_result)
    }

    fn report(&self, result: &ProcessResult) {
        match result {
            ProcessResult::Written { source, target } => {
                if self.log_documents {
                    output::print_conversion(source, target);
                }
            }
            ProcessResult::Text { text, .. } => output::print_rendered(text),
        }
    }
}
