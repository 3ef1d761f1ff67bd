//! # 批量调度
//!
//! 遍历源目录，将每个 AsciiDoc 文档渲染到输出目录。
//!
//! ## 流程
//! 1. 校验配置，收集文档
//! 2. 对每个后端：创建输出目录，顺序渲染全部文档
//! 3. 按策略复制资源文件
//!
//! 首个错误即终止，已写入的文件保留。
//!
//! ## 依赖关系
//! - 被 `commands/render.rs` 调用
//! - 使用 `batch/collector.rs`, `batch/runner.rs`, `batch/resources.rs`
//! - 使用 `document/renderer.rs` 渲染单个文档

use super::collector::DocumentCollector;
use super::config::BatchConfig;
use super::resources::ResourceCopier;
use super::runner::{BatchResult, BatchRunner, ProcessResult};
use crate::document::{render_document, RenderOutput};
use crate::error::{RenderError, Result};
use crate::models::{Backend, RenderOptions, Source};
use crate::utils::output;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 执行批量渲染
pub fn dispatch(config: &BatchConfig) -> Result<BatchResult> {
    config.validate()?;

    let source_dir = absolute(&config.source_dir)?;
    let output_dir = absolute(&config.output_dir)?;

    let collected = DocumentCollector::new(&source_dir)
        .with_sources(&config.sources)?
        .exclude(&output_dir)
        .collect()?;
    let copier = ResourceCopier::new(&source_dir, &config.resources)?.exclude(&output_dir);

    if config.show_progress {
        output::print_info(&format!(
            "Found {} documents ({} other files skipped)",
            collected.documents.len(),
            collected.skipped.len()
        ));
    }
    for (stem, paths) in duplicate_stems(&collected.documents) {
        output::print_warning(&format!(
            "{} documents render to '{}', the last one wins: {}",
            paths.len(),
            stem,
            paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let runner = BatchRunner::new()
        .show_progress(config.show_progress)
        .log_documents(config.log_documents);

    let mut result = BatchResult {
        skipped: collected.skipped.len(),
        ..Default::default()
    };

    for &backend in &config.backends {
        let target_dir = config.output_dir_for(backend);
        let target_dir = absolute(&target_dir)?;
        fs::create_dir_all(&target_dir).map_err(|e| RenderError::FileWriteError {
            path: target_dir.display().to_string(),
            source: e,
        })?;

        let message = format!("Rendering {}", backend.name());
        let part = runner.run(&collected.documents, &message, |path| {
            render_one(config, &source_dir, &target_dir, backend, path)
        })?;
        result.absorb(part);

        if config.copies_resources_for(backend) && !copier.is_empty() {
            result.resources_copied += copier.copy_to(&target_dir)?;
        }
    }

    Ok(result)
}

fn render_one(
    config: &BatchConfig,
    source_dir: &Path,
    target_dir: &Path,
    backend: Backend,
    path: &Path,
) -> Result<ProcessResult> {
    let options = RenderOptions::new()
        .with_overrides(config.attributes.clone())
        .with_attribute("backend", backend.name())
        .with_backend(backend)
        .with_safe(config.safe)
        .with_base_dir(config.base_dir_for(source_dir, path))
        .with_header_footer(true)
        .to_file(target_dir);

    let source = path.to_path_buf();
    match render_document(Source::File(source.clone()), options)? {
        RenderOutput::Written(target) => Ok(ProcessResult::Written { source, target }),
        RenderOutput::Text(text) => Ok(ProcessResult::Text { source, text }),
    }
}

/// 输出文件名相同（同名不同目录）的文档
fn duplicate_stems(documents: &[PathBuf]) -> Vec<(String, Vec<PathBuf>)> {
    let mut by_stem: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for doc in documents {
        if let Some(stem) = doc.file_stem() {
            by_stem
                .entry(stem.to_string_lossy().to_string())
                .or_default()
                .push(doc.clone());
        }
    }
    by_stem
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .collect()
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| RenderError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}
