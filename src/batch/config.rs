//! # 批量渲染配置
//!
//! 批量渲染的显式配置：源目录、输出目录、后端、属性和资源策略。
//!
//! ## 依赖关系
//! - 由 `commands/render.rs` 从命令行参数构造
//! - 被 `batch/dispatcher.rs` 使用

use crate::error::{RenderError, Result};
use crate::models::{AttributeOverrides, Backend, SafeMode};

use std::path::{Path, PathBuf};

/// 基准目录策略
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BaseDir {
    /// 使用源目录
    #[default]
    SourceDir,
    /// 使用每个文档所在目录
    SourceFile,
    /// 固定目录
    Fixed(PathBuf),
}

/// 批量渲染配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// 输出后端，多个后端时各自输出到 `<output_dir>/<backend>`
    pub backends: Vec<Backend>,
    /// 命令行属性（设置与取消）
    pub attributes: AttributeOverrides,
    pub safe: SafeMode,
    pub base_dir: BaseDir,
    /// 文档筛选模式，为空时渲染全部文档
    pub sources: Vec<String>,
    /// 资源文件模式
    pub resources: Vec<String>,
    /// 需要复制资源的后端，`None` 表示全部
    pub copy_resources_for: Option<Vec<Backend>>,
    pub log_documents: bool,
    pub show_progress: bool,
}

impl BatchConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            backends: vec![Backend::Html5],
            attributes: AttributeOverrides::default(),
            safe: SafeMode::Unsafe,
            base_dir: BaseDir::SourceDir,
            sources: Vec::new(),
            resources: Vec::new(),
            copy_resources_for: None,
            log_documents: false,
            show_progress: false,
        }
    }

    pub fn with_backends(mut self, backends: Vec<Backend>) -> Self {
        let mut unique = Vec::with_capacity(backends.len());
        for backend in backends {
            if !unique.contains(&backend) {
                unique.push(backend);
            }
        }
        self.backends = unique;
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeOverrides) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_safe(mut self, safe: SafeMode) -> Self {
        self.safe = safe;
        self
    }

    pub fn with_base_dir(mut self, base_dir: BaseDir) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn with_sources(mut self, patterns: Vec<String>) -> Self {
        self.sources = patterns;
        self
    }

    pub fn with_resources(mut self, patterns: Vec<String>) -> Self {
        self.resources = patterns;
        self
    }

    /// 不复制资源
    pub fn copy_no_resources(mut self) -> Self {
        self.copy_resources_for = Some(Vec::new());
        self
    }

    /// 仅为指定后端复制资源
    pub fn copy_resources_only_if(mut self, backends: Vec<Backend>) -> Self {
        self.copy_resources_for = Some(backends);
        self
    }

    pub fn log_documents(mut self, log: bool) -> Self {
        self.log_documents = log;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(RenderError::DirectoryNotFound {
                path: self.source_dir.display().to_string(),
            });
        }
        if self.backends.is_empty() {
            return Err(RenderError::InvalidArgument(
                "At least one backend is required".to_string(),
            ));
        }
        Ok(())
    }

    /// 后端输出目录
    pub fn output_dir_for(&self, backend: Backend) -> PathBuf {
        if self.backends.len() > 1 {
            self.output_dir.join(backend.name())
        } else {
            self.output_dir.clone()
        }
    }

    /// 是否为该后端复制资源
    pub fn copies_resources_for(&self, backend: Backend) -> bool {
        match &self.copy_resources_for {
            None => true,
            Some(backends) => backends.contains(&backend),
        }
    }

    /// 文档的基准目录
    pub fn base_dir_for(&self, source_dir: &Path, document: &Path) -> PathBuf {
        match &self.base_dir {
            BaseDir::SourceDir => source_dir.to_path_buf(),
            BaseDir::SourceFile => document
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_dir.to_path_buf()),
            BaseDir::Fixed(dir) => dir.clone(),
        }
    }
}
