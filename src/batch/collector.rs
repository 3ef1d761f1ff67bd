//! # 文档收集器
//!
//! 递归遍历源目录，按扩展名识别 AsciiDoc 文档。
//!
//! ## 功能
//! - 识别 `.adoc`, `.asciidoc`, `.ad`, `.asc`
//! - 可选 glob 模式进一步筛选（匹配相对路径或文件名）
//! - 不匹配的普通文件计为跳过
//! - 遍历错误直接返回
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs`, `batch/resources.rs` 使用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配模式

use crate::error::{RenderError, Result};

use glob::Pattern;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// AsciiDoc 文档扩展名
static DOCUMENT_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.a((sc(iidoc)?)|d(oc)?)$").expect("valid regex"));

/// 收集结果
#[derive(Debug, Default)]
pub struct Collected {
    /// 待渲染文档
    pub documents: Vec<PathBuf>,
    /// 跳过的普通文件
    pub skipped: Vec<PathBuf>,
}

/// 文档收集器
pub struct DocumentCollector {
    /// 源目录
    root: PathBuf,
    /// 额外筛选模式，为空时接受所有文档
    sources: Vec<Pattern>,
    /// 不遍历的目录（如位于源目录内的输出目录）
    exclude: Option<PathBuf>,
}

impl DocumentCollector {
    /// 创建新的文档收集器
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            sources: Vec::new(),
            exclude: None,
        }
    }

    /// 设置筛选模式
    pub fn with_sources(mut self, patterns: &[String]) -> Result<Self> {
        self.sources = compile_patterns(patterns)?;
        Ok(self)
    }

    /// 跳过位于根目录之内的指定目录
    ///
    /// 根目录本身或其祖先目录不会被排除。
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if dir.starts_with(&self.root) && dir != self.root {
            self.exclude = Some(dir);
        }
        self
    }

    /// 检查文件名是否为 AsciiDoc 文档
    pub fn is_document(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| DOCUMENT_EXTENSION.is_match(name))
    }

    /// 收集文档和跳过的文件
    pub fn collect(&self) -> Result<Collected> {
        let mut collected = Collected::default();

        for entry in walk(&self.root, self.exclude.as_deref()) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            if Self::is_document(&path) && self.matches_sources(&path) {
                collected.documents.push(path);
            } else {
                collected.skipped.push(path);
            }
        }

        Ok(collected)
    }

    fn matches_sources(&self, path: &Path) -> bool {
        matches_any(&self.sources, &self.root, path, true)
    }
}

/// 按文件名排序遍历目录，跳过 `exclude` 下的条目
pub(crate) fn walk<'a>(
    root: &'a Path,
    exclude: Option<&'a Path>,
) -> impl Iterator<Item = Result<walkdir::DirEntry>> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| exclude.map_or(true, |dir| !e.path().starts_with(dir)))
        .map(move |entry| {
            entry.map_err(|e| RenderError::WalkError {
                path: e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string(),
                source: e,
            })
        })
}

/// 编译 glob 模式列表
pub(crate) fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                RenderError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
            })
        })
        .collect()
}

/// 检查路径（相对 `root`，`/` 分隔）或文件名是否匹配任一模式
///
/// 模式为空时返回 `empty_matches`。
pub(crate) fn matches_any(
    patterns: &[Pattern],
    root: &Path,
    path: &Path,
    empty_matches: bool,
) -> bool {
    if patterns.is_empty() {
        return empty_matches;
    }

    let relative = relative_path(root, path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    patterns
        .iter()
        .any(|p| p.matches(&relative) || p.matches(&file_name))
}

/// 相对路径，统一使用 `/` 分隔
pub(crate) fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
