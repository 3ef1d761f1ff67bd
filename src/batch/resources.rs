//! # 资源复制
//!
//! 将源目录中匹配模式的非文档文件（图片、样式等）按相对路径复制到输出目录。
//!
//! ## 依赖关系
//! - 被 `batch/dispatcher.rs` 调用
//! - 使用 `batch/collector.rs` 的遍历与模式匹配

use super::collector::{compile_patterns, matches_any, relative_path, walk, DocumentCollector};
use crate::error::{RenderError, Result};

use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// 资源复制器
pub struct ResourceCopier {
    root: PathBuf,
    patterns: Vec<Pattern>,
    exclude: Option<PathBuf>,
}

impl ResourceCopier {
    pub fn new(root: impl Into<PathBuf>, patterns: &[String]) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            patterns: compile_patterns(patterns)?,
            exclude: None,
        })
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

    /// 未配置任何资源模式
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 列出待复制资源
    pub fn resources(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if self.is_empty() {
            return Ok(found);
        }

        for entry in walk(&self.root, self.exclude.as_deref()) {
            let entry = entry?;
            if !entry.file_type().is_file() || DocumentCollector::is_document(entry.path()) {
                continue;
            }
            if matches_any(&self.patterns, &self.root, entry.path(), false) {
                found.push(entry.into_path());
            }
        }

        Ok(found)
    }

    /// 复制资源到输出目录，返回复制数量
    pub fn copy_to(&self, output_dir: &Path) -> Result<usize> {
        let mut copied = 0;

        for source in self.resources()? {
            let target = output_dir.join(relative_path(&self.root, &source));
            if target == source {
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| RenderError::FileWriteError {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
            fs::copy(&source, &target).map_err(|e| RenderError::FileWriteError {
                path: target.display().to_string(),
                source: e,
            })?;
            copied += 1;
        }

        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_copy_matching_resources() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        touch(src.path(), "images/logo.png");
        touch(src.path(), "images/nested/icon.svg");
        touch(src.path(), "images/page.adoc");
        touch(src.path(), "notes.txt");

        let copier = ResourceCopier::new(src.path(), &["images/**".to_string()]).unwrap();
        let copied = copier.copy_to(out.path()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(out.path().join("images/nested/icon.svg")).unwrap(),
            "images/nested/icon.svg"
        );
        assert!(!out.path().join("images/page.adoc").exists());
        assert!(!out.path().join("notes.txt").exists());
    }

    #[test]
    fn test_no_patterns_copies_nothing() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        touch(src.path(), "images/logo.png");

        let copier = ResourceCopier::new(src.path(), &[]).unwrap();
        assert!(copier.is_empty());
        assert_eq!(copier.copy_to(out.path()).unwrap(), 0);
    }

    #[test]
    fn test_output_inside_source_is_skipped() {
        let src = tempdir().unwrap();
        touch(src.path(), "style.css");
        let out = src.path().join("build");

        let copier = ResourceCopier::new(src.path(), &["*.css".to_string()])
            .unwrap()
            .exclude(&out);
        assert_eq!(copier.copy_to(&out).unwrap(), 1);
        assert_eq!(copier.copy_to(&out).unwrap(), 1);
        assert!(out.join("style.css").is_file());
    }

    #[test]
    fn test_output_parent_of_source() {
        let root = tempdir().unwrap();
        touch(root.path(), "docs/images/logo.png");
        let docs = root.path().join("docs");
        let out = root.path().join("site");

        let copier = ResourceCopier::new(&docs, &["images/*".to_string()])
            .unwrap()
            .exclude(root.path());
        assert_eq!(copier.copy_to(&out).unwrap(), 1);
        assert!(out.join("images/logo.png").is_file());
    }
}
