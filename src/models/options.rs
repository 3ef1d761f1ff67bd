//! # 渲染选项数据模型
//!
//! 定义输出后端、安全模式、文档属性和渲染选项。
//!
//! ## 依赖关系
//! - 被 `document/`, `batch/`, `cli/` 使用
//! - 使用 `error.rs`

use crate::error::{RenderError, Result};
use clap::ValueEnum;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::str::FromStr;

/// 文档属性表（名称 -> 值）
pub type Attributes = BTreeMap<String, String>;

/// 命令行传入的属性：设置的值与取消的名称，两者在文档中均被锁定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeOverrides {
    pub set: Attributes,
    pub unset: BTreeSet<String>,
}

impl AttributeOverrides {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.set.get(name).map(String::as_str)
    }
}

// ─────────────────────────────────────────────────────────────
// 输出后端
// ─────────────────────────────────────────────────────────────

/// 输出后端
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Backend {
    /// HTML5 page
    #[default]
    #[value(name = "html5", alias = "html")]
    Html5,
    /// DocBook 5 XML
    #[value(name = "docbook5", alias = "docbook")]
    Docbook5,
}

impl Backend {
    /// 后端名称（写入 `backend` 属性）
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Html5 => "html5",
            Backend::Docbook5 => "docbook5",
        }
    }

    /// 输出文件后缀（写入 `outfilesuffix` 属性）
    pub fn outfilesuffix(&self) -> &'static str {
        match self {
            Backend::Html5 => ".html",
            Backend::Docbook5 => ".xml",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Backend {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" | "html5" => Ok(Backend::Html5),
            "docbook" | "docbook5" => Ok(Backend::Docbook5),
            other => Err(RenderError::UnknownBackend(other.to_string())),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 安全模式
// ─────────────────────────────────────────────────────────────

/// 安全模式，限制渲染时允许的文件系统操作
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SafeMode {
    /// No restrictions
    Unsafe,
    /// Includes must stay inside the base directory
    Safe,
    /// Same as safe, for server-side rendering
    Server,
    /// Includes are turned into links
    #[default]
    Secure,
}

impl SafeMode {
    /// 安全等级数值
    pub fn level(&self) -> u8 {
        match self {
            SafeMode::Unsafe => 0,
            SafeMode::Safe => 1,
            SafeMode::Server => 10,
            SafeMode::Secure => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SafeMode::Unsafe => "unsafe",
            SafeMode::Safe => "safe",
            SafeMode::Server => "server",
            SafeMode::Secure => "secure",
        }
    }
}

impl std::fmt::Display for SafeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────
// 渲染选项
// ─────────────────────────────────────────────────────────────

/// 单次渲染调用的选项
///
/// `in_place` 与 `to_file` 仅在渲染阶段使用，加载文档前会被取出。
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// 传入的文档属性，文档内的同名属性条目无法覆盖
    pub attributes: Attributes,
    /// 是否输出完整文档（含页眉页脚）；`None` 表示未显式设置
    pub header_footer: Option<bool>,
    /// 在源文件旁输出
    pub in_place: bool,
    /// 输出文件或目录
    pub to_file: Option<PathBuf>,
    /// 输出后端；`None` 时回退到 `backend` 属性，再回退到 html5
    pub backend: Option<Backend>,
    /// 安全模式
    pub safe: SafeMode,
    /// 基准目录（include 的安全边界）
    pub base_dir: Option<PathBuf>,
    /// 取消并锁定的属性名，文档内无法重新设置
    pub unset_attributes: BTreeSet<String>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// 应用命令行属性
    pub fn with_overrides(mut self, overrides: AttributeOverrides) -> Self {
        for name in &overrides.unset {
            self.attributes.remove(name);
        }
        self.attributes.extend(overrides.set);
        self.unset_attributes.extend(overrides.unset);
        self
    }

    pub fn with_header_footer(mut self, header_footer: bool) -> Self {
        self.header_footer = Some(header_footer);
        self
    }

    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.to_file = Some(path.into());
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_safe(mut self, safe: SafeMode) -> Self {
        self.safe = safe;
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// 解析实际使用的后端
    pub fn resolved_backend(&self) -> Result<Backend> {
        if let Some(backend) = self.backend {
            return Ok(backend);
        }
        match self.attributes.get("backend") {
            Some(name) => name.parse(),
            None => Ok(Backend::default()),
        }
    }
}

/// 解析命令行属性参数
///
/// - `name=value` 设置属性
/// - `name` 设置为空值
/// - `name!` 取消属性（返回 `None`）
pub fn parse_attribute(arg: &str) -> Result<(String, Option<String>)> {
    let (name, value) = match arg.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.to_string())),
        None => (arg.trim(), None),
    };

    if let Some(name) = name.strip_suffix('!') {
        if name.is_empty() || value.is_some() {
            return Err(RenderError::InvalidAttribute(arg.to_string()));
        }
        return Ok((name.to_string(), None));
    }

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(RenderError::InvalidAttribute(arg.to_string()));
    }

    Ok((name.to_string(), Some(value.unwrap_or_default())))
}

/// 合并一组属性参数，后出现的同名参数生效
pub fn collect_attributes(args: &[String]) -> Result<AttributeOverrides> {
    let mut overrides = AttributeOverrides::default();
    for arg in args {
        match parse_attribute(arg)? {
            (name, Some(value)) => {
                overrides.unset.remove(&name);
                overrides.set.insert(name, value);
            }
            (name, None) => {
                overrides.set.remove(&name);
                overrides.unset.insert(name);
            }
        }
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("html".parse::<Backend>().unwrap(), Backend::Html5);
        assert_eq!("HTML5".parse::<Backend>().unwrap(), Backend::Html5);
        assert_eq!("docbook".parse::<Backend>().unwrap(), Backend::Docbook5);
        assert!(matches!(
            "pdf".parse::<Backend>(),
            Err(RenderError::UnknownBackend(name)) if name == "pdf"
        ));
    }

    #[test]
    fn test_backend_suffix() {
        assert_eq!(Backend::Html5.outfilesuffix(), ".html");
        assert_eq!(Backend::Docbook5.outfilesuffix(), ".xml");
    }

    #[test]
    fn test_safe_mode_levels() {
        assert_eq!(SafeMode::Unsafe.level(), 0);
        assert_eq!(SafeMode::Secure.level(), 20);
        assert!(SafeMode::Safe < SafeMode::Server);
        assert_eq!(SafeMode::default(), SafeMode::Secure);
    }

    #[test]
    fn test_resolved_backend_order() {
        let options = RenderOptions::new();
        assert_eq!(options.resolved_backend().unwrap(), Backend::Html5);

        let options = RenderOptions::new().with_attribute("backend", "docbook");
        assert_eq!(options.resolved_backend().unwrap(), Backend::Docbook5);

        let options = RenderOptions::new()
            .with_attribute("backend", "docbook")
            .with_backend(Backend::Html5);
        assert_eq!(options.resolved_backend().unwrap(), Backend::Html5);
    }

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("toc=left").unwrap(),
            ("toc".to_string(), Some("left".to_string()))
        );
        assert_eq!(
            parse_attribute("sectnums").unwrap(),
            ("sectnums".to_string(), Some(String::new()))
        );
        assert_eq!(parse_attribute("toc!").unwrap(), ("toc".to_string(), None));
        assert!(parse_attribute("").is_err());
        assert!(parse_attribute("bad name=1").is_err());
        assert!(parse_attribute("toc!=1").is_err());
    }

    #[test]
    fn test_collect_attributes_unset() {
        let args = vec!["a=1".to_string(), "b=2".to_string(), "a!".to_string()];
        let overrides = collect_attributes(&args).unwrap();
        assert_eq!(overrides.set.len(), 1);
        assert_eq!(overrides.get("b"), Some("2"));
        assert!(overrides.unset.contains("a"));

        let args = vec!["c!".to_string(), "c=3".to_string()];
        let overrides = collect_attributes(&args).unwrap();
        assert_eq!(overrides.get("c"), Some("3"));
        assert!(overrides.unset.is_empty());
    }

    #[test]
    fn test_with_overrides_unsets_existing() {
        let overrides = collect_attributes(&["toc!".to_string()]).unwrap();
        let options = RenderOptions::new()
            .with_attribute("toc", "left")
            .with_overrides(overrides);
        assert!(!options.attributes.contains_key("toc"));
        assert!(options.unset_attributes.contains("toc"));
    }
}
