//! # 文档块结构
//!
//! 解析器输出、转换器输入的块级语法树。
//!
//! ## 依赖关系
//! - 被 `parsers/asciidoc.rs` 构造
//! - 被 `converters/` 遍历

/// 提示块类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AdmonitionKind {
    /// 从段落前缀识别（`NOTE:` 等）
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NOTE" => Some(AdmonitionKind::Note),
            "TIP" => Some(AdmonitionKind::Tip),
            "IMPORTANT" => Some(AdmonitionKind::Important),
            "WARNING" => Some(AdmonitionKind::Warning),
            "CAUTION" => Some(AdmonitionKind::Caution),
            _ => None,
        }
    }

    /// 小写名称，用于 CSS 类名和 DocBook 元素名
    pub fn name(&self) -> &'static str {
        match self {
            AdmonitionKind::Note => "note",
            AdmonitionKind::Tip => "tip",
            AdmonitionKind::Important => "important",
            AdmonitionKind::Warning => "warning",
            AdmonitionKind::Caution => "caution",
        }
    }

    /// 显示标题
    pub fn caption(&self) -> &'static str {
        match self {
            AdmonitionKind::Note => "Note",
            AdmonitionKind::Tip => "Tip",
            AdmonitionKind::Important => "Important",
            AdmonitionKind::Warning => "Warning",
            AdmonitionKind::Caution => "Caution",
        }
    }
}

/// 块级元素
///
/// 文本字段保存已完成属性替换、尚未转义的原文；
/// 行内标记由各转换器处理。
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Section {
        level: usize,
        id: String,
        title: String,
        blocks: Vec<Block>,
    },
    Paragraph {
        title: Option<String>,
        text: String,
    },
    Listing {
        title: Option<String>,
        lines: Vec<String>,
    },
    Literal {
        title: Option<String>,
        lines: Vec<String>,
    },
    UnorderedList {
        title: Option<String>,
        items: Vec<String>,
    },
    OrderedList {
        title: Option<String>,
        items: Vec<String>,
    },
    Admonition {
        kind: AdmonitionKind,
        title: Option<String>,
        text: String,
    },
}

/// 由章节标题生成锚点 ID（`_` 前缀，小写，非字母数字折叠为 `_`）
pub fn section_id(title: &str) -> String {
    let mut id = String::from("_");
    let mut last_sep = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            id.extend(c.to_lowercase());
            last_sep = false;
        } else if !last_sep {
            id.push('_');
            last_sep = true;
        }
    }
    while id.len() > 1 && id.ends_with('_') {
        id.pop();
    }
    id
}
