//! # convert 命令实现
//!
//! 渲染单个 AsciiDoc 文档。
//!
//! ## 功能
//! - 输入为文件或标准输入
//! - 输出到源文件旁、指定文件/目录，或标准输出
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `document/renderer.rs`
//! - 使用 `utils/output.rs`

use crate::cli::convert::ConvertArgs;
use crate::document::{render_document, RenderOutput};
use crate::error::Result;
use crate::models::options::collect_attributes;
use crate::models::{RenderOptions, Source};
use crate::utils::output;

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    let options = build_options(&args)?;
    let source = Source::from_path(&args.input);

    match render_document(source, options)? {
        RenderOutput::Text(text) => output::print_rendered(&text),
        RenderOutput::Written(path) => {
            output::print_done(&format!("Rendered to {}", path.display()));
        }
    }

    Ok(())
}

/// 由命令行参数构造渲染选项
fn build_options(args: &ConvertArgs) -> Result<RenderOptions> {
    let mut options = RenderOptions::new()
        .with_overrides(collect_attributes(&args.attributes)?)
        .with_safe(args.safe)
        .in_place(args.in_place);

    if let Some(backend) = args.backend {
        options = options.with_backend(backend);
    }
    if let Some(path) = &args.to_file {
        options = options.to_file(path);
    }
    if let Some(dir) = &args.base_dir {
        options = options.with_base_dir(dir);
    }
    if args.header_footer {
        options = options.with_header_footer(true);
    } else if args.embedded {
        options = options.with_header_footer(false);
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::models::{Backend, SafeMode};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        let mut full = vec!["adoc-batch", "convert"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Convert(args) => args,
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_build_options() {
        let args = convert_args(&["a.adoc", "-b", "docbook", "-a", "x=1", "--embedded"]);
        let options = build_options(&args).unwrap();

        assert_eq!(options.backend, Some(Backend::Docbook5));
        assert_eq!(options.header_footer, Some(false));
        assert_eq!(options.safe, SafeMode::Secure);
        assert_eq!(options.attributes.get("x").map(String::as_str), Some("1"));
        assert!(!options.in_place);
        assert!(options.to_file.is_none());
    }

    #[test]
    fn test_header_footer_left_unset() {
        let options = build_options(&convert_args(&["a.adoc"])).unwrap();
        assert_eq!(options.header_footer, None);
    }

    #[test]
    fn test_execute_in_place() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("page.adoc");
        fs::write(&input, "= Page\n\nHello.\n").unwrap();

        let input_arg = input.to_string_lossy().to_string();
        execute(convert_args(&[&input_arg, "--in-place"])).unwrap();

        let html = fs::read_to_string(dir.path().join("page.html")).unwrap();
        assert!(html.contains("<title>Page</title>"));
    }

    #[test]
    fn test_execute_missing_file() {
        let dir = tempdir().unwrap();
        let input_arg = dir.path().join("missing.adoc").to_string_lossy().to_string();
        assert!(execute(convert_args(&[&input_arg])).is_err());
    }
}
