//! # render 命令实现
//!
//! 批量渲染源目录中的 AsciiDoc 文档。
//!
//! ## 功能
//! - 命令行参数转换为 `BatchConfig`
//! - 调用批量调度器
//! - 可选输出汇总表格
//!
//! ## 依赖关系
//! - 使用 `cli/render.rs` 定义的参数
//! - 使用 `batch/`, `models/`
//! - 使用 `utils/output.rs`

use crate::batch::{dispatch, BaseDir, BatchConfig, BatchResult};
use crate::cli::render::{BaseDirMode, RenderArgs};
use crate::error::Result;
use crate::models::options::collect_attributes;
use crate::models::Backend;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 汇总表格行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Output")]
    output: String,
}

/// 执行 render 命令
pub fn execute(args: RenderArgs) -> Result<()> {
    let config = build_config(&args)?;

    let backends: Vec<&str> = config.backends.iter().map(Backend::name).collect();
    output::print_header(&format!("Rendering AsciiDoc ({})", backends.join(", ")));
    output::print_info(&format!(
        "{} -> {}",
        config.source_dir.display(),
        config.output_dir.display()
    ));

    let result = dispatch(&config)?;

    if args.summary && !result.outputs.is_empty() {
        print_summary(&result);
    }

    if result.resources_copied > 0 {
        output::print_success(&format!("Copied {} resource files", result.resources_copied));
    }
    output::print_done(&format!(
        "{} processed: {} rendered, {} skipped",
        result.total(),
        result.rendered,
        result.skipped
    ));

    Ok(())
}

/// 由命令行参数构造批量配置
fn build_config(args: &RenderArgs) -> Result<BatchConfig> {
    let backends = if args.backends.is_empty() {
        vec![Backend::default()]
    } else {
        args.backends.clone()
    };

    let base_dir = match (&args.base_dir, args.base_dir_strategy) {
        (Some(dir), _) => BaseDir::Fixed(dir.clone()),
        (None, BaseDirMode::SourceDir) => BaseDir::SourceDir,
        (None, BaseDirMode::SourceFile) => BaseDir::SourceFile,
    };

    let mut config = BatchConfig::new(&args.source_dir, &args.output_dir)
        .with_backends(backends)
        .with_attributes(collect_attributes(&args.attributes)?)
        .with_safe(args.safe)
        .with_base_dir(base_dir)
        .with_sources(args.sources.clone())
        .with_resources(args.resources.clone())
        .log_documents(args.log_documents)
        .show_progress(!args.no_progress);

    if args.no_resources {
        config = config.copy_no_resources();
    } else if !args.copy_resources_only_if.is_empty() {
        config = config.copy_resources_only_if(args.copy_resources_only_if.clone());
    }

    Ok(config)
}

fn print_summary(result: &BatchResult) {
    let rows: Vec<SummaryRow> = result
        .outputs
        .iter()
        .enumerate()
        .map(|(i, (source, target))| SummaryRow {
            index: i + 1,
            source: source.display().to_string(),
            output: target
                .as_ref()
                .map(|t| t.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    output::print_header("Rendered Documents");
    println!("{}", Table::new(&rows));
}
