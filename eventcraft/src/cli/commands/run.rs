//! Run the event pipeline once

use crate::cli::app::RunArgs;
use anyhow::{Context, Result};
use eventcraft_core::{ArtifactWriter, EventCoordinator, StudioConfig};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

const VISUAL_FAILED: &str = "主视觉设计图片生成失败。";

/// Whether the entered line asks to quit
fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// One line of input without its line ending, or `None` at end of input
fn read_description(reader: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).context("Failed to read event description")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_for_input() -> Result<Option<String>> {
    println!("欢迎使用大信科活动规划与宣传智能系统：\n");
    println!("请输入活动需求描述（自然语言，输入exit退出）：");
    io::stdout().flush()?;

    read_description(&mut io::stdin().lock())
}

/// Execute the run command
pub async fn execute(args: RunArgs, config_path: Option<&Path>) -> Result<()> {
    let input = match args.input {
        Some(input) => Some(input),
        None => prompt_for_input()?,
    };

    let Some(input) = input.filter(|line| !is_exit(line)) else {
        println!("退出程序。");
        return Ok(());
    };

    let config = StudioConfig::load(config_path).context("Failed to load configuration")?;
    let coordinator = EventCoordinator::from_config(&config).context("Failed to set up generative services")?;

    println!("系统正在处理，请稍候...（调用外部服务可能需要几分钟）");
    let outcome = coordinator.run(&input).await;
    info!("Run {} finished at {}", outcome.run_id, outcome.generated_at.to_rfc3339());

    tokio::fs::create_dir_all(&args.output_dir)
        .await
        .with_context(|| format!("Failed to create {:?}", args.output_dir))?;

    let writer = ArtifactWriter::new(&args.output_dir);
    let written = writer.write(&outcome).await?;

    if outcome.visual.is_none() {
        println!("{}", VISUAL_FAILED);
    }
    for path in &written {
        println!("已保存到 {}", path.display());
    }
    println!("所有输出已完成。");

    Ok(())
}
