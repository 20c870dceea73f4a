//! 淘汰判定命令行工具
//!
//! 读取赛程文件，输出每支球队的淘汰结论与证书

use anyhow::Context;
use baseball_elimination::algorithm::EliminationSolver;
use baseball_elimination::cli::{render_json, PrintMode, Printer};
use baseball_elimination::config::{LoadOptions, SolverConfig, TrivialPolicy};
use baseball_elimination::import::load_schedule_file;
use baseball_elimination::metrics::global_metrics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eliminate")]
#[command(about = "分区夺冠淘汰判定工具")]
struct Args {
    /// 赛程文件（.json 为 JSON 格式，其余按文本格式解析）
    input: PathBuf,

    /// 只判定指定球队
    #[arg(short, long)]
    team: Vec<String>,

    /// 垂直输出（每队一行结论）
    #[arg(short = 'V', long)]
    vertical: bool,

    /// 输出 JSON
    #[arg(long, conflicts_with = "vertical")]
    json: bool,

    /// remaining 允许包含跨分区比赛
    #[arg(long)]
    interdivision: bool,

    /// 平凡淘汰只给出第一个对手
    #[arg(long)]
    first_trivial: bool,

    /// 顺序判定（不使用并行）
    #[arg(long)]
    sequential: bool,

    /// 输出求解统计
    #[arg(long)]
    stats: bool,

    /// 详细日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = if args.interdivision {
        LoadOptions::interdivision()
    } else {
        LoadOptions::default()
    };
    let division = load_schedule_file(&args.input, options)
        .with_context(|| format!("加载赛程失败: {}", args.input.display()))?;

    let config = SolverConfig {
        trivial_policy: if args.first_trivial {
            TrivialPolicy::FirstFound
        } else {
            TrivialPolicy::CollectAll
        },
        parallel: !args.sequential,
    };
    let solver = EliminationSolver::with_config(&division, config);

    let results = if args.team.is_empty() {
        solver.analyze_all()?
    } else {
        args.team
            .iter()
            .map(|name| solver.analyze(name))
            .collect::<Result<Vec<_>, _>>()
            .context("判定失败")?
    };

    if args.json {
        println!("{}", render_json(&results)?);
    } else {
        let mode = if args.vertical {
            PrintMode::Vertical
        } else {
            PrintMode::Table
        };
        print!("{}", Printer::new(mode).print_report(&division, &results));
    }

    if args.stats {
        eprintln!("{}", Printer::default().print_stats(&global_metrics().snapshot()));
    }

    Ok(())
}
