//! 国际象棋命令行宿主
//!
//! 运行方式:
//! ```bash
//! # 初始局面，默认等级分
//! cargo run -p chess-cli
//!
//! # 指定局面与对手等级分，先走若干步再让 AI 应着
//! cargo run -p chess-cli -- "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w" --rating 2000
//! cargo run -p chess-cli -- --moves e2e4 e7e5 --config ai.json
//! ```

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chess_ai::{AiConfig, AiEngine, SearchTask, DEFAULT_RATING};
use chess_core::{BoardState, GameState, Layout, Notation};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "chess-cli", version, about = "国际象棋规则与 AI 命令行")]
struct Args {
    /// 局面文本（棋盘字段，可跟行棋方 w/b），缺省为初始局面
    layout: Option<String>,

    /// 对手等级分，决定搜索深度
    #[arg(long, default_value_t = DEFAULT_RATING)]
    rating: u32,

    /// AI 配置文件（JSON），覆盖 --rating
    #[arg(long)]
    config: Option<PathBuf>,

    /// 让 AI 思考前先走的坐标走法，如 e2e4 e7e5
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chess_cli=info".parse()?)
                .add_directive("chess_ai=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut state = match &args.layout {
        Some(text) => Layout::parse(text).with_context(|| format!("局面格式无效: {}", text))?,
        None => BoardState::initial(),
    };

    for text in &args.moves {
        let mv = Notation::parse_coordinate(&state.board, text)
            .with_context(|| format!("无法解析走法: {}", text))?;
        if !state.is_legal(&mv) {
            bail!("非法走法: {}", text);
        }
        state = state.play(&mv);
        debug!(%mv, "move played");
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AiConfig::from_rating(args.rating),
    };
    info!(
        rating = config.rating,
        depth = config.max_depth,
        "AI 配置已就绪"
    );

    println!("{}", state.board);
    println!("局面: {}", Layout::to_string(&state));
    println!("轮到: {}", state.side_to_move);

    match state.status() {
        GameState::Checkmate => {
            println!("{} 被将死", state.side_to_move);
            return Ok(());
        }
        GameState::Stalemate => {
            println!("逼和");
            return Ok(());
        }
        GameState::InProgress => {}
    }

    let moves: Vec<String> = state
        .legal_moves()
        .iter()
        .map(Notation::to_coordinate)
        .collect();
    println!("合法走法 ({}): {}", moves.len(), moves.join(" "));

    let task = SearchTask::spawn(AiEngine::new(config), state.board.clone(), state.side_to_move);
    while !task.is_finished() {
        thread::sleep(Duration::from_millis(10));
    }
    let elapsed = task.elapsed();

    match task.join() {
        Some(mv) => {
            info!(elapsed_ms = elapsed.as_millis() as u64, "AI 思考完成");
            println!("AI 走法: {}", Notation::to_coordinate(&mv));
            let next = state.play(&mv);
            if next.status() != GameState::InProgress {
                println!("结果: {:?}", next.status());
            }
        }
        None => println!("AI 没有可走的棋"),
    }

    Ok(())
}

/// 从 JSON 文件读取 AI 配置
fn load_config(path: &Path) -> Result<AiConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {:?}", path))?;
    let config: AiConfig = serde_json::from_str(&content).context("解析 AI 配置失败")?;
    info!("已加载配置: {:?}", path);
    Ok(config)
}
