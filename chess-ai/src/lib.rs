//! 国际象棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数（子力 + 位置分值表）
//! - Minimax + Alpha-Beta 搜索
//! - 按对手等级分选择搜索深度
//! - 后台线程搜索任务

mod evaluate;
mod search;
mod task;

pub use evaluate::Evaluator;
pub use search::{best_move, AiConfig, AiEngine, Difficulty, DEFAULT_RATING, MATE_SCORE};
pub use task::SearchTask;
