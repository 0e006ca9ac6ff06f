//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝。白方取最大值，黑方取最小值，
//! 搜索深度由对手等级分决定，不含随机性，也没有开局库。

use std::time::Instant;

use chess_core::{Board, Color, Move, MoveGenerator};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::evaluate::Evaluator;

/// 将死分数（白方被将死为负）
pub const MATE_SCORE: i32 = 30000;

/// 默认对手等级分
pub const DEFAULT_RATING: u32 = 1500;

/// AI 难度（按对手等级分分档）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 等级分低于 1500：depth=2
    Easy,
    /// 等级分 1500-2499：depth=3
    Medium,
    /// 等级分 2500 及以上：depth=4
    Hard,
}

impl Difficulty {
    /// 根据等级分选择难度
    pub fn from_rating(rating: u32) -> Self {
        if rating < 1500 {
            Difficulty::Easy
        } else if rating < 2500 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// 搜索深度
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub rating: u32,
    pub max_depth: u8,
}

impl AiConfig {
    pub fn from_rating(rating: u32) -> Self {
        Self {
            rating,
            max_depth: Difficulty::from_rating(rating).depth(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_rating(self.rating)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_rating(DEFAULT_RATING)
    }
}

/// AI 引擎
///
/// 除节点计数外不保存任何跨调用状态，同样的输入总是得到同样的走法。
#[derive(Debug, Clone)]
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从对手等级分创建
    pub fn from_rating(rating: u32) -> Self {
        Self::new(AiConfig::from_rating(rating))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法
    ///
    /// 根节点按合法走法的生成顺序逐个搜索，只有严格更优才替换，
    /// 同分时保留最先找到的走法。无合法走法时返回 `None`。
    pub fn search(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.nodes_searched = 0;
        let started_at = Instant::now();

        let moves = MoveGenerator::legal_moves(board, color);
        if moves.is_empty() {
            warn!("search requested for {} with no legal moves", color);
            return None;
        }

        let depth = self.config.max_depth.max(1);
        let maximizing = color == Color::White;

        let mut best_move = moves[0];
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for mv in &moves {
            let next = MoveGenerator::apply(board, mv);
            let score = self.minimax(&next, depth - 1, i32::MIN, i32::MAX, !maximizing);
            trace!(%mv, score, "root move");

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = *mv;
            }
        }

        debug!(
            depth,
            nodes = self.nodes_searched,
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            best = %best_move,
            score = best_score,
            "search finished"
        );

        Some(best_move)
    }

    /// Minimax + Alpha-Beta 搜索，返回白方视角的分数
    fn minimax(&mut self, board: &Board, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
        self.nodes_searched += 1;

        // 到达深度限制，返回静态评估
        if depth == 0 {
            return Evaluator::evaluate(board);
        }

        let color = if maximizing { Color::White } else { Color::Black };
        let mut moves = MoveGenerator::legal_moves(board, color);

        // 无子可动
        if moves.is_empty() {
            return if MoveGenerator::is_in_check(board, color) {
                // 被将死
                if maximizing {
                    -MATE_SCORE
                } else {
                    MATE_SCORE
                }
            } else {
                // 逼和
                0
            };
        }

        // 吃子走法优先，尽早收紧窗口（稳定排序，保持原有顺序）
        moves.sort_by_key(|mv| !mv.is_capture());

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in &moves {
                let next = MoveGenerator::apply(board, mv);
                let eval = self.minimax(&next, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break; // Beta 剪枝
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in &moves {
                let next = MoveGenerator::apply(board, mv);
                let eval = self.minimax(&next, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break; // Alpha 剪枝
                }
            }
            min_eval
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 按对手等级分搜索最佳走法
pub fn best_move(board: &Board, color: Color, rating: u32) -> Option<Move> {
    AiEngine::from_rating(rating).search(board, color)
}
