//! 错误类型定义

use thiserror::Error;

use crate::piece::{Color, Square};

/// 局面文本格式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// 空字符串
    #[error("Empty layout string")]
    Empty,

    /// 棋盘快照的格子数不是 64
    #[error("Expected 64 squares, got {count}")]
    SquareCount { count: usize },

    /// 横线数量不对
    #[error("Expected 8 ranks, got {count}")]
    RankCount { count: usize },

    /// 某一横线格子数不是 8
    #[error("Rank {rank} covers {files} files, expected 8")]
    FileCount { rank: usize, files: usize },

    /// 无效的空格数字
    #[error("Invalid empty-run digit '{digit}' in rank {rank}")]
    InvalidDigit { rank: usize, digit: char },

    /// 无效的棋子字符
    #[error("Invalid piece character '{found}' in rank {rank}")]
    InvalidPiece { rank: usize, found: char },

    /// 无效的走子方字段
    #[error("Invalid side-to-move field: {found}")]
    InvalidSideToMove { found: String },

    /// 王的数量不对
    #[error("Expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// 国际象棋规则层错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 无效的格子
    #[error("Invalid square: {name}")]
    InvalidSquare { name: String },

    /// 无效的走法记号
    #[error("Invalid move notation '{text}': {reason}")]
    InvalidNotation { text: String, reason: String },

    /// 起始格没有棋子
    #[error("No piece at {square}")]
    NoPiece { square: Square },
}

/// 规则层操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
