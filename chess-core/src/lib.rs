//! 国际象棋规则库
//!
//! 包含:
//! - 棋子、格子、棋盘等核心数据结构
//! - 局面文本解析（`rnbqkbnr/pppppppp/8/...`）
//! - 攻击判定、走法验证（含易位、升变）与执行
//! - 将死 / 逼和判定
//! - 坐标记号（`e2e4`）
//!
//! 所有操作都是纯函数：输入棋盘不会被修改，也没有全局状态。

mod board;
mod constants;
mod error;
mod layout;
mod moves;
mod notation;
mod piece;

pub use board::{Board, BoardState};
pub use constants::*;
pub use error::{ChessError, LayoutError, Result};
pub use layout::Layout;
pub use moves::{GameState, Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Color, Piece, PieceType, Square};
