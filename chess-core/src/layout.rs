//! 局面文本解析和生成
//!
//! 格式：`<棋盘> [<走子方> [其余字段...]]`
//!
//! 棋盘从第 8 横线写到第 1 横线，横线之间用 `/` 分隔；字母表示棋子
//! （白方大写，黑方小写），数字 1-8 表示连续空格。走子方为 `w` 或 `b`，
//! 缺省为白方。其后的字段（易位、吃过路兵、步数）只为兼容常见写法，解析时忽略。
//!
//! 示例：
//! `r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 1`

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_SIZE, INITIAL_LAYOUT};
use crate::error::LayoutError;
use crate::piece::{Color, Piece, Square};

/// 局面文本处理
pub struct Layout;

impl Layout {
    /// 解析局面文本为对局状态
    pub fn parse(text: &str) -> Result<BoardState, LayoutError> {
        let mut fields = text.split_whitespace();
        let board_field = fields.next().ok_or(LayoutError::Empty)?;

        let board = Self::parse_board(board_field)?;

        let side_to_move = match fields.next() {
            None => Color::White,
            Some(field) => {
                let mut chars = field.chars();
                match (chars.next().and_then(Color::from_layout_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => {
                        return Err(LayoutError::InvalidSideToMove {
                            found: field.to_string(),
                        })
                    }
                }
            }
        };

        Ok(BoardState::from_board(board, side_to_move))
    }

    /// 解析棋盘部分并检查双方各有一个王
    pub fn parse_board(board_str: &str) -> Result<Board, LayoutError> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = board_str.split('/').collect();

        if ranks.len() != BOARD_SIZE {
            return Err(LayoutError::RankCount { count: ranks.len() });
        }

        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;

            for c in rank.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(LayoutError::InvalidDigit { rank: row, digit: c });
                    }
                    col += digit as usize;
                } else if let Some(piece) = Piece::from_layout_char(c) {
                    if col < BOARD_SIZE {
                        board.set(Square::new_unchecked(row as u8, col as u8), Some(piece));
                    }
                    col += 1;
                } else {
                    return Err(LayoutError::InvalidPiece { rank: row, found: c });
                }

                if col > BOARD_SIZE {
                    return Err(LayoutError::FileCount { rank: row, files: col });
                }
            }

            if col != BOARD_SIZE {
                return Err(LayoutError::FileCount { rank: row, files: col });
            }
        }

        for color in [Color::White, Color::Black] {
            let count = board.king_count(color);
            if count != 1 {
                return Err(LayoutError::KingCount { color, count });
            }
        }

        Ok(board)
    }

    /// 将对局状态转换为局面文本（棋盘 + 走子方）
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_layout_char()
        )
    }

    /// 将棋盘转换为局面文本的棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut ranks = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut rank = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Square::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        rank.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    rank.push(piece.to_layout_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                rank.push_str(&empty_count.to_string());
            }

            ranks.push(rank);
        }

        ranks.join("/")
    }

    /// 解析初始局面
    pub fn initial() -> BoardState {
        Self::parse(INITIAL_LAYOUT).expect("Initial layout should be valid")
    }
}
