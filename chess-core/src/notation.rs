//! 坐标记号
//!
//! 格式：`<起始格><目标格>[升变]`，如 `e2e4`、`h5f7`、`e7e8q`。
//! 题目答案和网络广播都用这种写法。

use crate::board::Board;
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::piece::{PieceType, Square};

/// 坐标记号
pub struct Notation;

impl Notation {
    /// 将走法转换为坐标记号
    pub fn to_coordinate(mv: &Move) -> String {
        mv.to_string()
    }

    /// 解析坐标记号，棋子和被吃子从棋盘上读取
    ///
    /// 只检查格式，不检查合法性；调用方仍需用
    /// [`MoveGenerator::is_legal`](crate::MoveGenerator::is_legal) 验证。
    pub fn parse_coordinate(board: &Board, text: &str) -> Result<Move> {
        let text = text.trim();
        let invalid = |reason: &str| ChessError::InvalidNotation {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(invalid("expected 4 or 5 characters"));
        }

        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match PieceType::from_char(c) {
                Some(piece_type) if piece_type.is_promotion_target() => Some(piece_type),
                _ => return Err(invalid("invalid promotion piece")),
            },
        };

        let piece = board.get(from).ok_or(ChessError::NoPiece { square: from })?;

        let mut mv = match board.get(to) {
            Some(captured) => Move::with_capture(from, to, piece, captured),
            None => Move::new(from, to, piece),
        };
        mv.promotion = promotion;

        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveGenerator;
    use crate::piece::{Color, Piece};

    #[test]
    fn test_parse_simple() {
        let board = Board::initial();
        let mv = Notation::parse_coordinate(&board, "e2e4").unwrap();

        assert_eq!(mv.from, Square::new_unchecked(6, 4));
        assert_eq!(mv.to, Square::new_unchecked(4, 4));
        assert_eq!(mv.piece, Piece::new(PieceType::Pawn, Color::White));
        assert_eq!(mv.captured, None);
        assert_eq!(mv.promotion, None);
        assert!(MoveGenerator::is_legal(&board, &mv));
    }

    #[test]
    fn test_parse_capture() {
        let board =
            Board::from_layout("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w").unwrap();
        let mv = Notation::parse_coordinate(&board, "h5f7").unwrap();

        assert_eq!(mv.piece, Piece::new(PieceType::Queen, Color::White));
        assert_eq!(mv.captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert!(MoveGenerator::is_legal(&board, &mv));
    }

    #[test]
    fn test_parse_promotion() {
        let board = Board::from_layout("8/4P3/8/4K3/8/8/3k4/8 w").unwrap();
        let mv = Notation::parse_coordinate(&board, "e7e8n").unwrap();
        assert_eq!(mv.promotion, Some(PieceType::Knight));
        assert!(MoveGenerator::is_legal(&board, &mv));

        assert!(Notation::parse_coordinate(&board, "e7e8k").is_err());
        assert!(Notation::parse_coordinate(&board, "e7e8x").is_err());
    }

    #[test]
    fn test_parse_errors() {
        let board = Board::initial();

        assert!(matches!(
            Notation::parse_coordinate(&board, "e2"),
            Err(ChessError::InvalidNotation { .. })
        ));
        assert!(matches!(
            Notation::parse_coordinate(&board, "z2e4"),
            Err(ChessError::InvalidSquare { .. })
        ));
        assert_eq!(
            Notation::parse_coordinate(&board, "e4e5"),
            Err(ChessError::NoPiece {
                square: Square::new_unchecked(4, 4)
            })
        );
        assert!(Notation::parse_coordinate(&board, "é2e4").is_err());
    }

    #[test]
    fn test_coordinate_roundtrip() {
        let board = Board::initial();
        for mv in MoveGenerator::legal_moves(&board, Color::White) {
            let text = Notation::to_coordinate(&mv);
            assert_eq!(Notation::parse_coordinate(&board, &text).unwrap(), mv);
        }
    }
}
