//! 棋盘状态

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, INITIAL_LAYOUT, SQUARE_COUNT};
use crate::error::LayoutError;
use crate::layout::Layout;
use crate::moves::{GameState, Move, MoveGenerator};
use crate::piece::{Color, Piece, PieceType, Square};

/// 棋盘
///
/// 约定为不可变值：走子通过 [`Board::apply`] 产生新棋盘，原棋盘保持不变，
/// 调用方丢弃新值即可悔棋。检测将军要求双方各有且只有一个王，
/// [`Board::from_layout`] 会拒绝不满足条件的局面；手动用 [`Board::set`]
/// 摆出的局面由调用方自己保证。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

/// 反序列化时的原始数据，检查通过后才转成 [`Board`]
#[derive(Deserialize)]
struct BoardSnapshot {
    squares: Vec<Option<Piece>>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = LayoutError;

    /// 与 [`Board::from_layout`] 相同的约束：64 格，双方各一个王
    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        if snapshot.squares.len() != SQUARE_COUNT {
            return Err(LayoutError::SquareCount {
                count: snapshot.squares.len(),
            });
        }

        let board = Board {
            squares: snapshot.squares,
        };
        for color in [Color::White, Color::Black] {
            let count = board.king_count(color);
            if count != 1 {
                return Err(LayoutError::KingCount { color, count });
            }
        }
        Ok(board)
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        Self::from_layout(INITIAL_LAYOUT).expect("Initial layout should be valid")
    }

    /// 从局面文本创建棋盘（只解析棋盘字段）
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        Layout::parse(text).map(|state| state.board)
    }

    /// 获取指定格子的棋子
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if sq.is_valid() {
            self.squares[sq.to_index()]
        } else {
            None
        }
    }

    /// 设置指定格子的棋子
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if sq.is_valid() {
            self.squares[sq.to_index()] = piece;
        }
    }

    /// 检查格子是否为空
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// 执行一个已验证合法的走法，返回新棋盘
    pub fn apply(&self, mv: &Move) -> Board {
        MoveGenerator::apply(self, mv)
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.get(sq) == Some(Piece::new(PieceType::King, color))
        })
    }

    /// 统计指定阵营的王的数量
    pub fn king_count(&self, color: Color) -> usize {
        let king = Some(Piece::new(PieceType::King, color));
        self.squares.iter().filter(|&&p| p == king).count()
    }

    /// 获取指定阵营的所有棋子（行优先顺序）
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..BOARD_SIZE as u8 {
                let c = self
                    .get(Square::new_unchecked(row, col))
                    .map(|p| p.to_layout_char())
                    .unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// 调用方持有的对局状态（棋盘 + 走子方）
///
/// 引擎本身不记录轮次，走子历史也由调用方自行保存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
}

impl BoardState {
    /// 创建初始状态
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Color::White,
        }
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// 当前走子方的所有合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        MoveGenerator::legal_moves(&self.board, self.side_to_move)
    }

    /// 检查走法对当前走子方是否合法
    pub fn is_legal(&self, mv: &Move) -> bool {
        mv.piece.color == self.side_to_move && MoveGenerator::is_legal(&self.board, mv)
    }

    /// 当前局面状态
    pub fn status(&self) -> GameState {
        MoveGenerator::classify(&self.board, self.side_to_move)
    }

    /// 走一步并切换走子方（调用方需先用 [`BoardState::is_legal`] 验证）
    pub fn play(&self, mv: &Move) -> BoardState {
        BoardState {
            board: self.board.apply(mv),
            side_to_move: self.side_to_move.opponent(),
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        assert_eq!(
            board.get(sq("e1")),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.get(sq("d8")),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq("g1")),
            Some(Piece::new(PieceType::Knight, Color::White))
        );
        assert_eq!(
            board.get(sq("a7")),
            Some(Piece::new(PieceType::Pawn, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));

        assert_eq!(board.pieces(Color::White).len(), 16);
        assert_eq!(board.pieces(Color::Black).len(), 16);
        assert_eq!(board.all_pieces().len(), 32);
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(board.king_count(Color::White), 1);

        assert_eq!(Board::empty().find_king(Color::White), None);
        assert_eq!(Board::empty().king_count(Color::Black), 0);
    }

    #[test]
    fn test_pieces_row_major_order() {
        let board = Board::initial();
        let white = board.pieces(Color::White);
        // 第 7 行（第 2 横线）的兵先于底线棋子
        assert_eq!(white[0].0, sq("a2"));
        assert_eq!(white[15].0, sq("h1"));
    }

    #[test]
    fn test_display() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn test_board_state_play_switches_turn() {
        let state = BoardState::initial();
        let mv = Move::new(
            sq("e2"),
            sq("e4"),
            Piece::new(PieceType::Pawn, Color::White),
        );
        assert!(state.is_legal(&mv));

        let next = state.play(&mv);
        assert_eq!(next.side_to_move, Color::Black);
        assert!(next.board.is_empty(sq("e2")));
        assert_eq!(
            next.board.get(sq("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        // 原状态不变
        assert_eq!(state, BoardState::initial());
        // 轮到黑方时白方走法不合法
        assert!(!next.is_legal(&Move::new(
            sq("d2"),
            sq("d4"),
            Piece::new(PieceType::Pawn, Color::White),
        )));
    }

    #[test]
    fn test_board_serde_roundtrip() {
        let board = Board::initial();
        let json = serde_json::to_string(&board).unwrap();
        let decoded: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, board);

        let state = BoardState::initial().play(&Move::new(
            sq("g1"),
            sq("f3"),
            Piece::new(PieceType::Knight, Color::White),
        ));
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<BoardState>(&json).unwrap(), state);
    }

    #[test]
    fn test_board_snapshot_rejected() {
        // 格子数不足
        let short = serde_json::from_str::<Board>(r#"{"squares":[null,null,null]}"#);
        let err = short.unwrap_err().to_string();
        assert!(err.contains("Expected 64 squares, got 3"), "{}", err);

        // 64 格但没有王
        let empty = format!(r#"{{"squares":[{}]}}"#, vec!["null"; SQUARE_COUNT].join(","));
        let err = serde_json::from_str::<Board>(&empty).unwrap_err().to_string();
        assert!(err.contains("king"), "{}", err);

        // 空棋盘可以序列化，但读回时同样被拒绝
        let json = serde_json::to_string(&Board::empty()).unwrap();
        assert!(serde_json::from_str::<Board>(&json).is_err());
    }

    #[test]
    fn test_board_state_from_board() {
        let board = Board::from_layout("k7/2Q5/2K5/8/8/8/8/8").unwrap();
        let state = BoardState::from_board(board.clone(), Color::Black);
        assert_eq!(state.board, board);
        assert_eq!(state.status(), GameState::Stalemate);
        assert!(state.legal_moves().is_empty());
    }
}
