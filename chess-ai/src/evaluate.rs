//! 棋局评估函数

use chess_core::{Board, Color, Piece, PieceType, Square};

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表（白方视角，第 0 行是对方底线，黑方需要上下镜像）
mod position_tables {
    pub const PAWN: [[i32; 8]; 8] = [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [50, 50, 50, 50, 50, 50, 50, 50],
        [10, 10, 20, 30, 30, 20, 10, 10],
        [5, 5, 10, 25, 25, 10, 5, 5],
        [0, 0, 0, 20, 20, 0, 0, 0],
        [5, -5, -10, 0, 0, -10, -5, 5],
        [5, 10, 10, -20, -20, 10, 10, 5],
        [0, 0, 0, 0, 0, 0, 0, 0],
    ];

    pub const KNIGHT: [[i32; 8]; 8] = [
        [-50, -40, -30, -30, -30, -30, -40, -50],
        [-40, -20, 0, 0, 0, 0, -20, -40],
        [-30, 0, 10, 15, 15, 10, 0, -30],
        [-30, 5, 15, 20, 20, 15, 5, -30],
        [-30, 0, 15, 20, 20, 15, 0, -30],
        [-30, 5, 10, 15, 15, 10, 5, -30],
        [-40, -20, 0, 5, 5, 0, -20, -40],
        [-50, -40, -30, -30, -30, -30, -40, -50],
    ];

    pub const BISHOP: [[i32; 8]; 8] = [
        [-20, -10, -10, -10, -10, -10, -10, -20],
        [-10, 0, 0, 0, 0, 0, 0, -10],
        [-10, 0, 5, 10, 10, 5, 0, -10],
        [-10, 5, 5, 10, 10, 5, 5, -10],
        [-10, 0, 10, 10, 10, 10, 0, -10],
        [-10, 10, 10, 10, 10, 10, 10, -10],
        [-10, 5, 0, 0, 0, 0, 5, -10],
        [-20, -10, -10, -10, -10, -10, -10, -20],
    ];

    /// 第 7 横线加分
    pub const ROOK: [[i32; 8]; 8] = [
        [0, 0, 0, 0, 0, 0, 0, 0],
        [5, 10, 10, 10, 10, 10, 10, 5],
        [-5, 0, 0, 0, 0, 0, 0, -5],
        [-5, 0, 0, 0, 0, 0, 0, -5],
        [-5, 0, 0, 0, 0, 0, 0, -5],
        [-5, 0, 0, 0, 0, 0, 0, -5],
        [-5, 0, 0, 0, 0, 0, 0, -5],
        [0, 0, 0, 5, 5, 0, 0, 0],
    ];

    pub const QUEEN: [[i32; 8]; 8] = [
        [-20, -10, -10, -5, -5, -10, -10, -20],
        [-10, 0, 0, 0, 0, 0, 0, -10],
        [-10, 0, 5, 5, 5, 5, 0, -10],
        [-5, 0, 5, 5, 5, 5, 0, -5],
        [0, 0, 5, 5, 5, 5, 0, -5],
        [-10, 5, 5, 5, 5, 5, 0, -10],
        [-10, 0, 5, 0, 0, 0, 0, -10],
        [-20, -10, -10, -5, -5, -10, -10, -20],
    ];

    /// 鼓励王躲在己方底线两翼，不鼓励王走到中心
    pub const KING: [[i32; 8]; 8] = [
        [-30, -40, -40, -50, -50, -40, -40, -30],
        [-30, -40, -40, -50, -50, -40, -40, -30],
        [-30, -40, -40, -50, -50, -40, -40, -30],
        [-30, -40, -40, -50, -50, -40, -40, -30],
        [-20, -30, -30, -40, -40, -30, -30, -20],
        [-10, -20, -20, -20, -20, -20, -20, -10],
        [20, 20, 0, 0, 0, 0, 20, 20],
        [20, 30, 10, 0, 0, 10, 30, 20],
    ];
}

impl Evaluator {
    /// 评估棋局（白方视角，正值对白方有利）
    pub fn evaluate(board: &Board) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(sq, piece)| piece.color.sign() * Self::evaluate_piece(sq, piece))
            .sum()
    }

    /// 评估单个棋子的价值（包括位置分）
    fn evaluate_piece(sq: Square, piece: Piece) -> i32 {
        piece.value() + Self::position_bonus(sq, piece)
    }

    /// 获取位置加成分
    pub fn position_bonus(sq: Square, piece: Piece) -> i32 {
        let row = match piece.color {
            Color::White => sq.row as usize,
            // 黑方需要镜像（行翻转）
            Color::Black => 7 - sq.row as usize,
        };
        let col = sq.col as usize;

        let table = match piece.piece_type {
            PieceType::Pawn => &position_tables::PAWN,
            PieceType::Knight => &position_tables::KNIGHT,
            PieceType::Bishop => &position_tables::BISHOP,
            PieceType::Rook => &position_tables::ROOK,
            PieceType::Queen => &position_tables::QUEEN,
            PieceType::King => &position_tables::KING,
        };
        table[row][col]
    }

    /// 快速评估（仅计算子力差）
    pub fn evaluate_material(board: &Board) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| piece.color.sign() * piece.value())
            .sum()
    }
}
