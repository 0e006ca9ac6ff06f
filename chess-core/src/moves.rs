//! 走法生成、验证与执行
//!
//! 走法分两级验证：
//! - 伪合法：符合棋子走法和路径要求，不考虑己方王是否被将军
//! - 合法：伪合法，且走完后己方王不处于被将军状态
//!
//! 易位权利不单独记录，每次根据王、车是否在原位重新推导。
//! 格子是否受攻击按伪合法走法判定，兵的攻击也跟随兵的走法。
//! 不支持吃过路兵，也不判定五十步和三次重复。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{
    KINGSIDE_CASTLED_ROOK_COL, KINGSIDE_ROOK_COL, KING_HOME_COL, QUEENSIDE_CASTLED_ROOK_COL,
    QUEENSIDE_ROOK_COL,
};
use crate::piece::{Color, Piece, PieceType, Square};

/// 走法
///
/// 走法只是一条请求/记录，执行由 [`MoveGenerator::apply`] 完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
    /// 升变目标（如果有）
    pub promotion: Option<PieceType>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(captured),
            promotion: None,
        }
    }

    /// 设置升变目标
    pub fn promoting_to(self, promotion: PieceType) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// 是否为易位（王横走两格）
    pub fn is_castling(&self) -> bool {
        self.piece.piece_type == PieceType::King
            && self.from.row == self.to.row
            && (self.to.col as i8 - self.from.col as i8).abs() == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

/// 局面状态（总是即时推导，不存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// 对局进行中
    InProgress,
    /// 将死
    Checkmate,
    /// 逼和
    Stalemate,
}

impl GameState {
    /// 对局是否已结束
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::InProgress)
    }
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的所有合法走法
    ///
    /// 顺序：起始格按行优先，同一起始格内目标格按行优先；
    /// 升变走法按后、车、象、马展开。搜索的同分取舍依赖这个顺序。
    pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
        Self::candidate_moves(board, color)
            .into_iter()
            .filter(|mv| Self::is_legal(board, mv))
            .collect()
    }

    /// 生成指定阵营的所有伪合法走法（不考虑将军）
    pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
        Self::candidate_moves(board, color)
            .into_iter()
            .filter(|mv| Self::is_pseudo_legal(board, mv))
            .collect()
    }

    /// 按棋子的几何走法列出候选走法，是否真正可走由调用方过滤
    fn candidate_moves(board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, piece) in board.pieces(color) {
            let mut targets = Self::candidate_targets(board, from, piece);
            targets.sort_by_key(|sq| sq.to_index());

            for to in targets {
                let mv = match board.get(to) {
                    Some(target) => Move::with_capture(from, to, piece, target),
                    None => Move::new(from, to, piece),
                };

                if piece.piece_type == PieceType::Pawn && to.row == color.promotion_row() {
                    for promotion in PieceType::PROMOTIONS {
                        moves.push(mv.promoting_to(promotion));
                    }
                } else {
                    moves.push(mv);
                }
            }
        }

        moves
    }

    /// 棋子可能到达的格子（滑行棋子在第一个有子的格子停下）
    fn candidate_targets(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
        let mut targets = Vec::new();

        match piece.piece_type {
            PieceType::Pawn => {
                let forward = piece.color.forward();
                for d_col in [-1, 0, 1] {
                    targets.extend(from.offset(forward, d_col));
                }
                if from.row == piece.color.pawn_row() {
                    targets.extend(from.offset(2 * forward, 0));
                }
            }
            PieceType::Knight => {
                targets.extend(KNIGHT_OFFSETS.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)));
            }
            PieceType::Bishop => Self::slide_targets(board, from, &BISHOP_DIRECTIONS, &mut targets),
            PieceType::Rook => Self::slide_targets(board, from, &ROOK_DIRECTIONS, &mut targets),
            PieceType::Queen => {
                Self::slide_targets(board, from, &BISHOP_DIRECTIONS, &mut targets);
                Self::slide_targets(board, from, &ROOK_DIRECTIONS, &mut targets);
            }
            PieceType::King => {
                targets.extend(KING_OFFSETS.iter().filter_map(|&(dr, dc)| from.offset(dr, dc)));
                targets.extend(from.offset(0, 2));
                targets.extend(from.offset(0, -2));
            }
        }

        targets
    }

    fn slide_targets(board: &Board, from: Square, directions: &[(i8, i8)], targets: &mut Vec<Square>) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                targets.push(to);
                if !board.is_empty(to) {
                    break;
                }
                current = to;
            }
        }
    }

    /// 检查走法是否伪合法
    pub fn is_pseudo_legal(board: &Board, mv: &Move) -> bool {
        if !mv.from.is_valid() || !mv.to.is_valid() || mv.from == mv.to {
            return false;
        }

        // 走法记录的棋子必须与棋盘一致
        if board.get(mv.from) != Some(mv.piece) {
            return false;
        }

        let target = board.get(mv.to);
        if target.is_some_and(|t| t.color == mv.piece.color) {
            return false;
        }

        let promoting = mv.piece.piece_type == PieceType::Pawn
            && mv.to.row == mv.piece.color.promotion_row();
        if let Some(promotion) = mv.promotion {
            if !promoting || !promotion.is_promotion_target() {
                return false;
            }
        }

        let d_row = mv.to.row as i8 - mv.from.row as i8;
        let d_col = mv.to.col as i8 - mv.from.col as i8;

        match mv.piece.piece_type {
            PieceType::King if d_row.abs() <= 1 && d_col.abs() <= 1 => true,
            PieceType::King => Self::can_castle(board, mv),
            _ => Self::can_attack(board, mv.from, mv.piece, mv.to),
        }
    }

    /// 检查易位条件：王和同侧车都在原位、中间无子、王未被将军、王经过的格子不受攻击
    ///
    /// 目标格是否安全由合法性检查统一处理。
    fn can_castle(board: &Board, mv: &Move) -> bool {
        let color = mv.piece.color;
        let row = color.back_row();

        if mv.from != Square::new_unchecked(row, KING_HOME_COL) || mv.to.row != row {
            return false;
        }

        let (rook_col, transit_col, between) = match mv.to.col as i8 - mv.from.col as i8 {
            2 => (KINGSIDE_ROOK_COL, KING_HOME_COL + 1, KING_HOME_COL + 1..KINGSIDE_ROOK_COL),
            -2 => (QUEENSIDE_ROOK_COL, KING_HOME_COL - 1, QUEENSIDE_ROOK_COL + 1..KING_HOME_COL),
            _ => return false,
        };

        let rook = Piece::new(PieceType::Rook, color);
        if board.get(Square::new_unchecked(row, rook_col)) != Some(rook) {
            return false;
        }

        if !between
            .into_iter()
            .all(|col| board.is_empty(Square::new_unchecked(row, col)))
        {
            return false;
        }

        if Self::is_in_check(board, color) {
            return false;
        }

        !Self::is_square_attacked(board, Square::new_unchecked(row, transit_col), color.opponent())
    }

    /// 检查棋子能否不经易位、不看将军地走到目标格
    ///
    /// 目标格上的己方棋子也算在内，所以"受保护"的棋子同样受到攻击。
    /// 兵按走法计算：正前方只能走到空格，斜向只能落在有子的格子。
    fn can_attack(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
        if from == target {
            return false;
        }

        let d_row = target.row as i8 - from.row as i8;
        let d_col = target.col as i8 - from.col as i8;

        match piece.piece_type {
            PieceType::Pawn => {
                let forward = piece.color.forward();
                let occupied = !board.is_empty(target);
                if d_col == 0 && !occupied {
                    if d_row == forward {
                        return true;
                    }
                    // 起始行可以走两格，中间格必须为空
                    from.row == piece.color.pawn_row()
                        && d_row == 2 * forward
                        && from.offset(forward, 0).is_some_and(|mid| board.is_empty(mid))
                } else {
                    d_col.abs() == 1 && d_row == forward && occupied
                }
            }
            PieceType::Knight => {
                matches!((d_row.abs(), d_col.abs()), (1, 2) | (2, 1))
            }
            PieceType::Bishop => {
                d_row.abs() == d_col.abs() && Self::is_path_clear(board, from, target)
            }
            PieceType::Rook => {
                (d_row == 0 || d_col == 0) && Self::is_path_clear(board, from, target)
            }
            PieceType::Queen => {
                (d_row.abs() == d_col.abs() || d_row == 0 || d_col == 0)
                    && Self::is_path_clear(board, from, target)
            }
            PieceType::King => d_row.abs() <= 1 && d_col.abs() <= 1,
        }
    }

    /// 检查两格之间（不含两端）是否全部为空，两格须在同一直线或斜线上
    fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
        let step_row = (to.row as i8 - from.row as i8).signum();
        let step_col = (to.col as i8 - from.col as i8).signum();

        let mut current = from;
        while let Some(next) = current.offset(step_row, step_col) {
            if next == to {
                return true;
            }
            if !board.is_empty(next) {
                return false;
            }
            current = next;
        }
        false
    }

    /// 检查格子是否受到指定阵营攻击
    pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
        Square::all().any(|from| {
            board
                .get(from)
                .is_some_and(|piece| piece.color == by && Self::can_attack(board, from, piece, sq))
        })
    }

    /// 检查指定阵营是否被将军
    ///
    /// 前提：该阵营恰好有一个王。没有王时视为不被将军。
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        match board.find_king(color) {
            Some(king) => Self::is_square_attacked(board, king, color.opponent()),
            None => false,
        }
    }

    /// 检查走法是否完全合法
    pub fn is_legal(board: &Board, mv: &Move) -> bool {
        Self::is_pseudo_legal(board, mv) && !Self::is_in_check(&Self::apply(board, mv), mv.piece.color)
    }

    /// 执行走法，返回新棋盘（不检查合法性，输入棋盘不变）
    pub fn apply(board: &Board, mv: &Move) -> Board {
        let mut next = board.clone();

        if mv.is_castling() {
            let (rook_from, rook_to) = if mv.to.col > mv.from.col {
                (KINGSIDE_ROOK_COL, KINGSIDE_CASTLED_ROOK_COL)
            } else {
                (QUEENSIDE_ROOK_COL, QUEENSIDE_CASTLED_ROOK_COL)
            };
            let row = mv.from.row;
            let rook = next.get(Square::new_unchecked(row, rook_from));
            next.set(Square::new_unchecked(row, rook_from), None);
            next.set(Square::new_unchecked(row, rook_to), rook);
        }

        let placed = match mv.promotion {
            Some(promotion) => Piece::new(promotion, mv.piece.color),
            None => mv.piece,
        };
        next.set(mv.to, Some(placed));
        next.set(mv.from, None);

        next
    }

    /// 判定局面状态
    pub fn classify(board: &Board, color: Color) -> GameState {
        if !Self::legal_moves(board, color).is_empty() {
            GameState::InProgress
        } else if Self::is_in_check(board, color) {
            GameState::Checkmate
        } else {
            GameState::Stalemate
        }
    }

    /// 检查是否被将死
    pub fn is_checkmate(board: &Board, color: Color) -> bool {
        Self::is_in_check(board, color) && Self::legal_moves(board, color).is_empty()
    }

    /// 检查是否逼和（无子可动但未被将军）
    pub fn is_stalemate(board: &Board, color: Color) -> bool {
        !Self::is_in_check(board, color) && Self::legal_moves(board, color).is_empty()
    }

    /// 统计指定深度的叶子节点数（走法生成回归测试用）
    pub fn perft(board: &Board, color: Color, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = Self::legal_moves(board, color);
        if depth == 1 {
            return moves.len() as u64;
        }

        moves
            .iter()
            .map(|mv| Self::perft(&Self::apply(board, mv), color.opponent(), depth - 1))
            .sum()
    }
}
