//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 标准初始局面
pub const INITIAL_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// 白方底线所在行（内部表示中第 0 行是第 8 横线）
pub const WHITE_BACK_ROW: u8 = 7;

/// 黑方底线所在行
pub const BLACK_BACK_ROW: u8 = 0;

/// 白兵起始行
pub const WHITE_PAWN_ROW: u8 = 6;

/// 黑兵起始行
pub const BLACK_PAWN_ROW: u8 = 1;

/// 王的初始列（e 线）
pub const KING_HOME_COL: u8 = 4;

/// 王翼车的初始列（h 线）
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// 后翼车的初始列（a 线）
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// 王翼易位后车所在列（f 线）
pub const KINGSIDE_CASTLED_ROOK_COL: u8 = 5;

/// 后翼易位后车所在列（d 线）
pub const QUEENSIDE_CASTLED_ROOK_COL: u8 = 3;
