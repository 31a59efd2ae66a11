//! 棋盘常量定义

use crate::piece::PieceType;

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 黑方底线（打印时最上方一行）
pub const BLACK_BACK_RANK: u8 = 0;

/// 黑方兵的初始行
pub const BLACK_PAWN_RANK: u8 = 1;

/// 白方兵的初始行
pub const WHITE_PAWN_RANK: u8 = 6;

/// 白方底线（打印时最下方一行）
pub const WHITE_BACK_RANK: u8 = 7;

/// 底线棋子顺序（按列 0..7）
pub const BACK_RANK_ORDER: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 标准开局双方棋子总数
pub const INITIAL_PIECE_COUNT: usize = 32;
