//! 错误类型定义

use thiserror::Error;

use crate::piece::{Color, Position};

/// 象棋规则错误
///
/// 所有规则错误都不是致命的：引擎拒绝走法，棋盘和走子方保持不变。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 坐标超出 8x8 棋盘
    #[error("Out of bounds: row {row}, col {col}")]
    OutOfBounds { row: i32, col: i32 },

    /// 起始格没有棋子
    #[error("No piece at source square (row {row}, col {col})")]
    NoPieceAtSource { row: u8, col: u8 },

    /// 不是该棋子一方的回合
    #[error("Not your turn: {expected} to move, piece is {found}")]
    NotYourTurn { expected: Color, found: Color },

    /// 走法不符合棋子规则（路径被挡、几何不对、吃己方棋子、兵的规则）
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },
}

/// 引擎错误类型（快照持久化）
#[derive(Error, Debug)]
pub enum EngineError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 象棋规则错误
    #[error("Chess error: {0}")]
    Chess(#[from] ChessError),
}

/// 引擎操作结果类型
pub type Result<T> = std::result::Result<T, EngineError>;
