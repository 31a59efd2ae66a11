//! 棋盘状态

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    BACK_RANK_ORDER, BLACK_BACK_RANK, BLACK_PAWN_RANK, BOARD_SIZE, SQUARE_COUNT,
    WHITE_BACK_RANK, WHITE_PAWN_RANK,
};
use crate::error::ChessError;
use crate::piece::{Color, Piece, PieceId, PieceType, Position};

/// 棋盘
///
/// 棋盘独占所有棋子：每个格子是一个可空槽位，吃子即把槽位里的值取出。
/// 这里的修改方法都不检查规则，合法性由 [`crate::MoveRules`] 在调用前保证。
///
/// 反序列化时检查格子数、棋子 ID 唯一，以及 `next_id` 大于所有已有 ID。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col
    squares: Vec<Option<Piece>>,
    /// 下一个分配的棋子 ID
    next_id: u32,
}

/// 反序列化用的未检查棋盘
#[derive(Deserialize)]
struct RawBoard {
    squares: Vec<Option<Piece>>,
    next_id: u32,
}

impl TryFrom<RawBoard> for Board {
    type Error = String;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.squares.len() != SQUARE_COUNT {
            return Err(format!(
                "board must have {} squares, found {}",
                SQUARE_COUNT,
                raw.squares.len()
            ));
        }

        let mut seen = HashSet::new();
        for piece in raw.squares.iter().flatten() {
            if !seen.insert(piece.id()) {
                return Err(format!("duplicate piece id {}", piece.id().0));
            }
            if piece.id().0 >= raw.next_id {
                return Err(format!(
                    "piece id {} not below next_id {}",
                    piece.id().0,
                    raw.next_id
                ));
            }
        }

        Ok(Self {
            squares: raw.squares,
            next_id: raw.next_id,
        })
    }
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
            next_id: 0,
        }
    }

    /// 创建标准开局棋盘
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.initialize_standard_setup();
        board
    }

    /// 清空棋盘并摆放标准开局
    ///
    /// 黑方在上（第 0、1 行），白方在下（第 6、7 行）。
    pub fn initialize_standard_setup(&mut self) {
        self.squares.iter_mut().for_each(|sq| *sq = None);

        for (col, piece_type) in BACK_RANK_ORDER.iter().enumerate() {
            let at = |row| Position::new_unchecked(row, col as u8);
            self.spawn(at(BLACK_BACK_RANK), *piece_type, Color::Black);
            self.spawn(at(BLACK_PAWN_RANK), PieceType::Pawn, Color::Black);
            self.spawn(at(WHITE_PAWN_RANK), PieceType::Pawn, Color::White);
            self.spawn(at(WHITE_BACK_RANK), *piece_type, Color::White);
        }
    }

    /// 创建一枚新棋子并放到指定位置，返回该棋子
    ///
    /// 原有占位棋子会被直接丢弃。
    pub fn spawn(&mut self, pos: Position, piece_type: PieceType, color: Color) -> Piece {
        let piece = Piece::new(PieceId(self.next_id), piece_type, color);
        self.next_id += 1;
        self.place_piece(pos, piece);
        piece
    }

    /// 按外部坐标查询棋子，越界返回 `OutOfBounds`
    pub fn get_piece_at(&self, row: i32, col: i32) -> Result<Option<Piece>, ChessError> {
        let pos = Position::try_from_coords(row, col)?;
        Ok(self.get(pos))
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.to_index()]
    }

    /// 指定位置是否为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// 放置棋子，返回原先的占位棋子
    pub fn place_piece(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        self.squares[pos.to_index()].replace(piece)
    }

    /// 取出指定位置的棋子
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.to_index()].take()
    }

    /// 移动棋子（不检查规则），返回目标位置原有的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        match self.remove_piece(from) {
            Some(piece) => self.place_piece(to, piece),
            None => None,
        }
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, color: Color) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color() == color)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        Position::all()
            .filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
            .collect()
    }

    /// 棋盘上的棋子总数
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// 控制台格式：每格一个小写字母（类型名首字母），空格为 `.`
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            let line: Vec<String> = (0..BOARD_SIZE as u8)
                .map(|col| match self.get(Position::new_unchecked(row, col)) {
                    Some(piece) => piece.letter().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
