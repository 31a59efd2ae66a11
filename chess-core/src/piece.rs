//! 棋子定义

use serde::{Deserialize, Serialize};

use crate::constants::{BLACK_PAWN_RANK, BOARD_SIZE, WHITE_PAWN_RANK};
use crate::error::ChessError;

/// 棋子类型
///
/// 每种类型对应一套走法规则，见 [`crate::MoveRules`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    /// 兵
    Pawn,
    /// 车
    Rook,
    /// 马
    Knight,
    /// 象
    Bishop,
    /// 后
    Queen,
    /// 王
    King,
}

impl PieceType {
    /// 类型名称（小写）
    pub fn name(&self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Rook => "rook",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }

    /// 控制台显示字符：类型名称首字母
    ///
    /// 注意马和王都显示为 `k`。
    pub fn letter(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'k',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    /// 获取 FEN 字符（白方大写，黑方小写）
    pub fn to_fen_char(&self, color: Color) -> char {
        let c = match self {
            PieceType::Pawn => 'p',
            PieceType::Rook => 'r',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceType, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'r' => PieceType::Rook,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((piece_type, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 白方（先手，在下方）
    White,
    /// 黑方（后手，在上方）
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opponent(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// 兵前进方向（行增量）：白方朝第 0 行，黑方朝第 7 行
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// 兵的初始行，只有从这一行才能走两格
    pub fn pawn_home_rank(&self) -> u8 {
        match self {
            Color::White => WHITE_PAWN_RANK,
            Color::Black => BLACK_PAWN_RANK,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'w' | 'W' => Some(Color::White),
            'b' | 'B' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// 棋子身份标识，由棋盘分配，同一棋盘上唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

/// 棋子
///
/// 类型、阵营和身份在创建后不再改变；位置由棋盘上持有它的格子决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    piece_type: PieceType,
    color: Color,
}

impl Piece {
    /// 创建新棋子（一般通过 [`crate::Board::spawn`] 分配身份）
    pub fn new(id: PieceId, piece_type: PieceType, color: Color) -> Self {
        Self {
            id,
            piece_type,
            color,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// 控制台显示字符
    pub fn letter(&self) -> char {
        self.piece_type.letter()
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.piece_type.to_fen_char(self.color)
    }

    /// 是否与另一枚棋子属于对立阵营
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }
}

/// 棋盘位置
///
/// 只能通过检查边界的构造函数得到，反序列化同样检查，
/// 因此任何 `Position` 都落在 8x8 棋盘内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    /// 行 (0-7)，第 0 行是打印时的最上一行
    row: u8,
    /// 列 (0-7)
    col: u8,
}

/// 反序列化用的未检查坐标
#[derive(Deserialize)]
struct RawPosition {
    row: u8,
    col: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = ChessError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::try_from_coords(raw.row as i32, raw.col as i32)
    }
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，调用方保证坐标在 0..8 内）
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 从外部输入的有符号坐标创建位置，越界时返回 `OutOfBounds`
    pub fn try_from_coords(row: i32, col: i32) -> Result<Self, ChessError> {
        let in_range = |v: i32| (0..BOARD_SIZE as i32).contains(&v);
        if in_range(row) && in_range(col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(ChessError::OutOfBounds { row, col })
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// 获取偏移后的位置
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引
    pub(crate) fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 遍历棋盘所有位置（按行优先）
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE * BOARD_SIZE).map(|i| Position {
            row: (i / BOARD_SIZE) as u8,
            col: (i % BOARD_SIZE) as u8,
        })
    }
}

/// 以外部约定的 (列, 行) 顺序显示
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
