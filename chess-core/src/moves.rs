//! 走法验证与执行
//!
//! 每种棋子的规则是一个纯函数，按 [`PieceType`] 穷尽匹配分发。
//! 不做将军检测，也没有王车易位、吃过路兵和升变。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessError;
use crate::piece::{Color, Piece, PieceType, Position};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 走法规则
pub struct MoveRules;

impl MoveRules {
    /// 检查走法是否合法（只读棋盘）
    pub fn is_legal(board: &Board, from: Position, to: Position) -> bool {
        if from == to {
            return false;
        }

        let Some(piece) = board.get(from) else {
            return false;
        };

        // 目标格不能是己方棋子
        if let Some(target) = board.get(to) {
            if !piece.is_enemy_of(&target) {
                return false;
            }
        }

        match piece.piece_type() {
            PieceType::Rook => Self::is_rook_move(board, from, to),
            PieceType::Bishop => Self::is_bishop_move(board, from, to),
            PieceType::Queen => {
                Self::is_rook_move(board, from, to) || Self::is_bishop_move(board, from, to)
            }
            PieceType::Knight => Self::is_knight_move(from, to),
            PieceType::King => Self::is_king_move(from, to),
            PieceType::Pawn => Self::is_pawn_move(board, from, to, piece.color()),
        }
    }

    /// 执行走法，返回被吃的棋子
    ///
    /// 不合法时返回 `IllegalMove`，棋盘保持不变。
    pub fn apply_move(
        board: &mut Board,
        from: Position,
        to: Position,
    ) -> Result<Option<Piece>, ChessError> {
        if !Self::is_legal(board, from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }
        Ok(board.move_piece(from, to))
    }

    /// 指定位置棋子的所有合法目标格
    pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
        Position::all()
            .filter(|to| Self::is_legal(board, from, *to))
            .collect()
    }

    /// 生成指定阵营的所有合法走法（不考虑将军）
    pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, _) in board.pieces(color) {
            for to in Self::legal_destinations(board, from) {
                let mv = match board.get(to) {
                    Some(target) => Move::with_capture(from, to, target),
                    None => Move::new(from, to),
                };
                moves.push(mv);
            }
        }

        moves
    }

    /// 车：横或竖，中间无子
    fn is_rook_move(board: &Board, from: Position, to: Position) -> bool {
        if from.row() != to.row() && from.col() != to.col() {
            return false;
        }
        Self::is_straight_path_clear(board, from, to)
    }

    /// 象：斜线，中间无子
    fn is_bishop_move(board: &Board, from: Position, to: Position) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).abs();
        let d_col = (to.col() as i8 - from.col() as i8).abs();
        if d_row != d_col {
            return false;
        }
        Self::is_diagonal_path_clear(board, from, to)
    }

    /// 马：日字，可越子
    fn is_knight_move(from: Position, to: Position) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).abs();
        let d_col = (to.col() as i8 - from.col() as i8).abs();
        (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
    }

    /// 王：周围一格
    fn is_king_move(from: Position, to: Position) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).abs();
        let d_col = (to.col() as i8 - from.col() as i8).abs();
        d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
    }

    /// 兵：直进一格、初始行直进两格、斜进一格吃子
    fn is_pawn_move(board: &Board, from: Position, to: Position, color: Color) -> bool {
        let forward = color.pawn_direction();
        let d_row = to.row() as i8 - from.row() as i8;
        let d_col = to.col() as i8 - from.col() as i8;

        if d_col == 0 && d_row == forward {
            return board.is_empty_at(to);
        }

        if d_col == 0 && d_row == 2 * forward {
            if from.row() != color.pawn_home_rank() {
                return false;
            }
            let Some(middle) = from.offset(forward, 0) else {
                return false;
            };
            return board.is_empty_at(middle) && board.is_empty_at(to);
        }

        // 斜走必须吃子，目标格的阵营已在 is_legal 中检查
        if d_col.abs() == 1 && d_row == forward {
            return !board.is_empty_at(to);
        }

        false
    }

    /// 检查横竖方向上起点和终点之间是否无子
    fn is_straight_path_clear(board: &Board, from: Position, to: Position) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).signum();
        let d_col = (to.col() as i8 - from.col() as i8).signum();

        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            if next == to {
                return true;
            }
            if !board.is_empty_at(next) {
                return false;
            }
            current = next;
        }
        false
    }

    /// 检查斜线上起点和终点之间是否无子
    fn is_diagonal_path_clear(board: &Board, from: Position, to: Position) -> bool {
        let d_row = (to.row() as i8 - from.row() as i8).signum();
        let d_col = (to.col() as i8 - from.col() as i8).signum();

        let mut current = from;
        while let Some(next) = current.offset(d_row, d_col) {
            // 任一坐标到达终点即停止
            if next.row() == to.row() || next.col() == to.col() {
                return true;
            }
            if !board.is_empty_at(next) {
                return false;
            }
            current = next;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    /// 空棋盘上放一枚棋子
    fn lone(piece_type: PieceType, color: Color, at: Position) -> Board {
        let mut board = Board::empty();
        board.spawn(at, piece_type, color);
        board
    }

    /// 起点和终点之间的所有格子
    fn interior(from: Position, to: Position) -> Vec<Position> {
        let d_row = (to.row() as i8 - from.row() as i8).signum();
        let d_col = (to.col() as i8 - from.col() as i8).signum();
        let mut squares = Vec::new();
        let mut current = from.offset(d_row, d_col).unwrap();
        while current != to {
            squares.push(current);
            current = current.offset(d_row, d_col).unwrap();
        }
        squares
    }

    fn assert_every_interior_square_blocks(piece_type: PieceType, from: Position, to: Position) {
        let board = lone(piece_type, Color::White, from);
        assert!(
            MoveRules::is_legal(&board, from, to),
            "{:?} {} should be legal",
            piece_type,
            Move::new(from, to)
        );

        for blocker in interior(from, to) {
            for color in [Color::White, Color::Black] {
                let mut blocked = board.clone();
                blocked.spawn(blocker, PieceType::Pawn, color);
                assert!(
                    !MoveRules::is_legal(&blocked, from, to),
                    "{:?} {} should be blocked at {}",
                    piece_type,
                    Move::new(from, to),
                    blocker
                );
            }
        }
    }

    #[test]
    fn test_rook_path_blocking() {
        assert_every_interior_square_blocks(PieceType::Rook, pos(7, 0), pos(0, 0));
        assert_every_interior_square_blocks(PieceType::Rook, pos(3, 7), pos(3, 0));
        assert_every_interior_square_blocks(PieceType::Rook, pos(0, 2), pos(5, 2));
    }

    #[test]
    fn test_bishop_path_blocking() {
        assert_every_interior_square_blocks(PieceType::Bishop, pos(7, 0), pos(0, 7));
        assert_every_interior_square_blocks(PieceType::Bishop, pos(0, 0), pos(7, 7));
        assert_every_interior_square_blocks(PieceType::Bishop, pos(2, 5), pos(5, 2));
    }

    #[test]
    fn test_queen_path_blocking() {
        assert_every_interior_square_blocks(PieceType::Queen, pos(7, 3), pos(0, 3));
        assert_every_interior_square_blocks(PieceType::Queen, pos(4, 0), pos(4, 7));
        assert_every_interior_square_blocks(PieceType::Queen, pos(7, 7), pos(0, 0));
        assert_every_interior_square_blocks(PieceType::Queen, pos(6, 1), pos(1, 6));
    }

    #[test]
    fn test_bishop_blocker_next_to_destination() {
        // 终点前一格有子：扫描不能少扫一格
        let mut board = lone(PieceType::Bishop, Color::White, pos(7, 0));
        board.spawn(pos(1, 6), PieceType::Knight, Color::Black);
        assert!(!MoveRules::is_legal(&board, pos(7, 0), pos(0, 7)));
        assert!(MoveRules::is_legal(&board, pos(7, 0), pos(1, 6)));

        // 相邻斜格没有中间格
        assert!(MoveRules::is_legal(&board, pos(7, 0), pos(6, 1)));
    }

    #[test]
    fn test_rook_geometry() {
        let board = lone(PieceType::Rook, Color::White, pos(4, 4));
        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(4, 0)));
        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(0, 4)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(5, 5)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(2, 3)));
    }

    #[test]
    fn test_bishop_geometry() {
        let board = lone(PieceType::Bishop, Color::Black, pos(4, 4));
        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(1, 1)));
        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(7, 1)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(4, 6)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(6, 5)));
    }

    #[test]
    fn test_queen_geometry() {
        let board = lone(PieceType::Queen, Color::White, pos(3, 3));
        assert_eq!(MoveRules::legal_destinations(&board, pos(3, 3)).len(), 27);
        assert!(!MoveRules::is_legal(&board, pos(3, 3), pos(5, 4)));
    }

    #[test]
    fn test_knight_jumps() {
        let mut board = lone(PieceType::Knight, Color::White, pos(7, 1));
        // 围住马
        for (r, c) in [(6, 0), (6, 1), (6, 2), (7, 0), (7, 2), (5, 1)] {
            board.spawn(pos(r, c), PieceType::Pawn, Color::White);
        }
        assert!(MoveRules::is_legal(&board, pos(7, 1), pos(5, 0)));
        assert!(MoveRules::is_legal(&board, pos(7, 1), pos(5, 2)));
        assert!(MoveRules::is_legal(&board, pos(7, 1), pos(6, 3)));
        assert!(!MoveRules::is_legal(&board, pos(7, 1), pos(5, 1)));
        assert!(!MoveRules::is_legal(&board, pos(7, 1), pos(4, 2)));
    }

    #[test]
    fn test_knight_center_moves() {
        let board = lone(PieceType::Knight, Color::Black, pos(4, 4));
        assert_eq!(MoveRules::legal_destinations(&board, pos(4, 4)).len(), 8);
    }

    #[test]
    fn test_king_moves() {
        let board = lone(PieceType::King, Color::White, pos(4, 4));
        let destinations = MoveRules::legal_destinations(&board, pos(4, 4));
        assert_eq!(destinations.len(), 8);
        assert!(!destinations.contains(&pos(4, 4)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(2, 4)));

        let corner = lone(PieceType::King, Color::Black, pos(0, 0));
        assert_eq!(MoveRules::legal_destinations(&corner, pos(0, 0)).len(), 3);
    }

    #[test]
    fn test_same_color_destination() {
        let mut board = Board::empty();
        board.spawn(pos(4, 4), PieceType::Queen, Color::White);
        board.spawn(pos(4, 6), PieceType::Pawn, Color::White);
        board.spawn(pos(2, 2), PieceType::Pawn, Color::Black);

        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(4, 6)));
        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(2, 2)));
    }

    #[test]
    fn test_no_piece_at_source() {
        let board = Board::empty();
        assert!(!MoveRules::is_legal(&board, pos(0, 0), pos(0, 1)));
    }

    #[test]
    fn test_pawn_single_advance() {
        let mut board = Board::empty();
        board.spawn(pos(4, 3), PieceType::Pawn, Color::White);
        board.spawn(pos(4, 5), PieceType::Pawn, Color::Black);

        assert!(MoveRules::is_legal(&board, pos(4, 3), pos(3, 3)));
        assert!(!MoveRules::is_legal(&board, pos(4, 3), pos(5, 3)));
        assert!(MoveRules::is_legal(&board, pos(4, 5), pos(5, 5)));
        assert!(!MoveRules::is_legal(&board, pos(4, 5), pos(3, 5)));

        // 直进不能吃子
        board.spawn(pos(3, 3), PieceType::Pawn, Color::Black);
        assert!(!MoveRules::is_legal(&board, pos(4, 3), pos(3, 3)));
    }

    #[test]
    fn test_pawn_double_advance() {
        let mut board = Board::standard();
        assert!(MoveRules::is_legal(&board, pos(6, 4), pos(4, 4)));
        assert!(MoveRules::is_legal(&board, pos(1, 4), pos(3, 4)));

        // 中间格有子
        board.spawn(pos(5, 4), PieceType::Knight, Color::Black);
        assert!(!MoveRules::is_legal(&board, pos(6, 4), pos(4, 4)));

        // 目标格有子
        board.spawn(pos(4, 2), PieceType::Knight, Color::Black);
        assert!(!MoveRules::is_legal(&board, pos(6, 2), pos(4, 2)));

        // 不在初始行
        let off_home = lone(PieceType::Pawn, Color::White, pos(5, 0));
        assert!(!MoveRules::is_legal(&off_home, pos(5, 0), pos(3, 0)));
        let off_home = lone(PieceType::Pawn, Color::Black, pos(2, 0));
        assert!(!MoveRules::is_legal(&off_home, pos(2, 0), pos(4, 0)));

        // 对方的初始行不算
        let wrong_home = lone(PieceType::Pawn, Color::Black, pos(6, 0));
        assert!(!MoveRules::is_legal(&wrong_home, pos(6, 0), pos(4, 0)));
    }

    #[test]
    fn test_pawn_diagonal_capture() {
        let mut board = Board::empty();
        board.spawn(pos(4, 4), PieceType::Pawn, Color::White);
        board.spawn(pos(3, 5), PieceType::Rook, Color::Black);
        board.spawn(pos(3, 3), PieceType::Rook, Color::White);

        assert!(MoveRules::is_legal(&board, pos(4, 4), pos(3, 5)));
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(3, 3)));
        // 向后斜吃不行
        board.spawn(pos(5, 5), PieceType::Rook, Color::Black);
        assert!(!MoveRules::is_legal(&board, pos(4, 4), pos(5, 5)));
    }

    #[test]
    fn test_pawn_diagonal_onto_empty() {
        let board = lone(PieceType::Pawn, Color::Black, pos(1, 3));
        assert!(!MoveRules::is_legal(&board, pos(1, 3), pos(2, 4)));
        assert!(!MoveRules::is_legal(&board, pos(1, 3), pos(2, 2)));
    }

    #[test]
    fn test_apply_move_capture() {
        let mut board = Board::empty();
        let rook = board.spawn(pos(0, 0), PieceType::Rook, Color::White);
        let knight = board.spawn(pos(0, 5), PieceType::Knight, Color::Black);

        let captured = MoveRules::apply_move(&mut board, pos(0, 0), pos(0, 5)).unwrap();
        assert_eq!(captured, Some(knight));
        assert_eq!(board.get(pos(0, 5)), Some(rook));
        assert!(board.is_empty_at(pos(0, 0)));
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_off_board_destination_cannot_alias_index() {
        // (0, 8) 与 (1, 0) 的索引相同，马从 (1, 6) 走 (-1, +2) 会落在那里
        let mut board = lone(PieceType::Knight, Color::White, pos(1, 6));
        let rook = board.spawn(pos(1, 0), PieceType::Rook, Color::Black);
        let before = board.clone();

        assert!(Position::new(0, 8).is_none());
        assert_eq!(
            Position::try_from_coords(0, 8),
            Err(ChessError::OutOfBounds { row: 0, col: 8 })
        );
        assert!(serde_json::from_str::<Position>(r#"{"row":0,"col":8}"#).is_err());

        let destinations = MoveRules::legal_destinations(&board, pos(1, 6));
        assert!(!destinations.contains(&pos(1, 0)));
        assert_eq!(board, before);
        assert_eq!(board.get(pos(1, 0)), Some(rook));
    }

    #[test]
    fn test_apply_illegal_move_leaves_board() {
        let mut board = Board::standard();
        let before = board.clone();

        let result = MoveRules::apply_move(&mut board, pos(7, 0), pos(5, 0));
        assert_eq!(
            result,
            Err(ChessError::IllegalMove {
                from: pos(7, 0),
                to: pos(5, 0)
            })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::standard();
        // 16 步兵 + 4 步马
        assert_eq!(MoveRules::legal_moves(&board, Color::White).len(), 20);
        assert_eq!(MoveRules::legal_moves(&board, Color::Black).len(), 20);
        assert!(MoveRules::legal_moves(&board, Color::White)
            .iter()
            .all(|mv| !mv.is_capture()));
    }

    #[test]
    fn test_legal_moves_report_captures() {
        let mut board = Board::empty();
        board.spawn(pos(4, 4), PieceType::Rook, Color::White);
        let target = board.spawn(pos(4, 6), PieceType::Bishop, Color::Black);

        let captures: Vec<Move> = MoveRules::legal_moves(&board, Color::White)
            .into_iter()
            .filter(|mv| mv.is_capture())
            .collect();
        assert_eq!(captures, vec![Move::with_capture(pos(4, 4), pos(4, 6), target)]);
    }
}
