//! 对局控制
//!
//! 回合状态机只有一个带参数的状态 `AwaitingMove(color)`，没有终局状态：
//! 调用方不再驱动时对局自然结束。

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Board;
use crate::error::ChessError;
use crate::moves::{Move, MoveRules};
use crate::piece::{Color, Position};
use crate::player::Player;

/// 回合状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// 等待指定阵营走棋
    AwaitingMove(Color),
}

/// 对局
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    white: Player,
    black: Player,
    current_turn: Color,
}

impl Game {
    /// 标准开局，白方先走
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// 从任意棋盘创建对局，名单按棋盘内容重建
    pub fn from_board(board: Board, current_turn: Color) -> Self {
        let mut white = Player::new(Color::White);
        let mut black = Player::new(Color::Black);
        for (_, piece) in board.all_pieces() {
            match piece.color() {
                Color::White => white.add_piece(piece.id()),
                Color::Black => black.add_piece(piece.id()),
            }
        }

        Self {
            board,
            white,
            black,
            current_turn,
        }
    }

    /// 执行走棋
    ///
    /// 坐标顺序为 (起始列, 起始行, 目标列, 目标行)。失败时棋盘、名单和走子方都不变。
    pub fn execute_move(
        &mut self,
        src_col: i32,
        src_row: i32,
        dest_col: i32,
        dest_row: i32,
    ) -> Result<Move, ChessError> {
        let from = Position::try_from_coords(src_row, src_col)?;
        let to = Position::try_from_coords(dest_row, dest_col)?;

        let piece = self.board.get(from).ok_or(ChessError::NoPieceAtSource {
            row: from.row(),
            col: from.col(),
        })?;

        if piece.color() != self.current_turn {
            debug!(%from, expected = %self.current_turn, "拒绝走法：不是该方回合");
            return Err(ChessError::NotYourTurn {
                expected: self.current_turn,
                found: piece.color(),
            });
        }

        let captured = MoveRules::apply_move(&mut self.board, from, to).inspect_err(|_| {
            debug!(piece = piece.piece_type().name(), %from, %to, "拒绝走法：不符合棋子规则");
        })?;

        let mv = match captured {
            Some(victim) => {
                // 与棋盘移除同一步清理名单，被吃的棋子在此处释放
                if !self.player_mut(victim.color()).remove_piece(victim.id()) {
                    warn!(id = victim.id().0, color = %victim.color(), "被吃棋子不在玩家名单中");
                }
                debug!(
                    piece = piece.piece_type().name(),
                    captured = victim.piece_type().name(),
                    %from,
                    %to,
                    "吃子"
                );
                Move::with_capture(from, to, victim)
            }
            None => {
                debug!(piece = piece.piece_type().name(), %from, %to, "走棋");
                Move::new(from, to)
            }
        };

        self.current_turn = self.current_turn.opponent();
        Ok(mv)
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// 当前回合状态
    pub fn state(&self) -> TurnState {
        TurnState::AwaitingMove(self.current_turn)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 获取指定阵营的玩家
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// 双方存活棋子总数
    pub fn live_piece_count(&self) -> usize {
        self.white.piece_count() + self.black.piece_count()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
