//! FEN 格式解析和生成
//!
//! 只处理标准 FEN 的前两个字段：
//! `<棋盘> <走子方>`
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`
//!
//! 其余字段（易位权、过路兵、步数）如果存在会被忽略。

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::game::Game;
use crate::piece::{Color, PieceType, Position};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为对局
    pub fn parse(fen: &str) -> Result<Game, ChessError> {
        let mut parts = fen.split_whitespace();
        let Some(placement) = parts.next() else {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        };

        let board = Self::parse_board(placement)?;

        // 解析走子方（默认白方）
        let current_turn = match parts.next() {
            None => Color::White,
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", side),
                        })
                    }
                }
            }
        };

        Ok(Game::from_board(board, current_turn))
    }

    /// 解析棋盘部分
    ///
    /// 第一段是第 0 行（黑方底线）。
    pub fn parse_board(placement: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = placement.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                if let Some(empty_count) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col += empty_count as usize;
                } else if let Some((piece_type, color)) = PieceType::from_fen_char(c) {
                    board.spawn(
                        Position::new_unchecked(row_idx as u8, col as u8),
                        piece_type,
                        color,
                    );
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 将对局转换为 FEN 字符串
    pub fn to_string(game: &Game) -> String {
        format!(
            "{} {}",
            Self::board_to_string(game.board()),
            game.current_turn().to_fen_char()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut line = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        line.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    line.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                line.push_str(&empty_count.to_string());
            }

            rows.push(line);
        }

        rows.join("/")
    }
}
