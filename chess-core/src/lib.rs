//! 国际象棋规则引擎
//!
//! 包含:
//! - 棋盘、棋子、位置等核心数据结构
//! - 六种棋子的走法规则验证与执行
//! - 玩家棋子名单与回合状态机
//! - FEN 局面格式与 JSON 快照
//!
//! 未实现：将军/将死、逼和/和棋判定、王车易位、吃过路兵、升变、悔棋与计时。

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod piece;
mod player;
mod snapshot;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, EngineError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{Game, TurnState};
pub use moves::{Move, MoveRules};
pub use piece::{Color, Piece, PieceId, PieceType, Position};
pub use player::Player;
pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};
