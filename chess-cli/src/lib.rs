//! 国际象棋控制台
//!
//! 包含:
//! - 对局循环（打印棋盘、读取走法）
//! - 控制台设置

pub mod console;
pub mod settings;

pub use console::{render_board, resume_or_new, run, MoveInput, MoveReader, SessionSummary};
pub use settings::{BoardStyle, CliSettings, LogLevel};
