//! 控制台对局循环
//!
//! 打印棋盘、提示当前走子方、读取四个整数 (起始列 起始行 目标列 目标行)，
//! 直到输入结束。没有认输、和棋或退出命令。

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use chess_core::{Board, EngineError, Game, GameSnapshot, Position, BOARD_SIZE};
use tracing::{debug, info, warn};

use crate::settings::{BoardStyle, CliSettings};

/// 一次读取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInput {
    /// 四个坐标，顺序为 (起始列, 起始行, 目标列, 目标行)
    Move([i32; 4]),
    /// 非整数输入，当前未完成的走法被丢弃
    Malformed(String),
    /// 输入结束
    EndOfInput,
}

/// 走法读取器，坐标可以跨行输入
pub struct MoveReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> MoveReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// 读取下一步走法
    pub fn next_move(&mut self) -> io::Result<MoveInput> {
        let mut coords = [0i32; 4];

        for slot in coords.iter_mut() {
            let Some(token) = self.next_token()? else {
                return Ok(MoveInput::EndOfInput);
            };
            match token.parse::<i32>() {
                Ok(value) => *slot = value,
                Err(_) => {
                    self.pending.clear();
                    return Ok(MoveInput::Malformed(token));
                }
            }
        }

        Ok(MoveInput::Move(coords))
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// 对局统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// 成功的走法数
    pub moves_played: usize,
    /// 被拒绝的输入数（含格式错误）
    pub moves_rejected: usize,
    /// 吃子数
    pub captures: usize,
}

/// 渲染棋盘
pub fn render_board(board: &Board, style: BoardStyle, show_coordinates: bool) -> String {
    if style == BoardStyle::Letters && !show_coordinates {
        return board.to_string();
    }

    let mut out = String::new();
    if show_coordinates {
        let header: Vec<String> = (0..BOARD_SIZE).map(|c| c.to_string()).collect();
        out.push_str(&format!("  {}\n", header.join(" ")));
    }

    for row in 0..BOARD_SIZE as u8 {
        let cells: Vec<String> = (0..BOARD_SIZE as u8)
            .map(|col| {
                let c = match Position::new(row, col).and_then(|pos| board.get(pos)) {
                    Some(piece) => match style {
                        BoardStyle::Letters => piece.letter(),
                        BoardStyle::Fen => piece.to_fen_char(),
                    },
                    None => '.',
                };
                c.to_string()
            })
            .collect();
        if show_coordinates {
            out.push_str(&format!("{} ", row));
        }
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// 运行对局循环
///
/// 非整数输入丢弃当前未完成的走法并重新提示，不会结束循环；
/// 规则错误同样只提示后重试。只有输入结束（包括走法输入到一半时）才返回。
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    output: &mut W,
    settings: &CliSettings,
) -> Result<SessionSummary> {
    let mut reader = MoveReader::new(input);
    let mut summary = SessionSummary::default();

    loop {
        write!(
            output,
            "{}",
            render_board(game.board(), settings.board_style, settings.show_coordinates)
        )?;
        write!(
            output,
            "{}'s turn. Enter move (srcCol srcRow destCol destRow): ",
            game.current_turn()
        )?;
        output.flush()?;

        match reader.next_move()? {
            MoveInput::EndOfInput => {
                writeln!(output)?;
                break;
            }
            MoveInput::Malformed(token) => {
                debug!(%token, "无法解析的输入");
                summary.moves_rejected += 1;
                writeln!(
                    output,
                    "Invalid input '{}': expected four integers. Try again.",
                    token
                )?;
            }
            MoveInput::Move([src_col, src_row, dest_col, dest_row]) => {
                match game.execute_move(src_col, src_row, dest_col, dest_row) {
                    Ok(mv) => {
                        summary.moves_played += 1;
                        if let Some(captured) = mv.captured {
                            summary.captures += 1;
                            info!(%mv, captured = captured.piece_type().name(), "吃子");
                        }
                        autosave(game, settings);
                    }
                    Err(e) => {
                        summary.moves_rejected += 1;
                        writeln!(output, "Move failed: {}. Try again.", e)?;
                    }
                }
            }
        }
    }

    Ok(summary)
}

/// 每步成功后写回快照，失败只记录日志
fn autosave(game: &Game, settings: &CliSettings) {
    if let Some(path) = &settings.snapshot_path {
        if let Err(e) = game.snapshot().save(path) {
            warn!("自动保存失败: {}", e);
        }
    }
}

/// 按设置恢复对局，没有可用快照时开始新对局
pub fn resume_or_new(settings: &CliSettings) -> Game {
    let Some(path) = &settings.snapshot_path else {
        return Game::new();
    };

    if !path.exists() {
        info!("快照文件不存在，开始新对局: {:?}", path);
        return Game::new();
    }

    match GameSnapshot::load_game(path) {
        Ok(game) => {
            info!("已从快照恢复对局: {:?}", path);
            game
        }
        Err(EngineError::Chess(e)) => {
            warn!("快照局面无效: {}，开始新对局", e);
            Game::new()
        }
        Err(e) => {
            warn!("无法读取快照: {}，开始新对局", e);
            Game::new()
        }
    }
}
