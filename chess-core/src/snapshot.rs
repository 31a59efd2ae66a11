//! 对局快照
//!
//! 以 JSON 保存当前局面（FEN）和保存时间，不保存走法历史。

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChessError, Result};
use crate::fen::Fen;
use crate::game::Game;

/// 快照格式版本
pub const SNAPSHOT_VERSION: &str = "1.0";

/// 对局快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 格式版本
    pub version: String,
    /// 保存时间
    pub saved_at: DateTime<Utc>,
    /// 局面（棋盘 + 走子方）
    pub fen: String,
}

impl GameSnapshot {
    /// 从对局创建快照
    pub fn capture(game: &Game) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            saved_at: Utc::now(),
            fen: Fen::to_string(game),
        }
    }

    /// 恢复对局，名单按棋盘重建
    pub fn restore(&self) -> std::result::Result<Game, ChessError> {
        Fen::parse(&self.fen)
    }

    /// 导出为 JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 导入
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 写入文件
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        debug!(?path, "快照已保存");
        Ok(())
    }

    /// 从文件读取
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!(?path, saved_at = %snapshot.saved_at, "快照已加载");
        Ok(snapshot)
    }

    /// 从文件读取并恢复对局
    ///
    /// 文件读写失败为 `Io`，格式错误为 `Json`，局面无效为 `Chess`。
    pub fn load_game(path: &Path) -> Result<Game> {
        let game = Self::load(path)?.restore()?;
        Ok(game)
    }
}

impl Game {
    /// 创建当前局面的快照
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// 从快照恢复对局
    pub fn from_snapshot(snapshot: &GameSnapshot) -> std::result::Result<Game, ChessError> {
        snapshot.restore()
    }
}
