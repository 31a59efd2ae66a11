//! 玩家棋子名单

use serde::{Deserialize, Serialize};

use crate::piece::{Color, PieceId};

/// 玩家
///
/// 名单只保存棋子 ID（不拥有棋子），由 [`crate::Game`] 在吃子时与棋盘保持同步。
/// 走法规则不读取名单。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    pieces: Vec<PieceId>,
}

impl Player {
    /// 创建空名单的玩家
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::new(),
        }
    }

    /// 玩家阵营
    pub fn color(&self) -> Color {
        self.color
    }

    /// 加入棋子（已存在时忽略）
    pub fn add_piece(&mut self, id: PieceId) {
        if !self.contains(id) {
            self.pieces.push(id);
        }
    }

    /// 移除棋子，返回是否确实移除
    pub fn remove_piece(&mut self, id: PieceId) -> bool {
        match self.pieces.iter().position(|p| *p == id) {
            Some(index) => {
                self.pieces.remove(index);
                true
            }
            None => false,
        }
    }

    /// 当前存活的棋子
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.pieces.contains(&id)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}
