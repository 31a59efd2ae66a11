//! 控制台设置
//!
//! 设置保存在 `<配置目录>/chess-engine/settings.json`，
//! 可用环境变量 `CHESS_CLI_SETTINGS` 指定其他路径。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 设置文件路径环境变量
pub const SETTINGS_ENV: &str = "CHESS_CLI_SETTINGS";

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// `EnvFilter` 指令中的级别名
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 棋盘显示风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardStyle {
    /// 类型名首字母小写，不区分阵营
    #[default]
    Letters,
    /// FEN 字符，白方大写、黑方小写，马为 `n`
    Fen,
}

/// 控制台设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// 日志级别（`RUST_LOG` 优先）
    pub log_level: LogLevel,
    /// 棋盘显示风格
    pub board_style: BoardStyle,
    /// 显示行列编号
    pub show_coordinates: bool,
    /// 快照文件：启动时从这里恢复，每步成功后写回
    pub snapshot_path: Option<PathBuf>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            board_style: BoardStyle::default(),
            show_coordinates: false,
            snapshot_path: None,
        }
    }
}

impl CliSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|mut path| {
            path.push("chess-engine");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    ///
    /// 日志系统此时尚未初始化，问题记录在返回的提示里，由调用方在初始化后输出。
    pub fn load() -> (Self, Option<String>) {
        let Some(path) = Self::settings_path() else {
            return (Self::default(), Some("无法获取配置目录，使用默认设置".to_string()));
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match Self::load_from(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(format!("{:#}，使用默认设置", e))),
        }
    }

    /// 从指定文件加载设置
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("设置文件格式无效: {:?}", path))
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        fs::write(path, content).with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 设置文件不存在时写入当前设置，返回是否写入
    ///
    /// 已有文件（即使格式无效）保持不变。
    pub fn save_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        Ok(true)
    }

    /// 日志过滤指令
    pub fn log_directive(&self) -> String {
        let level = self.log_level.as_directive();
        format!("chess_cli={level},chess_core={level}")
    }
}
