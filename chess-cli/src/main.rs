use std::io;

use anyhow::{Context, Result};
use chess_cli::{console, CliSettings};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let (settings, settings_note) = CliSettings::load();

    // 初始化日志（输出到 stderr，不与棋盘混在一起）
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_directive()))
        .context("日志过滤配置无效")?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    if let Some(note) = settings_note {
        warn!("{}", note);
    }
    // 首次运行时写出默认设置，方便用户编辑
    if let Some(path) = CliSettings::settings_path() {
        if let Err(e) = settings.save_if_missing(&path) {
            warn!("无法写入设置文件: {:#}", e);
        }
    }
    info!("国际象棋控制台启动中...");

    let mut game = console::resume_or_new(&settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = console::run(&mut game, stdin.lock(), &mut stdout.lock(), &settings)
        .context("控制台读写失败")?;

    info!(
        moves = summary.moves_played,
        rejected = summary.moves_rejected,
        captures = summary.captures,
        "输入结束，对局停止"
    );
    Ok(())
}
