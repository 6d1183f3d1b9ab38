/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数。日志写到 stderr，stdout 只用于界面渲染。
use crate::config::Config;
use crate::models::{AnswerSet, Visitor};
use crate::services::quiz_service;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；未设置时按 `verbose` 选择 `debug` 或 `info`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🔎 地址服务: {}", config.viacep_base_url);
    info!("⏱️ 校验等待: {} ms", config.verification_delay_ms);
    info!("{}", "=".repeat(60));
}

/// 跳转支付前输出本次会话汇总
///
/// # 参数
/// - `visitor`: 访客信息
/// - `answers`: 问卷答案
/// - `payment_url`: 跳转地址
pub fn log_session_summary(visitor: Option<&Visitor>, answers: &AnswerSet, payment_url: &str) {
    info!("\n{}", "─".repeat(60));
    if let Some(visitor) = visitor {
        info!("👤 访客: {} <{}>", visitor.name, visitor.email);
    }
    for (id, label) in answers.iter() {
        let question = quiz_service::question_by_id(id);
        info!("  {}. {} → {}", id, truncate_text(question.prompt, 50), label);
    }
    info!("💳 跳转支付: {}", payment_url);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
