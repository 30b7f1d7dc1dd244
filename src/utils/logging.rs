//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::HintSession;

/// 初始化全局日志订阅器
///
/// 默认 info 级别，可用 RUST_LOG 覆盖；重复初始化静默忽略
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    tracing::info!("{}", "=".repeat(60));
    tracing::info!("🚀 Coding Mentor 启动");
    tracing::info!("📊 浏览器调试端口: {}", config.browser_debug_port);
    tracing::info!("📊 提示级别上限: {}", config.max_hint_level);
    tracing::info!(
        "📊 LLM 模型: {} @ {}",
        config.llm_model_name,
        config.llm_api_base_url
    );
    tracing::info!("{}", "=".repeat(60));
}

/// 打印会话统计信息
pub fn log_session_stats(session: &HintSession) {
    tracing::info!("{}", "─".repeat(60));
    tracing::info!(
        "📋 提示进度: {}/{} | 聊天记录: {} 条",
        session.current_hint_level(),
        session.max_hint_level(),
        session.chat_history().len()
    );
    tracing::info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    tracing::info!("{}", "─".repeat(60));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("0123456789abc", 10), "0123456789...");
        // 按字符截断，多字节文本不会截出半个字符
        assert_eq!(truncate_text("一二三四五", 3), "一二三...");
    }
}
