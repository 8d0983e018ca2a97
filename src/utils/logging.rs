/// 日志工具模块
///
/// 提供 tracing 初始化与输出格式化的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 未设置 RUST_LOG 时默认 info 级别，开启详细日志时为 debug 级别
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `api_base_url`: 评估后端地址
pub fn log_startup(api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 答案评估会话");
    info!("📊 评估后端: {}", api_base_url);
    info!("{}", "=".repeat(60));
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
