// ==========================================
// 组卷引擎 - 日志系统初始化
// ==========================================
// 工具: tracing + tracing-subscriber
// 环境变量:
// - RUST_LOG: 日志级别过滤器（默认: info）
// - EXAM_PAPER_LOG_FORMAT: 输出格式,"json" 为结构化输出,其余为文本
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "EXAM_PAPER_LOG_FORMAT";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// 解析格式名（大小写不敏感,未知值按文本处理）
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    fn from_env() -> Self {
        std::env::var(LOG_FORMAT_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or(LogFormat::Text)
    }
}

/// 初始化日志系统
///
/// # 示例
/// ```no_run
/// use exam_paper_gen::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_format(LogFormat::from_env());
}

/// 按指定格式初始化日志系统
///
/// 宿主进程已安装 subscriber 时保持原有配置
pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let _ = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.try_init(),
    };
}

/// 初始化测试环境的日志系统
///
/// 使用 debug 级别,输出交给测试框架捕获
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_format() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_init_is_repeatable() {
        init_test();
        init_test();
        init_with_format(LogFormat::Text);
    }
}
