//! 错误类型定义
//!
//! 致命错误（配置、会话发现）在任何并发开始前返回；
//! 单个任务的错误隔离在该会话自己的结果中，不会影响整体流程

use std::path::PathBuf;

/// 配置相关错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("缺少必需的凭证 {key}，请在 config.json 或环境变量中配置")]
    MissingCredential { key: &'static str },

    #[error("配置项 {key} 的值无效: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// 会话发现错误
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("目录 {dir:?} 中未找到任何 .session 会话文件")]
    NoSessions { dir: PathBuf },

    #[error("读取会话目录失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 单行代理解析错误
///
/// 非致命，调用方记录警告后丢弃该行并继续加载
#[derive(Debug, thiserror::Error)]
#[error("无法解析代理 {line:?}: {reason}")]
pub struct ProxyParseError {
    pub line: String,
    pub reason: String,
}

/// 单个会话任务的终态错误
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("任务执行失败: {0}")]
    Failed(anyhow::Error),

    #[error("任务发生 panic: {0}")]
    Panicked(String),
}
