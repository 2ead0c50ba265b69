//! 会话发现
//!
//! 扫描会话目录，文件名（去掉扩展名）即会话的唯一标识

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;

/// 会话文件扩展名
pub const SESSION_EXT: &str = "session";

/// 一个已发现的会话
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// 唯一标识（文件名去掉扩展名）
    pub name: String,
    /// 会话文件路径
    pub path: PathBuf,
}

/// 扫描目录，返回按名称排序的会话列表
///
/// 目录中没有任何 .session 文件是致命错误，在任何任务启动前返回
pub fn discover(dir: impl AsRef<Path>) -> Result<Vec<Session>, DiscoveryError> {
    let dir = dir.as_ref();
    let mut sessions = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SESSION_EXT) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        sessions.push(Session {
            name: name.to_string(),
            path: path.clone(),
        });
    }

    sessions.sort_by(|a, b| a.name.cmp(&b.name));

    if sessions.is_empty() {
        return Err(DiscoveryError::NoSessions {
            dir: dir.to_path_buf(),
        });
    }

    Ok(sessions)
}
