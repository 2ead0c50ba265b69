//! 会话注册
//!
//! 交互式创建一个新的会话文件骨架，登录凭证由外部工具补全

use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use crate::session::discovery::SESSION_EXT;

/// 会话文件骨架
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSkeleton<'a> {
    name: &'a str,
    created_at: String,
}

/// 会话名是否合法（字母、数字、下划线、连字符）
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// 交互式注册一个新会话
///
/// 从 `input` 读取会话名，在会话目录下创建 <name>.session 骨架文件
pub fn register_session(dir: impl AsRef<Path>, input: &mut impl BufRead) -> anyhow::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    println!("会话名称 (字母/数字/_/-):");
    let mut line = String::new();
    input.read_line(&mut line)?;
    let name = line.trim();

    if !is_valid_name(name) {
        anyhow::bail!("会话名不合法: {:?}", name);
    }

    let path = dir.join(format!("{}.{}", name, SESSION_EXT));
    if path.exists() {
        anyhow::bail!("会话已存在: {:?}", path);
    }

    let skeleton = SessionSkeleton {
        name,
        created_at: Utc::now().to_rfc3339(),
    };
    fs::write(&path, serde_json::to_string_pretty(&skeleton)?)?;
    tracing::info!("已创建会话文件: {:?}，请使用外部工具完成登录", path);

    Ok(())
}
