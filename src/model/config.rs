use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// 启动器应用配置
///
/// 在 main 中构建一次后按引用传入各组件，不依赖任何全局状态
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Telegram 应用 api_id
    #[serde(default)]
    pub api_id: Option<String>,

    /// Telegram 应用 api_hash
    #[serde(default)]
    pub api_hash: Option<String>,

    /// 是否从文件加载代理（代理为可选功能）
    #[serde(default)]
    pub use_proxy: bool,

    /// 会话文件目录
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,

    /// 代理列表文件路径
    #[serde(default = "default_proxies_path")]
    pub proxies_path: String,

    /// 连通性检查地址
    #[serde(default = "default_check_url")]
    pub check_url: String,
}

impl Config {
    /// 从环境变量覆盖配置
    pub fn override_from_env(&mut self) {
        if let Ok(api_id) = env::var("API_ID") {
            self.api_id = Some(api_id);
        }
        if let Ok(api_hash) = env::var("API_HASH") {
            self.api_hash = Some(api_hash);
        }
        if let Ok(use_proxy) = env::var("USE_PROXY") {
            if let Ok(v) = use_proxy.parse() {
                self.use_proxy = v;
            }
        }
        if let Ok(sessions_dir) = env::var("SESSIONS_DIR") {
            self.sessions_dir = sessions_dir;
        }
        if let Ok(proxies_path) = env::var("PROXIES_PATH") {
            self.proxies_path = proxies_path;
        }
        if let Ok(check_url) = env::var("CHECK_URL") {
            self.check_url = check_url;
        }
    }
}

fn default_sessions_dir() -> String {
    "sessions".to_string()
}

fn default_proxies_path() -> String {
    "config/proxies.txt".to_string()
}

fn default_check_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_id: None,
            api_hash: None,
            use_proxy: false,
            sessions_dir: default_sessions_dir(),
            proxies_path: default_proxies_path(),
            check_url: default_check_url(),
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api_id.is_none());
        assert!(!config.use_proxy);
        assert_eq!(config.sessions_dir, "sessions");
        assert_eq!(config.proxies_path, "config/proxies.txt");
    }

    #[test]
    fn test_parse_partial_json() {
        let config: Config =
            serde_json::from_str(r#"{"apiId": "12345", "apiHash": "abc", "useProxy": true}"#)
                .unwrap();
        assert_eq!(config.api_id.as_deref(), Some("12345"));
        assert_eq!(config.api_hash.as_deref(), Some("abc"));
        assert!(config.use_proxy);
        // 未给出的字段回落到默认值
        assert_eq!(config.sessions_dir, "sessions");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("no-such.json")).unwrap();
        assert!(config.api_id.is_none());
    }
}
