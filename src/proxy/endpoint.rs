//! 代理端点解析
//!
//! 支持 scheme://[user:pass@]host:port 形式，解析后以归一化形式保存，
//! 端点的相等性以归一化 URL 为准

use std::fmt;
use std::str::FromStr;

use crate::error::ProxyParseError;

/// 支持的代理协议
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "socks4", "socks5"];

/// 归一化的代理端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub scheme: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
}

impl ProxyEndpoint {
    /// 不含认证信息的基础 URL，用于传给 HTTP 客户端（认证单独设置）
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => write!(
                f,
                "{}://{}:{}@{}:{}",
                self.scheme, user, pass, self.host, self.port
            ),
            _ => write!(f, "{}://{}:{}", self.scheme, self.host, self.port),
        }
    }
}

impl FromStr for ProxyEndpoint {
    type Err = ProxyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| ProxyParseError {
            line: s.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = s.split_once("://").ok_or_else(|| err("缺少 scheme"))?;
        let scheme = scheme.trim().to_ascii_lowercase();
        if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
            return Err(err("不支持的 scheme"));
        }

        // 密码中允许出现 @，因此从右侧分割认证信息
        let (userinfo, addr) = match rest.rsplit_once('@') {
            Some((userinfo, addr)) => (Some(userinfo), addr),
            None => (None, rest),
        };

        let (username, password) = match userinfo {
            Some(info) => {
                let (user, pass) = info.split_once(':').ok_or_else(|| err("认证信息缺少密码"))?;
                if user.is_empty() {
                    return Err(err("认证用户名为空"));
                }
                (Some(user.to_string()), Some(pass.to_string()))
            }
            None => (None, None),
        };

        let (host, port) = addr.rsplit_once(':').ok_or_else(|| err("缺少端口"))?;
        if host.is_empty() {
            return Err(err("主机为空"));
        }
        let port: u16 = port.parse().map_err(|_| err("端口无效"))?;

        Ok(Self {
            scheme,
            username,
            password,
            host: host.to_string(),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let proxy: ProxyEndpoint = "http://192.168.0.1:8080".parse().unwrap();
        assert_eq!(proxy.scheme, "http");
        assert_eq!(proxy.host, "192.168.0.1");
        assert_eq!(proxy.port, 8080);
        assert!(proxy.username.is_none());
        assert_eq!(proxy.to_string(), "http://192.168.0.1:8080");
    }

    #[test]
    fn test_parse_with_auth() {
        let proxy: ProxyEndpoint = "socks5://user:p@ss@10.0.0.1:1080".parse().unwrap();
        assert_eq!(proxy.scheme, "socks5");
        assert_eq!(proxy.username.as_deref(), Some("user"));
        assert_eq!(proxy.password.as_deref(), Some("p@ss"));
        assert_eq!(proxy.host, "10.0.0.1");
        assert_eq!(proxy.port, 1080);
        assert_eq!(proxy.to_string(), "socks5://user:p@ss@10.0.0.1:1080");
        assert_eq!(proxy.base_url(), "socks5://10.0.0.1:1080");
    }

    #[test]
    fn test_scheme_is_normalized() {
        let proxy: ProxyEndpoint = "SOCKS5://10.0.0.1:1080".parse().unwrap();
        assert_eq!(proxy.scheme, "socks5");
    }

    #[test]
    fn test_equality_by_normalized_form() {
        let a: ProxyEndpoint = "HTTP://host:80".parse().unwrap();
        let b: ProxyEndpoint = "http://host:80".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("no-scheme-here".parse::<ProxyEndpoint>().is_err());
        assert!("ftp://host:21".parse::<ProxyEndpoint>().is_err());
        assert!("http://host".parse::<ProxyEndpoint>().is_err());
        assert!("http://host:99999".parse::<ProxyEndpoint>().is_err());
        assert!("http://:8080".parse::<ProxyEndpoint>().is_err());
        assert!("socks5://user@host:1080".parse::<ProxyEndpoint>().is_err());
    }
}
