//! 执行上下文构建
//!
//! 凭证校验在工厂构造时进行一次，对整个运行生效；
//! 之后按会话生成上下文不再失败

use crate::error::ConfigError;
use crate::model::config::Config;
use crate::proxy::ProxyEndpoint;
use crate::session::Session;

/// 共享的应用凭证对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_id: i32,
    pub api_hash: String,
}

/// 单个会话的执行上下文
///
/// 由对应的任务独占持有，任务结束时随之销毁
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session: Session,
    pub credentials: ApiCredentials,
    pub proxy: Option<ProxyEndpoint>,
}

/// 上下文工厂
#[derive(Debug, Clone)]
pub struct ContextFactory {
    credentials: ApiCredentials,
}

impl ContextFactory {
    /// 校验配置中的凭证并创建工厂
    ///
    /// api_id / api_hash 缺失或为空是致命错误，在任何任务启动前返回
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_id = match config.api_id.as_deref().map(str::trim) {
            None | Some("") => return Err(ConfigError::MissingCredential { key: "api_id" }),
            Some(raw) => raw.parse::<i32>().map_err(|_| ConfigError::InvalidValue {
                key: "api_id",
                message: format!("不是有效的数字: {:?}", raw),
            })?,
        };

        let api_hash = match config.api_hash.as_deref().map(str::trim) {
            None | Some("") => return Err(ConfigError::MissingCredential { key: "api_hash" }),
            Some(hash) => hash.to_string(),
        };

        Ok(Self {
            credentials: ApiCredentials { api_id, api_hash },
        })
    }

    /// 绑定一个会话与可选代理，生成执行上下文
    pub fn build(&self, session: Session, proxy: Option<ProxyEndpoint>) -> SessionContext {
        SessionContext {
            session,
            credentials: self.credentials.clone(),
            proxy,
        }
    }
}
