//! 启动流程
//!
//! 解析动作选择器（命令行或交互式），分发到挂机运行或会话注册。
//! 核心流程只接收已校验的动作。

pub mod context;
pub mod orchestrator;

use std::io::{self, BufRead, Write};

use crate::client;
use crate::launcher::context::ContextFactory;
use crate::launcher::orchestrator::TaskOrchestrator;
use crate::model::arg::Args;
use crate::model::config::Config;
use crate::proxy::{self, ProxyEndpoint};
use crate::session;

/// 启动横幅与动作菜单
const START_TEXT: &str = r#"
████████╗ █████╗ ██████╗ ██████╗ ███████╗██████╗
╚══██╔══╝██╔══██╗██╔══██╗██╔══██╗██╔════╝██╔══██╗
   ██║   ███████║██████╔╝██████╔╝█████╗  ██████╔╝
   ██║   ██╔══██║██╔═══╝ ██╔═══╝ ██╔══╝  ██╔══██╗
   ██║   ██║  ██║██║     ██║     ███████╗██║  ██║
   ╚═╝   ╚═╝  ╚═╝╚═╝     ╚═╝     ╚══════╝╚═╝  ╚═╝

选择一个动作:

    1. 启动挂机
    2. 注册会话
"#;

/// 可执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 为每个会话并发执行任务
    RunTappers,
    /// 注册新会话
    RegisterSession,
}

impl Action {
    /// 从选择器字符串解析动作，仅接受 "1" 或 "2"
    pub fn from_selector(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::RunTappers),
            "2" => Some(Self::RegisterSession),
            _ => None,
        }
    }
}

/// 解析动作：优先使用命令行参数，否则进入交互式提示循环
///
/// 交互模式下持续拒绝非法输入并重新提示，直到读到合法选择器
pub fn resolve_action(arg: Option<&str>, input: &mut impl BufRead) -> io::Result<Action> {
    if let Some(raw) = arg {
        match Action::from_selector(raw) {
            Some(action) => return Ok(action),
            None => tracing::warn!("命令行动作无效: {:?}，进入交互选择", raw),
        }
    }

    println!("{}", START_TEXT);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "标准输入已关闭",
            ));
        }
        let trimmed = line.trim();

        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!("动作必须是数字");
            continue;
        }
        match Action::from_selector(trimmed) {
            Some(action) => return Ok(action),
            None => tracing::warn!("动作必须是 1 或 2"),
        }
    }
}

/// 主流程：加载资源、解析动作并分发
pub async fn process(args: &Args, config: &Config) -> anyhow::Result<()> {
    let proxies = proxy::load_proxies(&config.proxies_path, config.use_proxy)?;
    let session_count = session::discover(&config.sessions_dir)
        .map(|s| s.len())
        .unwrap_or(0);
    tracing::info!("检测到 {} 个会话 | {} 个代理", session_count, proxies.len());

    let action = {
        let mut stdin = io::stdin().lock();
        resolve_action(args.action.as_deref(), &mut stdin)?
    };

    match action {
        Action::RunTappers => run_tappers(config, proxies).await,
        Action::RegisterSession => {
            let mut stdin = io::stdin().lock();
            session::register_session(&config.sessions_dir, &mut stdin)
        }
    }
}

/// 动作 1：发现会话并为每个会话并发执行默认任务
///
/// 会话发现与凭证校验的失败在任何任务派发前返回；
/// 单个会话的失败只影响自己的结果，最后统一汇总
async fn run_tappers(config: &Config, proxies: Vec<ProxyEndpoint>) -> anyhow::Result<()> {
    let sessions = session::discover(&config.sessions_dir)?;
    let factory = ContextFactory::new(config)?;

    let check_url = config.check_url.clone();
    let outcomes = TaskOrchestrator::new(factory, proxies)
        .run_all(sessions, move |ctx| {
            client::run_session(ctx, check_url.clone())
        })
        .await;

    for outcome in &outcomes {
        if let Err(e) = &outcome.result {
            tracing::error!("会话 {} 失败: {}", outcome.session, e);
        }
    }
    let ok = outcomes.iter().filter(|o| o.is_ok()).count();
    tracing::info!("全部任务结束: {} 成功 / {} 失败", ok, outcomes.len() - ok);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_from_selector() {
        assert_eq!(Action::from_selector("1"), Some(Action::RunTappers));
        assert_eq!(Action::from_selector("2"), Some(Action::RegisterSession));
        assert_eq!(Action::from_selector(" 1 "), Some(Action::RunTappers));
        assert_eq!(Action::from_selector("3"), None);
        assert_eq!(Action::from_selector("x"), None);
        assert_eq!(Action::from_selector(""), None);
    }

    #[test]
    fn test_resolve_action_from_cli() {
        let mut input = Cursor::new("");
        let action = resolve_action(Some("2"), &mut input).unwrap();
        assert_eq!(action, Action::RegisterSession);
    }

    #[test]
    fn test_resolve_action_retries_until_valid() {
        // 两次拒绝（超范围、非数字）后接受 "1"
        let mut input = Cursor::new("5\nx\n1\n");
        let action = resolve_action(None, &mut input).unwrap();
        assert_eq!(action, Action::RunTappers);
    }

    #[test]
    fn test_resolve_action_invalid_cli_falls_back_to_prompt() {
        let mut input = Cursor::new("2\n");
        let action = resolve_action(Some("7"), &mut input).unwrap();
        assert_eq!(action, Action::RegisterSession);
    }

    #[test]
    fn test_resolve_action_eof_is_error() {
        let mut input = Cursor::new("5\n");
        assert!(resolve_action(None, &mut input).is_err());
    }
}
