//! 并发任务编排
//!
//! 为每个会话派发一个独立任务，全部结束后按调度顺序汇总结果。
//! 代理分配在任何任务开始执行前同步完成。

use futures::future::join_all;
use std::future::Future;

use crate::error::TaskError;
use crate::launcher::context::{ContextFactory, SessionContext};
use crate::proxy::{ProxyCycle, ProxyEndpoint};
use crate::session::Session;

/// 单个会话的终态结果
#[derive(Debug)]
pub struct TaskOutcome {
    pub session: String,
    pub result: Result<(), TaskError>,
}

impl TaskOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// 任务编排器
///
/// run_all 按值消费自身，运行中不可重入
pub struct TaskOrchestrator {
    factory: ContextFactory,
    proxies: Vec<ProxyEndpoint>,
}

impl TaskOrchestrator {
    pub fn new(factory: ContextFactory, proxies: Vec<ProxyEndpoint>) -> Self {
        Self { factory, proxies }
    }

    /// 为每个会话并发执行一次任务，等待全部结束后按调度顺序返回结果
    ///
    /// 第 i 个会话分得 proxies[i mod len]（列表为空时不分配代理）。
    /// 单个任务的失败（包括 panic）只记录在该会话的结果中，
    /// 不会取消或延迟其他任务；没有全局超时。
    pub async fn run_all<F, Fut>(self, sessions: Vec<Session>, task: F) -> Vec<TaskOutcome>
    where
        F: Fn(SessionContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        // 分配阶段：在单一控制流上同步完成所有代理分配
        let mut cycle = ProxyCycle::new(&self.proxies);
        let contexts: Vec<SessionContext> = sessions
            .into_iter()
            .map(|session| {
                let proxy = cycle.next().cloned();
                self.factory.build(session, proxy)
            })
            .collect();

        // 派发阶段：每个上下文交给一个独立任务
        let mut names = Vec::with_capacity(contexts.len());
        let mut handles = Vec::with_capacity(contexts.len());
        for context in contexts {
            names.push(context.session.name.clone());
            handles.push(tokio::spawn(task(context)));
        }
        tracing::info!("已派发 {} 个任务，等待全部结束", handles.len());

        // 等待全部任务进入终态，不因单个失败而提前返回
        let results = join_all(handles).await;

        names
            .into_iter()
            .zip(results)
            .map(|(session, joined)| {
                let result = match joined {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(TaskError::Failed(e)),
                    Err(e) => Err(TaskError::Panicked(e.to_string())),
                };
                TaskOutcome { session, result }
            })
            .collect()
    }
}
