//! 提示流程 - 流程层
//!
//! 核心职责：定义"取下一条提示"的完整流程
//!
//! 流程顺序：
//! 1. 检查会话里有没有题目
//! 2. 检查提示进度是否耗尽
//! 3. 调用 LLM 生成对应级别的提示
//! 4. 把提示（或错误条目）记入会话

use anyhow::Result;
use tracing::{error, info};

use crate::config::Config;
use crate::services::HintService;
use crate::workflow::hint_session::HintSession;

/// 一轮提示请求的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// 成功生成提示
    Provided(String),
    /// 提示进度已耗尽
    Exhausted,
    /// 会话里还没有题目
    MissingQuestion,
}

/// 提示流程
///
/// 职责：
/// - 编排"取一条提示"的完整流程
/// - 不持有任何资源（page）
/// - 只依赖业务能力（services）
pub struct HintFlow {
    hint_service: HintService,
}

impl HintFlow {
    /// 创建新的提示流程
    pub fn new(config: &Config) -> Self {
        Self {
            hint_service: HintService::new(config),
        }
    }

    /// 为会话请求下一条提示
    ///
    /// 成功时把提示写入会话并推进进度；LLM 调用失败时
    /// 在会话里留下错误条目再向上传播
    pub async fn next_hint(&self, session: &mut HintSession) -> Result<HintOutcome> {
        if session.current_question().is_empty() {
            return Ok(HintOutcome::MissingQuestion);
        }

        let Some(level) = session.next_hint_level() else {
            info!("所有提示已提供 ({}/{})", session.current_hint_level(), session.max_hint_level());
            return Ok(HintOutcome::Exhausted);
        };

        info!(
            "🔍 请求第 {}/{} 级提示 ({})",
            session.current_hint_level() + 1,
            session.max_hint_level(),
            level.as_str()
        );

        match self
            .hint_service
            .request_hint(session.current_question(), level)
            .await
        {
            Ok(hint) => {
                session.record_hint(&hint);
                info!("✓ 提示生成成功");
                Ok(HintOutcome::Provided(hint))
            }
            Err(e) => {
                error!("⚠️ 提示生成失败: {}", e);
                session.record_error("Error getting hint. Please try again.");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_flow() -> HintFlow {
        HintFlow::new(&Config::default())
    }

    #[tokio::test]
    async fn test_missing_question() {
        let flow = test_flow();
        let mut session = HintSession::new(3);

        let outcome = flow.next_hint(&mut session).await.unwrap();
        assert_eq!(outcome, HintOutcome::MissingQuestion);
        assert!(session.chat_history().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_without_llm_call() {
        let flow = test_flow();
        let mut session = HintSession::new(0);
        session.set_question("Problem Title: Two Sum");

        // max_hint_level = 0：无需网络即可命中耗尽分支
        let outcome = flow.next_hint(&mut session).await.unwrap();
        assert_eq!(outcome, HintOutcome::Exhausted);
    }
}
