//! 辅导应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源管理和一轮辅导的调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、连接浏览器、创建消息桥
//! 2. **会话恢复**：从存储读取上次的题目和提示进度
//! 3. **平台检查**：同步徽章状态
//! 4. **提取调度**：通过消息桥提取当前页面的题目
//! 5. **提示推进**：同一道题继续加深，新题目从头开始
//! 6. **资源管理**：持有 Browser，确保生命周期正确
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理提取和提示的细节
//! - **资源所有者**：唯一持有 Browser 的模块
//! - **向下委托**：bridge → services → infrastructure

use anyhow::Result;
use chromiumoxide::Browser;
use std::sync::Arc;
use tracing::{info, warn};

use crate::bridge::{MessageBridge, Request};
use crate::browser;
use crate::config::Config;
use crate::infrastructure::CdpPage;
use crate::services::{HintService, SessionStore};
use crate::utils::logging;
use crate::workflow::{HintFlow, HintOutcome, HintSession};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    bridge: Arc<MessageBridge>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        // 连接浏览器并定位刷题页面
        let (browser, page) = browser::connect_to_problem_page(
            config.browser_debug_port,
            config.fallback_url.as_deref(),
        )
        .await?;

        // 创建消息桥（持有 page 能力）
        let bridge = Arc::new(MessageBridge::new(Arc::new(CdpPage::new(page)), &config));

        Ok(Self {
            config,
            _browser: browser,
            bridge,
        })
    }

    /// 运行一轮辅导：提取题目 → 推进提示 → 保存会话
    pub async fn run(&self) -> Result<()> {
        let store = SessionStore::new(&self.config.storage_file);

        if self.config.reset_session {
            info!("按配置重置会话");
            store.clear().await?;
        }

        let stored = store.load().await?;
        let mut session = HintSession::from_stored(&stored, self.config.max_hint_level);

        // API Key：环境变量优先，其次用上次保存的
        let api_key = if !self.config.llm_api_key.is_empty() {
            self.config.llm_api_key.clone()
        } else {
            stored.api_key.clone()
        };

        // 平台检查 + 徽章
        if let crate::bridge::Reply::PlatformCheck(check) =
            self.bridge.handle(Request::CheckPlatform).await
        {
            info!(
                "平台检查: supported={} platform={:?}",
                check.supported, check.platform
            );
        }
        info!("徽章: {:?}", self.bridge.badge_text());

        // 提取题目
        let reply = self.bridge.extract_question().await;
        if !reply.success {
            warn!(
                "⚠️ 题目提取失败: {}",
                reply.error.as_deref().unwrap_or("unknown")
            );
            return Ok(());
        }

        let question = reply.question.unwrap_or_default();
        info!(
            "✓ 题目提取成功: {}",
            logging::truncate_text(&question, 80)
        );

        // 同一道题继续推进提示，新题目重置进度
        if session.current_question() != question {
            session.set_question(&question);
        }

        if api_key.is_empty() {
            warn!("⚠️ 未配置 API Key（LLM_API_KEY），跳过提示生成");
            store.save(&session.to_stored(&api_key)).await?;
            return Ok(());
        }

        if self.config.verbose_logging {
            let check = HintService::validate_api_key(
                &self.config.llm_api_base_url,
                &api_key,
                &self.config.llm_model_name,
            )
            .await;
            if !check.valid {
                warn!(
                    "⚠️ API Key 验证未通过 (状态码: {}): {:?}",
                    check.status, check.error
                );
            }
        }

        // 推进一条提示
        let mut hint_config = self.config.clone();
        hint_config.llm_api_key = api_key.clone();
        let flow = HintFlow::new(&hint_config);

        match flow.next_hint(&mut session).await {
            Ok(HintOutcome::Provided(hint)) => {
                info!(
                    "💡 第 {}/{} 级提示:\n{}",
                    session.current_hint_level(),
                    session.max_hint_level(),
                    hint
                );
            }
            Ok(HintOutcome::Exhausted) => {
                info!("💡 所有提示已提供，重新运行前先 RESET_SESSION=true 可重来");
            }
            Ok(HintOutcome::MissingQuestion) => {
                warn!("⚠️ 会话里没有题目");
            }
            Err(e) => {
                warn!("⚠️ 提示生成失败: {}", e);
            }
        }

        store.save(&session.to_stored(&api_key)).await?;
        logging::log_session_stats(&session);

        Ok(())
    }
}
