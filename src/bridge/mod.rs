//! 消息桥 - 协议层
//!
//! 核心对外的唯一接口：接收带 `action` 标签的请求，逐条应答。
//! 每个请求恰好产生一条应答；内部的意外故障会被兜住并
//! 转换为失败应答，绝不把错误抛给请求方。

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::infrastructure::PageHandle;
use crate::models::{ExtractionReply, Platform};
use crate::services::hint_service::{ApiKeyCheck, HintService};
use crate::services::QuestionExtractor;

/// 入站请求
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// 提取当前页面的题目
    ExtractQuestion,
    /// 检查当前页面是否在支持的平台上
    CheckPlatform,
    /// 验证 API Key
    #[serde(rename_all = "camelCase")]
    ValidateApiKey { api_key: String },
    /// 更新徽章文本
    UpdateBadge { text: String },
    /// 记录一条来自外部的错误
    LogError { error: String },
}

/// 平台检查应答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformCheck {
    pub supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// 简单确认应答
#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub success: bool,
}

/// 出站应答
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Extraction(ExtractionReply),
    PlatformCheck(PlatformCheck),
    ApiKey(ApiKeyCheck),
    Ack(Ack),
    Fault { success: bool, error: String },
}

impl Reply {
    fn fault(error: impl Into<String>) -> Self {
        Reply::Fault {
            success: false,
            error: error.into(),
        }
    }
}

/// 桥上的一条消息：请求 + 一次性应答通道
pub type BridgeMessage = (serde_json::Value, oneshot::Sender<serde_json::Value>);

/// 消息桥
///
/// 职责：
/// - 解析带 action 标签的请求并分发到对应能力
/// - 保证每个请求恰好一条应答
/// - 维护徽章状态（支持平台上显示 ✓）
pub struct MessageBridge {
    extractor: QuestionExtractor,
    page: Arc<dyn PageHandle>,
    llm_api_base_url: String,
    llm_model_name: String,
    badge_text: Mutex<String>,
}

impl MessageBridge {
    /// 创建新的消息桥
    pub fn new(page: Arc<dyn PageHandle>, config: &Config) -> Self {
        Self {
            extractor: QuestionExtractor::new(),
            page,
            llm_api_base_url: config.llm_api_base_url.clone(),
            llm_model_name: config.llm_model_name.clone(),
            badge_text: Mutex::new(String::new()),
        }
    }

    /// 处理一条已解析的请求
    pub async fn handle(&self, request: Request) -> Reply {
        match request {
            Request::ExtractQuestion => Reply::Extraction(self.extract_question().await),
            Request::CheckPlatform => match self.check_platform().await {
                Ok(check) => Reply::PlatformCheck(check),
                Err(e) => Reply::fault(e.to_string()),
            },
            Request::ValidateApiKey { api_key } => Reply::ApiKey(
                HintService::validate_api_key(
                    &self.llm_api_base_url,
                    &api_key,
                    &self.llm_model_name,
                )
                .await,
            ),
            Request::UpdateBadge { text } => {
                self.set_badge(&text);
                Reply::Ack(Ack { success: true })
            }
            Request::LogError { error } => {
                error!("外部上报错误: {}", error);
                Reply::Ack(Ack { success: true })
            }
        }
    }

    /// 处理一条原始 JSON 消息
    ///
    /// 无法识别的 action 或格式错误 → `{success: false, error: "Unknown action"}`
    pub async fn handle_value(&self, value: serde_json::Value) -> serde_json::Value {
        let reply = match serde_json::from_value::<Request>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("无法解析请求: {}", e);
                Reply::fault("Unknown action")
            }
        };

        // Reply 的所有变体都是可序列化的普通数据，这里不会失败
        serde_json::to_value(&reply)
            .unwrap_or_else(|e| serde_json::json!({ "success": false, "error": e.to_string() }))
    }

    /// 消息循环：逐条取请求、应答，直到发送端全部关闭
    ///
    /// 应答通道已被对端丢弃时只记日志，不影响后续请求
    pub async fn serve(self: Arc<Self>, mut rx: mpsc::Receiver<BridgeMessage>) {
        info!("消息桥开始服务");
        while let Some((value, reply_tx)) = rx.recv().await {
            let reply = self.handle_value(value).await;
            if reply_tx.send(reply).is_err() {
                debug!("请求方已放弃等待应答");
            }
        }
        info!("消息桥结束服务");
    }

    // ========== 各 action 的实现 ==========

    /// 提取题目并序列化为应答
    ///
    /// 提取器保证一切失败都折叠成 Failure，这里无需再兜
    pub async fn extract_question(&self) -> ExtractionReply {
        self.extractor.extract(self.page.as_ref()).await.into_reply()
    }

    /// 检查当前页面的平台支持情况，并同步徽章
    async fn check_platform(&self) -> anyhow::Result<PlatformCheck> {
        let url = self.page.url().await?;
        let host = self.page.host_name().await?;
        let platform = Platform::detect(&host);

        self.set_badge(badge_text_for(platform));

        Ok(PlatformCheck {
            supported: platform.is_some(),
            platform: platform.map(|p| p.key().to_string()),
            url: Some(url),
        })
    }

    fn set_badge(&self, text: &str) {
        let mut badge = self.badge_text.lock().unwrap_or_else(|e| e.into_inner());
        if *badge != text {
            debug!("徽章更新: {:?} -> {:?}", badge, text);
            *badge = text.to_string();
        }
    }

    /// 当前徽章文本
    pub fn badge_text(&self) -> String {
        self.badge_text
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// 平台支持情况对应的徽章文本
pub fn badge_text_for(platform: Option<Platform>) -> &'static str {
    if platform.is_some() {
        "✓"
    } else {
        ""
    }
}
