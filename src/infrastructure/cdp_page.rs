//! CDP 页面 - 基础设施层
//!
//! 持有唯一的 page 资源，通过 eval 实现 `PageHandle` 的全部能力

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::infrastructure::page_handle::PageHandle;

/// readyState 轮询间隔
const READY_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// readyState 轮询上限（约 10 秒，超时后按已就绪继续）
const READY_POLL_LIMIT: usize = 100;

/// CDP 页面
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 暴露 eval() 能力和 `PageHandle` 的页面能力
/// - 不认识 Platform / 选择器目录
/// - 不处理提取流程
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    /// 创建新的 CDP 页面
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 获取 page 的引用（用于其他操作）
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> Result<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }
}

#[async_trait]
impl PageHandle for CdpPage {
    async fn host_name(&self) -> Result<String> {
        self.eval_as("window.location.hostname").await
    }

    async fn url(&self) -> Result<String> {
        self.eval_as("window.location.href").await
    }

    /// 轮询 document.readyState 直到页面脱离 loading 状态
    async fn wait_ready(&self) -> Result<()> {
        for _ in 0..READY_POLL_LIMIT {
            let state: String = self.eval_as("document.readyState").await?;
            if state != "loading" {
                debug!("页面就绪: readyState = {}", state);
                return Ok(());
            }
            sleep(READY_POLL_INTERVAL).await;
        }

        warn!("页面长时间处于 loading 状态，继续尝试提取");
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        // 三级文本策略在页面侧完成：textContent → innerText → 剥标签的 innerHTML
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({selector});
                if (!el) return null;

                let text = el.textContent || '';
                if (!text || text.length < 20) {{
                    text = el.innerText || '';
                }}
                if (!text || text.length < 20) {{
                    text = (el.innerHTML || '').replace(/<[^>]*>/g, ' ');
                }}
                return text;
            }})()
            "#,
            selector = serde_json::to_string(selector)?,
        );

        self.eval_as(js_code).await
    }
}
