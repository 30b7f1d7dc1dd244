//! 页面能力抽象 - 基础设施层
//!
//! 提取器只依赖这组能力，不关心页面由什么环境提供。
//! 生产实现是 CDP 页面（`CdpPage`），测试用假页面驱动。

use anyhow::Result;
use async_trait::async_trait;

/// 页面能力集合
///
/// 职责：
/// - 读取当前页面的主机名和 URL
/// - 按选择器解析至多一个元素并取其文本
/// - 报告页面是否加载完成
/// - 不认识 Platform / 选择器目录
/// - 不处理重试和清洗
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// 当前页面的主机名（已是小写）
    async fn host_name(&self) -> Result<String>;

    /// 当前页面的完整 URL
    async fn url(&self) -> Result<String>;

    /// 等待页面加载完成（一次性就绪信号）
    async fn wait_ready(&self) -> Result<()>;

    /// 解析选择器并读取元素文本
    ///
    /// 文本按三级策略回退获取：直接渲染文本 → 布局感知文本 →
    /// 剥掉标签的原始标记，前一级不足 20 字符才尝试下一级。
    ///
    /// # 返回
    /// - `Ok(Some(text))`: 命中元素
    /// - `Ok(None)`: 无匹配元素
    /// - `Err(_)`: 选择器解析故障（调用方按"无匹配"处理）
    async fn text_of(&self, selector: &str) -> Result<Option<String>>;
}
