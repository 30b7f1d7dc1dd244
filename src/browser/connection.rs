use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, BrowserError};
use crate::models::Platform;

/// 连接到浏览器并找到刷题页面
///
/// 依次检查已打开的标签页，取第一个主机名命中支持平台的页面；
/// 都不命中时，若配置了兜底 URL 则新开页面导航过去，否则报错
pub async fn connect_to_problem_page(
    port: u16,
    fallback_url: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    // 查找主机名命中支持平台的页面
    for p in pages.iter() {
        if let Ok(Some(page_url)) = p.url().await {
            debug!("检查页面: {}", page_url);
            if let Some(platform) = host_of(&page_url).and_then(|h| Platform::detect(&h)) {
                info!("✓ 找到刷题页面 ({}): {}", platform, page_url);
                return Ok((browser, p.clone()));
            }
        }
    }
    debug!("没有已打开的刷题页面");

    // 兜底：导航到配置的 URL
    let Some(url) = fallback_url else {
        return Err(AppError::Browser(BrowserError::NoProblemPage).into());
    };

    debug!("创建新页面并导航到: {}", url);
    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        e
    })?;
    page.goto(url)
        .await
        .map_err(|e| AppError::navigation_failed(url, e))?;
    info!("已导航到: {}", url);

    Ok((browser, page))
}

/// 从 URL 中取主机名（不引入完整 URL 解析）
fn host_of(url: &str) -> Option<String> {
    let rest = url.split("://").nth(1)?;
    let host = rest
        .split('/')
        .next()?
        .split('@')
        .next_back()?
        .split(':')
        .next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
