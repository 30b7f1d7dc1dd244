//! 题目提取器 - 业务能力层
//!
//! 只负责"从当前页面提取一道题"能力，不关心提示流程。
//! 按平台选择器列表逐个尝试，配合有限重试和递增等待，
//! 应对客户端渲染尚未完成的页面。

use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::infrastructure::PageHandle;
use crate::models::platform::Platform;
use crate::models::selectors::{self, Field};
use crate::models::ExtractionResult;
use crate::services::normalizer::normalize;

/// 有效内容阈值：清洗后超过该字符数才算命中，过滤空元素和占位元素
const MEANINGFUL_CONTENT_LEN: usize = 20;

/// 就绪信号之后额外等待动态内容渲染的时间
const DYNAMIC_CONTENT_WAIT: Duration = Duration::from_millis(500);

/// 题目提取器
///
/// 职责：
/// - 识别平台并查选择器目录
/// - 标题/题目两个字段独立提取，各自有限重试
/// - 组装最终题目文本
/// - 失败以 `ExtractionResult::Failure` 返回，不向外抛错
pub struct QuestionExtractor {
    max_retries: usize,
}

impl QuestionExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self { max_retries: 3 }
    }

    /// 从页面提取题目
    ///
    /// 所有失败路径（包括环境故障）都折叠为 `Failure`，
    /// 保证调用方拿到的一定是一个结果值
    pub async fn extract(&self, page: &dyn PageHandle) -> ExtractionResult {
        match self.try_extract(page).await {
            Ok(result) => result,
            Err(e) => {
                warn!("提取过程出现意外故障: {}", e);
                ExtractionResult::Failure {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_extract(&self, page: &dyn PageHandle) -> Result<ExtractionResult> {
        let host_name = page.host_name().await?;

        let Some(platform) = Platform::detect(&host_name) else {
            return Ok(ExtractionResult::Failure {
                reason: format!(
                    "Unsupported platform: {}. Supported platforms: {}",
                    host_name,
                    Platform::supported_keys()
                ),
            });
        };

        info!("开始提取题目，平台: {}", platform);

        // 等页面就绪，再留一点时间给动态内容
        page.wait_ready().await?;
        sleep(DYNAMIC_CONTENT_WAIT).await;

        let set = selectors::lookup(platform);

        // 两个字段独立提取，单个字段落空不算失败
        let title = self.extract_with_retry(page, set, Field::Title).await;
        let question = self.extract_with_retry(page, set, Field::Question).await;

        if title.is_empty() && question.is_empty() {
            return Ok(ExtractionResult::Failure {
                reason: "Could not extract question from this page. \
                         Make sure you're on a problem page and the content has loaded."
                    .to_string(),
            });
        }

        let source_url = page.url().await?;
        let formatted = format_question(&title, &question, platform, &source_url);

        info!("✓ 题目提取成功，平台: {}", platform);

        Ok(ExtractionResult::Success {
            title: (!title.is_empty()).then_some(title),
            question: formatted,
            platform,
            source_url,
        })
    }

    /// 单个字段的有限重试提取
    ///
    /// 每轮失败后等待 `1000ms × 轮次`，给客户端渲染留时间；
    /// 重试耗尽返回空字符串（非致命）
    async fn extract_with_retry(
        &self,
        page: &dyn PageHandle,
        set: &selectors::SelectorSet,
        field: Field,
    ) -> String {
        for attempt in 0..self.max_retries {
            let text = self.extract_text(page, set, field).await;
            if !text.is_empty() {
                return text;
            }

            if attempt + 1 < self.max_retries {
                debug!(
                    "第 {} 次提取 {:?} 失败，等待后重试",
                    attempt + 1,
                    field
                );
                sleep(Duration::from_millis(1000 * (attempt as u64 + 1))).await;
            }
        }

        String::new()
    }

    /// 走一遍选择器列表：平台专属列表在前，通用回退在后
    ///
    /// 单个选择器的解析故障吞掉并按"无匹配"处理
    async fn extract_text(
        &self,
        page: &dyn PageHandle,
        set: &selectors::SelectorSet,
        field: Field,
    ) -> String {
        let candidates = set
            .field(field)
            .iter()
            .chain(selectors::DEFAULT_SELECTORS.field(field));

        for selector in candidates {
            match page.text_of(selector).await {
                Ok(Some(raw)) => {
                    let text = normalize(&raw);
                    if text.chars().count() > MEANINGFUL_CONTENT_LEN {
                        debug!("选择器命中: {}", selector);
                        return text;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug!("选择器 {} 解析失败: {}", selector, e);
                }
            }
        }

        String::new()
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 组装最终题目文本
///
/// 标题、题目各占一个标注块，末尾固定追加平台和 URL 信息
fn format_question(title: &str, question: &str, platform: Platform, url: &str) -> String {
    let mut formatted = String::new();

    if !title.is_empty() {
        formatted.push_str(&format!("Problem Title: {}\n\n", title));
    }

    if !question.is_empty() {
        formatted.push_str(&format!("Problem Description:\n{}", question));
    }

    formatted.push_str(&format!("\n\nPlatform: {}\nURL: {}", platform.key(), url));

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 测试用假页面：固定主机名/URL，选择器到文本的映射，记录调用
    struct FakePage {
        host: String,
        url: String,
        texts: HashMap<&'static str, String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakePage {
        fn new(host: &str, url: &str) -> Self {
            Self {
                host: host.to_string(),
                url: url.to_string(),
                texts: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_text(mut self, selector: &'static str, text: &str) -> Self {
            self.texts.insert(selector, text.to_string());
            self
        }

        fn calls_for(&self, selector: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.as_str() == selector)
                .count()
        }

        fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PageHandle for FakePage {
        async fn host_name(&self) -> Result<String> {
            Ok(self.host.clone())
        }

        async fn url(&self) -> Result<String> {
            Ok(self.url.clone())
        }

        async fn wait_ready(&self) -> Result<()> {
            Ok(())
        }

        async fn text_of(&self, selector: &str) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(selector.to_string());
            Ok(self.texts.get(selector).cloned())
        }
    }

    fn selector_count(platform: Platform, field: Field) -> usize {
        selectors::lookup(platform).field(field).len()
            + selectors::DEFAULT_SELECTORS.field(field).len()
    }

    #[tokio::test]
    async fn test_unsupported_platform_fails_with_supported_list() {
        let page = FakePage::new("example.org", "https://example.org/");
        let extractor = QuestionExtractor::new();

        let result = extractor.extract(&page).await;
        let ExtractionResult::Failure { reason } = result else {
            panic!("未知平台应当失败");
        };
        assert!(reason.contains("example.org"));
        for platform in Platform::ALL {
            assert!(reason.contains(platform.key()), "原因应列出 {}", platform.key());
        }
        // 未识别平台时不应触碰选择器
        assert_eq!(page.total_calls(), 0);
    }

    /// 两个字段都落空：恰好 3 轮尝试，轮间等待 1000ms、2000ms
    #[tokio::test(start_paused = true)]
    async fn test_no_matches_fails_after_three_attempts() {
        let page = FakePage::new("leetcode.com", "https://leetcode.com/problems/two-sum/");
        let extractor = QuestionExtractor::new();

        let started = tokio::time::Instant::now();
        let result = extractor.extract(&page).await;
        let elapsed = started.elapsed();

        let ExtractionResult::Failure { reason } = result else {
            panic!("无匹配元素应当失败");
        };
        assert!(reason.contains("Could not extract question"));

        // 每轮走完平台列表 + 通用回退，两个字段各 3 轮
        let expected = 3 * selector_count(Platform::LeetCode, Field::Title)
            + 3 * selector_count(Platform::LeetCode, Field::Question);
        assert_eq!(page.total_calls(), expected);

        // 初始 500ms + 每字段 (1000 + 2000)ms
        assert_eq!(elapsed.as_millis(), 500 + 3000 + 3000);
    }

    /// 首个标题选择器命中 25 字符：不再尝试其他选择器和轮次
    #[tokio::test(start_paused = true)]
    async fn test_first_matching_selector_short_circuits() {
        let first_title_selector = selectors::lookup(Platform::LeetCode).title[0];
        let first_question_selector = selectors::lookup(Platform::LeetCode).question[0];

        let page = FakePage::new("leetcode.com", "https://leetcode.com/problems/two-sum/")
            .with_text(first_title_selector, &"t".repeat(25))
            .with_text(
                first_question_selector,
                "Given an array of integers, return indices of the two numbers.",
            );
        let extractor = QuestionExtractor::new();

        let result = extractor.extract(&page).await;
        let ExtractionResult::Success { title, .. } = result else {
            panic!("应当提取成功");
        };
        assert_eq!(title.as_deref(), Some("t".repeat(25).as_str()));
        assert_eq!(page.calls_for(first_title_selector), 1);
        assert_eq!(page.calls_for(first_question_selector), 1);
    }

    /// 组装格式：标题块、题目块、末尾的平台/URL 块
    #[tokio::test(start_paused = true)]
    async fn test_formats_composed_question() {
        let url = "https://leetcode.com/problems/two-sum/";
        let page = FakePage::new("leetcode.com", url)
            .with_text("[data-cy=\"question-title\"]", "Two Sum problem statement")
            .with_text(
                "[data-track-load=\"description_content\"]",
                "Given an array of integers, return indices of the two numbers.",
            );
        let extractor = QuestionExtractor::new();

        let ExtractionResult::Success { question, platform, source_url, .. } =
            extractor.extract(&page).await
        else {
            panic!("应当提取成功");
        };

        assert!(question.starts_with("Problem Title: Two Sum problem statement"));
        assert!(question.contains(
            "Problem Description:\nGiven an array of integers, return indices of the two numbers."
        ));
        assert!(question.ends_with(&format!("Platform: leetcode.com\nURL: {}", url)));
        assert_eq!(platform, Platform::LeetCode);
        assert_eq!(source_url, url);
    }

    /// 只有题目没有标题：部分结果仍然可用
    #[tokio::test(start_paused = true)]
    async fn test_question_without_title_still_succeeds() {
        let page = FakePage::new("codeforces.com", "https://codeforces.com/problemset/problem/1/A")
            .with_text(
                ".problem-statement",
                "Theatre Square in the capital city of Berland has a rectangular shape.",
            );
        let extractor = QuestionExtractor::new();

        let ExtractionResult::Success { title, question, .. } = extractor.extract(&page).await
        else {
            panic!("应当提取成功");
        };
        assert_eq!(title, None);
        assert!(question.starts_with("Problem Description:"));
    }

    /// 清洗后不超过阈值的文本视为占位元素，继续走后续选择器
    #[tokio::test(start_paused = true)]
    async fn test_short_text_rejected() {
        let set = selectors::lookup(Platform::Codewars);
        let page = FakePage::new("codewars.com", "https://www.codewars.com/kata/x")
            .with_text(set.title[0], "short")
            .with_text(set.title[1], "A proper kata title with enough length")
            .with_text(set.question[0], &"d".repeat(40));
        let extractor = QuestionExtractor::new();

        let ExtractionResult::Success { title, .. } = extractor.extract(&page).await else {
            panic!("应当提取成功");
        };
        assert_eq!(
            title.as_deref(),
            Some("A proper kata title with enough length")
        );
    }

    /// 环境故障折叠为 Failure，不向外抛错
    #[tokio::test]
    async fn test_host_fault_becomes_failure() {
        struct BrokenPage;

        #[async_trait]
        impl PageHandle for BrokenPage {
            async fn host_name(&self) -> Result<String> {
                anyhow::bail!("page detached")
            }
            async fn url(&self) -> Result<String> {
                anyhow::bail!("page detached")
            }
            async fn wait_ready(&self) -> Result<()> {
                Ok(())
            }
            async fn text_of(&self, _selector: &str) -> Result<Option<String>> {
                Ok(None)
            }
        }

        let result = QuestionExtractor::new().extract(&BrokenPage).await;
        let ExtractionResult::Failure { reason } = result else {
            panic!("环境故障应当折叠为 Failure");
        };
        assert!(reason.contains("page detached"));
    }

    /// 单个选择器解析故障被吞掉，不影响后续候选
    #[tokio::test(start_paused = true)]
    async fn test_selector_fault_swallowed() {
        struct FaultyFirstPage {
            inner: FakePage,
        }

        #[async_trait]
        impl PageHandle for FaultyFirstPage {
            async fn host_name(&self) -> Result<String> {
                self.inner.host_name().await
            }
            async fn url(&self) -> Result<String> {
                self.inner.url().await
            }
            async fn wait_ready(&self) -> Result<()> {
                Ok(())
            }
            async fn text_of(&self, selector: &str) -> Result<Option<String>> {
                let set = selectors::lookup(Platform::LeetCode);
                if selector == set.title[0] || selector == set.question[0] {
                    anyhow::bail!("invalid selector")
                }
                self.inner.text_of(selector).await
            }
        }

        let set = selectors::lookup(Platform::LeetCode);
        let page = FaultyFirstPage {
            inner: FakePage::new("leetcode.com", "https://leetcode.com/problems/two-sum/")
                .with_text(set.title[1], "Two Sum with a sufficiently long title")
                .with_text(set.question[1], &"q".repeat(64)),
        };

        let result = QuestionExtractor::new().extract(&page).await;
        assert!(result.is_success(), "解析故障不应中断提取");
    }
}
