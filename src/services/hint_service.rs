//! 提示生成服务 - 业务能力层
//!
//! 只负责"调用 LLM 生成提示"能力，不关心会话流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::HintLevel;

/// API Key 检查结果
///
/// 对应消息 `{valid, status, error?}`，检查本身不会失败
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyCheck {
    pub valid: bool,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 提示生成服务
///
/// 职责：
/// - 调用 LLM API 按级别生成提示
/// - 提供通用的 LLM 调用接口
/// - 不出现 HintSession / 聊天记录
/// - 不关心流程顺序
pub struct HintService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl HintService {
    /// 创建新的提示服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，提示生成基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(1024u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        Ok(content.trim().to_string())
    }

    /// 为当前题目生成指定级别的提示
    ///
    /// # 参数
    /// - `question`: 完整题目文本（提取器组装的结果或手动输入）
    /// - `level`: 提示级别（general → specific → example 逐级加深）
    pub async fn request_hint(&self, question: &str, level: HintLevel) -> Result<String> {
        debug!("请求 {} 级提示，题目长度: {} 字符", level.as_str(), question.len());

        let (user_message, system_message) = Self::build_hint_messages(question, level);
        self.send_to_llm(&user_message, Some(&system_message)).await
    }

    /// 构建用于提示生成的消息
    ///
    /// 返回 (user_message, system_message)
    fn build_hint_messages(question: &str, level: HintLevel) -> (String, String) {
        let system_message = "You are a coding mentor helping a student solve a programming \
                              problem. Guide the student step by step instead of handing over \
                              the final solution."
            .to_string();

        let instruction = match level {
            HintLevel::General => {
                "Provide a general hint about the approach or algorithm needed to solve this \
                 problem. Don't give away the solution, but point them in the right direction. \
                 Keep it concise and encouraging."
            }
            HintLevel::Specific => {
                "Provide a more specific hint about the implementation details or key insights \
                 needed. You can mention specific data structures or techniques, but still \
                 don't give the complete solution."
            }
            HintLevel::Example => {
                "Provide a detailed example or pseudocode that shows how to approach this \
                 problem. You can be quite specific now, but still encourage the student to \
                 implement it themselves."
            }
        };

        let user_message = format!(
            "The student is working on the following problem:\n\n{}\n\n{}",
            question, instruction
        );

        (user_message, system_message)
    }

    /// 验证 API Key 是否可用
    ///
    /// 向聊天接口发一个极小的探测请求，按响应状态判断。
    /// 网络失败不算错误，折叠为 `valid: false`。
    pub async fn validate_api_key(
        api_base_url: &str,
        api_key: &str,
        model_name: &str,
    ) -> ApiKeyCheck {
        let endpoint = format!("{}/chat/completions", api_base_url.trim_end_matches('/'));
        debug!("验证 API Key: {}", endpoint);

        let body = serde_json::json!({
            "model": model_name,
            "messages": [{
                "role": "user",
                "content": "Hello, can you respond with just \"API key is valid\"?"
            }],
            "max_tokens": 10,
        });

        let response = reqwest::Client::new()
            .post(&endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    ApiKeyCheck {
                        valid: true,
                        status: status.as_u16(),
                        error: None,
                    }
                } else {
                    let error = resp.text().await.ok();
                    warn!("API Key 验证失败，状态码: {}", status);
                    ApiKeyCheck {
                        valid: false,
                        status: status.as_u16(),
                        error,
                    }
                }
            }
            Err(e) => {
                warn!("API Key 验证请求失败: {}", e);
                ApiKeyCheck {
                    valid: false,
                    status: 0,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 创建测试用的 HintService
    fn create_test_service() -> HintService {
        let config = OpenAIConfig::new()
            .with_api_key("test-key")
            .with_api_base("https://generativelanguage.googleapis.com/v1beta/openai");

        let client = Client::with_config(config);

        HintService {
            client,
            model_name: "gemini-1.5-flash".to_string(),
        }
    }

    #[test]
    fn test_build_hint_messages_contains_question() {
        let question = "Problem Title: Two Sum\n\nProblem Description:\nGiven an array...";
        for level in [HintLevel::General, HintLevel::Specific, HintLevel::Example] {
            let (user, system) = HintService::build_hint_messages(question, level);
            assert!(user.contains(question));
            assert!(system.contains("coding mentor"));
        }
    }

    /// 每个级别的指令各不相同，且逐级放开
    #[test]
    fn test_build_hint_messages_per_level() {
        let question = "Problem Title: Two Sum";

        let (general, _) = HintService::build_hint_messages(question, HintLevel::General);
        assert!(general.contains("general hint"));
        assert!(general.contains("Don't give away the solution"));

        let (specific, _) = HintService::build_hint_messages(question, HintLevel::Specific);
        assert!(specific.contains("implementation details"));
        assert!(specific.contains("data structures"));

        let (example, _) = HintService::build_hint_messages(question, HintLevel::Example);
        assert!(example.contains("pseudocode"));
        assert!(example.contains("implement it themselves"));
    }

    /// 测试真实 LLM 调用
    ///
    /// 运行方式：
    /// ```bash
    /// cargo test test_request_hint_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_request_hint_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = create_test_service();
        let question = "Problem Title: Two Sum\n\nProblem Description:\n\
                        Given an array of integers nums and an integer target, return indices \
                        of the two numbers such that they add up to target.";

        let result = service.request_hint(question, HintLevel::General).await;

        match result {
            Ok(hint) => {
                println!("\n========== LLM 提示 ==========");
                println!("{}", hint);
                println!("==============================\n");
                assert!(!hint.is_empty());
            }
            Err(e) => {
                panic!("LLM 调用失败: {}", e);
            }
        }
    }

    /// 测试 API Key 验证（需要网络）
    #[tokio::test]
    #[ignore]
    async fn test_validate_api_key_live() {
        let check = HintService::validate_api_key(
            "https://generativelanguage.googleapis.com/v1beta/openai",
            "definitely-not-a-valid-key",
            "gemini-1.5-flash",
        )
        .await;

        println!("验证结果: {:?}", check);
        assert!(!check.valid);
    }
}
