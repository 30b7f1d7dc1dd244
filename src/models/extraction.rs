//! 提取结果 - 数据模型层
//!
//! 提取的成功/失败以数据形式表达，核心内部不向外抛异常

use serde::{Deserialize, Serialize};

use crate::models::platform::Platform;

/// 一次题目提取的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    /// 提取成功
    Success {
        /// 原始标题（可能缺失，标题和题目至少有一个非空）
        title: Option<String>,
        /// 组装后的完整题目文本
        question: String,
        /// 识别到的平台
        platform: Platform,
        /// 页面 URL
        source_url: String,
    },
    /// 提取失败
    Failure {
        /// 面向用户的失败原因
        reason: String,
    },
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success { .. })
    }

    /// 转换为消息协议的应答格式
    pub fn into_reply(self) -> ExtractionReply {
        match self {
            ExtractionResult::Success {
                title,
                question,
                platform,
                source_url,
            } => ExtractionReply {
                success: true,
                question: Some(question),
                platform: Some(platform.key().to_string()),
                url: Some(source_url),
                title,
                error: None,
            },
            ExtractionResult::Failure { reason } => ExtractionReply {
                success: false,
                question: None,
                platform: None,
                url: None,
                title: None,
                error: Some(reason),
            },
        }
    }
}

/// 提取应答的序列化格式
///
/// 对应消息 `{success, question?, platform?, url?, title?, error?}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionReply {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_into_reply() {
        let result = ExtractionResult::Success {
            title: Some("Two Sum".to_string()),
            question: "Problem Title: Two Sum".to_string(),
            platform: Platform::LeetCode,
            source_url: "https://leetcode.com/problems/two-sum/".to_string(),
        };

        let reply = result.into_reply();
        assert!(reply.success);
        assert_eq!(reply.platform.as_deref(), Some("leetcode.com"));
        assert_eq!(reply.title.as_deref(), Some("Two Sum"));
        assert!(reply.error.is_none());
    }

    /// 序列化时省略缺失字段，失败应答只有 success 和 error
    #[test]
    fn test_failure_reply_serialization_omits_empty_fields() {
        let reply = ExtractionResult::Failure {
            reason: "content not found".to_string(),
        }
        .into_reply();

        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "content not found" })
        );
    }
}
