//! 聊天与提示级别 - 数据模型层

use serde::{Deserialize, Serialize};

/// 聊天消息的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// 学生（用户）
    User,
    /// 导师（LLM）
    Assistant,
    /// 错误提示条目
    Error,
}

/// 一条聊天记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// 提示级别：从泛泛的方向到具体示例，逐级加深
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintLevel {
    /// 第一级：思路方向
    General,
    /// 第二级：实现细节
    Specific,
    /// 第三级：示例/伪代码
    Example,
}

impl HintLevel {
    /// 按会话中的提示计数取级别，超出范围返回 None
    pub fn from_index(index: usize) -> Option<HintLevel> {
        match index {
            0 => Some(HintLevel::General),
            1 => Some(HintLevel::Specific),
            2 => Some(HintLevel::Example),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HintLevel::General => "general",
            HintLevel::Specific => "specific",
            HintLevel::Example => "example",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_level_from_index() {
        assert_eq!(HintLevel::from_index(0), Some(HintLevel::General));
        assert_eq!(HintLevel::from_index(1), Some(HintLevel::Specific));
        assert_eq!(HintLevel::from_index(2), Some(HintLevel::Example));
        assert_eq!(HintLevel::from_index(3), None);
    }

    #[test]
    fn test_chat_message_role_serialization() {
        let msg = ChatMessage::new(ChatRole::Assistant, "试试哈希表");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
