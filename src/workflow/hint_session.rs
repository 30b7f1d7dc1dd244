//! 提示会话 - 流程层
//!
//! 封装一次辅导会话的全部可变状态：当前题目、提示进度、聊天记录。
//! 状态变更都经由这里的方法，持久化交给 `SessionStore`。

use crate::models::{ChatMessage, ChatRole, HintLevel};
use crate::services::session_store::StoredState;

/// 提示会话
#[derive(Debug, Clone)]
pub struct HintSession {
    current_question: String,
    current_hint_level: usize,
    max_hint_level: usize,
    chat_history: Vec<ChatMessage>,
}

impl HintSession {
    /// 创建空会话
    pub fn new(max_hint_level: usize) -> Self {
        Self {
            current_question: String::new(),
            current_hint_level: 0,
            max_hint_level,
            chat_history: Vec::new(),
        }
    }

    /// 从持久化状态恢复会话
    pub fn from_stored(stored: &StoredState, max_hint_level: usize) -> Self {
        Self {
            current_question: stored.current_question.clone(),
            // 恢复时夹紧到上限，防止坏数据把级别顶出范围
            current_hint_level: stored.current_hint_level.min(max_hint_level),
            max_hint_level,
            chat_history: stored.chat_history.clone(),
        }
    }

    /// 设置新提取到的题目：记录一条用户消息并重置提示进度
    pub fn set_question(&mut self, question: &str) {
        self.current_question = question.to_string();
        self.chat_history
            .push(ChatMessage::new(ChatRole::User, format!("New question: {}", question)));
        self.reset_hints();
    }

    /// 手动提交题目（不经过提取器）
    pub fn submit_manual(&mut self, question: &str) {
        self.current_question = question.to_string();
        self.chat_history
            .push(ChatMessage::new(ChatRole::User, question));
        self.reset_hints();
    }

    /// 下一个要请求的提示级别；进度耗尽返回 None
    pub fn next_hint_level(&self) -> Option<HintLevel> {
        if self.current_hint_level >= self.max_hint_level {
            return None;
        }
        HintLevel::from_index(self.current_hint_level)
    }

    /// 记录一条生成的提示并推进进度
    pub fn record_hint(&mut self, hint: &str) {
        self.chat_history
            .push(ChatMessage::new(ChatRole::Assistant, hint));
        self.current_hint_level += 1;
    }

    /// 记录一条错误条目（不推进进度）
    pub fn record_error(&mut self, message: &str) {
        self.chat_history
            .push(ChatMessage::new(ChatRole::Error, message));
    }

    /// 重置提示进度（保留题目和聊天记录）
    pub fn reset_hints(&mut self) {
        self.current_hint_level = 0;
    }

    /// 清空整个会话
    pub fn clear(&mut self) {
        self.current_question.clear();
        self.current_hint_level = 0;
        self.chat_history.clear();
    }

    /// 转换为持久化状态
    pub fn to_stored(&self, api_key: &str) -> StoredState {
        StoredState {
            api_key: api_key.to_string(),
            current_question: self.current_question.clone(),
            current_hint_level: self.current_hint_level,
            chat_history: self.chat_history.clone(),
            last_used: 0,
        }
    }

    // ========== 访问器 ==========

    pub fn current_question(&self) -> &str {
        &self.current_question
    }

    pub fn current_hint_level(&self) -> usize {
        self.current_hint_level
    }

    pub fn max_hint_level(&self) -> usize {
        self.max_hint_level
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_question_resets_progress() {
        let mut session = HintSession::new(3);
        session.set_question("Problem Title: Two Sum");
        session.record_hint("试试哈希表");
        assert_eq!(session.current_hint_level(), 1);

        session.set_question("Problem Title: Add Two Numbers");
        assert_eq!(session.current_hint_level(), 0);
        assert_eq!(session.current_question(), "Problem Title: Add Two Numbers");
    }

    #[test]
    fn test_hint_progression_and_exhaustion() {
        let mut session = HintSession::new(3);
        session.set_question("Problem Title: Two Sum");

        assert_eq!(session.next_hint_level(), Some(HintLevel::General));
        session.record_hint("先想想暴力解法的复杂度");

        assert_eq!(session.next_hint_level(), Some(HintLevel::Specific));
        session.record_hint("用哈希表存差值");

        assert_eq!(session.next_hint_level(), Some(HintLevel::Example));
        session.record_hint("for (i, n) in nums ...");

        // 级别在 [0, max] 内，耗尽后不再给出级别
        assert_eq!(session.current_hint_level(), 3);
        assert_eq!(session.next_hint_level(), None);
    }

    #[test]
    fn test_record_error_does_not_advance() {
        let mut session = HintSession::new(3);
        session.set_question("Problem Title: Two Sum");
        session.record_error("Error getting hint. Please try again.");

        assert_eq!(session.current_hint_level(), 0);
        assert_eq!(session.chat_history().len(), 2);
        assert_eq!(session.chat_history()[1].role, ChatRole::Error);
    }

    #[test]
    fn test_manual_submit_records_raw_question() {
        let mut session = HintSession::new(3);
        session.submit_manual("如何反转链表？");

        assert_eq!(session.current_question(), "如何反转链表？");
        assert_eq!(session.chat_history()[0].text, "如何反转链表？");
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut session = HintSession::new(3);
        session.set_question("Problem Title: Two Sum");
        session.record_hint("提示");
        session.clear();

        assert!(session.current_question().is_empty());
        assert_eq!(session.current_hint_level(), 0);
        assert!(session.chat_history().is_empty());
    }

    #[test]
    fn test_stored_round_trip_clamps_level() {
        let stored = StoredState {
            current_question: "Problem Title: Two Sum".to_string(),
            current_hint_level: 99,
            ..Default::default()
        };

        let session = HintSession::from_stored(&stored, 3);
        assert_eq!(session.current_hint_level(), 3);
        assert_eq!(session.next_hint_level(), None);

        let back = session.to_stored("sk-test");
        assert_eq!(back.api_key, "sk-test");
        assert_eq!(back.current_question, "Problem Title: Two Sum");
    }
}
