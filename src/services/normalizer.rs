//! 文本清洗 - 业务能力层
//!
//! 只负责"清洗一段提取文本"能力，不关心来源和流程

use regex::Regex;
use std::sync::LazyLock;

/// 清洗后题目文本的最大长度（字符数）
pub const MAX_QUESTION_LEN: usize = 3000;

/// 连续空白字符
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex"));

/// 连续空行
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("BLANK_LINES regex"));

/// 清洗提取到的原始文本
///
/// 按固定顺序执行：
/// 1. 连续空白折叠为单个空格
/// 2. 连续空行折叠为一个空行
/// 3. 制表符替换为空格
/// 4. 去掉首尾空白
/// 5. 截断到前 3000 个字符
///
/// 无失败路径；空输入返回空字符串。对任意输入幂等。
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = WHITESPACE_RUN.replace_all(raw, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    let text = text.replace('\t', " ");
    let text: String = text.trim().chars().take(MAX_QUESTION_LEN).collect();

    // 截断可能留下悬空的尾部空格，补一次 trim 保证幂等
    text.trim_end().to_string()
}
