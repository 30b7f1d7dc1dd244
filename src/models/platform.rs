//! 平台识别 - 数据模型层
//!
//! 支持的刷题网站枚举，以及从主机名到平台的识别逻辑

use std::fmt;

/// 支持的刷题平台
///
/// 每个平台对应一个固定的域名关键字，识别时按 `ALL` 中的顺序
/// 对主机名做子串匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LeetCode,
    HackerRank,
    CheckiO,
    Codeforces,
    Codewars,
    Codingame,
}

impl Platform {
    /// 所有支持的平台（识别顺序）
    pub const ALL: [Platform; 6] = [
        Platform::LeetCode,
        Platform::HackerRank,
        Platform::CheckiO,
        Platform::Codeforces,
        Platform::Codewars,
        Platform::Codingame,
    ];

    /// 平台的域名关键字
    pub fn key(&self) -> &'static str {
        match self {
            Platform::LeetCode => "leetcode.com",
            Platform::HackerRank => "hackerrank.com",
            Platform::CheckiO => "checkio.org",
            Platform::Codeforces => "codeforces.com",
            Platform::Codewars => "codewars.com",
            Platform::Codingame => "codingame.com",
        }
    }

    /// 从主机名识别平台
    ///
    /// 按顺序扫描 `ALL`，返回第一个域名关键字是主机名子串的平台。
    /// 匹配区分大小写（主机名本身已是小写）。纯函数，无副作用。
    pub fn detect(host_name: &str) -> Option<Platform> {
        Self::ALL
            .iter()
            .copied()
            .find(|platform| host_name.contains(platform.key()))
    }

    /// 支持平台列表（用于错误提示）
    pub fn supported_keys() -> String {
        Self::ALL
            .iter()
            .map(|platform| platform.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
