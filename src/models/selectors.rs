//! 选择器目录 - 数据模型层
//!
//! 每个平台的标题/题目候选选择器列表，按优先级排列（最可能命中的在前）。
//! 静态配置数据，运行期不可变。各平台页面结构经常改版，
//! 列表里保留了新旧多代页面的选择器作为回退。

use phf::phf_map;

use crate::models::platform::Platform;

/// 一个平台的选择器集合
///
/// `title` 和 `question` 都是有序列表，顺序即偏好
#[derive(Debug)]
pub struct SelectorSet {
    pub title: &'static [&'static str],
    pub question: &'static [&'static str],
}

/// 提取字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Question,
}

impl SelectorSet {
    /// 按字段取对应的选择器列表
    pub fn field(&self, field: Field) -> &'static [&'static str] {
        match field {
            Field::Title => self.title,
            Field::Question => self.question,
        }
    }
}

/// 各平台选择器表
static PLATFORM_SELECTORS: phf::Map<&'static str, SelectorSet> = phf_map! {
    "leetcode.com" => SelectorSet {
        title: &[
            "[data-cy=\"question-title\"]",
            ".question-title",
            "h1[data-cy=\"question-title\"]",
            ".css-v3d350",
            ".question-title a",
            "h1.mr-2",
        ],
        question: &[
            "[data-track-load=\"description_content\"]",
            ".question-content",
            "[data-cy=\"question-detail-main-tabs\"] .elfjS",
            ".content__u3I1 .question-content",
            "[data-track-load=\"description_content\"] .content__u3I1",
            ".xFUwe",
            ".question-content .content__u3I1",
            ".css-1jqueqk",
            ".description__24sA",
        ],
    },
    "hackerrank.com" => SelectorSet {
        title: &[
            ".ui-icon-heading",
            ".challenge-title",
            "h1.challenge-title",
            ".challenge-title h1",
            ".problem-title",
        ],
        question: &[
            ".problem-statement",
            ".challenge-text",
            ".problem-statement-text",
            ".challenge-body-html",
            ".problem-statement .challenge-text",
            ".challenge-problem-statement",
            ".problem-statement-content",
        ],
    },
    "checkio.org" => SelectorSet {
        title: &[
            ".mission-title",
            "h1.title",
            ".title",
            ".mission-title h1",
            ".task-title",
        ],
        question: &[
            ".description",
            ".mission-description",
            ".story",
            ".description-section",
            ".mission-description .description",
            ".task-description",
            ".mission .description",
        ],
    },
    "codeforces.com" => SelectorSet {
        title: &[
            ".problem-statement .title",
            ".header .title",
            "h1.title",
            ".problem-statement .header .title",
            ".title",
        ],
        question: &[
            ".problem-statement",
            ".legend",
            ".problem-statement .legend",
            ".problem-statement-text",
            ".problem-statement .header + div",
            ".problem-statement .problem-statement-text",
            ".ttypography",
        ],
    },
    "codewars.com" => SelectorSet {
        title: &[
            ".kata-title",
            "h1.kata-title",
            ".title",
            ".kata-header .title",
            ".kata-title h1",
        ],
        question: &[
            ".markdown",
            ".description",
            ".kata-description",
            ".markdown-prose",
            ".description .markdown",
            ".kata-description .markdown",
            ".description-section",
        ],
    },
    "codingame.com" => SelectorSet {
        title: &[
            ".statement-title",
            "h1.statement-title",
            ".title",
            ".statement .title",
            ".statement-title h1",
        ],
        question: &[
            ".statement",
            ".statement-section",
            ".problem-statement",
            ".statement-body",
            ".statement .statement-section",
            ".problem-statement .statement",
            ".statement-text",
        ],
    },
};

/// 通用回退选择器
///
/// 平台专属列表全部落空时，在同一轮尝试内继续走这组通用选择器
pub static DEFAULT_SELECTORS: SelectorSet = SelectorSet {
    title: &["h1", "h2", ".title"],
    question: &[
        ".problem",
        ".description",
        "[class*=\"statement\"]",
        "[class*=\"question\"]",
    ],
};

/// 查询平台的选择器集合
///
/// 表中覆盖了所有枚举平台，正常情况下不会走到回退分支
pub fn lookup(platform: Platform) -> &'static SelectorSet {
    PLATFORM_SELECTORS
        .get(platform.key())
        .unwrap_or(&DEFAULT_SELECTORS)
}
