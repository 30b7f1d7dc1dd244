//! # Coding Mentor
//!
//! 一个从刷题网站提取题目、调用 LLM 逐级生成解题提示的 Rust 应用
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageHandle` - 页面能力抽象（主机名 / URL / 就绪 / 取元素文本）
//! - `CdpPage` - 唯一的 page owner，通过 eval() 实现全部能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个动作
//! - `QuestionExtractor` - 按选择器目录提取题目能力
//! - `normalize` - 文本清洗能力
//! - `HintService` - LLM 提示生成能力
//! - `SessionStore` - 会话状态读写能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一轮辅导"的完整处理流程
//! - `HintSession` - 会话状态封装（题目 + 提示进度 + 聊天记录）
//! - `HintFlow` - 流程编排（检查 → 生成 → 记录）
//!
//! ### ④ 编排层（Orchestration）
//! - `bridge/` - 消息桥，对外的唯一协议接口
//! - `orchestrator/` - 应用入口，管理资源和调度
//!
//! ## 模块结构

pub mod bridge;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use bridge::{MessageBridge, Request};
pub use browser::connect_to_problem_page;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{CdpPage, PageHandle};
pub use models::{ExtractionResult, HintLevel, Platform};
pub use orchestrator::App;
pub use services::{normalize, HintService, QuestionExtractor, SessionStore};
pub use workflow::{HintFlow, HintOutcome, HintSession};
