//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! mentor_app (一轮辅导的调度)
//!     ↓
//! bridge::MessageBridge (协议分发)
//!     ↓
//! workflow::HintFlow / HintSession (提示流程与会话状态)
//!     ↓
//! services (能力层：extract / normalize / hint / store)
//!     ↓
//! infrastructure (基础设施：PageHandle / CdpPage)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层持有 Browser
//! 2. **向下依赖**：编排层 → bridge/workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计，不做具体提取/提示判断

pub mod mentor_app;

pub use mentor_app::App;
