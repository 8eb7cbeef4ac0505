//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责资源管理和命令调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用上下文
//! - 加载令牌并恢复会话（`auth/me/`）
//! - 持有唯一的 `HttpExecutor`
//! - 为命令层创建各个客户端
//! - 按角色拦截命令
//!
//! ## 层次关系
//!
//! ```text
//! main / commands (一次 CLI 调用)
//!     ↓
//! orchestrator::App (会话 + 执行器)
//!     ↓
//! workflow (出卷 / 答题 / 推荐向导)
//!     ↓
//! clients + services (REST 接口 / PDF / 草稿文件)
//!     ↓
//! infrastructure (HttpExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层创建 `HttpExecutor`
//! 2. **向下依赖**：编排层 → workflow → clients → infrastructure
//! 3. **无业务逻辑**：只做装配和拦截，不做具体业务判断

pub mod app;

pub use app::App;
