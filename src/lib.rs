//! # CareerPath Client
//!
//! 职业测评平台的 Rust 客户端：类型化的 REST 客户端、出卷 / 答题 / 推荐流程，
//! 以及驱动这些流程的 `careerpath` 命令行。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（reqwest::Client + 会话），只暴露能力
//! - `HttpExecutor` - 唯一的 client owner，负责拼接地址、注入令牌、静默续期
//!
//! ### ② 会话（Session）
//! - `session/` - 令牌文件、当前用户、按角色拦截
//!
//! ### ③ 接口层（Clients）
//! - `clients/` - 每个后端接口一个方法，不保存状态
//! - `StudentApi` / `AdminApi` / `CatalogApi` - 流程层依赖的接口抽象
//!
//! ### ④ 业务能力层（Services）
//! - `PdfExporter` - 推荐 PDF 落盘
//! - `DraftLoader` - 离线 TOML 草稿 → 表单
//!
//! ### ⑤ 流程层（Workflow）
//! - `TestAssembly` - 出卷（添加题目、题库导入、分配）
//! - `TestSession` - 答题（逐题保存、整卷提交）
//! - `RecommendationWizard` - 两阶段推荐向导
//!
//! ### ⑥ 编排层（Orchestration）
//! - `orchestrator::App` - 恢复会话、装配客户端
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::HttpExecutor;
pub use orchestrator::App;
pub use session::{require_role, Session, TokenStore};
pub use workflow::{
    AnswerSyncPolicy, RecommendationWizard, TemplatePicker, TestAssembly, TestSession,
};
