//! 登录态层
//!
//! 令牌持久化、当前用户、角色校验。`Session` 通过 `Arc` 显式传递，
//! 不使用全局单例。

pub mod guard;
pub mod session;
pub mod token_store;

pub use guard::require_role;
pub use session::Session;
pub use token_store::TokenStore;
