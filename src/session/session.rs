use std::sync::RwLock;

use crate::error::AppResult;
use crate::models::{Role, TokenPair, User};
use crate::session::token_store::TokenStore;
use tracing::info;

#[derive(Debug, Default)]
struct SessionState {
    tokens: Option<TokenPair>,
    user: Option<User>,
}

/// 当前登录态
///
/// 启动时从令牌文件加载一次；登出或续期失败时清除。
/// 内存中的令牌与文件保持一致。
#[derive(Debug)]
pub struct Session {
    store: TokenStore,
    state: RwLock<SessionState>,
}

impl Session {
    /// 从令牌文件加载
    pub async fn load(store: TokenStore) -> AppResult<Self> {
        let tokens = store.load().await?;
        Ok(Self {
            store,
            state: RwLock::new(SessionState { tokens, user: None }),
        })
    }

    /// 不读文件的空会话
    pub fn empty(store: TokenStore) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(|s| s.tokens.as_ref().map(|t| t.access.clone()))
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(|s| s.tokens.as_ref().map(|t| t.refresh.clone()))
    }

    pub fn has_tokens(&self) -> bool {
        self.read(|s| s.tokens.is_some())
    }

    pub fn user(&self) -> Option<User> {
        self.read(|s| s.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read(|s| s.user.as_ref().map(|u| u.role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|s| s.tokens.is_some() && s.user.is_some())
    }

    /// 保存新令牌（内存 + 文件）
    pub async fn set_tokens(&self, tokens: TokenPair) -> AppResult<()> {
        self.store.store(&tokens).await?;
        self.write(|s| s.tokens = Some(tokens));
        Ok(())
    }

    pub fn set_user(&self, user: Option<User>) {
        self.write(|s| s.user = user);
    }

    /// 登出：清除内存与文件中的令牌
    pub async fn clear(&self) -> AppResult<()> {
        self.write(|s| {
            s.tokens = None;
            s.user = None;
        });
        self.store.clear().await?;
        info!("🔒 已清除登录态");
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}
