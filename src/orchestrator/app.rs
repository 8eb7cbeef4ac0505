//! 应用上下文 - 编排层
//!
//! ## 职责
//!
//! 持有一次命令执行所需的全部共享资源，是唯一创建 `HttpExecutor` 的地方。
//!
//! ## 核心功能
//!
//! 1. **会话恢复**：从令牌文件加载 `Session`，调用 `auth/me/` 确认身份
//! 2. **资源所有者**：持有 `Arc<Session>` 和 `Arc<HttpExecutor>`
//! 3. **客户端工厂**：按需创建各个无状态客户端，共享同一个执行器
//! 4. **角色拦截**：命令执行前检查当前用户角色
//!
//! ## 设计特点
//!
//! - **显式会话**：没有全局单例，会话随 App 传递
//! - **向下委托**：命令层拿到客户端后交给 workflow 处理

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::clients::{AdminClient, AuthClient, CatalogClient, StudentClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::HttpExecutor;
use crate::models::{Role, User};
use crate::services::PdfExporter;
use crate::session::{require_role, Session, TokenStore};
use crate::utils::logging::log_startup;

/// 应用主结构
pub struct App {
    config: Config,
    session: Arc<Session>,
    http: Arc<HttpExecutor>,
}

impl App {
    /// 初始化应用：加载令牌、创建执行器、恢复登录状态
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = TokenStore::new(config.token_file.clone());
        let session = Arc::new(Session::load(store).await?);
        let http = Arc::new(HttpExecutor::new(&config, Arc::clone(&session))?);

        let app = Self {
            config,
            session,
            http,
        };

        match app.auth().bootstrap().await? {
            Some(user) => info!("👤 当前用户: {} ({})", user.display_name(), user.role),
            None => debug!("未登录"),
        }

        Ok(app)
    }

    /// 不联网的上下文，只用于离线命令和测试
    pub fn offline(config: Config) -> AppResult<Self> {
        let session = Arc::new(Session::empty(TokenStore::new(config.token_file.clone())));
        let http = Arc::new(HttpExecutor::new(&config, Arc::clone(&session))?);
        Ok(Self {
            config,
            session,
            http,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn auth(&self) -> AuthClient {
        AuthClient::new(Arc::clone(&self.http))
    }

    pub fn student(&self) -> StudentClient {
        StudentClient::new(Arc::clone(&self.http))
    }

    pub fn admin(&self) -> AdminClient {
        AdminClient::new(Arc::clone(&self.http))
    }

    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(Arc::clone(&self.http))
    }

    pub fn pdf_exporter(&self) -> PdfExporter {
        PdfExporter::new(self.config.download_dir.clone())
    }

    /// 当前用户必须具备指定角色
    pub fn require(&self, role: Role) -> AppResult<User> {
        require_role(&self.session, role)
    }
}
