/// 认证 API 客户端
///
/// 登录、注册、当前用户、登录态引导
use std::sync::Arc;

use crate::error::AppResult;
use crate::infrastructure::HttpExecutor;
use crate::models::{LoginPayload, LoginResponse, RegistrationPayload, User};
use crate::utils::validation::validate_registration;
use tracing::{info, warn};

pub struct AuthClient {
    http: Arc<HttpExecutor>,
}

impl AuthClient {
    pub fn new(http: Arc<HttpExecutor>) -> Self {
        Self { http }
    }

    /// 登录并保存令牌，返回当前用户
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .http
            .post_public("auth/token/", &payload, "Unable to sign in. Check credentials.")
            .await?;

        self.http.session().set_tokens(response.tokens()).await?;

        let user = match response.user {
            Some(user) => user,
            None => self.me().await?,
        };
        info!("✓ 已登录: {} ({})", user.display_name(), user.role);
        self.http.session().set_user(Some(user.clone()));
        Ok(user)
    }

    /// 注册学生账号（不会自动登录）
    pub async fn register(&self, form: &RegistrationPayload) -> AppResult<User> {
        validate_registration(form)?;
        let user: User = self
            .http
            .post_public(
                "auth/register/",
                form,
                "Unable to register. Please review your details.",
            )
            .await?;
        info!("✓ 注册成功: {}", user.email);
        Ok(user)
    }

    pub async fn me(&self) -> AppResult<User> {
        self.http
            .get_json("auth/me/", &[], "Unable to load current user.")
            .await
    }

    /// 启动时恢复登录态
    ///
    /// 没有令牌时不发请求；`auth/me/` 失败则清除令牌，视为未登录
    pub async fn bootstrap(&self) -> AppResult<Option<User>> {
        let session = self.http.session();
        if session.access_token().is_none() {
            session.set_user(None);
            return Ok(None);
        }

        match self.me().await {
            Ok(user) => {
                session.set_user(Some(user.clone()));
                Ok(Some(user))
            }
            Err(e) => {
                warn!("⚠️ 恢复登录态失败: {}", e.user_message());
                session.clear().await?;
                Ok(None)
            }
        }
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.http.session().clear().await
    }
}
