//! HTTP 执行器 - 基础设施层
//!
//! 持有唯一的 reqwest::Client 和登录态，只暴露"发请求"的能力

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, AuthError, ConfigError};
use crate::models::user::RefreshResponse;
use crate::models::TokenPair;
use crate::session::Session;

const REFRESH_ENDPOINT: &str = "auth/token/refresh/";

/// 请求是否携带登录令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Credentials {
    Bearer,
    /// 登录 / 注册：不带令牌，401 原样返回，不触发续期
    Anonymous,
}

/// 二进制下载结果
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_disposition: Option<String>,
}

/// 待上传的文件
#[derive(Debug, Clone)]
pub struct Upload {
    pub field: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// HTTP 执行器
///
/// 职责：
/// - 拼接根地址与相对路径
/// - 注入 `Authorization: Bearer <access>`
/// - 401 时用 refresh 令牌续期一次并重放请求
/// - 把非 2xx 响应转换成带后端原文的错误
/// - 不认识试卷 / 推荐等业务对象
pub struct HttpExecutor {
    client: Client,
    base_url: String,
    session: Arc<Session>,
    silent_refresh: bool,
}

impl HttpExecutor {
    pub fn new(config: &Config, session: Arc<Session>) -> AppResult<Self> {
        reqwest::Url::parse(&config.api_base_url).map_err(|_| ConfigError::InvalidValue {
            name: "CAREERPATH_API_URL".to_string(),
            value: config.api_base_url.clone(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed("client", e))?;

        Ok(Self {
            client,
            base_url: crate::config::normalize_base_url(&config.api_base_url),
            session,
            silent_refresh: config.silent_refresh,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    // ========== JSON 请求 ==========

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(String, String)],
        fallback: &str,
    ) -> AppResult<T> {
        let response = self
            .execute(Method::GET, endpoint, fallback, Credentials::Bearer, |rb| rb.query(query))
            .await?;
        Self::decode(endpoint, response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> AppResult<T> {
        let response = self
            .execute(Method::POST, endpoint, fallback, Credentials::Bearer, |rb| rb.json(body))
            .await?;
        Self::decode(endpoint, response).await
    }

    /// 匿名 POST：不带令牌，也不把 401 当作登录过期
    pub async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> AppResult<T> {
        let response = self
            .execute(Method::POST, endpoint, fallback, Credentials::Anonymous, |rb| rb.json(body))
            .await?;
        Self::decode(endpoint, response).await
    }

    /// 无请求体的 POST（assign / submit 等动作接口）
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str, fallback: &str) -> AppResult<T> {
        self.post_json(endpoint, &json!({}), fallback).await
    }

    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        fallback: &str,
    ) -> AppResult<T> {
        let response = self
            .execute(Method::PATCH, endpoint, fallback, Credentials::Bearer, |rb| rb.json(body))
            .await?;
        Self::decode(endpoint, response).await
    }

    pub async fn delete(&self, endpoint: &str, fallback: &str) -> AppResult<()> {
        self.execute(Method::DELETE, endpoint, fallback, Credentials::Bearer, |rb| rb)
            .await?;
        Ok(())
    }

    /// multipart 表单；表单不可克隆，每次发送都重新构建
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        fields: &[(&'static str, String)],
        upload: Option<&Upload>,
        fallback: &str,
    ) -> AppResult<T> {
        let response = self
            .execute(method, endpoint, fallback, Credentials::Bearer, |rb| {
                rb.multipart(build_form(fields, upload))
            })
            .await?;
        Self::decode(endpoint, response).await
    }

    /// 下载二进制内容（PDF 导出）
    pub async fn get_bytes(&self, endpoint: &str, fallback: &str) -> AppResult<Download> {
        let response = self
            .execute(Method::GET, endpoint, fallback, Credentials::Bearer, |rb| rb)
            .await?;
        let content_disposition = header_string(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        Ok(Download {
            bytes: bytes.to_vec(),
            content_disposition,
        })
    }

    // ========== 内部实现 ==========

    async fn execute<F>(
        &self,
        method: Method,
        endpoint: &str,
        fallback: &str,
        credentials: Credentials,
        build: F,
    ) -> AppResult<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let had_token = credentials == Credentials::Bearer && self.session.has_tokens();
        let mut response = self.send_once(method.clone(), endpoint, credentials, &build).await?;

        if response.status() == StatusCode::UNAUTHORIZED && had_token {
            if self.silent_refresh && self.try_refresh().await {
                info!("🔄 令牌已续期，重放请求 {} {}", method, endpoint);
                response = self.send_once(method.clone(), endpoint, credentials, &build).await?;
            }
            if response.status() == StatusCode::UNAUTHORIZED {
                warn!("⚠️ 登录已失效 ({} {})，清除本地令牌", method, endpoint);
                self.session.clear().await?;
                return Err(AuthError::SessionExpired.into());
            }
        }

        Self::check_status(endpoint, response, fallback).await
    }

    async fn send_once<F>(
        &self,
        method: Method,
        endpoint: &str,
        credentials: Credentials,
        build: &F,
    ) -> AppResult<Response>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        debug!("➡️ {} {}", method, endpoint);
        let mut rb = self.client.request(method, self.url(endpoint));
        if credentials == Credentials::Bearer {
            if let Some(token) = self.session.access_token() {
                rb = rb.bearer_auth(token);
            }
        }
        build(rb)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))
    }

    /// 用 refresh 令牌换新的 access；失败返回 false
    async fn try_refresh(&self) -> bool {
        let Some(refresh) = self.session.refresh_token() else {
            return false;
        };

        let result = self
            .client
            .post(self.url(REFRESH_ENDPOINT))
            .json(&json!({ "refresh": refresh }))
            .send()
            .await;

        let response = match result {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("续期被拒绝: HTTP {}", r.status());
                return false;
            }
            Err(e) => {
                warn!("续期请求失败: {}", e);
                return false;
            }
        };

        let refreshed: RefreshResponse = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("续期响应无法解析: {}", e);
                return false;
            }
        };

        let tokens = TokenPair {
            access: refreshed.access,
            refresh: refreshed.refresh.unwrap_or(refresh),
        };
        match self.session.set_tokens(tokens).await {
            Ok(()) => true,
            Err(e) => {
                warn!("续期后保存令牌失败: {}", e);
                false
            }
        }
    }

    async fn check_status(endpoint: &str, response: Response, fallback: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: JsonValue = serde_json::from_str(&text).unwrap_or(JsonValue::Null);
        debug!("⬅️ {} 返回 HTTP {}: {}", endpoint, status.as_u16(), text);
        Err(AppError::bad_response(endpoint, status.as_u16(), &body, fallback))
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
        let text = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;
        // DELETE / 204 之类的空响应按 null 解析
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|source| {
            ApiError::JsonParseFailed {
                endpoint: endpoint.to_string(),
                source,
            }
            .into()
        })
    }
}

fn build_form(fields: &[(&'static str, String)], upload: Option<&Upload>) -> Form {
    let mut form = Form::new();
    for (name, value) in fields {
        form = form.text(*name, value.clone());
    }
    if let Some(upload) = upload {
        form = form.part(
            upload.field,
            Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone()),
        );
    }
    form
}

fn header_string(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::stub_backend::{user_json, StubBackend};
    use crate::models::User;
    use crate::session::TokenStore;
    use tempfile::TempDir;

    fn executor(base: &str) -> HttpExecutor {
        let config = Config::default().with_api_base_url(base);
        let session = Arc::new(Session::empty(TokenStore::new("unused.json")));
        HttpExecutor::new(&config, session).unwrap()
    }

    /// 已登录（持有旧令牌）的执行器
    async fn signed_in(stub: &StubBackend) -> (HttpExecutor, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(Session::empty(TokenStore::new(dir.path().join("tokens.json"))));
        session
            .set_tokens(TokenPair {
                access: "stale".to_string(),
                refresh: "r-1".to_string(),
            })
            .await
            .unwrap();
        let config = Config::default().with_api_base_url(&stub.base_url);
        (HttpExecutor::new(&config, session).unwrap(), dir)
    }

    #[test]
    fn endpoints_join_under_base() {
        let exec = executor("http://localhost:8000/api");
        assert_eq!(exec.url("auth/me/"), "http://localhost:8000/api/auth/me/");
        assert_eq!(exec.url("/auth/me/"), "http://localhost:8000/api/auth/me/");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let mut config = Config::default();
        config.api_base_url = "not a url".to_string();
        let session = Arc::new(Session::empty(TokenStore::new("unused.json")));
        let err = HttpExecutor::new(&config, session).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn expired_access_is_refreshed_and_request_replayed() {
        let stub = StubBackend::start(|req| match req.path.as_str() {
            "/api/auth/token/refresh/" => (200, r#"{"access":"fresh"}"#.to_string()),
            "/api/auth/me/" if req.authorization.as_deref() == Some("Bearer fresh") => {
                (200, user_json(3, "asha@example.com", "student"))
            }
            _ => (401, r#"{"detail":"Given token not valid for any token type"}"#.to_string()),
        })
        .await;
        let (exec, _dir) = signed_in(&stub).await;

        let user: User = exec.get_json("auth/me/", &[], "Unable to load current user.").await.unwrap();

        assert_eq!(user.email, "asha@example.com");
        assert_eq!(
            stub.paths(),
            vec!["/api/auth/me/", "/api/auth/token/refresh/", "/api/auth/me/"]
        );
        assert!(stub.requests()[1].body.contains("r-1"));
        assert_eq!(exec.session().access_token().as_deref(), Some("fresh"));
        // 后端没有轮换 refresh 时沿用旧值
        assert_eq!(exec.session().refresh_token().as_deref(), Some("r-1"));
    }

    #[tokio::test]
    async fn rejected_refresh_clears_tokens_and_expires_session() {
        let stub = StubBackend::start(|_| {
            (401, r#"{"detail":"Token is invalid or expired"}"#.to_string())
        })
        .await;
        let (exec, dir) = signed_in(&stub).await;

        let err = exec
            .get_json::<User>("auth/me/", &[], "Unable to load current user.")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Auth(AuthError::SessionExpired)));
        assert_eq!(stub.paths(), vec!["/api/auth/me/", "/api/auth/token/refresh/"]);
        assert!(!exec.session().has_tokens());
        assert!(!dir.path().join("tokens.json").exists());
    }

    #[tokio::test]
    async fn refresh_disabled_expires_on_first_401() {
        let stub = StubBackend::start(|_| (401, "{}".to_string())).await;
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(Session::empty(TokenStore::new(dir.path().join("tokens.json"))));
        session
            .set_tokens(TokenPair {
                access: "stale".to_string(),
                refresh: "r-1".to_string(),
            })
            .await
            .unwrap();
        let mut config = Config::default().with_api_base_url(&stub.base_url);
        config.silent_refresh = false;
        let exec = HttpExecutor::new(&config, session).unwrap();

        let err = exec.delete("catalog/companies/4/", "Failed to delete company.").await.unwrap_err();

        assert!(matches!(err, AppError::Auth(AuthError::SessionExpired)));
        assert_eq!(stub.paths(), vec!["/api/catalog/companies/4/"]);
        assert!(!exec.session().has_tokens());
    }

    #[tokio::test]
    async fn anonymous_post_keeps_tokens_and_backend_message() {
        let stub = StubBackend::start(|_| {
            (
                401,
                r#"{"detail":"No active account found with the given credentials"}"#.to_string(),
            )
        })
        .await;
        let (exec, _dir) = signed_in(&stub).await;

        let err = exec
            .post_public::<_, JsonValue>(
                "auth/token/",
                &json!({"email": "a@b.test", "password": "wrong"}),
                "Unable to sign in. Check credentials.",
            )
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message(),
            "No active account found with the given credentials"
        );
        assert_eq!(stub.paths(), vec!["/api/auth/token/"]);
        assert_eq!(stub.requests()[0].authorization, None);
        assert_eq!(exec.session().access_token().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let stub = StubBackend::start(|_| {
            (400, r#"{"error":"Cannot assign test without questions."}"#.to_string())
        })
        .await;
        let (exec, _dir) = signed_in(&stub).await;

        let err = exec
            .post_json::<_, JsonValue>("admin/tests/9/assign/", &json!({}), "Failed to assign test.")
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Cannot assign test without questions.");
        assert_eq!(err.status(), Some(400));
        assert_eq!(stub.requests()[0].authorization.as_deref(), Some("Bearer stale"));
        assert!(exec.session().has_tokens());
    }
}
