use serde_json::Value;
use thiserror::Error;

use crate::models::Role;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 登录态错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 表单校验失败（不会发起网络请求）
    #[error("校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 流程状态不允许该操作
    #[error("流程错误: {0}")]
    Workflow(#[from] WorkflowError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx，message 为后端原文或静态兜底文案
    #[error("{message} ({endpoint}, HTTP {status})")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 给用户看的消息
    pub fn message(&self) -> String {
        match self {
            ApiError::BadResponse { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// 登录态错误
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("尚未登录")]
    NotLoggedIn,
    /// 令牌失效且续期失败，本地令牌已清除
    #[error("登录已过期，请重新登录")]
    SessionExpired,
    #[error("当前角色 {actual} 无权执行该操作（需要 {required}）")]
    Forbidden { required: Role, actual: Role },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("令牌文件格式错误 ({path}): {source}")]
    TokenFileCorrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 表单校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in question prompt and all option labels.")]
    QuestionIncomplete,
    #[error("Pick a category or at least one template.")]
    NoTemplateSelection,
    #[error("Please fill in career name and summary.")]
    RecommendationIncomplete,
    #[error("Please fill in all step titles.")]
    StepTitleMissing,
    #[error("Please add at least one roadmap step.")]
    RoadmapEmpty,
    #[error("Please fill in company, job title, and job description.")]
    JobIncomplete,
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("Names must be 2-50 chars, letters/spaces/hyphens/apostrophes only.")]
    InvalidName,
    #[error("Enter a valid phone number (e.g., +911234567890).")]
    InvalidPhone,
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Category name is required.")]
    CategoryNameRequired,
    #[error("Please fill in company name and email.")]
    CompanyIncomplete,
    #[error("Template prompt is required.")]
    TemplatePromptRequired,
    #[error("All option labels are required.")]
    TemplateOptionLabelMissing,
    #[error("选项 {option_id} 不属于题目 {question_id}")]
    UnknownOption { question_id: i64, option_id: i64 },
    #[error("索引 {index} 超出范围 [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// 流程状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Cannot assign test without questions.")]
    EmptyTest,
    #[error("试卷已分配，不能再修改题目")]
    TestLocked,
    #[error("试卷已提交，不能再修改答案")]
    AlreadySubmitted,
    #[error("Please answer all questions. {answered}/{total} answered.")]
    AnswersIncomplete { answered: usize, total: usize },
    #[error("提交需要确认")]
    NotConfirmed,
    #[error("职业推荐已创建")]
    RecommendationAlreadyCreated,
    #[error("请先创建职业推荐")]
    RecommendationNotCreated,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置项 {name} 的值 '{value}' 无效")]
    InvalidValue { name: String, value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 根据响应体构造后端错误，取不到消息时使用兜底文案
    pub fn bad_response(endpoint: impl Into<String>, status: u16, body: &Value, fallback: &str) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
            message: extract_error_message(body).unwrap_or_else(|| fallback.to_string()),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// HTTP 状态码（仅后端错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api(e) => e.status(),
            _ => None,
        }
    }

    /// 给用户看的消息：后端错误原样输出，其余使用 Display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.message(),
            AppError::Validation(e) => e.to_string(),
            AppError::Workflow(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// 按 `error` → `detail` → 字段错误 的顺序从响应体取错误消息
pub fn extract_error_message(body: &Value) -> Option<String> {
    for key in ["error", "detail"] {
        if let Some(msg) = body.get(key).and_then(|v| v.as_str()) {
            if !msg.trim().is_empty() {
                return Some(msg.to_string());
            }
        }
    }

    // DRF 校验错误: {"field": ["msg", ...]}
    let map = body.as_object()?;
    map.iter().find_map(|(field, value)| {
        let first = match value {
            Value::Array(items) => items.first().and_then(|v| v.as_str()),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }?;
        if field == "non_field_errors" {
            Some(first.to_string())
        } else {
            Some(format!("{}: {}", field, first))
        }
    })
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
