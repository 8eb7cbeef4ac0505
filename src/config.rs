use std::path::PathBuf;

use crate::workflow::AnswerSyncPolicy;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 REST API 根地址（总以 `/` 结尾）
    pub api_base_url: String,
    /// 令牌文件路径（access + refresh）
    pub token_file: PathBuf,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// PDF 导出目录
    pub download_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 答案保存失败时的处理策略
    pub answer_sync: AnswerSyncPolicy,
    /// 401 时是否尝试用 refresh 令牌静默续期
    pub silent_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/".to_string(),
            token_file: PathBuf::from(".careerpath/tokens.json"),
            request_timeout_secs: 30,
            download_dir: PathBuf::from("downloads"),
            verbose_logging: false,
            answer_sync: AnswerSyncPolicy::Revert,
            silent_refresh: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: normalize_base_url(
                &std::env::var("CAREERPATH_API_URL").unwrap_or(default.api_base_url),
            ),
            token_file: std::env::var("CAREERPATH_TOKEN_FILE").map(PathBuf::from).unwrap_or(default.token_file),
            request_timeout_secs: std::env::var("CAREERPATH_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            download_dir: std::env::var("CAREERPATH_DOWNLOAD_DIR").map(PathBuf::from).unwrap_or(default.download_dir),
            verbose_logging: std::env::var("CAREERPATH_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            answer_sync: std::env::var("CAREERPATH_ANSWER_SYNC").ok().and_then(|v| v.parse().ok()).unwrap_or(default.answer_sync),
            silent_refresh: std::env::var("CAREERPATH_SILENT_REFRESH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.silent_refresh),
        }
    }

    /// 覆盖 API 地址（命令行参数优先于环境变量）
    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }
}

/// 保证根地址以 `/` 结尾，相对路径才能正确拼接
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
