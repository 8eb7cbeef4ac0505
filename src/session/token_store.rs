use crate::error::{AppError, AppResult, FileError};
use crate::models::TokenPair;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 令牌文件存储
///
/// 以 JSON 保存 `{access, refresh}` 两个键
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取令牌；文件不存在视为未登录
    pub async fn load(&self) -> AppResult<Option<TokenPair>> {
        let display = self.path.display().to_string();
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::file_read_failed(display, e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let tokens: TokenPair = serde_json::from_str(&content)
            .map_err(|source| FileError::TokenFileCorrupt { path: display, source })?;
        Ok(Some(tokens))
    }

    pub async fn store(&self, tokens: &TokenPair) -> AppResult<()> {
        let path = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(&path, e))?;
        }

        let json = serde_json::to_string_pretty(tokens).map_err(|source| FileError::TokenFileCorrupt {
            path: path.clone(),
            source,
        })?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::file_write_failed(&path, e))?;

        debug!("令牌已写入 {}", path);
        Ok(())
    }

    /// 删除令牌文件，不存在时忽略
    pub async fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("令牌已清除");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::file_write_failed(self.path.display().to_string(), e)),
        }
    }
}
