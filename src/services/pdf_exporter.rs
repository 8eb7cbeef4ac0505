//! PDF 导出服务 - 业务能力层
//!
//! 只负责把导出接口返回的字节写到下载目录

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::infrastructure::Download;

fn filename_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"filename="(.+)""#).expect("filename pattern"))
}

/// 从 `Content-Disposition` 取文件名，取不到时使用默认名
pub fn export_file_name(content_disposition: Option<&str>, recommendation_id: i64) -> String {
    content_disposition
        .and_then(|h| filename_pattern().captures(h))
        .and_then(|c| c.get(1))
        .map(|m| sanitize(m.as_str()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("CareerPath_Recommendation_{}.pdf", recommendation_id))
}

/// 只保留最后一段路径，防止写出下载目录
fn sanitize(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub struct PdfExporter {
    download_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// 写入下载目录，返回文件路径
    pub async fn save(&self, recommendation_id: i64, download: &Download) -> AppResult<PathBuf> {
        let name = export_file_name(download.content_disposition.as_deref(), recommendation_id);
        let path = self.download_dir.join(name);

        fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| AppError::file_write_failed(self.download_dir.display().to_string(), e))?;
        fs::write(&path, &download.bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("📄 已导出 {} ({} 字节)", path.display(), download.bytes.len());
        Ok(path)
    }
}
