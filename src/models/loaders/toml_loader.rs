use crate::error::{AppError, AppResult, FileError};
use crate::models::company::JobType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// 题目文件中的一个选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// 管理员离线编写的题目文件
///
/// ```toml
/// [[questions]]
/// prompt = "Pick a fruit"
/// options = [{ label = "Apple" }, { label = "Banana" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraftFile {
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEntry {
    pub company: i64,
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub application_url: Option<String>,
}

/// 职业推荐文件：第一阶段字段 + 可选的岗位列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDraftFile {
    pub career_name: String,
    pub summary: String,
    /// 未选择公司时使用的自由文本公司名
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub company_ids: Vec<i64>,
    #[serde(default)]
    pub steps: Vec<StepEntry>,
    #[serde(default)]
    pub jobs: Vec<JobEntry>,
}

async fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> AppResult<T> {
    let display = path.display().to_string();
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound { path: display }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    toml::from_str(&content).map_err(|source| {
        FileError::TomlParseFailed {
            path: display,
            source,
        }
        .into()
    })
}

/// 加载题目文件
pub async fn load_question_drafts(path: &Path) -> AppResult<QuestionDraftFile> {
    let file: QuestionDraftFile = read_toml(path).await?;
    tracing::info!(
        "成功加载 {} 道题目: {}",
        file.questions.len(),
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(file)
}

/// 加载职业推荐文件
pub async fn load_recommendation_draft(path: &Path) -> AppResult<RecommendationDraftFile> {
    let file: RecommendationDraftFile = read_toml(path).await?;
    tracing::info!(
        "成功加载职业推荐 '{}'，{} 个步骤，{} 个岗位",
        file.career_name,
        file.steps.len(),
        file.jobs.len()
    );
    Ok(file)
}
