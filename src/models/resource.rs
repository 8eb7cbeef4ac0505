use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewResourceCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Article,
    Video,
    Course,
    Book,
    Certification,
    Tool,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Article => "article",
            ResourceType::Video => "video",
            ResourceType::Course => "course",
            ResourceType::Book => "book",
            ResourceType::Certification => "certification",
            ResourceType::Tool => "tool",
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "article" => Ok(ResourceType::Article),
            "video" => Ok(ResourceType::Video),
            "course" => Ok(ResourceType::Course),
            "book" => Ok(ResourceType::Book),
            "certification" => Ok(ResourceType::Certification),
            "tool" => Ok(ResourceType::Tool),
            other => Err(format!("未知资源类型: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            other => Err(format!("未知难度: {}", other)),
        }
    }
}

/// 学生对某个资源的学习进度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

impl FromStr for ProgressStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "not_started" => Ok(ProgressStatus::NotStarted),
            "in_progress" => Ok(ProgressStatus::InProgress),
            "completed" => Ok(ProgressStatus::Completed),
            "skipped" => Ok(ProgressStatus::Skipped),
            other => Err(format!("未知进度状态: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProgress {
    pub status: ProgressStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub status: ProgressStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub progress: ResourceProgress,
}

/// 学习资源；career_recommendation 为空表示通用资源
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerResource {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    #[serde(default = "default_true")]
    pub is_free: bool,
    /// 后端 Decimal 以字符串返回
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub order: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub career_recommendation: Option<i64>,
    #[serde(default)]
    pub category: Option<ResourceCategory>,
    /// `my-resources` 接口把进度放在 `progress` 字段
    #[serde(default, alias = "progress")]
    pub student_progress: Option<ResourceProgress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub resources: Vec<CareerResource>,
}

/// 新建/更新资源（multipart 表单）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceForm {
    #[serde(default)]
    pub career_recommendation: Option<i64>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub url: Option<String>,
    /// 本地文件，上传时作为 `file` 字段
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(default)]
    pub is_free: Option<bool>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl ResourceForm {
    /// 文本字段，未设置的跳过
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(v) = self.career_recommendation {
            fields.push(("career_recommendation", v.to_string()));
        }
        if let Some(v) = self.category {
            fields.push(("category", v.to_string()));
        }
        if let Some(v) = &self.title {
            fields.push(("title", v.clone()));
        }
        if let Some(v) = &self.description {
            fields.push(("description", v.clone()));
        }
        if let Some(v) = self.resource_type {
            fields.push(("resource_type", v.as_str().to_string()));
        }
        if let Some(v) = &self.url {
            fields.push(("url", v.clone()));
        }
        if let Some(v) = self.difficulty_level {
            fields.push(("difficulty_level", v.as_str().to_string()));
        }
        if let Some(v) = self.is_free {
            fields.push(("is_free", v.to_string()));
        }
        if let Some(v) = &self.cost {
            fields.push(("cost", v.clone()));
        }
        if let Some(v) = self.order {
            fields.push(("order", v.to_string()));
        }
        if let Some(v) = self.is_active {
            fields.push(("is_active", v.to_string()));
        }
        fields
    }
}

/// 学生资源列表过滤
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub recommendation_id: Option<i64>,
    pub category_id: Option<i64>,
    pub resource_type: Option<ResourceType>,
}

impl ResourceQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.recommendation_id {
            params.push(("recommendation_id".to_string(), id.to_string()));
        }
        if let Some(id) = self.category_id {
            params.push(("category_id".to_string(), id.to_string()));
        }
        if let Some(t) = self.resource_type {
            params.push(("resource_type".to_string(), t.as_str().to_string()));
        }
        params
    }
}

fn default_true() -> bool {
    true
}
