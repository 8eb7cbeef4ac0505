use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::company::JobRecommendation;
use super::resource::CareerResource;

/// 路线图中的一步，order 从 1 开始连续编号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// 管理员为已完成试卷出具的职业推荐，学生只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub id: i64,
    pub career_name: String,
    pub summary: String,
    /// 后端按行存储公司名
    #[serde(default)]
    pub companies: String,
    #[serde(default)]
    pub steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub resources: Vec<CareerResource>,
    #[serde(default)]
    pub job_recommendations: Vec<JobRecommendation>,
    #[serde(default)]
    pub test_id: Option<i64>,
    #[serde(default)]
    pub request_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CareerRecommendation {
    pub fn company_names(&self) -> Vec<&str> {
        self.companies
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    pub recommendation: CareerRecommendation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationList {
    #[serde(default)]
    pub recommendations: Vec<CareerRecommendation>,
}

/// 新建推荐请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecommendation {
    pub career_name: String,
    pub summary: String,
    pub companies: String,
    pub steps: Vec<RoadmapStep>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn company_names_skip_blank_lines() {
        let rec: CareerRecommendation = serde_json::from_value(json!({
            "id": 1,
            "career_name": "Data Engineer",
            "summary": "Pipelines",
            "companies": "Acme\n\n  Globex \n"
        }))
        .unwrap();
        assert_eq!(rec.company_names(), vec!["Acme", "Globex"]);
        assert!(rec.steps.is_empty());
    }
}
