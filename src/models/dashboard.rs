//! 首页看板数据

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recommendation::CareerRecommendation;
use super::test::{PersonalizedTest, RequestStatus, TestRequest};
use super::user::User;

/// `student/dashboard/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDashboard {
    pub user: User,
    #[serde(default)]
    pub latest_request: Option<TestRequest>,
    #[serde(default)]
    pub personalized_test: Option<PersonalizedTest>,
    #[serde(default)]
    pub recommendation: Option<CareerRecommendation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub pending_requests: u32,
    #[serde(default)]
    pub pending_requests_trend: String,
    #[serde(default)]
    pub mcqs_crafted: u32,
    #[serde(default)]
    pub mcqs_crafted_trend: String,
    #[serde(default)]
    pub recommendations_sent: u32,
    #[serde(default)]
    pub recommendations_sent_trend: String,
}

/// 待处理队列中的一条申请
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusRequest {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub status: String,
    pub request_status: RequestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interests: String,
}

/// `admin/dashboard/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_requests: Vec<FocusRequest>,
}

/// `admin/recommendations/` 列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub id: i64,
    pub career_name: String,
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSummaryList {
    #[serde(default)]
    pub recommendations: Vec<RecommendationSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admin_dashboard_reads_focus_queue() {
        let dash: AdminDashboard = serde_json::from_value(json!({
            "stats": {"pending_requests": 2, "pending_requests_trend": "+1 this week"},
            "recent_requests": [{
                "id": 9,
                "title": "Test Request #9",
                "student": "asha",
                "request_status": "in_progress",
                "status": "Need review"
            }]
        }))
        .unwrap();
        assert_eq!(dash.stats.pending_requests, 2);
        assert_eq!(dash.recent_requests[0].request_status, RequestStatus::InProgress);
    }
}
