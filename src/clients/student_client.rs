/// 学生端 API 客户端
use std::sync::Arc;

use crate::error::AppResult;
use crate::infrastructure::{Download, HttpExecutor};
use crate::models::recommendation::RecommendationList;
use crate::models::resource::{ProgressEnvelope, ResourceList};
use crate::models::test::{StudentTestEnvelope, StudentTestList};
use crate::models::{
    AnswerPayload, CareerRecommendation, CareerResource, NewTestRequest, ProgressUpdate,
    ResourceProgress, ResourceQuery, StudentDashboard, StudentTest, StudentTestSummary,
    TestRequest,
};
use serde_json::Value as JsonValue;

/// 答题流程依赖的学生端接口
#[allow(async_fn_in_trait)]
pub trait StudentApi {
    async fn fetch_student_test(&self, test_id: i64) -> AppResult<StudentTest>;
    async fn submit_answer(&self, test_id: i64, question_id: i64, option_id: i64) -> AppResult<()>;
    async fn submit_test(&self, test_id: i64) -> AppResult<()>;
}

pub struct StudentClient {
    http: Arc<HttpExecutor>,
}

impl StudentClient {
    pub fn new(http: Arc<HttpExecutor>) -> Self {
        Self { http }
    }

    pub async fn dashboard(&self) -> AppResult<StudentDashboard> {
        self.http
            .get_json("student/dashboard/", &[], "Unable to load dashboard data.")
            .await
    }

    pub async fn list_requests(&self) -> AppResult<Vec<TestRequest>> {
        self.http
            .get_json("student/test-requests/", &[], "Unable to load test requests.")
            .await
    }

    pub async fn create_request(&self, request: &NewTestRequest) -> AppResult<TestRequest> {
        self.http
            .post_json("student/test-requests/", request, "Unable to request a test.")
            .await
    }

    /// 已分配给我的试卷及已答数量
    pub async fn list_tests(&self) -> AppResult<Vec<StudentTestSummary>> {
        let list: StudentTestList = self
            .http
            .get_json("student/tests/", &[], "Unable to load tests.")
            .await?;
        Ok(list.tests)
    }

    pub async fn list_recommendations(&self) -> AppResult<Vec<CareerRecommendation>> {
        let list: RecommendationList = self
            .http
            .get_json("student/recommendations/", &[], "Unable to load recommendations.")
            .await?;
        Ok(list.recommendations)
    }

    /// 导出 PDF 原始字节，由 PdfExporter 落盘
    pub async fn export_recommendation(&self, recommendation_id: i64) -> AppResult<Download> {
        self.http
            .get_bytes(
                &format!("student/recommendations/{}/export/", recommendation_id),
                "Failed to export PDF.",
            )
            .await
    }

    pub async fn list_resources(&self, query: &ResourceQuery) -> AppResult<Vec<CareerResource>> {
        let list: ResourceList = self
            .http
            .get_json("student/resources/", &query.to_params(), "Unable to load resources.")
            .await?;
        Ok(list.resources)
    }

    pub async fn resource(&self, resource_id: i64) -> AppResult<CareerResource> {
        self.http
            .get_json(
                &format!("student/resources/{}/", resource_id),
                &[],
                "Unable to load resources.",
            )
            .await
    }

    pub async fn update_progress(&self, resource_id: i64, update: &ProgressUpdate) -> AppResult<ResourceProgress> {
        let envelope: ProgressEnvelope = self
            .http
            .post_json(
                &format!("student/resources/{}/progress/", resource_id),
                update,
                "Failed to update resource status.",
            )
            .await?;
        Ok(envelope.progress)
    }

    /// 有学习记录的资源，按最近更新排序
    pub async fn my_resources(&self) -> AppResult<Vec<CareerResource>> {
        let list: ResourceList = self
            .http
            .get_json("student/my-resources/", &[], "Unable to load resources.")
            .await?;
        Ok(list.resources)
    }
}

impl StudentApi for StudentClient {
    async fn fetch_student_test(&self, test_id: i64) -> AppResult<StudentTest> {
        let envelope: StudentTestEnvelope = self
            .http
            .get_json(
                &format!("student/tests/{}/", test_id),
                &[],
                "Unable to load test.",
            )
            .await?;
        Ok(envelope.test)
    }

    async fn submit_answer(&self, test_id: i64, question_id: i64, option_id: i64) -> AppResult<()> {
        let payload = AnswerPayload {
            question_id,
            option_id,
        };
        let _: JsonValue = self
            .http
            .post_json(
                &format!("student/tests/{}/answer/", test_id),
                &payload,
                "Failed to save answer.",
            )
            .await?;
        Ok(())
    }

    async fn submit_test(&self, test_id: i64) -> AppResult<()> {
        let _: JsonValue = self
            .http
            .post_empty(
                &format!("student/tests/{}/submit/", test_id),
                "Failed to submit test.",
            )
            .await?;
        Ok(())
    }
}
