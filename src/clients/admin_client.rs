/// 管理员 API 客户端
///
/// 出卷、题库、审阅答卷、出具职业推荐
use std::sync::Arc;

use crate::error::AppResult;
use crate::infrastructure::HttpExecutor;
use crate::models::dashboard::RecommendationSummaryList;
use crate::models::recommendation::RecommendationEnvelope;
use crate::models::test::{
    CompletedTestList, TemplateImportResult, TestAnswersEnvelope, TestEnvelope,
};
use crate::models::{
    AdminDashboard, CareerRecommendation, CompletedTest, NewQuestion, NewQuestionCategory,
    NewQuestionTemplate, NewRecommendation, PersonalizedTest, Question, QuestionCategory,
    QuestionTemplate, RecommendationSummary, RequestStatus, TemplateImport, TemplateQuery,
    TestAnswers, TestRequest,
};
use crate::utils::validation::{validate_category_name, validate_template};
use serde_json::Value as JsonValue;
use tracing::info;

/// 出卷与推荐流程依赖的管理员接口
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    async fn fetch_test(&self, test_id: i64) -> AppResult<PersonalizedTest>;
    async fn fetch_test_by_request(&self, request_id: i64) -> AppResult<PersonalizedTest>;
    async fn create_question(&self, test_id: i64, question: &NewQuestion) -> AppResult<()>;
    async fn assign_test(&self, test_id: i64) -> AppResult<()>;
    async fn list_question_categories(&self) -> AppResult<Vec<QuestionCategory>>;
    async fn list_question_templates(&self, query: &TemplateQuery) -> AppResult<Vec<QuestionTemplate>>;
    async fn add_templates(&self, test_id: i64, import: &TemplateImport) -> AppResult<u32>;
    async fn create_recommendation(
        &self,
        test_id: i64,
        recommendation: &NewRecommendation,
    ) -> AppResult<CareerRecommendation>;
}

pub struct AdminClient {
    http: Arc<HttpExecutor>,
}

impl AdminClient {
    pub fn new(http: Arc<HttpExecutor>) -> Self {
        Self { http }
    }

    pub async fn dashboard(&self) -> AppResult<AdminDashboard> {
        self.http
            .get_json("admin/dashboard/", &[], "Unable to load dashboard data.")
            .await
    }

    pub async fn list_test_requests(&self, status: Option<RequestStatus>) -> AppResult<Vec<TestRequest>> {
        let params: Vec<(String, String)> = status
            .map(|s| vec![("status".to_string(), s.as_str().to_string())])
            .unwrap_or_default();
        self.http
            .get_json("admin/test-requests/", &params, "Unable to load data.")
            .await
    }

    /// 为申请创建试卷；已存在时后端直接返回已有试卷
    pub async fn create_test(&self, request_id: i64) -> AppResult<PersonalizedTest> {
        let envelope: TestEnvelope = self
            .http
            .post_empty(
                &format!("admin/test-requests/{}/create-test/", request_id),
                "Unable to load test.",
            )
            .await?;
        if let Some(message) = &envelope.message {
            info!("📝 {}", message);
        }
        Ok(envelope.test)
    }

    pub async fn list_completed_tests(&self) -> AppResult<Vec<CompletedTest>> {
        let list: CompletedTestList = self
            .http
            .get_json("admin/tests/completed/", &[], "Unable to load completed tests.")
            .await?;
        Ok(list.tests)
    }

    pub async fn test_answers(&self, test_id: i64) -> AppResult<TestAnswers> {
        let envelope: TestAnswersEnvelope = self
            .http
            .get_json(
                &format!("admin/tests/{}/answers/", test_id),
                &[],
                "Unable to load test answers.",
            )
            .await?;
        Ok(envelope.test)
    }

    pub async fn list_recommendations(&self) -> AppResult<Vec<RecommendationSummary>> {
        let list: RecommendationSummaryList = self
            .http
            .get_json("admin/recommendations/", &[], "Unable to load recommendations.")
            .await?;
        Ok(list.recommendations)
    }

    pub async fn create_question_category(&self, category: &NewQuestionCategory) -> AppResult<QuestionCategory> {
        validate_category_name(&category.name)?;
        self.http
            .post_json("admin/question-categories/", category, "Failed to create category.")
            .await
    }

    pub async fn create_question_template(&self, template: &NewQuestionTemplate) -> AppResult<QuestionTemplate> {
        validate_template(template)?;
        self.http
            .post_json("admin/question-templates/", template, "Failed to create template.")
            .await
    }
}

impl AdminApi for AdminClient {
    async fn fetch_test(&self, test_id: i64) -> AppResult<PersonalizedTest> {
        self.http
            .get_json(&format!("admin/tests/{}/", test_id), &[], "Unable to load test.")
            .await
    }

    async fn fetch_test_by_request(&self, request_id: i64) -> AppResult<PersonalizedTest> {
        self.http
            .get_json(
                &format!("admin/test-requests/{}/test/", request_id),
                &[],
                "Unable to load test.",
            )
            .await
    }

    async fn create_question(&self, test_id: i64, question: &NewQuestion) -> AppResult<()> {
        let created: Question = self
            .http
            .post_json(
                &format!("admin/tests/{}/questions/", test_id),
                question,
                "Failed to create question.",
            )
            .await?;
        info!("✓ 已添加题目 #{} (order {})", created.id, created.order);
        Ok(())
    }

    async fn assign_test(&self, test_id: i64) -> AppResult<()> {
        let _: JsonValue = self
            .http
            .post_empty(&format!("admin/tests/{}/assign/", test_id), "Failed to assign test.")
            .await?;
        info!("✓ 试卷 #{} 已分配", test_id);
        Ok(())
    }

    async fn list_question_categories(&self) -> AppResult<Vec<QuestionCategory>> {
        self.http
            .get_json("admin/question-categories/", &[], "Failed to load question bank.")
            .await
    }

    async fn list_question_templates(&self, query: &TemplateQuery) -> AppResult<Vec<QuestionTemplate>> {
        self.http
            .get_json(
                "admin/question-templates/",
                &query.to_params(),
                "Unable to load templates.",
            )
            .await
    }

    /// 返回新增题目数；模板已复制过时为 0
    async fn add_templates(&self, test_id: i64, import: &TemplateImport) -> AppResult<u32> {
        let result: TemplateImportResult = self
            .http
            .post_json(
                &format!("admin/tests/{}/add-templates/", test_id),
                import,
                "Failed to add templates.",
            )
            .await?;
        if let Some(message) = &result.message {
            info!("📚 {}", message);
        }
        Ok(result.added_questions)
    }

    async fn create_recommendation(
        &self,
        test_id: i64,
        recommendation: &NewRecommendation,
    ) -> AppResult<CareerRecommendation> {
        let envelope: RecommendationEnvelope = self
            .http
            .post_json(
                &format!("admin/tests/{}/recommendation/", test_id),
                recommendation,
                "Failed to create recommendation.",
            )
            .await?;
        Ok(envelope.recommendation)
    }
}
