//! 流程测试用的内存实现

use std::cell::{Cell, RefCell};

use serde_json::json;

use crate::clients::{AdminApi, CatalogApi, StudentApi};
use crate::error::{AppError, AppResult};
use crate::models::{
    AnswerOption, CareerRecommendation, CategoryRef, Company, CompanyCategory, JobRecommendation,
    NewJob, NewQuestion, NewRecommendation, PersonalizedTest, Question, QuestionCategory,
    QuestionTemplate, RequestStatus, StudentQuestion, StudentTest, TemplateImport, TemplateOption,
    TemplateQuery, TestRequest, TestStatus,
};

fn server_error(endpoint: &str, message: &str) -> AppError {
    AppError::bad_response(endpoint, 400, &json!({ "error": message }), "request failed")
}

pub fn draft_test(id: i64) -> PersonalizedTest {
    PersonalizedTest {
        id,
        status: TestStatus::Draft,
        request: TestRequest {
            id: 100 + id,
            interests_snapshot: "biology".to_string(),
            qualification_snapshot: "plus_two".to_string(),
            status: RequestStatus::InProgress,
            created_at: None,
        },
        questions: Vec::new(),
        assigned_at: None,
        completed_at: None,
    }
}

pub fn template(id: i64, category: i64, labels: &[&str]) -> QuestionTemplate {
    QuestionTemplate {
        id,
        prompt: format!("Template {}", id),
        category: Some(CategoryRef {
            id: category,
            name: format!("Category {}", category),
        }),
        order: 0,
        is_active: true,
        options: labels
            .iter()
            .enumerate()
            .map(|(i, l)| TemplateOption {
                id: None,
                label: l.to_string(),
                description: String::new(),
                order: i as u32,
            })
            .collect(),
    }
}

/// 管理员接口的内存实现，行为对齐后端
#[derive(Default)]
pub struct FakeAdmin {
    pub test: RefCell<Option<PersonalizedTest>>,
    pub categories: Vec<QuestionCategory>,
    pub templates: Vec<QuestionTemplate>,
    pub calls: RefCell<Vec<String>>,
    pub recommendations: RefCell<Vec<NewRecommendation>>,
    pub fail_create_question: Cell<bool>,
    pub fail_fetch_test: Cell<bool>,
    next_id: Cell<i64>,
}

impl FakeAdmin {
    pub fn with_test(test: PersonalizedTest) -> Self {
        Self {
            test: RefCell::new(Some(test)),
            next_id: Cell::new(1000),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn id(&self) -> i64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn current(&self, endpoint: &str) -> AppResult<PersonalizedTest> {
        self.test
            .borrow()
            .clone()
            .ok_or_else(|| server_error(endpoint, "No test created for this request yet."))
    }
}

impl AdminApi for FakeAdmin {
    async fn fetch_test(&self, test_id: i64) -> AppResult<PersonalizedTest> {
        self.record(format!("fetch_test {}", test_id));
        if self.fail_fetch_test.get() {
            return Err(server_error("admin/tests/", "Unable to load test."));
        }
        self.current("admin/tests/")
    }

    async fn fetch_test_by_request(&self, request_id: i64) -> AppResult<PersonalizedTest> {
        self.record(format!("fetch_test_by_request {}", request_id));
        self.current("admin/test-requests/")
    }

    async fn create_question(&self, test_id: i64, question: &NewQuestion) -> AppResult<()> {
        self.record(format!("create_question {}", test_id));
        if self.fail_create_question.get() {
            return Err(server_error("admin/tests/questions/", "Test not found."));
        }
        let options = question
            .options
            .iter()
            .map(|o| AnswerOption {
                id: self.id(),
                label: o.label.clone(),
                description: o.description.clone(),
                order: o.order,
            })
            .collect();
        let created = Question {
            id: self.id(),
            prompt: question.prompt.clone(),
            order: question.order,
            options,
        };
        if let Some(test) = self.test.borrow_mut().as_mut() {
            test.questions.push(created);
        }
        Ok(())
    }

    async fn assign_test(&self, test_id: i64) -> AppResult<()> {
        self.record(format!("assign_test {}", test_id));
        let mut guard = self.test.borrow_mut();
        let test = guard
            .as_mut()
            .ok_or_else(|| server_error("admin/tests/assign/", "Test not found."))?;
        if test.questions.is_empty() {
            return Err(server_error(
                "admin/tests/assign/",
                "Cannot assign test without questions.",
            ));
        }
        test.status = TestStatus::Assigned;
        test.request.status = RequestStatus::Assigned;
        Ok(())
    }

    async fn list_question_categories(&self) -> AppResult<Vec<QuestionCategory>> {
        self.record("list_question_categories");
        Ok(self.categories.clone())
    }

    async fn list_question_templates(&self, query: &TemplateQuery) -> AppResult<Vec<QuestionTemplate>> {
        self.record("list_question_templates");
        Ok(self
            .templates
            .iter()
            .filter(|t| query.category_id.map_or(true, |c| t.category_id() == Some(c)))
            .cloned()
            .collect())
    }

    async fn add_templates(&self, test_id: i64, import: &TemplateImport) -> AppResult<u32> {
        self.record(format!("add_templates {}", test_id));
        let categories = import.category_ids.clone().unwrap_or_default();
        let ids = import.template_ids.clone().unwrap_or_default();
        let picked: Vec<QuestionTemplate> = self
            .templates
            .iter()
            .filter(|t| {
                ids.contains(&t.id) || t.category_id().is_some_and(|c| categories.contains(&c))
            })
            .cloned()
            .collect();

        let mut guard = self.test.borrow_mut();
        let test = guard
            .as_mut()
            .ok_or_else(|| server_error("admin/tests/add-templates/", "Test not found."))?;
        let mut next_order = test.questions.iter().map(|q| q.order).max().unwrap_or(0);
        for t in &picked {
            next_order += 1;
            let options = t
                .options
                .iter()
                .map(|o| AnswerOption {
                    id: self.id(),
                    label: o.label.clone(),
                    description: o.description.clone(),
                    order: o.order,
                })
                .collect();
            test.questions.push(Question {
                id: self.id(),
                prompt: t.prompt.clone(),
                order: next_order,
                options,
            });
        }
        Ok(picked.len() as u32)
    }

    async fn create_recommendation(
        &self,
        test_id: i64,
        recommendation: &NewRecommendation,
    ) -> AppResult<CareerRecommendation> {
        self.record(format!("create_recommendation {}", test_id));
        if !self.recommendations.borrow().is_empty() {
            return Err(server_error(
                "admin/tests/recommendation/",
                "Recommendation already exists for this test.",
            ));
        }
        self.recommendations.borrow_mut().push(recommendation.clone());
        Ok(CareerRecommendation {
            id: 42,
            career_name: recommendation.career_name.clone(),
            summary: recommendation.summary.clone(),
            companies: recommendation.companies.clone(),
            steps: recommendation.steps.clone(),
            resources: Vec::new(),
            job_recommendations: Vec::new(),
            test_id: Some(test_id),
            request_id: None,
            created_at: None,
        })
    }
}

pub fn student_question(id: i64, prompt: &str, option_ids: &[i64]) -> StudentQuestion {
    StudentQuestion {
        id,
        prompt: prompt.to_string(),
        order: 0,
        options: option_ids
            .iter()
            .map(|&oid| AnswerOption {
                id: oid,
                label: format!("Option {}", oid),
                description: String::new(),
                order: 0,
            })
            .collect(),
        selected_option_id: None,
    }
}

pub fn student_test(id: i64, questions: Vec<StudentQuestion>) -> StudentTest {
    let answered = questions
        .iter()
        .filter(|q| q.selected_option_id.is_some())
        .count();
    StudentTest {
        id,
        request_id: 1,
        total_questions: questions.len(),
        answered_count: answered,
        questions,
    }
}

/// 学生接口的内存实现
#[derive(Default)]
pub struct FakeStudent {
    pub test: RefCell<Option<StudentTest>>,
    pub saved: RefCell<Vec<(i64, i64)>>,
    pub submitted: Cell<bool>,
    pub fail_answers: Cell<bool>,
}

impl FakeStudent {
    pub fn with_test(test: StudentTest) -> Self {
        Self {
            test: RefCell::new(Some(test)),
            ..Default::default()
        }
    }
}

impl StudentApi for FakeStudent {
    async fn fetch_student_test(&self, _test_id: i64) -> AppResult<StudentTest> {
        self.test
            .borrow()
            .clone()
            .ok_or_else(|| server_error("student/tests/", "Test is not available for taking."))
    }

    async fn submit_answer(&self, _test_id: i64, question_id: i64, option_id: i64) -> AppResult<()> {
        if self.fail_answers.get() {
            return Err(server_error("student/tests/answer/", "Invalid question or option."));
        }
        self.saved.borrow_mut().push((question_id, option_id));
        Ok(())
    }

    async fn submit_test(&self, _test_id: i64) -> AppResult<()> {
        if self.submitted.get() {
            return Err(server_error(
                "student/tests/submit/",
                "Test is not available for submission.",
            ));
        }
        self.submitted.set(true);
        Ok(())
    }
}

pub fn company(id: i64, name: &str, category: Option<i64>) -> Company {
    Company {
        id,
        name: name.to_string(),
        email: format!("jobs@{}.test", name.to_lowercase()),
        website: None,
        description: None,
        location: Some("Pune".to_string()),
        industry: Some("Software".to_string()),
        category: None,
        category_id: category,
        is_active: true,
    }
}

/// 目录接口的内存实现
#[derive(Default)]
pub struct FakeCatalog {
    pub companies: Vec<Company>,
    pub categories: Vec<CompanyCategory>,
    pub jobs: RefCell<Vec<JobRecommendation>>,
    pub fail_list_jobs: Cell<bool>,
    pub list_jobs_calls: Cell<u32>,
}

impl CatalogApi for FakeCatalog {
    async fn list_companies(&self, category_id: Option<i64>) -> AppResult<Vec<Company>> {
        Ok(self
            .companies
            .iter()
            .filter(|c| category_id.map_or(true, |id| c.category_id() == Some(id)))
            .cloned()
            .collect())
    }

    async fn list_company_categories(&self) -> AppResult<Vec<CompanyCategory>> {
        Ok(self.categories.clone())
    }

    async fn list_jobs(&self, _recommendation_id: i64) -> AppResult<Vec<JobRecommendation>> {
        self.list_jobs_calls.set(self.list_jobs_calls.get() + 1);
        if self.fail_list_jobs.get() {
            return Err(server_error("admin/job-recommendations/", "boom"));
        }
        Ok(self.jobs.borrow().clone())
    }

    async fn create_job(&self, job: &NewJob) -> AppResult<JobRecommendation> {
        let company = self
            .companies
            .iter()
            .find(|c| c.id == job.company)
            .cloned()
            .ok_or_else(|| server_error("admin/job-recommendations/", "company: Invalid pk."))?;
        let created = JobRecommendation {
            id: self.jobs.borrow().len() as i64 + 1,
            company,
            job_title: job.job_title.clone(),
            job_description: job.job_description.clone(),
            requirements: job.requirements.clone(),
            salary_range: job.salary_range.clone(),
            job_type: job.job_type,
            application_url: job.application_url.clone(),
            is_active: true,
            order: job.order.unwrap_or(0),
        };
        self.jobs.borrow_mut().push(created.clone());
        Ok(created)
    }
}
