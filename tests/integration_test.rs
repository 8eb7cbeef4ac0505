use std::cell::RefCell;

use careerpath_client::clients::{AdminApi, StudentApi};
use careerpath_client::error::{AppError, WorkflowError};
use careerpath_client::models::{
    AnswerOption, CareerRecommendation, NewQuestion, NewRecommendation, PersonalizedTest,
    Question, QuestionCategory, QuestionTemplate, RequestStatus, StudentQuestion, StudentTest,
    TemplateImport, TemplateQuery, TestRequest, TestStatus, TokenPair,
};
use careerpath_client::services::DraftLoader;
use careerpath_client::{
    AnswerSyncPolicy, App, AppResult, Config, Session, TestAssembly, TestSession, TokenStore,
};
use careerpath_client::workflow::{TakingState, TestTarget};

/// 同时扮演管理员和学生接口的内存后端
struct Backend {
    test: RefCell<PersonalizedTest>,
    answers: RefCell<Vec<(i64, i64)>>,
    submitted: RefCell<bool>,
}

impl Backend {
    fn new() -> Self {
        Self {
            test: RefCell::new(PersonalizedTest {
                id: 1,
                status: TestStatus::Draft,
                request: TestRequest {
                    id: 11,
                    interests_snapshot: "design".to_string(),
                    qualification_snapshot: "graduate".to_string(),
                    status: RequestStatus::InProgress,
                    created_at: None,
                },
                questions: Vec::new(),
                assigned_at: None,
                completed_at: None,
            }),
            answers: RefCell::new(Vec::new()),
            submitted: RefCell::new(false),
        }
    }
}

impl AdminApi for &Backend {
    async fn fetch_test(&self, _test_id: i64) -> AppResult<PersonalizedTest> {
        Ok(self.test.borrow().clone())
    }

    async fn fetch_test_by_request(&self, _request_id: i64) -> AppResult<PersonalizedTest> {
        Ok(self.test.borrow().clone())
    }

    async fn create_question(&self, _test_id: i64, question: &NewQuestion) -> AppResult<()> {
        let mut test = self.test.borrow_mut();
        let base = (test.questions.len() as i64 + 1) * 100;
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| AnswerOption {
                id: base + i as i64,
                label: o.label.clone(),
                description: o.description.clone(),
                order: o.order,
            })
            .collect();
        test.questions.push(Question {
            id: base,
            prompt: question.prompt.clone(),
            order: question.order,
            options,
        });
        Ok(())
    }

    async fn assign_test(&self, _test_id: i64) -> AppResult<()> {
        self.test.borrow_mut().status = TestStatus::Assigned;
        Ok(())
    }

    async fn list_question_categories(&self) -> AppResult<Vec<QuestionCategory>> {
        Ok(Vec::new())
    }

    async fn list_question_templates(&self, _query: &TemplateQuery) -> AppResult<Vec<QuestionTemplate>> {
        Ok(Vec::new())
    }

    async fn add_templates(&self, _test_id: i64, _import: &TemplateImport) -> AppResult<u32> {
        Ok(0)
    }

    async fn create_recommendation(
        &self,
        _test_id: i64,
        _recommendation: &NewRecommendation,
    ) -> AppResult<CareerRecommendation> {
        unimplemented!("not used in these tests")
    }
}

impl StudentApi for &Backend {
    async fn fetch_student_test(&self, test_id: i64) -> AppResult<StudentTest> {
        let test = self.test.borrow();
        let questions: Vec<StudentQuestion> = test
            .questions
            .iter()
            .map(|q| StudentQuestion {
                id: q.id,
                prompt: q.prompt.clone(),
                order: q.order,
                options: q.options.clone(),
                selected_option_id: None,
            })
            .collect();
        Ok(StudentTest {
            id: test_id,
            request_id: test.request.id,
            total_questions: questions.len(),
            answered_count: 0,
            questions,
        })
    }

    async fn submit_answer(&self, _test_id: i64, question_id: i64, option_id: i64) -> AppResult<()> {
        self.answers.borrow_mut().push((question_id, option_id));
        Ok(())
    }

    async fn submit_test(&self, _test_id: i64) -> AppResult<()> {
        *self.submitted.borrow_mut() = true;
        self.test.borrow_mut().status = TestStatus::Completed;
        Ok(())
    }
}

const QUESTIONS: &str = r#"
[[questions]]
prompt = "Pick a fruit"
options = [{ label = "Apple" }, { label = "Banana" }]

[[questions]]
prompt = "Which do you enjoy more?"
options = [
    { label = "Drawing", description = "Sketching, painting" },
    { label = "Building", description = "Models, circuits" },
]
"#;

#[tokio::test]
async fn drafted_test_is_assembled_taken_and_submitted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.toml");
    std::fs::write(&path, QUESTIONS).unwrap();

    let backend = Backend::new();

    // 出卷
    let mut assembly = TestAssembly::load(&backend, TestTarget::Request(11)).await.unwrap();
    for mut draft in DraftLoader::questions(&path).await.unwrap() {
        draft.order = assembly.question_count() as u32;
        *assembly.draft_mut() = draft;
        assembly.add_question().await.unwrap();
    }
    assert_eq!(assembly.question_count(), 2);
    let orders: Vec<u32> = assembly.test().questions.iter().map(|q| q.order).collect();
    assert_eq!(orders, vec![0, 1]);
    assembly.assign().await.unwrap();
    assert_eq!(assembly.test().status, TestStatus::Assigned);

    // 答题
    let mut session = TestSession::load(&backend, 1, AnswerSyncPolicy::Revert).await.unwrap();
    assert_eq!(session.state(), TakingState::NotStarted);
    session.select_current(100).await.unwrap();
    assert_eq!(session.state(), TakingState::InProgress);

    let err = session.submit(true).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Workflow(WorkflowError::AnswersIncomplete { answered: 1, total: 2 })
    ));

    session.next();
    session.select_current(201).await.unwrap();
    assert!(session.can_submit());

    let err = session.submit(false).await.unwrap_err();
    assert!(matches!(err, AppError::Workflow(WorkflowError::NotConfirmed)));
    session.submit(true).await.unwrap();

    assert_eq!(session.state(), TakingState::Completed);
    assert!(*backend.submitted.borrow());
    assert_eq!(*backend.answers.borrow(), vec![(100, 100), (200, 201)]);

    let err = session.select_current(200).await.unwrap_err();
    assert!(matches!(err, AppError::Workflow(WorkflowError::AlreadySubmitted)));
}

#[tokio::test]
async fn tokens_survive_a_restart_and_logout_clears_them() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tokens.json");

    let session = Session::load(TokenStore::new(&path)).await.unwrap();
    assert!(!session.has_tokens());
    session
        .set_tokens(TokenPair {
            access: "a-1".to_string(),
            refresh: "r-1".to_string(),
        })
        .await
        .unwrap();

    let restored = Session::load(TokenStore::new(&path)).await.unwrap();
    assert_eq!(restored.access_token().as_deref(), Some("a-1"));
    assert_eq!(restored.refresh_token().as_deref(), Some("r-1"));

    restored.clear().await.unwrap();
    let after_logout = Session::load(TokenStore::new(&path)).await.unwrap();
    assert!(!after_logout.has_tokens());
}

#[tokio::test]
async fn app_without_tokens_starts_logged_out_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        api_base_url: "http://127.0.0.1:9/api/".to_string(),
        token_file: dir.path().join("tokens.json"),
        ..Config::default()
    };

    let app = App::initialize(config).await.unwrap();
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn login_against_running_backend() {
    let config = Config::from_env();
    let email = std::env::var("CAREERPATH_TEST_EMAIL").expect("CAREERPATH_TEST_EMAIL");
    let password = std::env::var("CAREERPATH_TEST_PASSWORD").expect("CAREERPATH_TEST_PASSWORD");

    let app = App::initialize(config).await.expect("初始化失败");
    let user = app.auth().login(&email, &password).await.expect("登录失败");
    assert_eq!(user.email, email);

    let me = app.auth().me().await.expect("auth/me 失败");
    assert_eq!(me.id, user.id);
    app.auth().logout().await.unwrap();
}
