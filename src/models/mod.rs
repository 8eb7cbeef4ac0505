pub mod company;
pub mod dashboard;
pub mod loaders;
pub mod recommendation;
pub mod resource;
pub mod template;
pub mod user;

pub use company::{
    Company, CompanyCategory, CompanyCategoryUpdate, CompanyUpdate, JobRecommendation, JobType,
    JobUpdate, NewCompany, NewCompanyCategory, NewJob,
};
pub use dashboard::{AdminDashboard, RecommendationSummary, StudentDashboard};
pub use loaders::{load_question_drafts, load_recommendation_draft, QuestionDraftFile, RecommendationDraftFile};
pub use recommendation::{CareerRecommendation, NewRecommendation, RoadmapStep};
pub use resource::{
    CareerResource, DifficultyLevel, NewResourceCategory, ProgressStatus, ProgressUpdate,
    ResourceCategory, ResourceForm, ResourceProgress, ResourceQuery, ResourceType,
};
pub use template::{
    CategoryRef, NewQuestionCategory, NewQuestionTemplate, NewTemplateOption, QuestionCategory,
    QuestionTemplate, TemplateOption, TemplateQuery,
};
pub use test::{
    AnswerOption, AnswerPayload, CompletedTest, NewOption, NewQuestion, NewTestRequest,
    PersonalizedTest, Question, RequestStatus, StudentQuestion, StudentTest, StudentTestSummary,
    TemplateImport, TestAnswers, TestRequest, TestStatus,
};
pub use user::{LoginPayload, LoginResponse, RegistrationPayload, Role, TokenPair, User};
