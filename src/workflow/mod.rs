pub mod company_filter;
pub mod question_draft;
pub mod recommendation_wizard;
pub mod template_picker;
pub mod test_assembly;
pub mod test_taking;

#[cfg(test)]
pub(crate) mod test_support;

pub use company_filter::{CompanyCategoryFilter, CompanyFilter};
pub use question_draft::{OptionDraft, QuestionDraft};
pub use recommendation_wizard::{JobDraft, RecommendationDraft, RecommendationWizard, WizardStage};
pub use template_picker::{CategoryFilter, TemplatePicker};
pub use test_assembly::{TestAssembly, TestTarget};
pub use test_taking::{AnswerSyncPolicy, TakingState, TestSession};
