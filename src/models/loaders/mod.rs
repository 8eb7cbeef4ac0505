pub mod toml_loader;

pub use toml_loader::{
    load_question_drafts, load_recommendation_draft, JobEntry, OptionEntry, QuestionDraftFile,
    QuestionEntry, RecommendationDraftFile, StepEntry,
};
