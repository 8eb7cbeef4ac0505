//! 离线草稿加载服务 - 业务能力层
//!
//! 把 TOML 文件转换成流程层的表单，不发任何请求

use std::path::Path;

use crate::error::AppResult;
use crate::models::{load_question_drafts, load_recommendation_draft};
use crate::workflow::{JobDraft, QuestionDraft, RecommendationDraft};

/// 职业推荐文件的全部内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPlan {
    pub draft: RecommendationDraft,
    /// 需要预先勾选的公司
    pub company_ids: Vec<i64>,
    pub jobs: Vec<JobDraft>,
}

pub struct DraftLoader;

impl DraftLoader {
    /// 题目文件 → 表单列表；order 在提交前由出卷流程重新设置
    pub async fn questions(path: &Path) -> AppResult<Vec<QuestionDraft>> {
        let file = load_question_drafts(path).await?;
        Ok(file
            .questions
            .iter()
            .map(|entry| QuestionDraft::from_entry(entry, 0))
            .collect())
    }

    pub async fn recommendation(path: &Path) -> AppResult<RecommendationPlan> {
        let file = load_recommendation_draft(path).await?;
        Ok(RecommendationPlan {
            draft: RecommendationDraft::from_file(&file),
            company_ids: file.company_ids.clone(),
            jobs: file.jobs.iter().map(JobDraft::from).collect(),
        })
    }
}
