//! 职业推荐向导
//!
//! 两个阶段：先填写推荐（职业、摘要、公司、路线图）并创建，
//! 创建后进入第二阶段为推荐挂岗位。没有回退。

use tracing::{info, warn};

use crate::clients::{AdminApi, CatalogApi};
use crate::error::{AppResult, ValidationError, WorkflowError};
use crate::models::loaders::toml_loader::JobEntry;
use crate::models::{
    Company, CompanyCategory, JobRecommendation, JobType, NewJob, NewRecommendation,
    RecommendationDraftFile, RoadmapStep,
};
use crate::utils::validation::is_blank;

/// 第一阶段的表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationDraft {
    pub career_name: String,
    pub summary: String,
    /// 没有选中公司时使用的自由文本，一行一个
    pub companies_text: String,
    steps: Vec<RoadmapStep>,
}

impl Default for RecommendationDraft {
    fn default() -> Self {
        Self {
            career_name: String::new(),
            summary: String::new(),
            companies_text: String::new(),
            steps: vec![empty_step(1)],
        }
    }
}

fn empty_step(order: u32) -> RoadmapStep {
    RoadmapStep {
        order,
        title: String::new(),
        description: String::new(),
    }
}

impl RecommendationDraft {
    pub fn from_file(file: &RecommendationDraftFile) -> Self {
        let mut draft = Self {
            career_name: file.career_name.clone(),
            summary: file.summary.clone(),
            companies_text: file.companies.join("\n"),
            steps: Vec::new(),
        };
        for step in &file.steps {
            draft.steps.push(RoadmapStep {
                order: draft.steps.len() as u32 + 1,
                title: step.title.clone(),
                description: step.description.clone(),
            });
        }
        draft
    }

    pub fn steps(&self) -> &[RoadmapStep] {
        &self.steps
    }

    pub fn add_step(&mut self) {
        self.steps.push(empty_step(self.steps.len() as u32 + 1));
    }

    /// 删除一步，其余步骤从 1 开始重新编号；只剩一步时不删除，返回 false
    pub fn remove_step(&mut self, index: usize) -> Result<bool, ValidationError> {
        self.check_index(index)?;
        if self.steps.len() <= 1 {
            return Ok(false);
        }
        self.steps.remove(index);
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.order = i as u32 + 1;
        }
        Ok(true)
    }

    pub fn update_step(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        let step = &mut self.steps[index];
        step.title = title.into();
        step.description = description.into();
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.career_name) || is_blank(&self.summary) {
            return Err(ValidationError::RecommendationIncomplete);
        }
        if self.steps.is_empty() {
            return Err(ValidationError::RoadmapEmpty);
        }
        if self.steps.iter().any(|s| is_blank(&s.title)) {
            return Err(ValidationError::StepTitleMissing);
        }
        Ok(())
    }

    /// 有选中公司时按行拼接公司名，否则取自由文本中非空的行
    pub fn to_payload(&self, selected_company_names: &[String]) -> Result<NewRecommendation, ValidationError> {
        self.validate()?;
        let companies = if selected_company_names.is_empty() {
            self.companies_text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            selected_company_names.join("\n")
        };
        Ok(NewRecommendation {
            career_name: self.career_name.trim().to_string(),
            summary: self.summary.trim().to_string(),
            companies,
            steps: self.steps.clone(),
        })
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.steps.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        Ok(())
    }
}

/// 第二阶段的岗位表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDraft {
    pub company: Option<i64>,
    pub job_title: String,
    pub job_description: String,
    pub requirements: String,
    pub salary_range: String,
    pub job_type: JobType,
    pub application_url: String,
}

impl From<&JobEntry> for JobDraft {
    fn from(entry: &JobEntry) -> Self {
        Self {
            company: Some(entry.company),
            job_title: entry.job_title.clone(),
            job_description: entry.job_description.clone(),
            requirements: entry.requirements.clone().unwrap_or_default(),
            salary_range: entry.salary_range.clone().unwrap_or_default(),
            job_type: entry.job_type,
            application_url: entry.application_url.clone().unwrap_or_default(),
        }
    }
}

impl JobDraft {
    pub fn to_payload(&self, recommendation_id: i64) -> Result<NewJob, ValidationError> {
        let company = match self.company {
            Some(id) if id > 0 => id,
            _ => return Err(ValidationError::JobIncomplete),
        };
        if is_blank(&self.job_title) || is_blank(&self.job_description) {
            return Err(ValidationError::JobIncomplete);
        }
        Ok(NewJob {
            career_recommendation: recommendation_id,
            company,
            job_title: self.job_title.trim().to_string(),
            job_description: self.job_description.trim().to_string(),
            requirements: non_blank(&self.requirements),
            salary_range: non_blank(&self.salary_range),
            job_type: self.job_type,
            application_url: non_blank(&self.application_url),
            order: None,
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStage {
    Drafting,
    Created { recommendation_id: i64 },
}

pub struct RecommendationWizard<A: AdminApi, C: CatalogApi> {
    admin: A,
    catalog: C,
    test_id: i64,
    stage: WizardStage,
    pub draft: RecommendationDraft,
    companies: Vec<Company>,
    company_categories: Vec<CompanyCategory>,
    selected_companies: Vec<i64>,
    jobs: Vec<JobRecommendation>,
}

impl<A: AdminApi, C: CatalogApi> RecommendationWizard<A, C> {
    pub fn new(admin: A, catalog: C, test_id: i64) -> Self {
        Self {
            admin,
            catalog,
            test_id,
            stage: WizardStage::Drafting,
            draft: RecommendationDraft::default(),
            companies: Vec::new(),
            company_categories: Vec::new(),
            selected_companies: Vec::new(),
            jobs: Vec::new(),
        }
    }

    pub fn with_draft(mut self, draft: RecommendationDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company_categories(&self) -> &[CompanyCategory] {
        &self.company_categories
    }

    pub fn jobs(&self) -> &[JobRecommendation] {
        &self.jobs
    }

    /// 没有公司分类时只能用自由文本填写公司
    pub fn uses_free_text_companies(&self) -> bool {
        self.company_categories.is_empty()
    }

    /// 并发加载公司和公司分类
    pub async fn load_companies(&mut self) -> AppResult<()> {
        let (companies, categories) = futures::try_join!(
            self.catalog.list_companies(None),
            self.catalog.list_company_categories(),
        )?;
        self.companies = companies;
        self.company_categories = categories;
        Ok(())
    }

    /// 勾选 / 取消勾选公司；未知公司返回 false
    pub fn toggle_company(&mut self, company_id: i64) -> bool {
        if !self.companies.iter().any(|c| c.id == company_id) {
            return false;
        }
        if let Some(pos) = self.selected_companies.iter().position(|&id| id == company_id) {
            self.selected_companies.remove(pos);
        } else {
            self.selected_companies.push(company_id);
        }
        true
    }

    pub fn selected_companies(&self) -> &[i64] {
        &self.selected_companies
    }

    /// 按勾选顺序返回公司名
    pub fn selected_company_names(&self) -> Vec<String> {
        self.selected_companies
            .iter()
            .filter_map(|id| self.companies.iter().find(|c| c.id == *id))
            .map(|c| c.name.clone())
            .collect()
    }

    /// 创建推荐并进入第二阶段，返回推荐 id
    pub async fn create(&mut self) -> AppResult<i64> {
        if self.stage != WizardStage::Drafting {
            return Err(WorkflowError::RecommendationAlreadyCreated.into());
        }
        let payload = self.draft.to_payload(&self.selected_company_names())?;
        let created = self.admin.create_recommendation(self.test_id, &payload).await?;
        info!("🎯 已创建职业推荐 #{}: {}", created.id, created.career_name);

        self.stage = WizardStage::Created {
            recommendation_id: created.id,
        };
        self.refresh_jobs().await;
        Ok(created.id)
    }

    /// 为推荐添加岗位，成功后刷新岗位列表
    pub async fn add_job(&mut self, job: &JobDraft) -> AppResult<JobRecommendation> {
        let WizardStage::Created { recommendation_id } = self.stage else {
            return Err(WorkflowError::RecommendationNotCreated.into());
        };
        let payload = job.to_payload(recommendation_id)?;
        let created = self.catalog.create_job(&payload).await?;
        info!("💼 已添加岗位: {} @ {}", created.job_title, created.company.name);
        self.refresh_jobs().await;
        Ok(created)
    }

    /// 刷新失败只记日志
    async fn refresh_jobs(&mut self) {
        let WizardStage::Created { recommendation_id } = self.stage else {
            return;
        };
        match self.catalog.list_jobs(recommendation_id).await {
            Ok(jobs) => self.jobs = jobs,
            Err(e) => warn!("⚠️ 刷新岗位列表失败: {}", e.user_message()),
        }
    }
}
