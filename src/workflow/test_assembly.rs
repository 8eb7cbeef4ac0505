//! 出卷流程 - 流程层
//!
//! 核心职责：在分配之前为一份草稿试卷累积题目
//!
//! - 手工添加题目（QuestionDraft）
//! - 从题库批量导入（TemplatePicker）
//! - 分配给学生
//!
//! 每次写操作成功后都重新拉取试卷，以后端返回为准；失败时本地状态不变。

use tracing::{info, warn};

use crate::clients::AdminApi;
use crate::error::{AppResult, ValidationError, WorkflowError};
use crate::models::{PersonalizedTest, TemplateQuery};
use crate::workflow::question_draft::QuestionDraft;
use crate::workflow::template_picker::TemplatePicker;

/// 试卷定位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestTarget {
    Test(i64),
    Request(i64),
}

pub struct TestAssembly<A: AdminApi> {
    api: A,
    test: PersonalizedTest,
    draft: QuestionDraft,
    picker: Option<TemplatePicker>,
}

impl<A: AdminApi> TestAssembly<A> {
    /// 加载试卷，表单的 order 取当前题目数
    pub async fn load(api: A, target: TestTarget) -> AppResult<Self> {
        let test = match target {
            TestTarget::Test(id) => api.fetch_test(id).await?,
            TestTarget::Request(id) => api.fetch_test_by_request(id).await?,
        };
        info!(
            "📋 已加载试卷 #{} ({} 道题, {:?})",
            test.id,
            test.questions.len(),
            test.status
        );
        let draft = QuestionDraft::new(test.questions.len() as u32);
        Ok(Self {
            api,
            test,
            draft,
            picker: None,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn test(&self) -> &PersonalizedTest {
        &self.test
    }

    pub fn question_count(&self) -> usize {
        self.test.questions.len()
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QuestionDraft {
        &mut self.draft
    }

    pub fn picker(&self) -> Option<&TemplatePicker> {
        self.picker.as_ref()
    }

    pub fn picker_mut(&mut self) -> Option<&mut TemplatePicker> {
        self.picker.as_mut()
    }

    /// 提交当前表单；成功后题目数 +1，表单重置
    ///
    /// 题目创建后立即重置表单，之后的刷新失败不会让重试产生重复题目
    pub async fn add_question(&mut self) -> AppResult<()> {
        self.ensure_editable()?;
        let payload = self.draft.to_payload()?;
        self.api.create_question(self.test.id, &payload).await?;
        self.draft.reset(payload.order + 1);
        self.refresh().await?;
        self.draft.order = self.test.questions.len() as u32;
        Ok(())
    }

    /// 并发加载题库分类和模板，打开选择器
    pub async fn open_template_picker(&mut self) -> AppResult<&mut TemplatePicker> {
        let query = TemplateQuery::default();
        let (categories, templates) = futures::try_join!(
            self.api.list_question_categories(),
            self.api.list_question_templates(&query),
        )?;
        info!("📚 题库: {} 个分类, {} 个模板", categories.len(), templates.len());
        Ok(self.picker.insert(TemplatePicker::new(categories, templates)))
    }

    /// 按选择器当前状态批量导入，返回新增题目数
    pub async fn import_templates(&mut self) -> AppResult<u32> {
        self.ensure_editable()?;
        let request = self
            .picker
            .as_ref()
            .ok_or(ValidationError::NoTemplateSelection)?
            .import_request()?;

        let added = self.api.add_templates(self.test.id, &request).await?;
        if added == 0 {
            warn!("⚠️ 没有新增题目（模板可能已导入过）");
        }
        self.refresh().await?;
        self.draft.order = self.test.questions.len() as u32;
        if let Some(picker) = self.picker.as_mut() {
            picker.clear_selection();
        }
        Ok(added)
    }

    /// 分配试卷；没有题目时直接拒绝，不发请求
    pub async fn assign(&mut self) -> AppResult<()> {
        self.ensure_editable()?;
        if self.test.questions.is_empty() {
            return Err(WorkflowError::EmptyTest.into());
        }
        self.api.assign_test(self.test.id).await?;
        self.refresh().await
    }

    async fn refresh(&mut self) -> AppResult<()> {
        self.test = self.api.fetch_test(self.test.id).await?;
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), WorkflowError> {
        if self.test.is_editable() {
            Ok(())
        } else {
            Err(WorkflowError::TestLocked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::TestStatus;
    use crate::workflow::template_picker::CategoryFilter;
    use crate::workflow::test_support::{draft_test, template, FakeAdmin};

    async fn assembly(fake: FakeAdmin) -> TestAssembly<FakeAdmin> {
        TestAssembly::load(fake, TestTarget::Test(7)).await.unwrap()
    }

    #[tokio::test]
    async fn pick_a_fruit_is_added_with_order_zero() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        let draft = a.draft_mut();
        draft.set_prompt("Pick a fruit");
        draft.update_option(0, "Apple", "").unwrap();
        draft.add_option();
        draft.update_option(1, "Banana", "").unwrap();

        a.add_question().await.unwrap();

        assert_eq!(a.question_count(), 1);
        let q = &a.test().questions[0];
        assert_eq!(q.order, 0);
        assert_eq!(q.options.len(), 2);
        assert_eq!(a.draft().order, 1);
        assert!(a.draft().prompt.is_empty());
    }

    #[tokio::test]
    async fn each_add_sets_order_to_prior_count() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        for i in 0..3u32 {
            let draft = a.draft_mut();
            draft.set_prompt(format!("Q{}", i));
            draft.update_option(0, "Yes", "").unwrap();
            let before = a.question_count();
            a.add_question().await.unwrap();
            assert_eq!(a.question_count(), before + 1);
            assert_eq!(a.test().questions[before].order, before as u32);
        }
    }

    #[tokio::test]
    async fn invalid_draft_makes_no_call() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        let err = a.add_question().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::QuestionIncomplete)
        ));
        assert_eq!(a.api().calls(), vec!["fetch_test 7"]);
    }

    #[tokio::test]
    async fn failed_add_keeps_local_state() {
        let fake = FakeAdmin::with_test(draft_test(7));
        fake.fail_create_question.set(true);
        let mut a = assembly(fake).await;
        a.draft_mut().set_prompt("Pick a fruit");
        a.draft_mut().update_option(0, "Apple", "").unwrap();

        let err = a.add_question().await.unwrap_err();
        assert_eq!(err.user_message(), "Test not found.");
        assert_eq!(a.question_count(), 0);
        assert_eq!(a.draft().prompt, "Pick a fruit");
    }

    #[tokio::test]
    async fn refresh_failure_after_create_still_resets_draft() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        a.draft_mut().set_prompt("Pick a fruit");
        a.draft_mut().update_option(0, "Apple", "").unwrap();
        a.api().fail_fetch_test.set(true);

        let err = a.add_question().await.unwrap_err();
        assert_eq!(err.user_message(), "Unable to load test.");
        assert!(a.draft().prompt.is_empty());
        assert_eq!(a.draft().order, 1);

        // 刷新恢复后再提交空表单会被本地校验拦下，不会重复创建
        a.api().fail_fetch_test.set(false);
        assert!(a.add_question().await.is_err());
        let creates = a
            .api()
            .calls()
            .iter()
            .filter(|c| c.starts_with("create_question"))
            .count();
        assert_eq!(creates, 1);
    }

    #[tokio::test]
    async fn assign_without_questions_is_rejected_locally() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        let err = a.assign().await.unwrap_err();
        assert!(matches!(err, AppError::Workflow(WorkflowError::EmptyTest)));
        assert!(!a.api().calls().iter().any(|c| c.starts_with("assign_test")));
    }

    #[tokio::test]
    async fn assigned_test_is_locked() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        a.draft_mut().set_prompt("Pick a fruit");
        a.draft_mut().update_option(0, "Apple", "").unwrap();
        a.add_question().await.unwrap();
        a.assign().await.unwrap();
        assert_eq!(a.test().status, TestStatus::Assigned);

        a.draft_mut().set_prompt("Another");
        a.draft_mut().update_option(0, "x", "").unwrap();
        let err = a.add_question().await.unwrap_err();
        assert!(matches!(err, AppError::Workflow(WorkflowError::TestLocked)));
    }

    #[tokio::test]
    async fn loads_by_request() {
        let a = TestAssembly::load(FakeAdmin::with_test(draft_test(7)), TestTarget::Request(107))
            .await
            .unwrap();
        assert_eq!(a.test().id, 7);
        assert_eq!(a.api().calls(), vec!["fetch_test_by_request 107"]);
    }

    #[tokio::test]
    async fn import_uses_cross_category_selection() {
        let mut fake = FakeAdmin::with_test(draft_test(7));
        fake.templates = vec![
            template(1, 10, &["A", "B"]),
            template(2, 20, &["C", "D"]),
            template(3, 30, &["E"]),
        ];
        let mut a = assembly(fake).await;

        let picker = a.open_template_picker().await.unwrap();
        picker.set_filter(CategoryFilter::Category(10));
        picker.toggle(1);
        picker.set_filter(CategoryFilter::Category(20));
        picker.toggle(2);
        picker.set_filter(CategoryFilter::All);

        let added = a.import_templates().await.unwrap();
        assert_eq!(added, 2);
        assert_eq!(a.question_count(), 2);
        assert_eq!(a.draft().order, 2);
        assert!(a.picker().unwrap().selected().is_empty());
    }

    #[tokio::test]
    async fn import_without_picker_or_selection_is_rejected() {
        let mut a = assembly(FakeAdmin::with_test(draft_test(7))).await;
        let err = a.import_templates().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NoTemplateSelection)
        ));

        a.open_template_picker().await.unwrap();
        let err = a.import_templates().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NoTemplateSelection)
        ));
        assert!(!a.api().calls().iter().any(|c| c.starts_with("add_templates")));
    }
}
