//! 学生答题流程
//!
//! 状态：NotStarted → InProgress → Completed。
//! 选项先写入本地再逐题保存；整卷提交需全部作答并确认，提交后不可撤销。

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::clients::StudentApi;
use crate::error::{AppResult, ValidationError, WorkflowError};
use crate::models::{StudentQuestion, StudentTest};

/// 单题保存失败时本地选择如何处理
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerSyncPolicy {
    /// 恢复到保存前的选择，本地始终与后端一致
    #[default]
    Revert,
    /// 保留本地选择，仅报告错误
    Keep,
}

impl FromStr for AnswerSyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revert" => Ok(AnswerSyncPolicy::Revert),
            "keep" => Ok(AnswerSyncPolicy::Keep),
            other => Err(format!("未知的答案同步策略: {}", other)),
        }
    }
}

impl fmt::Display for AnswerSyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerSyncPolicy::Revert => f.write_str("revert"),
            AnswerSyncPolicy::Keep => f.write_str("keep"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakingState {
    NotStarted,
    InProgress,
    Completed,
}

pub struct TestSession<S: StudentApi> {
    api: S,
    test: StudentTest,
    answers: BTreeMap<i64, i64>,
    current: usize,
    state: TakingState,
    policy: AnswerSyncPolicy,
}

impl<S: StudentApi> TestSession<S> {
    /// 加载试卷，已保存的答案作为初始选择
    pub async fn load(api: S, test_id: i64, policy: AnswerSyncPolicy) -> AppResult<Self> {
        let test = api.fetch_student_test(test_id).await?;
        let answers: BTreeMap<i64, i64> = test
            .questions
            .iter()
            .filter_map(|q| q.selected_option_id.map(|o| (q.id, o)))
            .collect();
        info!(
            "📝 试卷 #{}: 共 {} 题，已答 {} 题",
            test.id,
            test.total_questions,
            answers.len()
        );
        let state = if answers.is_empty() {
            TakingState::NotStarted
        } else {
            TakingState::InProgress
        };
        Ok(Self {
            api,
            test,
            answers,
            current: 0,
            state,
            policy,
        })
    }

    pub fn api(&self) -> &S {
        &self.api
    }

    pub fn test(&self) -> &StudentTest {
        &self.test
    }

    pub fn state(&self) -> TakingState {
        self.state
    }

    pub fn policy(&self) -> AnswerSyncPolicy {
        self.policy
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&StudentQuestion> {
        self.test.questions.get(self.current)
    }

    pub fn answer_for(&self, question_id: i64) -> Option<i64> {
        self.answers.get(&question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn total_questions(&self) -> usize {
        self.test.total_questions
    }

    /// 选择选项并立即保存
    pub async fn select_option(&mut self, question_id: i64, option_id: i64) -> AppResult<()> {
        self.ensure_open()?;
        let known = self
            .test
            .questions
            .iter()
            .any(|q| q.id == question_id && q.has_option(option_id));
        if !known {
            return Err(ValidationError::UnknownOption {
                question_id,
                option_id,
            }
            .into());
        }

        let previous = self.answers.insert(question_id, option_id);
        self.state = TakingState::InProgress;

        if let Err(e) = self.api.submit_answer(self.test.id, question_id, option_id).await {
            warn!("⚠️ 保存答案失败 (题目 {}): {}", question_id, e.user_message());
            if self.policy == AnswerSyncPolicy::Revert {
                match previous {
                    Some(old) => self.answers.insert(question_id, old),
                    None => self.answers.remove(&question_id),
                };
                if self.answers.is_empty() {
                    self.state = TakingState::NotStarted;
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// 为当前题目选择选项
    pub async fn select_current(&mut self, option_id: i64) -> AppResult<()> {
        let question_id = self
            .current_question()
            .map(|q| q.id)
            .ok_or(ValidationError::IndexOutOfRange {
                index: self.current,
                len: self.test.questions.len(),
            })?;
        self.select_option(question_id, option_id).await
    }

    /// 下一题，到末尾停住
    pub fn next(&mut self) -> usize {
        if self.current + 1 < self.test.questions.len() {
            self.current += 1;
        }
        self.current
    }

    /// 上一题，到开头停住
    pub fn prev(&mut self) -> usize {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// 跳到任意题目，不受作答状态限制
    pub fn jump(&mut self, index: usize) -> Result<(), ValidationError> {
        let len = self.test.questions.len();
        if index >= len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        self.current = index;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.state != TakingState::Completed && self.answers.len() == self.test.total_questions
    }

    /// 整卷提交，需要全部作答且已确认
    pub async fn submit(&mut self, confirmed: bool) -> AppResult<()> {
        self.ensure_open()?;
        let answered = self.answers.len();
        let total = self.test.total_questions;
        if answered != total {
            return Err(WorkflowError::AnswersIncomplete { answered, total }.into());
        }
        if !confirmed {
            return Err(WorkflowError::NotConfirmed.into());
        }
        self.api.submit_test(self.test.id).await?;
        self.state = TakingState::Completed;
        info!("✅ 试卷 #{} 已提交", self.test.id);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), WorkflowError> {
        if self.state == TakingState::Completed {
            Err(WorkflowError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }
}
