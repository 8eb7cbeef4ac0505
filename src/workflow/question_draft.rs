//! 手工出题表单

use crate::error::ValidationError;
use crate::models::loaders::toml_loader::QuestionEntry;
use crate::models::{NewOption, NewQuestion};
use crate::utils::validation::is_blank;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub label: String,
    pub description: String,
}

/// 正在编辑的一道题
///
/// 至少保留一个选项；选项顺序即提交时的 order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub order: u32,
    options: Vec<OptionDraft>,
}

impl QuestionDraft {
    /// 空白题目，带一个空选项
    pub fn new(order: u32) -> Self {
        Self {
            prompt: String::new(),
            order,
            options: vec![OptionDraft::default()],
        }
    }

    /// 由离线题目文件的条目构造
    pub fn from_entry(entry: &QuestionEntry, order: u32) -> Self {
        let options = entry
            .options
            .iter()
            .map(|o| OptionDraft {
                label: o.label.clone(),
                description: o.description.clone(),
            })
            .collect::<Vec<_>>();
        Self {
            prompt: entry.prompt.clone(),
            order,
            options: if options.is_empty() {
                vec![OptionDraft::default()]
            } else {
                options
            },
        }
    }

    pub fn options(&self) -> &[OptionDraft] {
        &self.options
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn add_option(&mut self) {
        self.options.push(OptionDraft::default());
    }

    /// 删除选项；只剩一个时不删，返回 false
    pub fn remove_option(&mut self, index: usize) -> Result<bool, ValidationError> {
        self.check_index(index)?;
        if self.options.len() == 1 {
            return Ok(false);
        }
        self.options.remove(index);
        Ok(true)
    }

    pub fn update_option(
        &mut self,
        index: usize,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.check_index(index)?;
        self.options[index] = OptionDraft {
            label: label.into(),
            description: description.into(),
        };
        Ok(())
    }

    /// 题干与每个选项标签都不能为空白
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.prompt) || self.options.iter().any(|o| is_blank(&o.label)) {
            return Err(ValidationError::QuestionIncomplete);
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<NewQuestion, ValidationError> {
        self.validate()?;
        Ok(NewQuestion {
            prompt: self.prompt.trim().to_string(),
            order: self.order,
            options: self
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| NewOption {
                    label: o.label.trim().to_string(),
                    description: o.description.trim().to_string(),
                    order: i as u32,
                })
                .collect(),
        })
    }

    /// 提交成功后清空表单，order 取当前题目数
    pub fn reset(&mut self, order: u32) {
        *self = Self::new(order);
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.options.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        Ok(())
    }
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new(0)
    }
}
