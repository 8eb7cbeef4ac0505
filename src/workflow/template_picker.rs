//! 题库模板选择
//!
//! 分类过滤只决定哪些模板"可勾选"，已勾选集合与当前分类无关，切换分类不会清空。

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::models::{QuestionCategory, QuestionTemplate, TemplateImport};

/// 分类过滤
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(i64),
}

impl CategoryFilter {
    pub fn admits(&self, template: &QuestionTemplate) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(id) => template.category_id() == Some(*id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplatePicker {
    categories: Vec<QuestionCategory>,
    templates: Vec<QuestionTemplate>,
    filter: CategoryFilter,
    selected: BTreeSet<i64>,
}

impl TemplatePicker {
    pub fn new(categories: Vec<QuestionCategory>, templates: Vec<QuestionTemplate>) -> Self {
        Self {
            categories,
            templates,
            ..Default::default()
        }
    }

    pub fn categories(&self) -> &[QuestionCategory] {
        &self.categories
    }

    pub fn templates(&self) -> &[QuestionTemplate] {
        &self.templates
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// 当前过滤条件下可勾选的模板
    pub fn eligible(&self) -> impl Iterator<Item = &QuestionTemplate> + '_ {
        self.templates.iter().filter(move |t| self.filter.admits(t))
    }

    pub fn is_eligible(&self, template_id: i64) -> bool {
        self.eligible().any(|t| t.id == template_id)
    }

    pub fn is_selected(&self, template_id: i64) -> bool {
        self.selected.contains(&template_id)
    }

    pub fn selected(&self) -> &BTreeSet<i64> {
        &self.selected
    }

    /// 勾选 / 取消勾选；不可勾选的模板忽略，返回 false
    pub fn toggle(&mut self, template_id: i64) -> bool {
        if !self.is_eligible(template_id) {
            return false;
        }
        if !self.selected.remove(&template_id) {
            self.selected.insert(template_id);
        }
        true
    }

    /// 可勾选的模板是否已全部勾选
    pub fn all_eligible_selected(&self) -> bool {
        let mut eligible = self.eligible().peekable();
        eligible.peek().is_some() && eligible.all(|t| self.selected.contains(&t.id))
    }

    /// 全选 / 取消全选当前可勾选的模板，其他分类的勾选不受影响
    pub fn select_all(&mut self) {
        let ids: Vec<i64> = self.eligible().map(|t| t.id).collect();
        if self.all_eligible_selected() {
            for id in ids {
                self.selected.remove(&id);
            }
        } else {
            self.selected.extend(ids);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// 导入请求：具体分类带 category_ids，有勾选带 template_ids，都没有则不发请求
    pub fn import_request(&self) -> Result<TemplateImport, ValidationError> {
        let category_ids = match self.filter {
            CategoryFilter::All => None,
            CategoryFilter::Category(id) => Some(vec![id]),
        };
        let template_ids =
            (!self.selected.is_empty()).then(|| self.selected.iter().copied().collect::<Vec<_>>());

        if category_ids.is_none() && template_ids.is_none() {
            return Err(ValidationError::NoTemplateSelection);
        }
        Ok(TemplateImport {
            category_ids,
            template_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryRef;

    fn template(id: i64, category: i64) -> QuestionTemplate {
        QuestionTemplate {
            id,
            prompt: format!("Template {}", id),
            category: Some(CategoryRef {
                id: category,
                name: format!("Category {}", category),
            }),
            order: 0,
            is_active: true,
            options: Vec::new(),
        }
    }

    fn picker() -> TemplatePicker {
        TemplatePicker::new(
            Vec::new(),
            vec![template(1, 10), template(2, 10), template(3, 20), template(4, 30)],
        )
    }

    #[test]
    fn selections_survive_category_switches() {
        let mut p = picker();
        p.set_filter(CategoryFilter::Category(10));
        assert!(p.toggle(1));
        p.set_filter(CategoryFilter::Category(20));
        assert!(p.toggle(3));
        p.set_filter(CategoryFilter::All);

        assert!(p.is_selected(1));
        assert!(p.is_selected(3));
        assert_eq!(
            p.import_request().unwrap(),
            TemplateImport {
                category_ids: None,
                template_ids: Some(vec![1, 3]),
            }
        );
    }

    #[test]
    fn ineligible_template_cannot_be_toggled() {
        let mut p = picker();
        p.set_filter(CategoryFilter::Category(20));
        assert!(!p.toggle(1));
        assert!(p.selected().is_empty());
    }

    #[test]
    fn select_all_toggles_only_eligible() {
        let mut p = picker();
        p.set_filter(CategoryFilter::Category(30));
        p.toggle(4);
        p.set_filter(CategoryFilter::Category(10));

        p.select_all();
        assert!(p.all_eligible_selected());
        assert_eq!(p.selected().len(), 3);

        p.select_all();
        assert!(!p.all_eligible_selected());
        assert_eq!(p.selected().iter().copied().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn import_needs_category_or_selection() {
        let mut p = picker();
        assert_eq!(p.import_request(), Err(ValidationError::NoTemplateSelection));

        p.set_filter(CategoryFilter::Category(20));
        assert_eq!(
            p.import_request().unwrap(),
            TemplateImport {
                category_ids: Some(vec![20]),
                template_ids: None,
            }
        );
    }

    #[test]
    fn empty_category_is_never_all_selected() {
        let mut p = picker();
        p.set_filter(CategoryFilter::Category(99));
        assert!(!p.all_eligible_selected());
        p.select_all();
        assert!(p.selected().is_empty());
    }
}
