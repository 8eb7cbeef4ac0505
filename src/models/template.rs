use serde::{Deserialize, Serialize};

/// 题库分类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qualification_tag: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// 模板里嵌套的分类引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOption {
    #[serde(default)]
    pub id: Option<i64>,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
}

/// 可复用的题目模板，导入时按值复制进试卷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    pub id: i64,
    pub prompt: String,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub order: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub options: Vec<TemplateOption>,
}

impl QuestionTemplate {
    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().map(|c| c.id)
    }
}

/// 模板查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateQuery {
    pub category_id: Option<i64>,
    pub qualification_tag: Option<String>,
    pub include_inactive: bool,
}

impl TemplateQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.category_id {
            params.push(("category_id".to_string(), id.to_string()));
        }
        if let Some(tag) = &self.qualification_tag {
            params.push(("qualification_tag".to_string(), tag.clone()));
        }
        if self.include_inactive {
            params.push(("include_inactive".to_string(), "true".to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewQuestionCategory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualification_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTemplateOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestionTemplate {
    pub category: i64,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub options: Vec<NewTemplateOption>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_only_include_set_filters() {
        let query = TemplateQuery {
            category_id: Some(3),
            ..Default::default()
        };
        assert_eq!(query.to_params(), vec![("category_id".to_string(), "3".to_string())]);
        assert!(TemplateQuery::default().to_params().is_empty());
    }
}
