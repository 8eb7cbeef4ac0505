use crate::models::Company;

/// 按分类筛选公司
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanyCategoryFilter {
    #[default]
    Any,
    Uncategorized,
    Category(i64),
}

/// 公司列表的分类 + 关键字筛选
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub category: CompanyCategoryFilter,
    pub search: String,
}

impl CompanyFilter {
    pub fn new(category: CompanyCategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, company: &Company) -> bool {
        let category_ok = match self.category {
            CompanyCategoryFilter::Any => true,
            CompanyCategoryFilter::Uncategorized => company.category_id().is_none(),
            CompanyCategoryFilter::Category(id) => company.category_id() == Some(id),
        };
        category_ok && self.matches_search(company)
    }

    pub fn apply<'a>(&self, companies: &'a [Company]) -> Vec<&'a Company> {
        companies.iter().filter(|c| self.matches(c)).collect()
    }

    /// 名称、邮箱、地点、行业任一包含关键字（不区分大小写）
    fn matches_search(&self, company: &Company) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |s: &str| s.to_lowercase().contains(&needle);
        contains(&company.name)
            || contains(&company.email)
            || company.location.as_deref().is_some_and(contains)
            || company.industry.as_deref().is_some_and(contains)
    }
}
