use std::path::PathBuf;

use careerpath_client::models::{DifficultyLevel, JobType, ResourceType};
use careerpath_client::workflow::CompanyCategoryFilter;
use clap::{Args, Subcommand};

/// 公司、岗位、学习资源的维护命令（管理员）
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// 公司分类列表
    CompanyCategories,
    CreateCompanyCategory(CompanyCategoryArgs),
    UpdateCompanyCategory(UpdateCompanyCategoryArgs),
    /// 删除分类，其下公司变为未分类
    DeleteCompanyCategory {
        category_id: i64,
    },
    /// 公司列表，支持分类和关键字筛选
    Companies(CompanyListArgs),
    CreateCompany(CompanyArgs),
    UpdateCompany(UpdateCompanyArgs),
    DeleteCompany {
        company_id: i64,
    },
    /// 某条推荐下的岗位
    Jobs {
        recommendation_id: i64,
    },
    UpdateJob(UpdateJobArgs),
    ResourceCategories,
    CreateResourceCategory(ResourceCategoryArgs),
    /// 学习资源列表
    Resources(ResourceListArgs),
    CreateResource(ResourceArgs),
    UpdateResource(UpdateResourceArgs),
    DeleteResource {
        resource_id: i64,
    },
}

#[derive(Clone, Debug, Args)]
pub struct CompanyCategoryArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub order: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateCompanyCategoryArgs {
    pub category_id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub order: Option<u32>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Args)]
pub struct CompanyListArgs {
    /// 分类 ID，或 `none` 表示未分类
    #[arg(long, value_parser = parse_company_category, default_value = "any")]
    pub category: CompanyCategoryFilter,
    /// 名称、邮箱、地点、行业中的关键字
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Clone, Debug, Args)]
pub struct CompanyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub category: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateCompanyArgs {
    pub company_id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateJobArgs {
    pub job_id: i64,
    #[arg(long)]
    pub company: Option<i64>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub requirements: Option<String>,
    #[arg(long)]
    pub salary: Option<String>,
    /// full_time / part_time / contract / internship / remote
    #[arg(long = "type")]
    pub job_type: Option<JobType>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Args)]
pub struct ResourceCategoryArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ResourceListArgs {
    #[arg(long)]
    pub recommendation: Option<i64>,
    #[arg(long)]
    pub category: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct ResourceArgs {
    #[arg(long)]
    pub recommendation: i64,
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long = "type", default_value = "article")]
    pub resource_type: ResourceType,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub url: Option<String>,
    /// 随表单上传的文件
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long, default_value = "beginner")]
    pub difficulty: DifficultyLevel,
    /// 收费资源，需同时给出 --cost
    #[arg(long)]
    pub paid: bool,
    #[arg(long)]
    pub cost: Option<String>,
    #[arg(long)]
    pub order: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateResourceArgs {
    pub resource_id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type")]
    pub resource_type: Option<ResourceType>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long)]
    pub difficulty: Option<DifficultyLevel>,
    #[arg(long)]
    pub free: Option<bool>,
    #[arg(long)]
    pub cost: Option<String>,
    #[arg(long)]
    pub order: Option<u32>,
    #[arg(long)]
    pub active: Option<bool>,
}

fn parse_company_category(value: &str) -> Result<CompanyCategoryFilter, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "any" | "all" => Ok(CompanyCategoryFilter::Any),
        "none" | "uncategorized" => Ok(CompanyCategoryFilter::Uncategorized),
        other => other
            .parse()
            .map(CompanyCategoryFilter::Category)
            .map_err(|_| format!("分类应为 ID、any 或 none，收到 {}", value)),
    }
}
