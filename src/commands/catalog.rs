use anyhow::Result;
use careerpath_client::clients::CatalogApi;
use careerpath_client::models::{
    CareerResource, CompanyCategoryUpdate, CompanyUpdate, JobUpdate, NewCompany,
    NewCompanyCategory, NewResourceCategory, ResourceForm, Role,
};
use careerpath_client::workflow::CompanyFilter;
use careerpath_client::App;

use crate::cli::subcommands::catalog::{
    CompanyArgs, CompanyListArgs, ResourceArgs, UpdateCompanyArgs, UpdateResourceArgs,
};
use crate::cli::subcommands::CatalogCommands;
use crate::cli::GlobalFlags;
use crate::output::output;

/// `careerpath catalog <subcommand>`
pub async fn handle(action: &CatalogCommands, app: &App, flags: &GlobalFlags) -> Result<()> {
    app.require(Role::Admin)?;
    let client = app.catalog();

    match action {
        CatalogCommands::CompanyCategories => {
            let categories = client.list_company_categories().await?;
            output(&categories, flags, |list| {
                for c in list {
                    println!(
                        "#{:<5} {:<28} {} 家公司{}",
                        c.id,
                        c.name,
                        c.companies_count.unwrap_or(0),
                        if c.is_active { "" } else { " (停用)" }
                    );
                }
            })
        }
        CatalogCommands::CreateCompanyCategory(args) => {
            let category = NewCompanyCategory {
                name: args.name.trim().to_string(),
                description: args.description.clone(),
                icon: args.icon.clone(),
                order: args.order,
            };
            let created = client.create_company_category(&category).await?;
            output(&created, flags, |c| println!("已创建公司分类 #{} {}", c.id, c.name))
        }
        CatalogCommands::UpdateCompanyCategory(args) => {
            let update = CompanyCategoryUpdate {
                name: args.name.clone(),
                description: args.description.clone(),
                icon: args.icon.clone(),
                order: args.order,
                is_active: args.active,
            };
            let updated = client.update_company_category(args.category_id, &update).await?;
            output(&updated, flags, |c| println!("已更新公司分类 #{} {}", c.id, c.name))
        }
        CatalogCommands::DeleteCompanyCategory { category_id } => {
            client.delete_company_category(*category_id).await?;
            println!("已删除公司分类 #{}", category_id);
            Ok(())
        }
        CatalogCommands::Companies(args) => companies(args, app, flags).await,
        CatalogCommands::CreateCompany(args) => create_company(args, app, flags).await,
        CatalogCommands::UpdateCompany(args) => update_company(args, app, flags).await,
        CatalogCommands::DeleteCompany { company_id } => {
            client.delete_company(*company_id).await?;
            println!("已删除公司 #{}", company_id);
            Ok(())
        }
        CatalogCommands::Jobs { recommendation_id } => {
            let jobs = client.list_jobs(*recommendation_id).await?;
            output(&jobs, flags, |list| {
                if list.is_empty() {
                    println!("该推荐下还没有岗位");
                }
                for j in list {
                    println!(
                        "#{:<5} {:<32} {:<20} {:<10} {}",
                        j.id,
                        j.job_title,
                        j.company.name,
                        j.job_type,
                        j.salary_range.as_deref().unwrap_or("-")
                    );
                }
            })
        }
        CatalogCommands::UpdateJob(args) => {
            let update = JobUpdate {
                company: args.company,
                job_title: args.title.clone(),
                job_description: args.description.clone(),
                requirements: args.requirements.clone(),
                salary_range: args.salary.clone(),
                job_type: args.job_type,
                application_url: args.url.clone(),
                order: None,
                is_active: args.active,
            };
            let job = client.update_job(args.job_id, &update).await?;
            output(&job, flags, |j| println!("已更新岗位 #{} {}", j.id, j.job_title))
        }
        CatalogCommands::ResourceCategories => {
            let categories = client.list_resource_categories().await?;
            output(&categories, flags, |list| {
                for c in list {
                    println!("#{:<5} {}", c.id, c.name);
                }
            })
        }
        CatalogCommands::CreateResourceCategory(args) => {
            let category = NewResourceCategory {
                name: args.name.trim().to_string(),
                description: args.description.clone(),
                icon: args.icon.clone(),
            };
            let created = client.create_resource_category(&category).await?;
            output(&created, flags, |c| println!("已创建资源分类 #{} {}", c.id, c.name))
        }
        CatalogCommands::Resources(args) => {
            let resources = client.list_resources(args.recommendation, args.category).await?;
            output(&resources, flags, |list| {
                for r in list {
                    print_resource(r);
                }
            })
        }
        CatalogCommands::CreateResource(args) => create_resource(args, app, flags).await,
        CatalogCommands::UpdateResource(args) => update_resource(args, app, flags).await,
        CatalogCommands::DeleteResource { resource_id } => {
            client.delete_resource(*resource_id).await?;
            println!("已删除资源 #{}", resource_id);
            Ok(())
        }
    }
}

/// 一次拉取，本地按分类和关键字筛选
async fn companies(args: &CompanyListArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let all = app.catalog().list_companies(None).await?;
    let filter = CompanyFilter::new(args.category, args.search.clone());
    let matched = filter.apply(&all);
    output(&matched, flags, |list| {
        if list.is_empty() {
            println!("没有匹配的公司");
        }
        for c in list {
            let category = c.category.as_ref().map(|cat| cat.name.as_str()).unwrap_or("未分类");
            println!(
                "#{:<5} {:<28} {:<28} {:<16} {}",
                c.id,
                c.name,
                c.email,
                c.location.as_deref().unwrap_or("-"),
                category
            );
        }
    })
}

async fn create_company(args: &CompanyArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let company = NewCompany {
        name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
        website: args.website.clone(),
        description: args.description.clone(),
        location: args.location.clone(),
        industry: args.industry.clone(),
        category_id: args.category,
    };
    let created = app.catalog().create_company(&company).await?;
    output(&created, flags, |c| println!("已创建公司 #{} {}", c.id, c.name))
}

async fn update_company(args: &UpdateCompanyArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let update = CompanyUpdate {
        name: args.name.clone(),
        email: args.email.clone(),
        website: args.website.clone(),
        description: args.description.clone(),
        location: args.location.clone(),
        industry: args.industry.clone(),
        category_id: args.category,
        is_active: args.active,
    };
    let updated = app.catalog().update_company(args.company_id, &update).await?;
    output(&updated, flags, |c| println!("已更新公司 #{} {}", c.id, c.name))
}

async fn create_resource(args: &ResourceArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    if args.paid && args.cost.is_none() {
        anyhow::bail!("收费资源需要 --cost");
    }
    let form = ResourceForm {
        career_recommendation: Some(args.recommendation),
        category: args.category,
        title: Some(args.title.trim().to_string()),
        description: Some(args.description.clone()),
        resource_type: Some(args.resource_type),
        url: args.url.clone(),
        file: args.file.clone(),
        difficulty_level: Some(args.difficulty),
        is_free: Some(!args.paid),
        cost: args.cost.clone(),
        order: args.order,
        is_active: Some(true),
    };
    let created = app.catalog().create_resource(&form).await?;
    output(&created, flags, print_resource)
}

async fn update_resource(args: &UpdateResourceArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let form = ResourceForm {
        career_recommendation: None,
        category: args.category,
        title: args.title.clone(),
        description: args.description.clone(),
        resource_type: args.resource_type,
        url: args.url.clone(),
        file: args.file.clone(),
        difficulty_level: args.difficulty,
        is_free: args.free,
        cost: args.cost.clone(),
        order: args.order,
        is_active: args.active,
    };
    let updated = app.catalog().update_resource(args.resource_id, &form).await?;
    output(&updated, flags, print_resource)
}

fn print_resource(r: &CareerResource) {
    let category = r.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
    println!(
        "#{:<5} [{}] {:<40} {:<14} {}{}",
        r.id,
        r.resource_type.as_str(),
        r.title,
        category,
        if r.is_free { "免费" } else { r.cost.as_deref().unwrap_or("收费") },
        if r.is_active { "" } else { " (停用)" }
    );
}
