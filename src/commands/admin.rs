use anyhow::Result;
use careerpath_client::clients::AdminApi;
use careerpath_client::models::{
    NewQuestionCategory, NewQuestionTemplate, NewTemplateOption, PersonalizedTest, Role,
    TemplateQuery,
};
use careerpath_client::services::DraftLoader;
use careerpath_client::utils::truncate_text;
use careerpath_client::workflow::{
    CategoryFilter, RecommendationWizard, TestAssembly, TestTarget,
};
use careerpath_client::App;
use tracing::{info, warn};

use crate::cli::subcommands::admin::{
    BuildArgs, CreateCategoryArgs, CreateTemplateArgs, RecommendArgs, TemplateListArgs,
    TestTargetArgs,
};
use crate::cli::subcommands::AdminCommands;
use crate::cli::GlobalFlags;
use crate::output::{fmt_time, output};

/// `careerpath admin <subcommand>`
pub async fn handle(action: &AdminCommands, app: &App, flags: &GlobalFlags) -> Result<()> {
    app.require(Role::Admin)?;
    let client = app.admin();

    match action {
        AdminCommands::Dashboard => {
            let dashboard = client.dashboard().await?;
            output(&dashboard, flags, |d| {
                let s = &d.stats;
                println!("待处理申请: {} {}", s.pending_requests, s.pending_requests_trend);
                println!("已出题目:   {} {}", s.mcqs_crafted, s.mcqs_crafted_trend);
                println!("已出推荐:   {} {}", s.recommendations_sent, s.recommendations_sent_trend);
                for r in &d.recent_requests {
                    println!(
                        "  #{:<5} {:<24} {:<12} {}",
                        r.id,
                        r.student,
                        r.request_status.as_str(),
                        r.due
                    );
                }
            })
        }
        AdminCommands::Requests(args) => {
            let requests = client.list_test_requests(args.status).await?;
            output(&requests, flags, |list| {
                if list.is_empty() {
                    println!("没有符合条件的申请");
                }
                for r in list {
                    println!(
                        "#{:<5} {:<12} {}  {} / {}",
                        r.id,
                        r.status.as_str(),
                        fmt_time(r.created_at),
                        r.qualification_snapshot,
                        r.interests_snapshot
                    );
                }
            })
        }
        AdminCommands::CreateTest { request_id } => {
            let test = client.create_test(*request_id).await?;
            output(&test, flags, print_test)
        }
        AdminCommands::Test(target) => {
            let test = match to_target(target)? {
                TestTarget::Test(id) => client.fetch_test(id).await?,
                TestTarget::Request(id) => client.fetch_test_by_request(id).await?,
            };
            output(&test, flags, print_test)
        }
        AdminCommands::Build(args) => build(args, app, flags).await,
        AdminCommands::Completed => {
            let tests = client.list_completed_tests().await?;
            output(&tests, flags, |list| {
                if list.is_empty() {
                    println!("暂无已完成的试卷");
                }
                for t in list {
                    println!(
                        "#{:<5} {:<28} {} 题  {}  {}",
                        t.id,
                        t.student.email,
                        t.questions_count,
                        fmt_time(t.completed_at),
                        if t.has_recommendation { "已推荐" } else { "待推荐" }
                    );
                }
            })
        }
        AdminCommands::Answers { test_id } => {
            let answers = client.test_answers(*test_id).await?;
            output(&answers, flags, |a| {
                println!("试卷 #{} - {} ({})", a.id, a.student.email, fmt_time(a.completed_at));
                for (i, reviewed) in a.answers.iter().enumerate() {
                    let chosen = reviewed
                        .selected_answer
                        .as_ref()
                        .map(|s| s.option_label.as_str())
                        .unwrap_or("(未作答)");
                    println!("{}. {}", i + 1, reviewed.question.prompt);
                    println!("   → {}", chosen);
                }
            })
        }
        AdminCommands::Recommend(args) => recommend(args, app, flags).await,
        AdminCommands::Recommendations => {
            let list = client.list_recommendations().await?;
            output(&list, flags, |list| {
                for r in list {
                    println!(
                        "#{:<5} {:<32} {:<28} {}",
                        r.id,
                        r.career_name,
                        r.student_email,
                        fmt_time(r.created_at)
                    );
                }
            })
        }
        AdminCommands::Categories => {
            let categories = client.list_question_categories().await?;
            output(&categories, flags, |list| {
                for c in list {
                    println!(
                        "#{:<5} {:<32} {}{}",
                        c.id,
                        c.name,
                        c.qualification_tag,
                        if c.is_active { "" } else { " (停用)" }
                    );
                }
            })
        }
        AdminCommands::Templates(args) => templates(args, app, flags).await,
        AdminCommands::CreateCategory(args) => create_category(args, app, flags).await,
        AdminCommands::CreateTemplate(args) => create_template(args, app, flags).await,
    }
}

fn to_target(args: &TestTargetArgs) -> Result<TestTarget> {
    match (args.test, args.request) {
        (Some(id), _) => Ok(TestTarget::Test(id)),
        (None, Some(id)) => Ok(TestTarget::Request(id)),
        (None, None) => anyhow::bail!("需要 --test 或 --request"),
    }
}

/// 出卷：文件题目逐条添加 → 题库导入 → 可选分配
async fn build(args: &BuildArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let mut assembly = TestAssembly::load(app.admin(), to_target(&args.target)?).await?;

    if let Some(path) = &args.questions {
        let drafts = DraftLoader::questions(path).await?;
        info!("📥 从 {} 读取 {} 道题", path.display(), drafts.len());
        for mut draft in drafts {
            draft.order = assembly.question_count() as u32;
            info!("➕ {}", truncate_text(&draft.prompt, 40));
            *assembly.draft_mut() = draft;
            assembly.add_question().await?;
        }
    }

    if args.category.is_some() || !args.templates.is_empty() {
        let picker = assembly.open_template_picker().await?;
        for &id in &args.templates {
            if !picker.toggle(id) {
                warn!("⚠️ 模板 #{} 不存在，已忽略", id);
            }
        }
        if let Some(category) = args.category {
            picker.set_filter(CategoryFilter::Category(category));
        }
        let added = assembly.import_templates().await?;
        info!("📚 从题库导入 {} 道题", added);
    }

    if args.assign {
        assembly.assign().await?;
    }

    output(assembly.test(), flags, print_test)
}

/// 推荐向导：按文件创建推荐，再逐个添加岗位
async fn recommend(args: &RecommendArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let plan = DraftLoader::recommendation(&args.plan).await?;
    let mut wizard =
        RecommendationWizard::new(app.admin(), app.catalog(), args.test_id).with_draft(plan.draft);

    wizard.load_companies().await?;
    for &id in plan.company_ids.iter().chain(&args.companies) {
        if wizard.selected_companies().contains(&id) {
            continue;
        }
        if !wizard.toggle_company(id) {
            warn!("⚠️ 公司 #{} 不存在，已忽略", id);
        }
    }
    if wizard.uses_free_text_companies() && !wizard.selected_companies().is_empty() {
        warn!("⚠️ 尚无公司分类，仍按勾选的公司提交");
    }

    let recommendation_id = wizard.create().await?;

    let mut failed = 0;
    for job in &plan.jobs {
        if let Err(e) = wizard.add_job(job).await {
            warn!("⚠️ 添加岗位 {} 失败: {}", job.job_title, e.user_message());
            failed += 1;
        }
    }
    if failed > 0 {
        warn!("⚠️ {} 个岗位未能添加", failed);
    }

    output(wizard.jobs(), flags, |jobs| {
        println!("职业推荐 #{} 已创建", recommendation_id);
        for job in jobs {
            println!("  岗位 #{} {} @ {} ({})", job.id, job.job_title, job.company.name, job.job_type);
        }
    })
}

async fn templates(args: &TemplateListArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let query = TemplateQuery {
        category_id: args.category,
        qualification_tag: args.tag.clone(),
        include_inactive: args.all,
    };
    let templates = app.admin().list_question_templates(&query).await?;
    output(&templates, flags, |list| {
        for t in list {
            let category = t.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
            println!(
                "#{:<5} [{}] {} ({} 个选项)",
                t.id,
                category,
                truncate_text(&t.prompt, 60),
                t.options.len()
            );
        }
    })
}

async fn create_category(args: &CreateCategoryArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let category = NewQuestionCategory {
        name: args.name.trim().to_string(),
        description: args.description.clone(),
        qualification_tag: args.tag.clone(),
    };
    let created = app.admin().create_question_category(&category).await?;
    output(&created, flags, |c| println!("已创建题库分类 #{} {}", c.id, c.name))
}

async fn create_template(args: &CreateTemplateArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let options = args
        .options
        .iter()
        .enumerate()
        .map(|(i, label)| NewTemplateOption {
            label: label.trim().to_string(),
            description: None,
            order: Some(i as u32),
        })
        .collect();

    let template = NewQuestionTemplate {
        category: args.category,
        prompt: args.prompt.trim().to_string(),
        order: args.order,
        is_active: Some(true),
        options,
    };
    let created = app.admin().create_question_template(&template).await?;
    output(&created, flags, |t| println!("已创建模板 #{} ({} 个选项)", t.id, t.options.len()))
}

fn print_test(test: &PersonalizedTest) {
    println!(
        "试卷 #{} (申请 #{}) {:?}, {} 道题",
        test.id,
        test.request.id,
        test.status,
        test.questions.len()
    );
    for q in &test.questions {
        let labels: Vec<&str> = q.options.iter().map(|o| o.label.as_str()).collect();
        println!("  {}. {} [{}]", q.order, q.prompt, labels.join(" / "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_prefers_test_id() {
        let args = TestTargetArgs {
            test: Some(3),
            request: None,
        };
        assert_eq!(to_target(&args).unwrap(), TestTarget::Test(3));
        let args = TestTargetArgs {
            test: None,
            request: Some(8),
        };
        assert_eq!(to_target(&args).unwrap(), TestTarget::Request(8));
    }
}
