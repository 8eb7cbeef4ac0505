use anyhow::Result;
use careerpath_client::clients::StudentApi;
use careerpath_client::models::{
    CareerRecommendation, CareerResource, NewTestRequest, ProgressUpdate, ResourceQuery, Role,
};
use careerpath_client::workflow::{TakingState, TestSession};
use careerpath_client::services::PdfExporter;
use careerpath_client::App;
use tracing::info;

use crate::cli::subcommands::student::{ProgressArgs, RequestArgs, ResourceFilterArgs, TakeArgs};
use crate::cli::subcommands::StudentCommands;
use crate::cli::GlobalFlags;
use crate::output::{fmt_time, output, Prompt};

/// `careerpath student <subcommand>`
pub async fn handle(action: &StudentCommands, app: &App, flags: &GlobalFlags) -> Result<()> {
    app.require(Role::Student)?;
    let client = app.student();

    match action {
        StudentCommands::Dashboard => {
            let dashboard = client.dashboard().await?;
            output(&dashboard, flags, |d| {
                println!("{} <{}>", d.user.display_name(), d.user.email);
                match &d.latest_request {
                    Some(r) => println!("最近申请: #{} {:?} ({})", r.id, r.status, fmt_time(r.created_at)),
                    None => println!("最近申请: 无"),
                }
                match &d.personalized_test {
                    Some(t) => println!("试卷: #{} {:?}, {} 道题", t.id, t.status, t.questions.len()),
                    None => println!("试卷: 无"),
                }
                match &d.recommendation {
                    Some(r) => println!("职业推荐: #{} {}", r.id, r.career_name),
                    None => println!("职业推荐: 尚未出具"),
                }
            })
        }
        StudentCommands::Requests => {
            let requests = client.list_requests().await?;
            output(&requests, flags, |list| {
                if list.is_empty() {
                    println!("还没有测评申请");
                }
                for r in list {
                    println!(
                        "#{:<5} {:<12} {}  兴趣: {}",
                        r.id,
                        r.status.as_str(),
                        fmt_time(r.created_at),
                        r.interests_snapshot
                    );
                }
            })
        }
        StudentCommands::Request(args) => request(args, app, flags).await,
        StudentCommands::Tests => {
            let tests = client.list_tests().await?;
            output(&tests, flags, |list| {
                if list.is_empty() {
                    println!("暂无已分配的试卷");
                }
                for t in list {
                    println!(
                        "#{:<5} 申请 #{:<5} 已答 {}/{}  {}",
                        t.id,
                        t.request_id,
                        t.answered_count,
                        t.questions_count,
                        fmt_time(t.created_at)
                    );
                }
            })
        }
        StudentCommands::Take(args) => take(args, app).await,
        StudentCommands::Recommendations => {
            let recommendations = client.list_recommendations().await?;
            output(&recommendations, flags, |list| {
                if list.is_empty() {
                    println!("暂无职业推荐");
                }
                for r in list {
                    print_recommendation(r);
                }
            })
        }
        StudentCommands::Export(args) => {
            let download = client.export_recommendation(args.recommendation_id).await?;
            let exporter = match &args.dir {
                Some(dir) => PdfExporter::new(dir.clone()),
                None => app.pdf_exporter(),
            };
            let path = exporter.save(args.recommendation_id, &download).await?;
            println!("{}", path.display());
            Ok(())
        }
        StudentCommands::Resources(args) => {
            let resources = client.list_resources(&resource_query(args)).await?;
            output(&resources, flags, |list| print_resources(list))
        }
        StudentCommands::Resource { resource_id } => {
            let resource = client.resource(*resource_id).await?;
            output(&resource, flags, print_resource_detail)
        }
        StudentCommands::Progress(args) => progress(args, app, flags).await,
        StudentCommands::MyResources => {
            let resources = client.my_resources().await?;
            output(&resources, flags, |list| print_resources(list))
        }
    }
}

async fn request(args: &RequestArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let user = app.require(Role::Student)?;
    let payload = NewTestRequest {
        interests_snapshot: args.interests.clone().unwrap_or(user.interests),
        qualification_snapshot: args.qualification.clone().unwrap_or(user.qualification),
    };
    let created = app.student().create_request(&payload).await?;
    output(&created, flags, |r| {
        println!("已提交测评申请 #{} ({})", r.id, r.status.as_str())
    })
}

async fn progress(args: &ProgressArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let update = ProgressUpdate {
        status: args.status,
        notes: args.notes.clone(),
        is_favorite: args.favorite,
    };
    let progress = app.student().update_progress(args.resource_id, &update).await?;
    output(&progress, flags, |p| {
        println!(
            "资源 #{}: {:?}{}",
            args.resource_id,
            p.status,
            if p.is_favorite { " ★" } else { "" }
        )
    })
}

/// 答题：带 `--answer` / `--submit` 时批量执行，否则进入交互模式
async fn take(args: &TakeArgs, app: &App) -> Result<()> {
    let mut session = TestSession::load(app.student(), args.test_id, app.config().answer_sync).await?;

    if args.answers.is_empty() && !args.submit {
        return interactive(&mut session, args.yes).await;
    }

    for &(question_id, option_id) in &args.answers {
        session.select_option(question_id, option_id).await?;
    }
    println!("已答 {}/{}", session.answered_count(), session.total_questions());

    if args.submit {
        let confirmed = args.yes || Prompt::new().confirm("提交后不能修改，确认提交？").await?;
        session.submit(confirmed).await?;
        println!("试卷 #{} 已提交", args.test_id);
    }
    Ok(())
}

async fn interactive<S: StudentApi>(session: &mut TestSession<S>, yes: bool) -> Result<()> {
    if session.total_questions() == 0 {
        println!("试卷中没有题目");
        return Ok(());
    }
    println!("输入选项序号作答；n 下一题，p 上一题，g <题号> 跳转，s 提交，q 退出");
    let mut prompt = Prompt::new();

    while session.state() != TakingState::Completed {
        print_current(session);
        let Some(line) = prompt.read_line("> ").await? else {
            break;
        };

        let outcome = match line.as_str() {
            "" | "n" => {
                session.next();
                Ok(())
            }
            "p" => {
                session.prev();
                Ok(())
            }
            "q" => break,
            "s" => {
                if !session.can_submit() {
                    println!(
                        "还有 {} 题未作答",
                        session.total_questions() - session.answered_count()
                    );
                    continue;
                }
                let confirmed = yes || prompt.confirm("提交后不能修改，确认提交？").await?;
                session.submit(confirmed).await
            }
            cmd if cmd.starts_with("g ") => match cmd[2..].trim().parse::<usize>() {
                Ok(n) if n >= 1 => session.jump(n - 1).map_err(Into::into),
                _ => {
                    println!("题号无效");
                    continue;
                }
            },
            choice => match choice.parse::<usize>() {
                Ok(n) => select_by_position(session, n).await,
                Err(_) => {
                    println!("无法识别的输入: {}", choice);
                    continue;
                }
            },
        };

        if let Err(e) = outcome {
            println!("✗ {}", e.user_message());
        }
    }

    if session.state() == TakingState::Completed {
        println!("试卷已提交，等待老师出具职业推荐");
    } else {
        info!(
            "已保存 {}/{} 题，稍后可继续作答",
            session.answered_count(),
            session.total_questions()
        );
    }
    Ok(())
}

/// 按显示序号（从 1 开始）选择当前题目的选项
async fn select_by_position<S: StudentApi>(
    session: &mut TestSession<S>,
    position: usize,
) -> careerpath_client::AppResult<()> {
    let option_id = session
        .current_question()
        .and_then(|q| position.checked_sub(1).and_then(|i| q.options.get(i)))
        .map(|o| o.id);
    match option_id {
        Some(id) => session.select_current(id).await,
        None => {
            println!("没有第 {} 个选项", position);
            Ok(())
        }
    }
}

fn print_current<S: StudentApi>(session: &TestSession<S>) {
    let Some(question) = session.current_question() else {
        return;
    };
    let selected = session.answer_for(question.id);
    println!();
    println!(
        "第 {}/{} 题（已答 {}）",
        session.current_index() + 1,
        session.total_questions(),
        session.answered_count()
    );
    println!("{}", question.prompt);
    for (i, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(option.id) { "●" } else { "○" };
        if option.description.is_empty() {
            println!("  {} {}. {}", mark, i + 1, option.label);
        } else {
            println!("  {} {}. {} - {}", mark, i + 1, option.label, option.description);
        }
    }
}

fn resource_query(args: &ResourceFilterArgs) -> ResourceQuery {
    ResourceQuery {
        recommendation_id: args.recommendation,
        category_id: args.category,
        resource_type: args.resource_type,
    }
}

fn print_recommendation(r: &CareerRecommendation) {
    println!("#{} {}", r.id, r.career_name);
    println!("  {}", r.summary);
    let companies = r.company_names();
    if !companies.is_empty() {
        println!("  推荐公司: {}", companies.join(", "));
    }
    for step in &r.steps {
        println!("  {}. {}", step.order, step.title);
    }
    for job in &r.job_recommendations {
        println!("  岗位: {} @ {} ({})", job.job_title, job.company.name, job.job_type);
    }
}

fn print_resources(list: &[CareerResource]) {
    if list.is_empty() {
        println!("暂无学习资源");
    }
    for r in list {
        let status = r
            .student_progress
            .as_ref()
            .map(|p| format!("{:?}", p.status))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{:<5} [{}] {:<40} {:<12} {}",
            r.id,
            r.resource_type.as_str(),
            r.title,
            r.difficulty_level.as_str(),
            status
        );
    }
}

fn print_resource_detail(r: &CareerResource) {
    println!("#{} {}", r.id, r.title);
    println!("类型: {}  难度: {}", r.resource_type.as_str(), r.difficulty_level.as_str());
    if !r.is_free {
        println!("费用: {}", r.cost.as_deref().unwrap_or("-"));
    }
    if let Some(url) = r.url.as_deref().or(r.file.as_deref()) {
        println!("链接: {}", url);
    }
    if !r.description.is_empty() {
        println!("{}", r.description);
    }
    if let Some(p) = &r.student_progress {
        println!("进度: {:?}  {}", p.status, p.notes);
    }
}
