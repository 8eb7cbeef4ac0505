use std::path::PathBuf;

use careerpath_client::models::{ProgressStatus, ResourceType};
use clap::{Args, Subcommand};

/// 学生端命令
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// 首页看板：最近申请、试卷、推荐
    Dashboard,
    /// 我的测评申请
    Requests,
    /// 发起测评申请
    Request(RequestArgs),
    /// 已分配的试卷
    Tests,
    /// 答题
    Take(TakeArgs),
    /// 我的职业推荐
    Recommendations,
    /// 导出推荐 PDF
    Export(ExportArgs),
    /// 学习资源列表
    Resources(ResourceFilterArgs),
    /// 资源详情
    Resource {
        resource_id: i64,
    },
    /// 更新学习进度
    Progress(ProgressArgs),
    /// 有进度记录的资源
    MyResources,
}

#[derive(Clone, Debug, Args)]
pub struct RequestArgs {
    /// 默认取个人资料中的兴趣
    #[arg(long)]
    pub interests: Option<String>,
    /// 默认取个人资料中的学历
    #[arg(long)]
    pub qualification: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct TakeArgs {
    pub test_id: i64,
    /// 非交互作答，格式 `题目ID:选项ID`，可重复
    #[arg(long = "answer", value_parser = parse_answer)]
    pub answers: Vec<(i64, i64)>,
    /// 作答后提交
    #[arg(long)]
    pub submit: bool,
    /// 提交时跳过确认
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    pub recommendation_id: i64,
    /// 覆盖 CAREERPATH_DOWNLOAD_DIR
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ResourceFilterArgs {
    #[arg(long)]
    pub recommendation: Option<i64>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long = "type")]
    pub resource_type: Option<ResourceType>,
}

#[derive(Clone, Debug, Args)]
pub struct ProgressArgs {
    pub resource_id: i64,
    /// not_started / in_progress / completed / skipped
    #[arg(long)]
    pub status: ProgressStatus,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub favorite: Option<bool>,
}

fn parse_answer(value: &str) -> Result<(i64, i64), String> {
    let (question, option) = value
        .split_once(':')
        .ok_or_else(|| format!("格式应为 题目ID:选项ID，收到 {}", value))?;
    let question = question.trim().parse().map_err(|_| format!("无效题目ID: {}", question))?;
    let option = option.trim().parse().map_err(|_| format!("无效选项ID: {}", option))?;
    Ok((question, option))
}
