use std::path::PathBuf;

use careerpath_client::models::RequestStatus;
use clap::{Args, Subcommand};

/// 管理员命令
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// 统计与待处理申请
    Dashboard,
    /// 测评申请列表
    Requests(RequestListArgs),
    /// 为申请创建试卷（已存在时返回原试卷）
    CreateTest {
        request_id: i64,
    },
    /// 查看试卷
    Test(TestTargetArgs),
    /// 出卷：添加题目、导入题库、分配
    Build(BuildArgs),
    /// 已完成的试卷
    Completed,
    /// 查看学生答卷
    Answers {
        test_id: i64,
    },
    /// 为已完成试卷出具职业推荐
    Recommend(RecommendArgs),
    /// 已出具的推荐
    Recommendations,
    /// 题库分类
    Categories,
    /// 题库模板
    Templates(TemplateListArgs),
    /// 新建题库分类
    CreateCategory(CreateCategoryArgs),
    /// 新建题库模板
    CreateTemplate(CreateTemplateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RequestListArgs {
    /// pending / in_progress / assigned / completed
    #[arg(long)]
    pub status: Option<RequestStatus>,
}

/// 试卷 ID 或申请 ID 二选一
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct TestTargetArgs {
    #[arg(long)]
    pub test: Option<i64>,
    #[arg(long)]
    pub request: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TestTargetArgs,
    /// TOML 题目文件
    #[arg(long)]
    pub questions: Option<PathBuf>,
    /// 导入整个题库分类
    #[arg(long)]
    pub category: Option<i64>,
    /// 导入指定模板，可重复
    #[arg(long = "template")]
    pub templates: Vec<i64>,
    /// 完成后分配给学生
    #[arg(long)]
    pub assign: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RecommendArgs {
    pub test_id: i64,
    /// TOML 推荐文件（职业、摘要、路线图、岗位）
    #[arg(long)]
    pub plan: PathBuf,
    /// 额外勾选的公司，可重复
    #[arg(long = "company")]
    pub companies: Vec<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct TemplateListArgs {
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub tag: Option<String>,
    /// 包括停用的模板
    #[arg(long)]
    pub all: bool,
}

#[derive(Clone, Debug, Args)]
pub struct CreateCategoryArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateTemplateArgs {
    #[arg(long)]
    pub category: i64,
    #[arg(long)]
    pub prompt: String,
    /// 选项文本，可重复，按出现顺序编号
    #[arg(long = "option", required = true)]
    pub options: Vec<String>,
    #[arg(long)]
    pub order: Option<u32>,
}
