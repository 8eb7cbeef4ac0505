use clap::{Parser, Subcommand};

pub mod subcommands;

use subcommands::{AdminCommands, AuthCommands, CatalogCommands, StudentCommands};

/// `careerpath` 命令行
#[derive(Debug, Parser)]
#[command(name = "careerpath", version, about = "CareerPath 职业测评客户端")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 后端 API 根地址，覆盖 CAREERPATH_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// 输出 JSON 而不是文本
    #[arg(long, global = true)]
    pub json: bool,

    /// 详细日志（debug）
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags { json: self.json }
    }
}

/// 命令处理函数共用的全局选项
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalFlags {
    pub json: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// 登录、注册、登出
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// 学生：申请测评、答题、查看推荐和资源
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// 管理员：出卷、审阅、出具推荐
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// 管理员：公司、岗位、学习资源
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
}
