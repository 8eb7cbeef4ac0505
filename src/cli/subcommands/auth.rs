use clap::{Args, Subcommand};

/// 账号命令
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// 登录并保存令牌
    Login(LoginArgs),
    /// 注册学生账号
    Register(RegisterArgs),
    /// 清除本地令牌
    Logout,
    /// 显示当前用户
    Whoami,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    /// 不提供时读取 CAREERPATH_PASSWORD，再不行从标准输入读取
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    /// 至少 8 个字符
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    /// 例如 +911234567890
    #[arg(long)]
    pub phone: String,
    /// 学历，例如 plus_two
    #[arg(long)]
    pub qualification: String,
    /// 兴趣方向
    #[arg(long)]
    pub interests: String,
}
