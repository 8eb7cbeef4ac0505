pub mod admin;
pub mod auth;
pub mod catalog;
pub mod student;

use careerpath_client::App;

use crate::cli::{Commands, GlobalFlags};

/// 把解析好的命令交给对应的处理模块
pub async fn dispatch(command: &Commands, app: &App, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, app, flags).await,
        Commands::Student { action } => student::handle(action, app, flags).await,
        Commands::Admin { action } => admin::handle(action, app, flags).await,
        Commands::Catalog { action } => catalog::handle(action, app, flags).await,
    }
}
