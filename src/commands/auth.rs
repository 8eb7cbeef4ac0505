use anyhow::Result;
use careerpath_client::models::RegistrationPayload;
use careerpath_client::App;

use crate::cli::subcommands::auth::{LoginArgs, RegisterArgs};
use crate::cli::subcommands::AuthCommands;
use crate::cli::GlobalFlags;
use crate::output::{output, Prompt};

/// `careerpath auth <subcommand>`
pub async fn handle(action: &AuthCommands, app: &App, flags: &GlobalFlags) -> Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, app, flags).await,
        AuthCommands::Register(args) => register(args, app, flags).await,
        AuthCommands::Logout => {
            app.auth().logout().await?;
            println!("已登出");
            Ok(())
        }
        AuthCommands::Whoami => match app.session().user() {
            Some(user) => output(&user, flags, |u| {
                println!("{} <{}>", u.display_name(), u.email);
                println!("角色: {}", u.role);
                if !u.qualification.is_empty() {
                    println!("学历: {}", u.qualification);
                }
                if !u.interests.is_empty() {
                    println!("兴趣: {}", u.interests);
                }
            }),
            None => {
                println!("未登录");
                Ok(())
            }
        },
    }
}

async fn login(args: &LoginArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let password = Prompt::new().password(args.password.as_deref()).await?;
    let user = app.auth().login(&args.email, &password).await?;
    output(&user, flags, |u| {
        println!("欢迎, {} ({})", u.display_name(), u.role)
    })
}

async fn register(args: &RegisterArgs, app: &App, flags: &GlobalFlags) -> Result<()> {
    let password = Prompt::new().password(args.password.as_deref()).await?;
    let form = RegistrationPayload {
        email: args.email.trim().to_string(),
        password,
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        phone: args.phone.clone(),
        qualification: args.qualification.clone(),
        interests: args.interests.clone(),
    };
    let user = app.auth().register(&form).await?;
    output(&user, flags, |u| {
        println!("已注册 {}，请使用 `careerpath auth login` 登录", u.email)
    })
}
