use crate::error::{AppResult, AuthError};
use crate::models::{Role, User};
use crate::session::Session;

/// 按角色拦截命令；未登录或角色不符时报错
pub fn require_role(session: &Session, required: Role) -> AppResult<User> {
    let user = session.user().ok_or(AuthError::NotLoggedIn)?;
    if user.role != required {
        return Err(AuthError::Forbidden {
            required,
            actual: user.role,
        }
        .into());
    }
    Ok(user)
}
