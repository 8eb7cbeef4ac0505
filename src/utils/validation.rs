//! 表单校验
//!
//! 与后端保持一致的客户端校验，校验失败时不发请求

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::{NewCompany, NewQuestionTemplate, RegistrationPayload};

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z\s'-]{1,48}$").expect("name pattern"))
}

fn phone_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("phone pattern"))
}

/// 去掉首尾空白后是否为空
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// 学生注册校验：姓名 → 手机号 → 必填项 → 密码长度
pub fn validate_registration(form: &RegistrationPayload) -> Result<(), ValidationError> {
    if !name_pattern().is_match(&form.first_name) || !name_pattern().is_match(&form.last_name) {
        return Err(ValidationError::InvalidName);
    }
    if !phone_pattern().is_match(&form.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    let required = [
        &form.email,
        &form.password,
        &form.qualification,
        &form.interests,
    ];
    if required.iter().any(|f| is_blank(f)) {
        return Err(ValidationError::MissingFields);
    }
    if form.password.chars().count() < 8 {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// 分类名必填（题库、公司、资源分类通用）
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::CategoryNameRequired);
    }
    Ok(())
}

pub fn validate_company(company: &NewCompany) -> Result<(), ValidationError> {
    if is_blank(&company.name) || is_blank(&company.email) {
        return Err(ValidationError::CompanyIncomplete);
    }
    Ok(())
}

/// 模板：题干必填，至少一个选项且每个选项都有文本
pub fn validate_template(template: &NewQuestionTemplate) -> Result<(), ValidationError> {
    if is_blank(&template.prompt) {
        return Err(ValidationError::TemplatePromptRequired);
    }
    if template.options.is_empty() || template.options.iter().any(|o| is_blank(&o.label)) {
        return Err(ValidationError::TemplateOptionLabelMissing);
    }
    Ok(())
}
