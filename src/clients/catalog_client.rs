/// 目录管理 API 客户端（管理员）
///
/// 公司分类、公司、岗位推荐、学习资源
use std::path::Path;
use std::sync::Arc;

use reqwest::Method;
use tokio::fs;
use tracing::info;

use crate::error::{AppError, AppResult, FileError};
use crate::infrastructure::{HttpExecutor, Upload};
use crate::models::{
    CareerResource, Company, CompanyCategory, CompanyCategoryUpdate, CompanyUpdate,
    JobRecommendation, JobUpdate, NewCompany, NewCompanyCategory, NewJob, NewResourceCategory,
    ResourceCategory, ResourceForm,
};
use crate::utils::validation::{validate_category_name, validate_company};

/// 推荐向导与公司筛选依赖的目录接口
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn list_companies(&self, category_id: Option<i64>) -> AppResult<Vec<Company>>;
    async fn list_company_categories(&self) -> AppResult<Vec<CompanyCategory>>;
    async fn list_jobs(&self, recommendation_id: i64) -> AppResult<Vec<JobRecommendation>>;
    async fn create_job(&self, job: &NewJob) -> AppResult<JobRecommendation>;
}

pub struct CatalogClient {
    http: Arc<HttpExecutor>,
}

impl CatalogClient {
    pub fn new(http: Arc<HttpExecutor>) -> Self {
        Self { http }
    }

    // ========== 公司分类 ==========

    pub async fn create_company_category(&self, category: &NewCompanyCategory) -> AppResult<CompanyCategory> {
        validate_category_name(&category.name)?;
        self.http
            .post_json("admin/company-categories/", category, "Failed to save category.")
            .await
    }

    pub async fn update_company_category(
        &self,
        category_id: i64,
        update: &CompanyCategoryUpdate,
    ) -> AppResult<CompanyCategory> {
        self.http
            .patch_json(
                &format!("admin/company-categories/{}/", category_id),
                update,
                "Failed to save category.",
            )
            .await
    }

    /// 删除分类后其下公司变为未分类
    pub async fn delete_company_category(&self, category_id: i64) -> AppResult<()> {
        self.http
            .delete(
                &format!("admin/company-categories/{}/", category_id),
                "Failed to delete category.",
            )
            .await
    }

    // ========== 公司 ==========

    pub async fn create_company(&self, company: &NewCompany) -> AppResult<Company> {
        validate_company(company)?;
        self.http
            .post_json("admin/companies/", company, "Failed to create company.")
            .await
    }

    pub async fn update_company(&self, company_id: i64, update: &CompanyUpdate) -> AppResult<Company> {
        self.http
            .patch_json(
                &format!("admin/companies/{}/", company_id),
                update,
                "Failed to save company.",
            )
            .await
    }

    pub async fn delete_company(&self, company_id: i64) -> AppResult<()> {
        self.http
            .delete(
                &format!("admin/companies/{}/", company_id),
                "Failed to delete company.",
            )
            .await
    }

    // ========== 岗位 ==========

    pub async fn update_job(&self, job_id: i64, update: &JobUpdate) -> AppResult<JobRecommendation> {
        self.http
            .patch_json(
                &format!("admin/job-recommendations/{}/", job_id),
                update,
                "Failed to create job recommendation.",
            )
            .await
    }

    // ========== 学习资源 ==========

    pub async fn list_resource_categories(&self) -> AppResult<Vec<ResourceCategory>> {
        self.http
            .get_json("admin/resource-categories/", &[], "Unable to load resources.")
            .await
    }

    pub async fn create_resource_category(&self, category: &NewResourceCategory) -> AppResult<ResourceCategory> {
        validate_category_name(&category.name)?;
        self.http
            .post_json("admin/resource-categories/", category, "Failed to create category.")
            .await
    }

    pub async fn list_resources(
        &self,
        recommendation_id: Option<i64>,
        category_id: Option<i64>,
    ) -> AppResult<Vec<CareerResource>> {
        let mut params = Vec::new();
        if let Some(id) = recommendation_id {
            params.push(("recommendation_id".to_string(), id.to_string()));
        }
        if let Some(id) = category_id {
            params.push(("category_id".to_string(), id.to_string()));
        }
        self.http
            .get_json("admin/resources/", &params, "Unable to load resources.")
            .await
    }

    /// multipart 新建资源，`form.file` 存在时一并上传
    pub async fn create_resource(&self, form: &ResourceForm) -> AppResult<CareerResource> {
        let upload = read_upload(form).await?;
        let resource: CareerResource = self
            .http
            .send_multipart(
                Method::POST,
                "admin/resources/",
                &form.text_fields(),
                upload.as_ref(),
                "Failed to save resource.",
            )
            .await?;
        info!("✓ 已创建资源 #{}: {}", resource.id, resource.title);
        Ok(resource)
    }

    pub async fn update_resource(&self, resource_id: i64, form: &ResourceForm) -> AppResult<CareerResource> {
        let upload = read_upload(form).await?;
        self.http
            .send_multipart(
                Method::PATCH,
                &format!("admin/resources/{}/", resource_id),
                &form.text_fields(),
                upload.as_ref(),
                "Failed to save resource.",
            )
            .await
    }

    /// 后端为软删除
    pub async fn delete_resource(&self, resource_id: i64) -> AppResult<()> {
        self.http
            .delete(
                &format!("admin/resources/{}/", resource_id),
                "Failed to delete resource.",
            )
            .await
    }
}

impl CatalogApi for CatalogClient {
    async fn list_companies(&self, category_id: Option<i64>) -> AppResult<Vec<Company>> {
        let params: Vec<(String, String)> = category_id
            .map(|id| vec![("category_id".to_string(), id.to_string())])
            .unwrap_or_default();
        self.http
            .get_json("admin/companies/", &params, "Failed to load companies.")
            .await
    }

    async fn list_company_categories(&self) -> AppResult<Vec<CompanyCategory>> {
        self.http
            .get_json("admin/company-categories/", &[], "Failed to load company categories.")
            .await
    }

    async fn list_jobs(&self, recommendation_id: i64) -> AppResult<Vec<JobRecommendation>> {
        let params = vec![("recommendation_id".to_string(), recommendation_id.to_string())];
        self.http
            .get_json("admin/job-recommendations/", &params, "Unable to load data.")
            .await
    }

    async fn create_job(&self, job: &NewJob) -> AppResult<JobRecommendation> {
        self.http
            .post_json("admin/job-recommendations/", job, "Failed to create job recommendation.")
            .await
    }
}

async fn read_upload(form: &ResourceForm) -> AppResult<Option<Upload>> {
    let Some(path) = form.file.as_deref() else {
        return Ok(None);
    };
    Ok(Some(upload_from_path(path).await?))
}

async fn upload_from_path(path: &Path) -> AppResult<Upload> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(FileError::NotFound { path: display }.into());
    }
    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Upload {
        field: "file",
        file_name,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_uses_file_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadmap.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let upload = upload_from_path(&path).await.unwrap();
        assert_eq!(upload.field, "file");
        assert_eq!(upload.file_name, "roadmap.pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn form_without_file_has_no_upload() {
        let form = ResourceForm {
            title: Some("Intro to SQL".to_string()),
            ..Default::default()
        };
        assert!(read_upload(&form).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_upload_is_reported() {
        let form = ResourceForm {
            file: Some("/definitely/not/here.pdf".into()),
            ..Default::default()
        };
        let err = read_upload(&form).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
