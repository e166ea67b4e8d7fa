pub mod create;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest};
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

/// 科目名称与学时校验
pub(crate) fn validate_subject(name: Option<&str>, workload_hours: Option<i32>) -> Result<(), &'static str> {
    if let Some(name) = name {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > 100 {
            return Err("Subject name must be between 1 and 100 characters");
        }
    }
    if let Some(hours) = workload_hours
        && !(1..=2000).contains(&hours)
    {
        return Err("Workload must be between 1 and 2000 hours");
    }
    Ok(())
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request).await
    }

    // 科目详情：开设班级与任课教师
    pub async fn get_subject(&self, subject_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_subject(self, subject_id, request).await
    }

    pub async fn create_subject(
        &self,
        data: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, data, request).await
    }

    pub async fn update_subject(
        &self,
        subject_id: i64,
        data: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, subject_id, data, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subject() {
        assert!(validate_subject(Some("Matemática"), Some(40)).is_ok());
        assert!(validate_subject(None, None).is_ok());
        assert!(validate_subject(Some("  "), None).is_err());
        assert!(validate_subject(None, Some(0)).is_err());
    }
}
