pub mod create;
pub mod detail;
pub mod list;
pub mod options;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::class_sections::requests::{
    ClassOptionsQuery, ClassSectionListQuery, CreateClassSectionRequest,
};
use crate::storage::Storage;

pub struct ClassSectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassSectionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_sections(
        &self,
        query: ClassSectionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_sections(self, query, request).await
    }

    // 班级详情，附带学生名单
    pub async fn get_section(&self, section_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_section(self, section_id, request).await
    }

    pub async fn create_section(
        &self,
        data: CreateClassSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_section(self, data, request).await
    }

    // 级联选择：年级/模块、班次、班级
    pub async fn get_options(
        &self,
        query: ClassOptionsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        options::get_options(self, query, request).await
    }
}
