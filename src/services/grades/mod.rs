pub mod assignments;
pub mod report_card;
pub mod save;
pub mod sheet;
pub mod student;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{GradeSheetQuery, SaveGradeRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 当前教师的任课
    pub async fn list_own_assignments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        assignments::list_own_assignments(self, request).await
    }

    // 与任课匹配的班级
    pub async fn list_assignment_sections(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::list_assignment_sections(self, assignment_id, request).await
    }

    pub async fn get_sheet(
        &self,
        query: GradeSheetQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, query, request).await
    }

    pub async fn save_grade(
        &self,
        data: SaveGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        save::save_grade(self, data, request).await
    }

    pub async fn get_student_details(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::get_student_details(self, student_id, request).await
    }

    // 学生成绩报告单
    pub async fn get_report_card(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        report_card::get_report_card(self, request).await
    }
}
