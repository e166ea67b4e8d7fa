pub mod common;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    CreateStaffRequest, CreateStudentRequest, CreateTeacherRequest, UpdateStaffRequest,
    UpdateStudentRequest, UpdateTeacherRequest, UserListParams,
};
use crate::storage::Storage;

/// 教师、学生、行政人员三类账号的管理
pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

/// 行政人员包括职员和领导层
pub(crate) const STAFF_ROLES: &[UserRole] = &[UserRole::Staff, UserRole::Leadership];

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 教师
    pub async fn list_teachers(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users_by_roles(self, &[UserRole::Teacher], query, request).await
    }

    pub async fn get_teacher(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_teacher(self, user_id, request).await
    }

    pub async fn create_teacher(
        &self,
        data: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, data, request).await
    }

    pub async fn update_teacher(
        &self,
        user_id: i64,
        data: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, user_id, data, request).await
    }

    pub async fn delete_teacher(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user_with_roles(self, user_id, &[UserRole::Teacher], request).await
    }

    // 学生
    pub async fn list_students(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, user_id, request).await
    }

    pub async fn create_student(
        &self,
        data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, data, request).await
    }

    pub async fn update_student(
        &self,
        user_id: i64,
        data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, user_id, data, request).await
    }

    pub async fn delete_student(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user_with_roles(self, user_id, &[UserRole::Student], request).await
    }

    // 行政人员
    pub async fn list_staff(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users_by_roles(self, STAFF_ROLES, query, request).await
    }

    pub async fn get_staff(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_staff(self, user_id, request).await
    }

    pub async fn create_staff(
        &self,
        data: CreateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_staff(self, data, request).await
    }

    pub async fn update_staff(
        &self,
        user_id: i64,
        data: UpdateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_staff(self, user_id, data, request).await
    }

    pub async fn delete_staff(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user_with_roles(self, user_id, STAFF_ROLES, request).await
    }
}
