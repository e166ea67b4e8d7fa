use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::UserService;
use super::common::{add_assignments, client_ip, new_account, validated_personal};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::SetEnrollment,
    users::{
        entities::{User, UserRole},
        requests::{CreateStaffRequest, CreateStudentRequest, CreateTeacherRequest},
        responses::CreatedUserResponse,
    },
};
use crate::services::{current_user, storage_error};
use crate::storage::Storage;

/// 后续步骤失败时删除刚创建的账号
async fn rollback_user(storage: &Arc<dyn Storage>, user: &User) {
    if let Err(e) = storage.delete_user(user.id).await {
        tracing::error!("Failed to roll back user {}: {}", user.username, e);
    }
}

fn created(user: User, temporary_password: String, message: &str) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(
        CreatedUserResponse {
            user,
            temporary_password,
        },
        message,
    ))
}

pub async fn create_teacher(
    service: &UserService,
    data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;
    let personal = validated_personal(data.personal)?;

    let (account, password) = new_account(UserRole::Teacher, None, personal)?;
    let user = storage
        .create_user(account)
        .await
        .map_err(storage_error("Teacher creation failed"))?;

    if let Err(e) = add_assignments(&storage, user.id, data.assignments).await {
        rollback_user(&storage, &user).await;
        return Err(e);
    }

    tracing::info!(
        "Admin {} created teacher {} from {}",
        admin.username,
        user.username,
        client_ip(request)
    );
    Ok(created(user, password, "Teacher created successfully"))
}

pub async fn create_student(
    service: &UserService,
    data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;
    let personal = validated_personal(data.personal)?;

    let section = storage
        .get_class_section_by_id(data.class_section_id)
        .await
        .map_err(storage_error("获取班级失败"))?;
    if section.is_none() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassSectionNotFound,
            "Class section not found",
        )));
    }

    let (account, password) = new_account(UserRole::Student, None, personal)?;
    let user = storage
        .create_user(account)
        .await
        .map_err(storage_error("Student creation failed"))?;

    let enrollment = storage
        .set_student_enrollment(SetEnrollment {
            student_id: user.id,
            class_section_id: data.class_section_id,
            enrolled_on: chrono::Utc::now().date_naive(),
        })
        .await;
    if let Err(e) = enrollment {
        rollback_user(&storage, &user).await;
        return Err(storage_error("Enrollment failed")(e));
    }

    tracing::info!(
        "Admin {} created student {} in section {} from {}",
        admin.username,
        user.username,
        data.class_section_id,
        client_ip(request)
    );
    Ok(created(user, password, "Student created successfully"))
}

pub async fn create_staff(
    service: &UserService,
    data: CreateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let admin = current_user(request)?;
    let personal = validated_personal(data.personal)?;

    let eixo = if data.kind.keeps_eixo() { data.eixo } else { None };
    let (account, password) = new_account(data.kind.role(), eixo, personal)?;
    let user = storage
        .create_user(account)
        .await
        .map_err(storage_error("Staff creation failed"))?;

    tracing::info!(
        "Admin {} created {} {} from {}",
        admin.username,
        user.role,
        user.username,
        client_ip(request)
    );
    Ok(created(user, password, "Staff member created successfully"))
}
