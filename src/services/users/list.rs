use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::UserService;
use crate::models::{
    ApiResponse,
    users::{
        entities::UserRole,
        requests::{UserListParams, UserListQuery},
        responses::{StudentListItem, StudentListResponse},
    },
};
use crate::services::storage_error;

fn to_query(roles: &[UserRole], params: UserListParams) -> UserListQuery {
    UserListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        roles: roles.to_vec(),
        status: params.status,
        search: params.search,
    }
}

pub async fn list_users_by_roles(
    service: &UserService,
    roles: &[UserRole],
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let response = storage
        .list_users_with_pagination(to_query(roles, query))
        .await
        .map_err(storage_error("Failed to retrieve user list"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "User list retrieved successfully",
    )))
}

/// 学生列表附带当前班级
pub async fn list_students(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let page = storage
        .list_users_with_pagination(to_query(&[UserRole::Student], query))
        .await
        .map_err(storage_error("Failed to retrieve student list"))?;

    let ids: Vec<i64> = page.items.iter().map(|u| u.id).collect();
    let mut sections: HashMap<i64, _> = storage
        .get_current_sections(&ids)
        .await
        .map_err(storage_error("获取学生班级失败"))?
        .into_iter()
        .collect();

    let items = page
        .items
        .into_iter()
        .map(|user| StudentListItem {
            class_section: sections.remove(&user.id),
            user,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentListResponse {
            items,
            pagination: page.pagination,
        },
        "Student list retrieved successfully",
    )))
}
