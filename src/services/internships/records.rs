use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::{InternshipService, actor_of, load_internship, student_eixo_for};
use crate::errors::CeepSystemError;
use crate::models::{
    ApiResponse, ErrorCode,
    internships::{
        requests::{
            CreateInternshipRequest, InternshipListParams, InternshipListQuery,
            UpdateInternshipRequest, validate_period,
        },
        responses::{InternshipDetail, InternshipDetailResponse},
        workflow::{self, DocumentContext},
    },
    users::entities::UserRole,
};
use crate::services::{current_user, storage_error};
use crate::storage::Storage;
use crate::utils::validate::validate_email;

fn invalid(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::InternshipInvalid, message))
}

/// 校验实习参与者和日期，返回需要直接回复的错误
async fn check_record(
    storage: &Arc<dyn Storage>,
    student_id: Option<i64>,
    advisor_id: Option<i64>,
    period: (chrono::NaiveDate, chrono::NaiveDate),
    supervisor: [&str; 3],
    supervisor_email: Option<&str>,
) -> ActixResult<Option<HttpResponse>> {
    if let Err(msg) = validate_period(period.0, period.1) {
        return Ok(Some(invalid(msg)));
    }
    if supervisor.iter().any(|field| field.trim().is_empty()) {
        return Ok(Some(invalid("Supervisor name, company and position are required")));
    }
    if let Some(email) = supervisor_email
        && validate_email(email).is_err()
    {
        return Ok(Some(invalid("Invalid supervisor email")));
    }

    let roles = [(student_id, UserRole::Student), (advisor_id, UserRole::Teacher)];
    for (id, role) in roles {
        let Some(id) = id else { continue };
        let user = storage
            .get_user_by_id(id)
            .await
            .map_err(storage_error("获取用户失败"))?;
        match user {
            None => {
                return Ok(Some(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    format!("User {id} not found"),
                ))));
            }
            Some(user) if user.role != role => {
                return Ok(Some(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserRoleMismatch,
                    format!("User {id} is not a {role}"),
                ))));
            }
            Some(_) => {}
        }
    }
    Ok(None)
}

fn clean_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

/// 按角色限定范围的实习列表
pub async fn list_internships(
    service: &InternshipService,
    request: &HttpRequest,
    params: InternshipListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let mut query = InternshipListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        status: params.status,
        ..Default::default()
    };

    match user.role {
        UserRole::Admin | UserRole::Leadership => {}
        UserRole::Teacher => query.advisor_id = Some(user.id),
        UserRole::Student => query.student_id = Some(user.id),
        UserRole::Staff => {
            // 未设置方向的行政人员看不到任何档案
            query.student_ids = Some(match user.eixo {
                Some(eixo) => storage
                    .list_student_ids_by_eixo(eixo)
                    .await
                    .map_err(storage_error("获取方向学生失败"))?,
                None => Vec::new(),
            });
        }
    }

    let response = storage
        .list_internships(query)
        .await
        .map_err(storage_error("获取实习列表失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Internships retrieved successfully",
    )))
}

/// 实习详情，附带当前用户可见的文档
pub async fn get_internship(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = actor_of(&current_user(request)?);

    let internship = load_internship(&storage, id).await?;
    let student_eixo = student_eixo_for(&storage, &actor, internship.student_id).await?;
    let ctx = DocumentContext {
        internship: &internship,
        student_eixo,
    };
    if !workflow::can_view_record(&ctx, &actor) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You cannot access this internship",
        )));
    }

    let documents = storage
        .list_internship_documents(internship.id)
        .await
        .map_err(storage_error("获取实习文档失败"))?
        .into_iter()
        .filter(|doc| workflow::can_view(doc, &ctx, &actor))
        .collect();

    let user_ids: Vec<i64> = std::iter::once(internship.student_id)
        .chain(internship.advisor_id)
        .collect();
    let names: HashMap<i64, String> = storage
        .get_users_by_ids(&user_ids)
        .await
        .map_err(storage_error("获取用户失败"))?
        .into_iter()
        .map(|u| (u.id, u.full_name()))
        .collect();
    let student_name = names
        .get(&internship.student_id)
        .cloned()
        .unwrap_or_default();
    let advisor_name = internship
        .advisor_id
        .and_then(|advisor| names.get(&advisor).cloned());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        InternshipDetailResponse {
            internship: InternshipDetail {
                internship,
                student_name,
                advisor_name,
            },
            documents,
        },
        "Internship retrieved successfully",
    )))
}

pub async fn create_internship(
    service: &InternshipService,
    request: &HttpRequest,
    mut data: CreateInternshipRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    data.supervisor_email = clean_email(data.supervisor_email);
    if let Some(rejection) = check_record(
        &storage,
        Some(data.student_id),
        data.advisor_id,
        (data.start_date, data.end_date),
        [
            data.supervisor_name.as_str(),
            data.supervisor_company.as_str(),
            data.supervisor_position.as_str(),
        ],
        data.supervisor_email.as_deref(),
    )
    .await?
    {
        return Ok(rejection);
    }

    match storage.create_internship(data).await {
        Ok(internship) => {
            tracing::info!(
                "Internship {} created for student {} by user {}",
                internship.id,
                internship.student_id,
                user.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                internship,
                "Internship created successfully",
            )))
        }
        Err(CeepSystemError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::InternshipAlreadyExists,
                "Student already has an internship",
            ),
        )),
        Err(e) => Err(storage_error("创建实习档案失败")(e)),
    }
}

pub async fn update_internship(
    service: &InternshipService,
    request: &HttpRequest,
    id: i64,
    mut data: UpdateInternshipRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    data.supervisor_email = clean_email(data.supervisor_email);
    if let Some(rejection) = check_record(
        &storage,
        None,
        data.advisor_id,
        (data.start_date, data.end_date),
        [
            data.supervisor_name.as_str(),
            data.supervisor_company.as_str(),
            data.supervisor_position.as_str(),
        ],
        data.supervisor_email.as_deref(),
    )
    .await?
    {
        return Ok(rejection);
    }

    match storage
        .update_internship(id, data)
        .await
        .map_err(storage_error("更新实习档案失败"))?
    {
        Some(internship) => {
            tracing::info!("Internship {} updated by user {}", internship.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                internship,
                "Internship updated successfully",
            )))
        }
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InternshipNotFound,
            "Internship not found",
        ))),
    }
}
