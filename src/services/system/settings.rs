use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DynamicConfig, SystemService};
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::{SettingAuditQuery, UpdateSettingRequest},
        responses::{AdminSettingsListResponse, SettingResponse, SystemSettingsResponse},
    },
};
use crate::services::{current_user, storage_error};

/// 获取系统设置（只读）
pub async fn get_settings(
    service: &SystemService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let response = SystemSettingsResponse {
        system_name: DynamicConfig::system_name().await,
        passing_average: DynamicConfig::passing_average().await,
        max_mark: DynamicConfig::max_mark().await,
        max_file_size: DynamicConfig::upload_max_size().await as u64,
        allowed_file_types: DynamicConfig::upload_allowed_types().await,
        environment: config.app.environment.clone(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}

/// 获取所有可调整的配置项
pub async fn get_admin_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let settings = storage
        .list_all_settings()
        .await
        .map_err(storage_error("获取配置列表失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminSettingsListResponse { settings },
        "Admin settings retrieved successfully",
    )))
}

/// 更新单个配置
///
/// 只接受已知键，值按键的类型校验；成功后同步刷新动态配置缓存。
pub async fn update_setting(
    service: &SystemService,
    request: &HttpRequest,
    key: String,
    body: UpdateSettingRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let known = match key.parse::<KnownSettingKey>() {
        Ok(known) => known,
        Err(msg) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::<()>::error_empty(ErrorCode::SettingNotFound, msg)));
        }
    };

    let value = body.value.trim();
    if let Err(msg) = known.value_type().validate(value) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_empty(ErrorCode::SettingInvalid, msg)));
    }

    // 分数相关的配置必须为正数
    if matches!(
        known,
        KnownSettingKey::GradesPassingAverage | KnownSettingKey::GradesMaxMark
    ) && value.parse::<f64>().map_or(true, |v| v <= 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::SettingInvalid,
            "Grade settings must be positive",
        )));
    }

    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    let setting = storage
        .update_setting(known.as_str(), value, user.id, ip_address)
        .await
        .map_err(storage_error("更新配置失败"))?;

    DynamicConfig::update(known.as_str(), value).await;
    tracing::info!("Setting {} updated by user {}", known.as_str(), user.id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingResponse { setting },
        "Setting updated successfully",
    )))
}

/// 获取审计日志
pub async fn get_setting_audits(
    service: &SystemService,
    request: &HttpRequest,
    query: SettingAuditQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let audits = storage
        .list_setting_audits(query)
        .await
        .map_err(storage_error("获取审计日志失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        audits,
        "Setting audits retrieved successfully",
    )))
}
