use actix_web::{HttpResponse, Result as ActixResult, http::header};
use std::path::Path;
use std::sync::Arc;

use super::extension_of;
use crate::config::AppConfig;
use crate::errors::CeepSystemError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error;
use crate::storage::Storage;
use crate::utils::content_type_for;

/// 按 token 返回文件内容，使用登记时的原始文件名
pub async fn serve_file(storage: &Arc<dyn Storage>, token: &str) -> ActixResult<HttpResponse> {
    let Some(file) = storage
        .get_file_by_token(token)
        .await
        .map_err(storage_error("查询文件失败"))?
    else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        )));
    };

    let file_path = Path::new(&AppConfig::get().upload.dir).join(&file.stored_name);
    let buf = match std::fs::read(&file_path) {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("File {} missing on disk: {}", file.token, file_path.display());
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            tracing::error!("{}", CeepSystemError::file_operation(format!("{e}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let disposition_name = file.original_name.replace('"', "");
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_TYPE,
            content_type_for(&extension_of(&file.original_name)),
        ))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{disposition_name}\""),
        ))
        .body(buf))
}
