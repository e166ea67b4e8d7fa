use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use super::{UploadOutcome, extension_of};
use crate::config::AppConfig;
use crate::errors::CeepSystemError;
use crate::models::files::entities::StoredFile;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{current_user, storage_error};
use crate::storage::Storage;
use crate::utils::validate_magic_bytes;

fn rejected(code: ErrorCode, message: &str) -> UploadOutcome {
    Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)))
}

fn failed(message: &str) -> UploadOutcome {
    Err(HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
        ErrorCode::FileUploadFailed,
        message,
    )))
}

/// 读取 multipart 中名为 file 的单个文件，写入上传目录并登记
///
/// `required_extension` 为 Some 时只接受该扩展名（仍受允许类型约束）。
pub async fn receive_upload(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    mut payload: Multipart,
    required_extension: Option<&str>,
) -> ActixResult<UploadOutcome> {
    let user = current_user(request)?;

    // 静态配置从 AppConfig，动态配置从 DynamicConfig
    let upload_dir = &AppConfig::get().upload.dir;
    let max_size = DynamicConfig::upload_max_size().await;
    let allowed_types = DynamicConfig::upload_allowed_types().await;

    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CeepSystemError::file_operation(format!("{e}")));
        return Ok(failed("Failed to create upload directory"));
    }

    let mut original_name = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut stored_name = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(rejected(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let extension = extension_of(&original_name);
        if !allowed_types.iter().any(|t| t.to_lowercase() == extension)
            || required_extension.is_some_and(|required| required != extension)
        {
            return Ok(rejected(ErrorCode::FileTypeNotAllowed, "File type not allowed"));
        }

        // MIME 类型只做记录，不参与校验
        file_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_default();

        stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), Uuid::new_v4());
        let file_path = Path::new(upload_dir).join(&stored_name);
        let mut f = match fs::File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", CeepSystemError::file_operation(format!("{e}")));
                return Ok(failed("Failed to create file"));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            // 首个分块校验魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&file_path);
                    return Ok(rejected(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&file_path);
                return Ok(rejected(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                ));
            }
            f.write_all(&data)?;
        }

        if total_size == 0 {
            let _ = fs::remove_file(&file_path);
            return Ok(rejected(ErrorCode::FileTypeNotAllowed, "Uploaded file is empty"));
        }
        file_size = total_size as i64;
    }

    if !file_uploaded {
        return Ok(rejected(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    }

    let stored = StoredFile {
        token: Uuid::new_v4().to_string(),
        original_name,
        stored_name: stored_name.clone(),
        file_size,
        file_type,
        user_id: user.id,
        uploaded_at: chrono::Utc::now(),
    };

    match storage.create_file(stored).await {
        Ok(file) => Ok(Ok(file)),
        Err(e) => {
            let _ = fs::remove_file(Path::new(upload_dir).join(&stored_name));
            Err(storage_error("登记上传文件失败")(e))
        }
    }
}
