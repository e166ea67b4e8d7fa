//! 实习文档附件的上传与下载
//!
//! 文件写入本地上传目录，数据库只保存 token 与元数据。

pub mod download;
pub mod upload;

use actix_web::HttpResponse;
use std::path::Path;

pub use download::serve_file;
pub use upload::receive_upload;

/// 上传处理的结果：成功保存的文件，或需要直接返回给客户端的错误响应
pub type UploadOutcome = Result<crate::models::files::entities::StoredFile, HttpResponse>;

/// 小写带点号的扩展名，无扩展名时返回空串
pub(crate) fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("termo.PDF"), ".pdf");
        assert_eq!(extension_of("foto.final.jpeg"), ".jpeg");
        assert_eq!(extension_of("sem_extensao"), "");
    }
}
