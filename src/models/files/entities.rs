use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 本地磁盘上的上传文件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct StoredFile {
    // 文件的唯一标识符
    pub token: String,
    // 原始文件名
    pub original_name: String,
    // 磁盘上的文件名
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub stored_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 文件类型
    pub file_type: String,
    // 上传者
    pub user_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
