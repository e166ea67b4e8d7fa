//! 文件存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::files::{ActiveModel, Column, Entity as Files};
use crate::errors::Result;
use crate::models::files::entities::StoredFile;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 记录已写入磁盘的上传文件
    pub async fn create_file_impl(&self, file: StoredFile) -> Result<StoredFile> {
        let model = ActiveModel {
            token: Set(file.token),
            original_name: Set(file.original_name),
            stored_name: Set(file.stored_name),
            file_size: Set(file.file_size),
            file_type: Set(file.file_type),
            user_id: Set(file.user_id),
            uploaded_at: Set(file.uploaded_at.timestamp()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("上传文件记录失败", e))?;

        Ok(result.into_file())
    }

    /// 通过 token 获取文件
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<StoredFile>> {
        let result = Files::find()
            .filter(Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询文件失败", e))?;

        Ok(result.map(|m| m.into_file()))
    }
}
