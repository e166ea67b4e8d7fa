//! 系统设置与审计日志存储操作

use super::{SeaOrmStorage, db_error, normalize_page};
use crate::entity::system_settings::{ActiveModel, Column, Entity as Settings};
use crate::entity::system_settings_audit::{
    ActiveModel as AuditActiveModel, Column as AuditColumn, Entity as SettingsAudit,
};
use crate::errors::{CeepSystemError, Result};
use crate::models::{
    common::PaginationInfo,
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub(crate) async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = Settings::find()
            .order_by_asc(Column::Key)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询系统设置失败", e))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    pub(crate) async fn get_setting_by_key_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = Settings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询系统设置失败", e))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    /// 修改设置并写入审计日志，两者在同一事务中提交
    pub(crate) async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let existing = Settings::find_by_id(key.to_string())
            .one(&txn)
            .await
            .map_err(|e| db_error("查询系统设置失败", e))?
            .ok_or_else(|| CeepSystemError::not_found(format!("配置项不存在: {key}")))?;

        let audit = AuditActiveModel {
            setting_key: Set(key.to_string()),
            old_value: Set(Some(existing.value.clone())),
            new_value: Set(value.to_string()),
            changed_by: Set(user_id),
            changed_at: Set(now),
            ip_address: Set(ip_address),
            ..Default::default()
        };

        let mut active: ActiveModel = existing.into();
        active.value = Set(value.to_string());
        active.updated_at = Set(now);
        active.updated_by = Set(Some(user_id));

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| db_error("更新系统设置失败", e))?;
        audit
            .insert(&txn)
            .await
            .map_err(|e| db_error("写入设置审计失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(updated.into_setting())
    }

    /// 审计日志，最新的在前
    pub(crate) async fn list_setting_audits_impl(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = SettingsAudit::find();
        if let Some(key) = query.key {
            select = select.filter(AuditColumn::SettingKey.eq(key));
        }

        let paginator = select
            .order_by_desc(AuditColumn::ChangedAt)
            .order_by_desc(AuditColumn::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("统计审计日志失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("统计审计日志失败", e))?;
        let audits = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询审计日志失败", e))?;

        Ok(SettingAuditListResponse {
            audits: audits.into_iter().map(|a| a.into_audit()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
