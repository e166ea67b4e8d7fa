//! 系统设置表：以键为主键的运行时参数

use sea_orm::entity::prelude::*;

use crate::models::system::entities::{SettingValueType, SystemSetting};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub description: Option<String>,
    pub updated_at: i64,
    pub updated_by: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_setting(self) -> SystemSetting {
        // 未知类型按文本处理
        let value_type = self.value_type.parse().unwrap_or(SettingValueType::String);
        SystemSetting {
            value_type,
            updated_at: super::from_timestamp(self.updated_at),
            key: self.key,
            value: self.value,
            description: self.description,
            updated_by: self.updated_by,
        }
    }
}
