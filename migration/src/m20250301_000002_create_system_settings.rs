use sea_orm_migration::prelude::*;

/// 初始设置：(键, 值, 类型, 说明)
const DEFAULT_SETTINGS: &[(&str, &str, &str, &str)] = &[
    ("app.system_name", "CEEP Guanambi", "string", "学校名称"),
    ("jwt.access_token_expiry", "60", "integer", "Access Token 有效期（分钟）"),
    ("jwt.refresh_token_expiry", "7", "integer", "Refresh Token 有效期（天）"),
    (
        "jwt.refresh_token_remember_me_expiry",
        "30",
        "integer",
        "记住我时 Refresh Token 有效期（天）",
    ),
    ("upload.max_size", "10485760", "integer", "实习材料单文件最大字节数"),
    (
        "upload.allowed_types",
        r#"[".pdf",".jpg",".jpeg",".png"]"#,
        "json_array",
        "实习材料允许的扩展名",
    ),
    ("grades.passing_average", "5", "decimal", "及格平均分"),
    ("grades.max_mark", "10", "decimal", "单项成绩上限"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Settings::Key).string().not_null().primary_key())
                    .col(ColumnDef::new(Settings::Value).text().not_null())
                    .col(ColumnDef::new(Settings::ValueType).string().not_null())
                    .col(ColumnDef::new(Settings::Description).text().null())
                    .col(ColumnDef::new(Settings::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Settings::UpdatedBy).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 每次修改设置都留痕
        manager
            .create_table(
                Table::create()
                    .table(SettingsAudit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SettingsAudit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SettingsAudit::SettingKey).string().not_null())
                    .col(ColumnDef::new(SettingsAudit::OldValue).text().null())
                    .col(ColumnDef::new(SettingsAudit::NewValue).text().not_null())
                    .col(ColumnDef::new(SettingsAudit::ChangedBy).big_integer().not_null())
                    .col(ColumnDef::new(SettingsAudit::ChangedAt).big_integer().not_null())
                    .col(ColumnDef::new(SettingsAudit::IpAddress).string().null())
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_settings_audit_key", SettingsAudit::SettingKey),
            ("idx_settings_audit_changed_at", SettingsAudit::ChangedAt),
            ("idx_settings_audit_changed_by", SettingsAudit::ChangedBy),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(SettingsAudit::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let mut insert = Query::insert();
        insert.into_table(Settings::Table).columns([
            Settings::Key,
            Settings::Value,
            Settings::ValueType,
            Settings::Description,
            Settings::UpdatedAt,
        ]);
        for &(key, value, value_type, description) in DEFAULT_SETTINGS {
            insert.values_panic([
                key.into(),
                value.into(),
                value_type.into(),
                description.into(),
                now.into(),
            ]);
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SettingsAudit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Settings {
    #[sea_orm(iden = "system_settings")]
    Table,
    Key,
    Value,
    ValueType,
    Description,
    UpdatedAt,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum SettingsAudit {
    #[sea_orm(iden = "system_settings_audit")]
    Table,
    Id,
    SettingKey,
    OldValue,
    NewValue,
    ChangedBy,
    ChangedAt,
    IpAddress,
}
