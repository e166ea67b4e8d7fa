use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 配置值类型
    #[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
    pub enum SettingValueType ("配置值类型") {
        String => ("string", "Texto"),
        Integer => ("integer", "Inteiro"),
        Decimal => ("decimal", "Decimal"),
        Boolean => ("boolean", "Booleano"),
        JsonArray => ("json_array", "Lista"),
    }
}

impl SettingValueType {
    /// 校验配置值是否符合类型
    pub fn validate(&self, value: &str) -> Result<(), String> {
        let ok = match self {
            SettingValueType::String => true,
            SettingValueType::Integer => value.parse::<i64>().is_ok(),
            SettingValueType::Decimal => value.parse::<f64>().is_ok_and(|v| v.is_finite()),
            SettingValueType::Boolean => matches!(value, "true" | "false"),
            SettingValueType::JsonArray => {
                serde_json::from_str::<Vec<String>>(value).is_ok()
            }
        };
        if ok {
            Ok(())
        } else {
            Err(format!("Value '{value}' is not a valid {self}"))
        }
    }
}

/// 已知配置键
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownSettingKey {
    SystemName,
    AccessTokenExpiry,
    RefreshTokenExpiry,
    RefreshTokenRememberMeExpiry,
    UploadMaxSize,
    UploadAllowedTypes,
    GradesPassingAverage,
    GradesMaxMark,
}

impl KnownSettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownSettingKey::SystemName => "app.system_name",
            KnownSettingKey::AccessTokenExpiry => "jwt.access_token_expiry",
            KnownSettingKey::RefreshTokenExpiry => "jwt.refresh_token_expiry",
            KnownSettingKey::RefreshTokenRememberMeExpiry => "jwt.refresh_token_remember_me_expiry",
            KnownSettingKey::UploadMaxSize => "upload.max_size",
            KnownSettingKey::UploadAllowedTypes => "upload.allowed_types",
            KnownSettingKey::GradesPassingAverage => "grades.passing_average",
            KnownSettingKey::GradesMaxMark => "grades.max_mark",
        }
    }

    pub fn value_type(&self) -> SettingValueType {
        match self {
            KnownSettingKey::SystemName => SettingValueType::String,
            KnownSettingKey::AccessTokenExpiry
            | KnownSettingKey::RefreshTokenExpiry
            | KnownSettingKey::RefreshTokenRememberMeExpiry
            | KnownSettingKey::UploadMaxSize => SettingValueType::Integer,
            KnownSettingKey::UploadAllowedTypes => SettingValueType::JsonArray,
            KnownSettingKey::GradesPassingAverage | KnownSettingKey::GradesMaxMark => {
                SettingValueType::Decimal
            }
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            KnownSettingKey::SystemName,
            KnownSettingKey::AccessTokenExpiry,
            KnownSettingKey::RefreshTokenExpiry,
            KnownSettingKey::RefreshTokenRememberMeExpiry,
            KnownSettingKey::UploadMaxSize,
            KnownSettingKey::UploadAllowedTypes,
            KnownSettingKey::GradesPassingAverage,
            KnownSettingKey::GradesMaxMark,
        ]
    }
}

impl std::str::FromStr for KnownSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownSettingKey::all()
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown setting key: {s}"))
    }
}

/// 系统设置实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSetting {
    pub key: String,
    pub value: String,
    pub value_type: SettingValueType,
    pub description: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub updated_by: Option<i64>,
}

/// 设置审计日志实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingAudit {
    pub id: i64,
    pub setting_key: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub changed_by: i64,
    pub changed_at: chrono::DateTime<chrono::Utc>,
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_round_trip() {
        for key in KnownSettingKey::all() {
            assert_eq!(key.as_str().parse::<KnownSettingKey>(), Ok(key));
        }
        assert!("cors.max_age".parse::<KnownSettingKey>().is_err());
    }

    #[test]
    fn test_value_type_validation() {
        assert!(SettingValueType::Decimal.validate("5.5").is_ok());
        assert!(SettingValueType::Decimal.validate("cinco").is_err());
        assert!(SettingValueType::Integer.validate("10").is_ok());
        assert!(SettingValueType::Integer.validate("1.5").is_err());
        assert!(SettingValueType::Boolean.validate("yes").is_err());
        assert!(SettingValueType::JsonArray.validate(r#"[".pdf"]"#).is_ok());
        assert!(SettingValueType::JsonArray.validate("pdf").is_err());
    }
}
