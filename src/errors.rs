//! 统一错误类型
//!
//! 每个变体带一个错误代码和类型名，由宏生成访问方法和 snake_case 构造函数，
//! 例如 `CeepSystemError::not_found("...")`。

use std::fmt;

macro_rules! define_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CeepSystemError {
            $($variant(String),)*
        }

        impl CeepSystemError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl CeepSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        Self::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_system_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Serialization("E006", "Serialization Error"),
    Validation("E101", "Validation Error"),
    NotFound("E102", "Resource Not Found"),
    Conflict("E103", "Resource Conflict"),
    Authentication("E104", "Authentication Error"),
    InvalidTransition("E105", "Invalid Workflow Transition"),
}

impl CeepSystemError {
    /// 1xx 为业务错误，可以原样告诉调用方；其余属于基础设施故障
    pub fn is_client_error(&self) -> bool {
        self.code().starts_with("E1")
    }
}

impl fmt::Display for CeepSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.error_type(), self.message())
    }
}

impl std::error::Error for CeepSystemError {}

impl From<sea_orm::DbErr> for CeepSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CeepSystemError {
    fn from(err: std::io::Error) -> Self {
        Self::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CeepSystemError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CeepSystemError {
    fn from(err: chrono::ParseError) -> Self {
        Self::Validation(format!("日期格式错误: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, CeepSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_constructors() {
        let err = CeepSystemError::conflict("CPF already registered");
        assert!(matches!(err, CeepSystemError::Conflict(_)));
        assert_eq!(err.code(), "E103");
        assert_eq!(err.message(), "CPF already registered");
    }

    #[test]
    fn test_client_and_infrastructure_split() {
        assert!(CeepSystemError::invalid_transition("signed twice").is_client_error());
        assert!(CeepSystemError::not_found("doc").is_client_error());
        assert!(!CeepSystemError::database_operation("down").is_client_error());
        assert!(!CeepSystemError::cache_connection("refused").is_client_error());
    }

    #[test]
    fn test_display_includes_code_and_type() {
        let text = CeepSystemError::validation("Invalid CPF").to_string();
        assert_eq!(text, "[E101] Validation Error: Invalid CPF");
    }
}
