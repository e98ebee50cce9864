//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_hackjudge_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum HackathonError {
            $($variant(String),)*
        }

        impl HackathonError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(HackathonError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(HackathonError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(HackathonError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl HackathonError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        HackathonError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_hackjudge_errors! {
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    StaleSelection("E014", "Stale Selection Error"),
    AssignmentConflict("E015", "Assignment Conflict Error"),
}

impl HackathonError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    ///
    /// 校验错误不会触达存储层；过期选择需要刷新概览后重试；
    /// 存储层错误原样返回，由用户手动重试。
    pub fn status_code(&self) -> StatusCode {
        match self {
            HackathonError::Validation(_) => StatusCode::BAD_REQUEST,
            HackathonError::NotFound(_) => StatusCode::NOT_FOUND,
            HackathonError::StaleSelection(_) | HackathonError::AssignmentConflict(_) => {
                StatusCode::CONFLICT
            }
            HackathonError::Authentication(_) => StatusCode::UNAUTHORIZED,
            HackathonError::Authorization(_) => StatusCode::FORBIDDEN,
            HackathonError::DatabaseConfig(_)
            | HackathonError::DatabaseConnection(_)
            | HackathonError::DatabaseOperation(_)
            | HackathonError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 业务错误码
    pub fn api_code(&self) -> ErrorCode {
        match self {
            HackathonError::Validation(_) => ErrorCode::AssignmentValidationFailed,
            HackathonError::NotFound(_) => ErrorCode::NotFound,
            HackathonError::StaleSelection(_) => ErrorCode::NoUnassignedSubmissions,
            HackathonError::AssignmentConflict(_) => ErrorCode::AssignmentInProgress,
            HackathonError::Authentication(_) => ErrorCode::Unauthorized,
            HackathonError::Authorization(_) => ErrorCode::Forbidden,
            _ => ErrorCode::InternalServerError,
        }
    }
}

impl fmt::Display for HackathonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HackathonError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for HackathonError {
    fn from(err: sea_orm::DbErr) -> Self {
        HackathonError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HackathonError {
    fn from(err: serde_json::Error) -> Self {
        HackathonError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HackathonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HackathonError::database_config("test").code(), "E003");
        assert_eq!(HackathonError::validation("test").code(), "E007");
        assert_eq!(HackathonError::stale_selection("test").code(), "E014");
        assert_eq!(HackathonError::assignment_conflict("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            HackathonError::stale_selection("test").error_type(),
            "Stale Selection Error"
        );
        assert_eq!(
            HackathonError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HackathonError::validation("no evaluators selected").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HackathonError::stale_selection("no unassigned submissions").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            HackathonError::database_operation("disk full").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = HackathonError::validation("insufficient assignments");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("insufficient assignments"));
    }
}
