pub mod assignments;
pub mod common;
pub mod evaluators;
pub mod hackathons;
pub mod submissions;
pub mod users;

pub use common::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 评委分配 4xxx
    AssignmentValidationFailed = 4001,
    NoUnassignedSubmissions = 4002,
    AssignmentInProgress = 4003,
}
