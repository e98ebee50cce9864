//! 路径参数提取器
//!
//! 解析失败时返回统一的 `ApiResponse` 错误体，而不是 actix 默认的纯文本 404。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::StatusCode,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_path_param(name: &str, raw: &str) -> actix_web::Error {
    let message = format!("Invalid path parameter '{name}': {raw}");
    InternalError::from_response(
        message.clone(),
        HttpResponse::build(StatusCode::BAD_REQUEST)
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn parse_match_info<T: std::str::FromStr>(
    req: &HttpRequest,
    name: &str,
) -> Result<T, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    raw.parse::<T>().map_err(|_| bad_path_param(name, raw))
}

/// `{hackathon_id}` 路径参数
#[derive(Debug, Clone, Copy)]
pub struct SafeHackathonIdI64(pub i64);

impl FromRequest for SafeHackathonIdI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_match_info(req, "hackathon_id").map(SafeHackathonIdI64))
    }
}

/// `{hackathon_id}/rounds/{round_index}` 路径参数
///
/// 负数轮次在这里仍然可以解析，由服务层按黑客松的轮次数量统一校验。
#[derive(Debug, Clone, Copy)]
pub struct SafeRoundPath {
    pub hackathon_id: i64,
    pub round_index: i32,
}

impl FromRequest for SafeRoundPath {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = parse_match_info(req, "hackathon_id").and_then(|hackathon_id| {
            parse_match_info(req, "round_index").map(|round_index| SafeRoundPath {
                hackathon_id,
                round_index,
            })
        });
        ready(parsed)
    }
}
