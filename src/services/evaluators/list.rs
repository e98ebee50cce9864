use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluatorService;
use crate::errors::{HackathonError, Result};
use crate::models::{
    ApiResponse,
    evaluators::{entities::Evaluator, requests::EvaluatorListQuery},
};
use crate::services::assignments::error_response;
use crate::storage::Storage;

pub async fn list_evaluators(
    service: &EvaluatorService,
    request: &HttpRequest,
    hackathon_id: i64,
    query: EvaluatorListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match fetch_evaluators(&storage, hackathon_id, query).await {
        Ok(evaluators) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            evaluators,
            "Evaluator list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 评委池，未知黑客松返回 NotFound
pub async fn fetch_evaluators(
    storage: &Arc<dyn Storage>,
    hackathon_id: i64,
    query: EvaluatorListQuery,
) -> Result<Vec<Evaluator>> {
    if storage.get_hackathon_by_id(hackathon_id).await?.is_none() {
        return Err(HackathonError::not_found(format!(
            "Hackathon {hackathon_id} not found"
        )));
    }
    storage.list_evaluators(hackathon_id, query).await
}
