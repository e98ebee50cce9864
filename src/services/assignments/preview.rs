use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::overview::compute_overview;
use super::planner::{self, PlanningInput};
use super::{AssignmentService, assignment_context, ensure_round, error_response};
use crate::config::AssignmentConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    assignments::{requests::BulkAssignRequest, responses::AssignmentPlan},
    evaluators::requests::EvaluatorListQuery,
};
use crate::storage::Storage;

pub async fn preview_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    hackathon_id: i64,
    round_index: i32,
    body: BulkAssignRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match assignment_context(request) {
        Ok(ctx) => ctx,
        Err(e) => return Ok(error_response(&e)),
    };
    let storage = service.get_storage(request);

    match prepare_plan(&storage, hackathon_id, round_index, &body, service.settings()).await {
        Ok(plan) => {
            info!(
                hackathon_id,
                round_index,
                user_id = ctx.user_id,
                submissions = plan.submission_ids.len(),
                "预览评委分配计划"
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                plan,
                "Assignment plan generated successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 读取评委与最新概览后生成计划
///
/// 选择为空时直接失败，不访问存储。
pub async fn prepare_plan(
    storage: &Arc<dyn Storage>,
    hackathon_id: i64,
    round_index: i32,
    request: &BulkAssignRequest,
    settings: &AssignmentConfig,
) -> Result<AssignmentPlan> {
    planner::validate_selection(request)?;
    ensure_round(storage, hackathon_id, round_index).await?;

    let evaluators = storage
        .list_evaluators(hackathon_id, EvaluatorListQuery::default())
        .await?;
    let overview = compute_overview(storage, hackathon_id, round_index, settings).await?;

    planner::build_plan(PlanningInput {
        hackathon_id,
        round_index,
        request,
        evaluators: &evaluators,
        overview: &overview,
    })
}
