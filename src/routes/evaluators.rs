use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::evaluators::requests::EvaluatorListQuery;
use crate::models::users::entities::UserRole;
use crate::services::EvaluatorService;
use crate::utils::SafeHackathonIdI64;

// 懒加载的全局 EVALUATOR_SERVICE 实例
static EVALUATOR_SERVICE: Lazy<EvaluatorService> = Lazy::new(EvaluatorService::new_lazy);

// HTTP处理程序
pub async fn list_evaluators(
    req: HttpRequest,
    hackathon_id: SafeHackathonIdI64,
    query: web::Query<EvaluatorListQuery>,
) -> ActixResult<HttpResponse> {
    EVALUATOR_SERVICE
        .list_evaluators(&req, hackathon_id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_evaluator_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hackathons/{hackathon_id}/evaluators")
            .wrap(middlewares::RequireRole::new_any(UserRole::organizer_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_evaluators))),
    );
}
