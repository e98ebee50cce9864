use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::BulkAssignRequest;
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::SafeRoundPath;

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn get_overview(req: HttpRequest, path: SafeRoundPath) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_overview(&req, path.hackathon_id, path.round_index)
        .await
}

pub async fn preview_assignments(
    req: HttpRequest,
    path: SafeRoundPath,
    body: web::Json<BulkAssignRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .preview_assignments(&req, path.hackathon_id, path.round_index, body.into_inner())
        .await
}

pub async fn bulk_assign(
    req: HttpRequest,
    path: SafeRoundPath,
    body: web::Json<BulkAssignRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .bulk_assign(&req, path.hackathon_id, path.round_index, body.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/hackathons/{hackathon_id}/rounds/{round_index}/assignments")
            // 只有主办方和管理员可以查看和修改评委分配
            .wrap(middlewares::RequireRole::new_any(UserRole::organizer_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/overview").route(web::get().to(get_overview)))
            .service(web::resource("/preview").route(web::post().to(preview_assignments)))
            .service(web::resource("/bulk").route(web::post().to(bulk_assign))),
    );
}
