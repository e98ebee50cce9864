//! 评委分配引擎
//!
//! 数据流：分类器基于最新概览收窄选择，规划器生成计划，提交器逐个作品写入，
//! 最后重新计算概览返回给调用方。

pub mod classifier;
pub mod commit;
pub mod overview;
pub mod planner;
pub mod preview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::config::{AppConfig, AssignmentConfig};
use crate::errors::{HackathonError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    assignments::{entities::AssignmentContext, requests::BulkAssignRequest},
    hackathons::entities::Hackathon,
};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn settings(&self) -> &'static AssignmentConfig {
        &AppConfig::get().assignment
    }

    // 获取某一轮的分配概览
    pub async fn get_overview(
        &self,
        request: &HttpRequest,
        hackathon_id: i64,
        round_index: i32,
    ) -> ActixResult<HttpResponse> {
        overview::get_overview(self, request, hackathon_id, round_index).await
    }

    // 预览分配计划，不写入
    pub async fn preview_assignments(
        &self,
        request: &HttpRequest,
        hackathon_id: i64,
        round_index: i32,
        body: BulkAssignRequest,
    ) -> ActixResult<HttpResponse> {
        preview::preview_assignments(self, request, hackathon_id, round_index, body).await
    }

    // 批量分配
    pub async fn bulk_assign(
        &self,
        request: &HttpRequest,
        hackathon_id: i64,
        round_index: i32,
        body: BulkAssignRequest,
    ) -> ActixResult<HttpResponse> {
        commit::bulk_assign(self, request, hackathon_id, round_index, body).await
    }
}

/// 把引擎错误转换为统一的 API 响应
pub(crate) fn error_response(err: &HackathonError) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        error!("评委分配请求失败: {}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(err.api_code(), err.message()))
}

/// 从已验证的请求身份构造分配上下文
pub(crate) fn assignment_context(request: &HttpRequest) -> Result<AssignmentContext> {
    RequireJWT::extract_user_claims(request)
        .map(|user| AssignmentContext::from(&user))
        .ok_or_else(|| HackathonError::authentication("Unauthorized: missing user id"))
}

/// 确认黑客松存在且轮次编号有效
pub(crate) async fn ensure_round(
    storage: &Arc<dyn Storage>,
    hackathon_id: i64,
    round_index: i32,
) -> Result<Hackathon> {
    let hackathon = storage
        .get_hackathon_by_id(hackathon_id)
        .await?
        .ok_or_else(|| HackathonError::not_found(format!("Hackathon {hackathon_id} not found")))?;

    if !hackathon.has_round(round_index) {
        return Err(HackathonError::validation(format!(
            "Round {round_index} is out of range, hackathon {hackathon_id} has {} round(s)",
            hackathon.round_count
        )));
    }

    Ok(hackathon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::testing;

    #[tokio::test]
    async fn test_ensure_round_checks_hackathon_and_range() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 2).await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        assert!(ensure_round(&storage, hackathon, 1).await.is_ok());

        let out_of_range = ensure_round(&storage, hackathon, 2).await.unwrap_err();
        assert_eq!(out_of_range.code(), "E007");

        let missing = ensure_round(&storage, hackathon + 100, 0).await.unwrap_err();
        assert_eq!(missing.code(), "E008");
    }
}
