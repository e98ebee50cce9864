pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluators::requests::EvaluatorListQuery;
use crate::storage::Storage;

pub struct EvaluatorService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluatorService {
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

    // 获取黑客松的评委列表
    pub async fn list_evaluators(
        &self,
        request: &HttpRequest,
        hackathon_id: i64,
        query: EvaluatorListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_evaluators(self, request, hackathon_id, query).await
    }
}
