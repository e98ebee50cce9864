use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EvaluatorStatus, EvaluatorType};

/// 评委列表查询参数（HTTP 请求，同时作为存储层过滤条件）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluator.ts")]
pub struct EvaluatorListQuery {
    pub status: Option<EvaluatorStatus>,
    #[serde(rename = "type")]
    pub evaluator_type: Option<EvaluatorType>,
}
