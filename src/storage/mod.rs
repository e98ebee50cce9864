use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{
    assignments::entities::{BindingOutcome, BindingWrite, JudgeAssignment},
    evaluators::{entities::Evaluator, requests::EvaluatorListQuery},
    hackathons::entities::Hackathon,
    submissions::entities::Submission,
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    // 通过ID获取黑客松信息
    async fn get_hackathon_by_id(&self, hackathon_id: i64) -> Result<Option<Hackathon>>;

    /// 评委管理方法
    // 列出黑客松的评委，可按状态和类型过滤
    async fn list_evaluators(
        &self,
        hackathon_id: i64,
        query: EvaluatorListQuery,
    ) -> Result<Vec<Evaluator>>;

    /// 作品提交方法
    // 列出某一轮的全部提交（不过滤状态）
    async fn list_round_submissions(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<Vec<Submission>>;
    // 某一轮已经有评分记录的作品
    async fn list_scored_submission_ids(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<HashSet<i64>>;

    /// 评委分配方法
    // 列出黑客松的全部评委分配记录（包含所有轮次）
    async fn list_judge_assignments(&self, hackathon_id: i64) -> Result<Vec<JudgeAssignment>>;
    // 在单个事务中为一个作品绑定评委，读取版本号后条件写入
    async fn commit_submission_binding(&self, write: BindingWrite) -> Result<BindingOutcome>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
