use super::SeaOrmStorage;
use crate::entity::evaluators::{Column, Entity as Evaluators};
use crate::errors::{HackathonError, Result};
use crate::models::evaluators::{entities::Evaluator, requests::EvaluatorListQuery};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 列出黑客松的评委
    pub async fn list_evaluators_impl(
        &self,
        hackathon_id: i64,
        query: EvaluatorListQuery,
    ) -> Result<Vec<Evaluator>> {
        let mut select = Evaluators::find().filter(Column::HackathonId.eq(hackathon_id));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(evaluator_type) = query.evaluator_type {
            select = select.filter(Column::EvaluatorType.eq(evaluator_type.to_string()));
        }

        let evaluators = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评委列表失败: {e}")))?;

        Ok(evaluators.into_iter().map(|m| m.into_evaluator()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use crate::models::evaluators::{
        entities::{EvaluatorStatus, EvaluatorType},
        requests::EvaluatorListQuery,
    };

    #[tokio::test]
    async fn test_list_evaluators_filters_by_status_and_type() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 2).await;
        let other = testing::seed_hackathon(&storage, 1).await;
        testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        testing::seed_evaluator(&storage, hackathon, "b@judge.dev", "sponsor", "active").await;
        testing::seed_evaluator(&storage, hackathon, "c@judge.dev", "sponsor", "pending").await;
        testing::seed_evaluator(&storage, other, "d@judge.dev", "sponsor", "active").await;

        let all = storage
            .list_evaluators_impl(hackathon, EvaluatorListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        let active_sponsors = storage
            .list_evaluators_impl(
                hackathon,
                EvaluatorListQuery {
                    status: Some(EvaluatorStatus::Active),
                    evaluator_type: Some(EvaluatorType::Sponsor),
                },
            )
            .await
            .unwrap();
        assert_eq!(active_sponsors.len(), 1);
        assert_eq!(active_sponsors[0].email, "b@judge.dev");
    }
}
