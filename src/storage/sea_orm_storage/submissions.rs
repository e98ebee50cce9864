use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::scores::{Column as ScoreColumn, Entity as Scores};
use crate::entity::submissions::{Column, Entity as Submissions};
use crate::errors::{HackathonError, Result};
use crate::models::submissions::entities::Submission;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

impl SeaOrmStorage {
    /// 列出某一轮的提交，按提交时间排序
    pub async fn list_round_submissions_impl(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::HackathonId.eq(hackathon_id))
            .filter(Column::RoundIndex.eq(round_index))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(submissions
            .into_iter()
            .map(|m| m.into_submission())
            .collect())
    }

    /// 某一轮已有评分的作品 ID
    pub async fn list_scored_submission_ids_impl(
        &self,
        hackathon_id: i64,
        round_index: i32,
    ) -> Result<HashSet<i64>> {
        let ids: Vec<i64> = Scores::find()
            .select_only()
            .column(ScoreColumn::SubmissionId)
            .distinct()
            .inner_join(Submissions)
            .filter(Column::HackathonId.eq(hackathon_id))
            .filter(ScoreColumn::RoundIndex.eq(round_index))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评分记录失败: {e}")))?;

        Ok(ids.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;

    #[tokio::test]
    async fn test_round_submissions_and_scores() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 2).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "j@judge.dev", "platform", "active")
                .await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;
        let s2 = testing::seed_submission(&storage, hackathon, 0, "draft").await;
        let s3 = testing::seed_submission(&storage, hackathon, 1, "submitted").await;
        testing::seed_score(&storage, s1, judge, 0).await;
        testing::seed_score(&storage, s3, judge, 1).await;

        let round0 = storage
            .list_round_submissions_impl(hackathon, 0)
            .await
            .unwrap();
        let ids: Vec<i64> = round0.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![s1, s2]);

        let scored = storage
            .list_scored_submission_ids_impl(hackathon, 0)
            .await
            .unwrap();
        assert!(scored.contains(&s1));
        assert!(!scored.contains(&s3));
    }
}
