use std::collections::{BTreeSet, HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::evaluators::{Column as EvaluatorColumn, Entity as Evaluators};
use crate::entity::judge_assignments::{
    ActiveModel as JudgeAssignmentActiveModel, Column as JudgeColumn, Entity as JudgeAssignments,
};
use crate::entity::round_assignment_submissions::{
    ActiveModel as RoundSubmissionActiveModel, Column as RoundSubmissionColumn,
    Entity as RoundAssignmentSubmissions,
};
use crate::entity::round_assignments::{
    ActiveModel as RoundAssignmentActiveModel, Column as RoundColumn, Entity as RoundAssignments,
    Model as RoundAssignmentModel,
};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{HackathonError, Result};
use crate::models::assignments::entities::{
    BindingOutcome, BindingWrite, JudgeAssignment, RoundAssignment,
};
use crate::models::evaluators::entities::EvaluatorType;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, warn};

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// 单个作品在事务内读取到的分配状态
struct BindingSnapshot {
    version: i64,
    // evaluator_id -> judge_assignment_id
    judges: HashMap<i64, i64>,
    // judge_assignment_id -> 本轮的轮次分配
    rounds: HashMap<i64, RoundAssignmentModel>,
    // 本轮已经绑定该作品的评委
    bound: HashSet<i64>,
    // 计划中仍处于 active 状态的评委
    active: HashSet<i64>,
}

impl SeaOrmStorage {
    /// 列出黑客松的评委分配记录
    pub async fn list_judge_assignments_impl(
        &self,
        hackathon_id: i64,
    ) -> Result<Vec<JudgeAssignment>> {
        let judges = JudgeAssignments::find()
            .filter(JudgeColumn::HackathonId.eq(hackathon_id))
            .order_by_asc(JudgeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评委分配失败: {e}")))?;

        if judges.is_empty() {
            return Ok(Vec::new());
        }

        let types: HashMap<i64, EvaluatorType> = Evaluators::find()
            .filter(EvaluatorColumn::HackathonId.eq(hackathon_id))
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评委失败: {e}")))?
            .into_iter()
            .map(|m| {
                let evaluator = m.into_evaluator();
                (evaluator.id, evaluator.evaluator_type)
            })
            .collect();

        let judge_ids: Vec<i64> = judges.iter().map(|j| j.id).collect();
        let rounds = RoundAssignments::find()
            .filter(RoundColumn::JudgeAssignmentId.is_in(judge_ids))
            .order_by_asc(RoundColumn::RoundIndex)
            .all(&self.db)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询轮次分配失败: {e}")))?;

        let mut assigned: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        if !rounds.is_empty() {
            let round_ids: Vec<i64> = rounds.iter().map(|r| r.id).collect();
            let links = RoundAssignmentSubmissions::find()
                .filter(RoundSubmissionColumn::RoundAssignmentId.is_in(round_ids))
                .all(&self.db)
                .await
                .map_err(|e| {
                    HackathonError::database_operation(format!("查询轮次分配作品失败: {e}"))
                })?;
            for link in links {
                assigned
                    .entry(link.round_assignment_id)
                    .or_default()
                    .insert(link.submission_id);
            }
        }

        let mut rounds_by_judge: HashMap<i64, Vec<RoundAssignment>> = HashMap::new();
        for round in rounds {
            rounds_by_judge
                .entry(round.judge_assignment_id)
                .or_default()
                .push(RoundAssignment {
                    round_index: round.round_index,
                    assigned_submissions: assigned.remove(&round.id).unwrap_or_default(),
                    max_submissions: round.max_submissions,
                });
        }

        Ok(judges
            .into_iter()
            .map(|judge| JudgeAssignment {
                id: judge.id,
                hackathon_id: judge.hackathon_id,
                evaluator_id: judge.evaluator_id,
                evaluator_type: types
                    .get(&judge.evaluator_id)
                    .copied()
                    .unwrap_or(EvaluatorType::Platform),
                rounds: rounds_by_judge.remove(&judge.id).unwrap_or_default(),
            })
            .collect())
    }

    /// 在单个事务中为一个作品绑定评委
    ///
    /// 只有 `Assigned` 会提交事务，其余结果全部回滚。
    pub async fn commit_submission_binding_impl(
        &self,
        write: BindingWrite,
    ) -> Result<BindingOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| HackathonError::database_operation(format!("开启事务失败: {e}")))?;

        let outcome = match Self::read_binding_snapshot(&txn, &write).await {
            Ok(Ok(snapshot)) => Self::apply_binding(&txn, &write, snapshot).await,
            Ok(Err(reason)) => Ok(BindingOutcome::Ineligible(reason)),
            Err(e) => Err(e),
        };
        Self::finish_binding(txn, write.submission_id, outcome).await
    }

    /// 根据写入结果提交或回滚事务
    async fn finish_binding(
        txn: DatabaseTransaction,
        submission_id: i64,
        outcome: Result<BindingOutcome>,
    ) -> Result<BindingOutcome> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("回滚作品 {} 的分配事务失败: {}", submission_id, rollback_err);
                }
                return Err(e);
            }
        };

        match &outcome {
            BindingOutcome::Assigned(_) => txn
                .commit()
                .await
                .map_err(|e| HackathonError::database_operation(format!("提交事务失败: {e}")))?,
            _ => txn
                .rollback()
                .await
                .map_err(|e| HackathonError::database_operation(format!("回滚事务失败: {e}")))?,
        }

        Ok(outcome)
    }

    /// 在快照基础上写入绑定，最后用版本号做条件更新
    async fn apply_binding(
        txn: &DatabaseTransaction,
        write: &BindingWrite,
        snapshot: BindingSnapshot,
    ) -> Result<BindingOutcome> {
        let coverage = snapshot.bound.len();
        if coverage >= write.target_coverage {
            return Ok(BindingOutcome::AlreadyCovered(coverage));
        }

        let unbound: Vec<i64> = write
            .evaluator_ids
            .iter()
            .copied()
            .filter(|id| !snapshot.bound.contains(id))
            .collect();
        if unbound.is_empty() {
            return Ok(BindingOutcome::AlreadyCovered(coverage));
        }

        // 规划之后拒绝邀请或被移除的评委不再绑定
        let chosen: Vec<i64> = unbound
            .into_iter()
            .filter(|id| snapshot.active.contains(id))
            .take(write.target_coverage - coverage)
            .collect();
        if chosen.is_empty() {
            return Ok(BindingOutcome::Ineligible(format!(
                "None of the planned evaluators for submission {} is still active",
                write.submission_id
            )));
        }

        let now = chrono::Utc::now().timestamp();
        for &evaluator_id in &chosen {
            let judge_id = match snapshot.judges.get(&evaluator_id) {
                Some(id) => *id,
                None => {
                    let inserted = JudgeAssignmentActiveModel {
                        hackathon_id: Set(write.hackathon_id),
                        evaluator_id: Set(evaluator_id),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await;
                    match inserted {
                        Ok(model) => model.id,
                        Err(e) if is_unique_violation(&e) => {
                            return Ok(BindingOutcome::VersionConflict);
                        }
                        Err(e) => {
                            return Err(HackathonError::database_operation(format!(
                                "创建评委分配失败: {e}"
                            )));
                        }
                    }
                }
            };

            let round = match snapshot.rounds.get(&judge_id) {
                Some(round) => round.clone(),
                None => {
                    let inserted = RoundAssignmentActiveModel {
                        judge_assignment_id: Set(judge_id),
                        round_index: Set(write.round_index),
                        max_submissions: Set(write.default_max_submissions),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await;
                    match inserted {
                        Ok(model) => model,
                        Err(e) if is_unique_violation(&e) => {
                            return Ok(BindingOutcome::VersionConflict);
                        }
                        Err(e) => {
                            return Err(HackathonError::database_operation(format!(
                                "创建轮次分配失败: {e}"
                            )));
                        }
                    }
                }
            };

            let linked = RoundSubmissionActiveModel {
                round_assignment_id: Set(round.id),
                submission_id: Set(write.submission_id),
                assigned_by: Set(write.assigned_by),
                assigned_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await;
            match linked {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => return Ok(BindingOutcome::VersionConflict),
                Err(e) => {
                    return Err(HackathonError::database_operation(format!(
                        "绑定作品失败: {e}"
                    )));
                }
            }

            // 容量只增不减
            let load = RoundAssignmentSubmissions::find()
                .filter(RoundSubmissionColumn::RoundAssignmentId.eq(round.id))
                .count(txn)
                .await
                .map_err(|e| HackathonError::database_operation(format!("统计评委负载失败: {e}")))?
                as i32;
            if load > round.max_submissions {
                RoundAssignments::update_many()
                    .col_expr(RoundColumn::MaxSubmissions, Expr::value(load))
                    .col_expr(RoundColumn::UpdatedAt, Expr::value(now))
                    .filter(RoundColumn::Id.eq(round.id))
                    .exec(txn)
                    .await
                    .map_err(|e| {
                        HackathonError::database_operation(format!("更新评委容量失败: {e}"))
                    })?;
                debug!(
                    evaluator_id,
                    round_index = write.round_index,
                    "评委容量提升至 {}",
                    load
                );
            }
        }

        let bumped = Submissions::update_many()
            .col_expr(
                SubmissionColumn::AssignmentVersion,
                Expr::value(snapshot.version + 1),
            )
            .filter(SubmissionColumn::Id.eq(write.submission_id))
            .filter(SubmissionColumn::AssignmentVersion.eq(snapshot.version))
            .exec(txn)
            .await
            .map_err(|e| HackathonError::database_operation(format!("更新分配版本失败: {e}")))?;

        if bumped.rows_affected == 0 {
            return Ok(BindingOutcome::VersionConflict);
        }

        Ok(BindingOutcome::Assigned(chosen))
    }

    /// 读取作品的版本号与本轮已绑定的评委，作品不可分配时返回原因
    async fn read_binding_snapshot(
        txn: &DatabaseTransaction,
        write: &BindingWrite,
    ) -> Result<std::result::Result<BindingSnapshot, String>> {
        let Some(model) = Submissions::find_by_id(write.submission_id)
            .one(txn)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(Err(format!("Submission {} not found", write.submission_id)));
        };

        if model.hackathon_id != write.hackathon_id {
            return Ok(Err(format!(
                "Submission {} does not belong to hackathon {}",
                write.submission_id, write.hackathon_id
            )));
        }

        let version = model.assignment_version;
        if !model.into_submission().is_eligible_for_round(write.round_index) {
            return Ok(Err(format!(
                "Submission {} is not eligible for round {}",
                write.submission_id, write.round_index
            )));
        }

        let judges: HashMap<i64, i64> = JudgeAssignments::find()
            .filter(JudgeColumn::HackathonId.eq(write.hackathon_id))
            .all(txn)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评委分配失败: {e}")))?
            .into_iter()
            .map(|j| (j.evaluator_id, j.id))
            .collect();

        let mut rounds = HashMap::new();
        let mut bound = HashSet::new();
        if !judges.is_empty() {
            rounds = RoundAssignments::find()
                .filter(RoundColumn::JudgeAssignmentId.is_in(judges.values().copied()))
                .filter(RoundColumn::RoundIndex.eq(write.round_index))
                .all(txn)
                .await
                .map_err(|e| HackathonError::database_operation(format!("查询轮次分配失败: {e}")))?
                .into_iter()
                .map(|r| (r.judge_assignment_id, r))
                .collect::<HashMap<_, _>>();

            let owners: HashMap<i64, i64> = judges
                .iter()
                .filter_map(|(evaluator_id, judge_id)| {
                    rounds.get(judge_id).map(|r| (r.id, *evaluator_id))
                })
                .collect();

            if !owners.is_empty() {
                bound = RoundAssignmentSubmissions::find()
                    .filter(RoundSubmissionColumn::SubmissionId.eq(write.submission_id))
                    .filter(RoundSubmissionColumn::RoundAssignmentId.is_in(owners.keys().copied()))
                    .all(txn)
                    .await
                    .map_err(|e| {
                        HackathonError::database_operation(format!("查询作品覆盖失败: {e}"))
                    })?
                    .into_iter()
                    .filter_map(|link| owners.get(&link.round_assignment_id).copied())
                    .collect();
            }
        }

        let active = Evaluators::find()
            .filter(EvaluatorColumn::HackathonId.eq(write.hackathon_id))
            .filter(EvaluatorColumn::Id.is_in(write.evaluator_ids.iter().copied()))
            .all(txn)
            .await
            .map_err(|e| HackathonError::database_operation(format!("查询评委状态失败: {e}")))?
            .into_iter()
            .map(|m| m.into_evaluator())
            .filter(|e| e.is_active())
            .map(|e| e.id)
            .collect();

        Ok(Ok(BindingSnapshot {
            version,
            judges,
            rounds,
            bound,
            active,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;

    fn write(hackathon_id: i64, submission_id: i64, evaluators: Vec<i64>, k: usize) -> BindingWrite {
        BindingWrite {
            hackathon_id,
            round_index: 0,
            submission_id,
            evaluator_ids: evaluators,
            target_coverage: k,
            default_max_submissions: 1,
            assigned_by: 1,
        }
    }

    async fn version_of(storage: &SeaOrmStorage, submission_id: i64) -> i64 {
        Submissions::find_by_id(submission_id)
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap()
            .assignment_version
    }

    #[tokio::test]
    async fn test_binding_creates_rows_and_bumps_version() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "sponsor", "active").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;
        let s2 = testing::seed_submission(&storage, hackathon, 0, "Submitted").await;

        let first = storage
            .commit_submission_binding_impl(write(hackathon, s1, vec![judge], 1))
            .await
            .unwrap();
        assert_eq!(first, BindingOutcome::Assigned(vec![judge]));
        assert_eq!(version_of(&storage, s1).await, 1);

        storage
            .commit_submission_binding_impl(write(hackathon, s2, vec![judge], 1))
            .await
            .unwrap();

        let assignments = storage.list_judge_assignments_impl(hackathon).await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].evaluator_type, EvaluatorType::Sponsor);
        let round = assignments[0].round(0).unwrap();
        assert_eq!(round.assigned_submissions, BTreeSet::from([s1, s2]));
        // 默认容量为 1，第二个作品把容量提升到 2
        assert_eq!(round.max_submissions, 2);
    }

    #[tokio::test]
    async fn test_binding_respects_target_coverage() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let a = testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active")
            .await;
        let b = testing::seed_evaluator(&storage, hackathon, "b@judge.dev", "platform", "active")
            .await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;

        storage
            .commit_submission_binding_impl(write(hackathon, s1, vec![a], 1))
            .await
            .unwrap();
        let again = storage
            .commit_submission_binding_impl(write(hackathon, s1, vec![b], 1))
            .await
            .unwrap();
        assert_eq!(again, BindingOutcome::AlreadyCovered(1));
        assert_eq!(version_of(&storage, s1).await, 1);

        // 目标覆盖提高到 2 时只补足缺少的评委
        let widened = storage
            .commit_submission_binding_impl(write(hackathon, s1, vec![a, b], 2))
            .await
            .unwrap();
        assert_eq!(widened, BindingOutcome::Assigned(vec![b]));
    }

    #[tokio::test]
    async fn test_ineligible_submission_is_not_written() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 2).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "hybrid", "active").await;
        let draft = testing::seed_submission(&storage, hackathon, 0, "draft").await;
        let later = testing::seed_submission(&storage, hackathon, 1, "submitted").await;

        for submission in [draft, later, 9_999] {
            let outcome = storage
                .commit_submission_binding_impl(write(hackathon, submission, vec![judge], 1))
                .await
                .unwrap();
            assert!(matches!(outcome, BindingOutcome::Ineligible(_)));
        }
        assert!(
            storage
                .list_judge_assignments_impl(hackathon)
                .await
                .unwrap()
                .is_empty()
        );
    }

    async fn links_of(storage: &SeaOrmStorage, submission_id: i64) -> u64 {
        RoundAssignmentSubmissions::find()
            .filter(RoundSubmissionColumn::SubmissionId.eq(submission_id))
            .count(&storage.db)
            .await
            .unwrap()
    }

    async fn judge_rows(storage: &SeaOrmStorage, hackathon_id: i64) -> u64 {
        JudgeAssignments::find()
            .filter(JudgeColumn::HackathonId.eq(hackathon_id))
            .count(&storage.db)
            .await
            .unwrap()
    }

    /// 在快照之后、写入之前插入并发变更，然后走完写入与回滚
    async fn bind_after<F, Fut>(storage: &SeaOrmStorage, write: BindingWrite, race: F) -> BindingOutcome
    where
        F: FnOnce(DatabaseTransaction, BindingSnapshot) -> Fut,
        Fut: std::future::Future<Output = (DatabaseTransaction, BindingSnapshot)>,
    {
        let txn = storage.db.begin().await.unwrap();
        let snapshot = SeaOrmStorage::read_binding_snapshot(&txn, &write)
            .await
            .unwrap()
            .unwrap();
        let (txn, snapshot) = race(txn, snapshot).await;
        let applied = SeaOrmStorage::apply_binding(&txn, &write, snapshot).await;
        SeaOrmStorage::finish_binding(txn, write.submission_id, applied)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stale_version_rolls_back_all_rows() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;

        let outcome = bind_after(&storage, write(hackathon, s1, vec![judge], 1), |txn, snap| async move {
            // 另一个写入者先提交了同一作品
            Submissions::update_many()
                .col_expr(SubmissionColumn::AssignmentVersion, Expr::value(snap.version + 1))
                .filter(SubmissionColumn::Id.eq(s1))
                .exec(&txn)
                .await
                .unwrap();
            (txn, snap)
        })
        .await;

        assert_eq!(outcome, BindingOutcome::VersionConflict);
        assert_eq!(links_of(&storage, s1).await, 0);
        assert_eq!(judge_rows(&storage, hackathon).await, 0);
        // 回滚后版本号保持原值
        assert_eq!(version_of(&storage, s1).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_judge_row_is_a_version_conflict() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;

        let outcome = bind_after(&storage, write(hackathon, s1, vec![judge], 1), |txn, snap| async move {
            assert!(snap.judges.is_empty());
            let now = chrono::Utc::now().timestamp();
            JudgeAssignmentActiveModel {
                hackathon_id: Set(hackathon),
                evaluator_id: Set(judge),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .unwrap();
            (txn, snap)
        })
        .await;

        assert_eq!(outcome, BindingOutcome::VersionConflict);
        assert_eq!(judge_rows(&storage, hackathon).await, 0);
        assert_eq!(links_of(&storage, s1).await, 0);
        assert_eq!(version_of(&storage, s1).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_link_is_a_version_conflict() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let judge =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        let s0 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;

        // 先让评委拥有本轮的轮次分配
        storage
            .commit_submission_binding_impl(write(hackathon, s0, vec![judge], 1))
            .await
            .unwrap();

        let outcome = bind_after(&storage, write(hackathon, s1, vec![judge], 1), |txn, snap| async move {
            assert!(snap.bound.is_empty());
            let round_id = snap.rounds.values().next().unwrap().id;
            RoundSubmissionActiveModel {
                round_assignment_id: Set(round_id),
                submission_id: Set(s1),
                assigned_by: Set(1),
                assigned_at: Set(chrono::Utc::now().timestamp()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .unwrap();
            (txn, snap)
        })
        .await;

        assert_eq!(outcome, BindingOutcome::VersionConflict);
        assert_eq!(links_of(&storage, s1).await, 0);
        assert_eq!(links_of(&storage, s0).await, 1);
        assert_eq!(version_of(&storage, s1).await, 0);
    }

    #[tokio::test]
    async fn test_inactive_evaluator_is_skipped_at_write_time() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        let gone =
            testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        let stays =
            testing::seed_evaluator(&storage, hackathon, "b@judge.dev", "platform", "active").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;
        let s2 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;

        // 规划完成后评委拒绝了邀请
        Evaluators::update_many()
            .col_expr(EvaluatorColumn::Status, Expr::value("declined"))
            .filter(EvaluatorColumn::Id.eq(gone))
            .exec(&storage.db)
            .await
            .unwrap();

        let only_gone = storage
            .commit_submission_binding_impl(write(hackathon, s1, vec![gone], 1))
            .await
            .unwrap();
        assert!(matches!(only_gone, BindingOutcome::Ineligible(_)));
        assert_eq!(links_of(&storage, s1).await, 0);
        assert_eq!(version_of(&storage, s1).await, 0);

        let mixed = storage
            .commit_submission_binding_impl(write(hackathon, s2, vec![gone, stays], 1))
            .await
            .unwrap();
        assert_eq!(mixed, BindingOutcome::Assigned(vec![stays]));

        let assignments = storage.list_judge_assignments_impl(hackathon).await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].evaluator_id, stays);
    }
}
