use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::Lazy;
use tracing::{debug, info, warn};

use super::overview::compute_overview;
use super::preview::prepare_plan;
use super::{AssignmentService, assignment_context, error_response};
use crate::config::AssignmentConfig;
use crate::errors::{HackathonError, Result};
use crate::models::{
    ApiResponse,
    assignments::{
        entities::{AssignmentContext, BindingOutcome, BindingWrite},
        requests::BulkAssignRequest,
        responses::{
            AssignmentPlan, CommitItemStatus, CommitResult, EvaluatorCommitResult,
            SubmissionBinding, SubmissionCommitResult,
        },
    },
};
use crate::storage::Storage;

/// 全局提交守卫
static COMMIT_GUARD: Lazy<CommitGuard> = Lazy::new(CommitGuard::new);

/// 同一进程内同一 (黑客松, 轮次) 只允许一个分配周期在执行
pub struct CommitGuard {
    // (hackathon_id, round_index) -> commit_id
    in_flight: DashMap<(i64, i32), String>,
}

/// 持有期间占用对应轮次，离开作用域时释放
pub struct InFlight<'a> {
    guard: &'a CommitGuard,
    key: (i64, i32),
}

impl Default for CommitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitGuard {
    pub fn new() -> Self {
        Self {
            in_flight: DashMap::new(),
        }
    }

    /// 获取全局实例
    pub fn get() -> &'static Self {
        &COMMIT_GUARD
    }

    pub fn acquire(
        &self,
        hackathon_id: i64,
        round_index: i32,
        commit_id: &str,
    ) -> Result<InFlight<'_>> {
        let key = (hackathon_id, round_index);
        match self.in_flight.entry(key) {
            Entry::Occupied(existing) => Err(HackathonError::assignment_conflict(format!(
                "Another assignment commit ({}) is already running for hackathon {hackathon_id} round {round_index}",
                existing.get()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(commit_id.to_string());
                Ok(InFlight { guard: self, key })
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.remove(&self.key);
    }
}

pub async fn bulk_assign(
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

    let result = assign_submissions(
        &storage,
        CommitGuard::get(),
        hackathon_id,
        round_index,
        &body,
        &ctx,
        service.settings(),
    )
    .await;

    match result {
        Ok(result) => {
            let message = format!(
                "Assigned {} submission(s), {} item(s) processed",
                result.assigned_submissions,
                result.results.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(result, message)))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// 完整的分配周期：规划、逐个提交、重新计算概览
pub async fn assign_submissions(
    storage: &Arc<dyn Storage>,
    guard: &CommitGuard,
    hackathon_id: i64,
    round_index: i32,
    request: &BulkAssignRequest,
    ctx: &AssignmentContext,
    settings: &AssignmentConfig,
) -> Result<CommitResult> {
    let commit_id = uuid::Uuid::new_v4().to_string();
    let _in_flight = guard.acquire(hackathon_id, round_index, &commit_id)?;

    let plan = prepare_plan(storage, hackathon_id, round_index, request, settings).await?;
    commit_plan(storage, &plan, &commit_id, ctx, settings).await
}

/// 按作品逐个提交计划，单个作品失败不影响其他作品
pub async fn commit_plan(
    storage: &Arc<dyn Storage>,
    plan: &AssignmentPlan,
    commit_id: &str,
    ctx: &AssignmentContext,
    settings: &AssignmentConfig,
) -> Result<CommitResult> {
    info!(
        commit_id,
        hackathon_id = plan.hackathon_id,
        round_index = plan.round_index,
        user_id = ctx.user_id,
        role = %ctx.role,
        submissions = plan.bindings.len(),
        "开始提交评委分配"
    );

    let mut results = Vec::with_capacity(plan.bindings.len());
    for binding in &plan.bindings {
        let result = commit_binding(storage, plan, binding, ctx, settings).await;
        match result.status {
            CommitItemStatus::Assigned | CommitItemStatus::Skipped => debug!(
                commit_id,
                submission_id = result.submission_id,
                status = ?result.status,
                "作品分配已处理"
            ),
            CommitItemStatus::Conflict | CommitItemStatus::Failed => warn!(
                commit_id,
                submission_id = result.submission_id,
                status = ?result.status,
                "作品分配未完成: {}",
                result.message.as_deref().unwrap_or_default()
            ),
        }
        results.push(result);
    }

    let mut assigned_per_evaluator: HashMap<i64, i32> = HashMap::new();
    for result in results
        .iter()
        .filter(|r| r.status == CommitItemStatus::Assigned)
    {
        for evaluator_id in &result.evaluator_ids {
            *assigned_per_evaluator.entry(*evaluator_id).or_default() += 1;
        }
    }
    let per_evaluator = plan
        .evaluator_assignments
        .iter()
        .map(|e| EvaluatorCommitResult {
            evaluator_id: e.evaluator_id,
            assigned_count: assigned_per_evaluator
                .get(&e.evaluator_id)
                .copied()
                .unwrap_or(0),
        })
        .collect();

    let assigned_submissions = results
        .iter()
        .filter(|r| r.status == CommitItemStatus::Assigned)
        .count() as i32;

    // 逐项结果已经落库，概览刷新失败不能把整个提交变成失败
    let (overview, overview_error) =
        match compute_overview(storage, plan.hackathon_id, plan.round_index, settings).await {
            Ok(overview) => (Some(overview), None),
            Err(e) => {
                warn!(
                    commit_id,
                    hackathon_id = plan.hackathon_id,
                    round_index = plan.round_index,
                    "提交后刷新分配概览失败: {}",
                    e
                );
                (None, Some(e.message().to_string()))
            }
        };

    info!(
        commit_id,
        hackathon_id = plan.hackathon_id,
        round_index = plan.round_index,
        assigned_submissions,
        unassigned_remaining = overview.as_ref().map(|o| o.unassigned_submissions.len()),
        "评委分配提交完成"
    );

    Ok(CommitResult {
        commit_id: commit_id.to_string(),
        assigned_submissions,
        results,
        per_evaluator,
        overview,
        overview_error,
    })
}

/// 单个作品的条件写入，版本冲突时重试
async fn commit_binding(
    storage: &Arc<dyn Storage>,
    plan: &AssignmentPlan,
    binding: &SubmissionBinding,
    ctx: &AssignmentContext,
    settings: &AssignmentConfig,
) -> SubmissionCommitResult {
    let write = BindingWrite {
        hackathon_id: plan.hackathon_id,
        round_index: plan.round_index,
        submission_id: binding.submission_id,
        evaluator_ids: binding.evaluator_ids.clone(),
        target_coverage: plan.judges_per_project.max(1) as usize,
        default_max_submissions: settings.default_max_submissions,
        assigned_by: ctx.user_id,
    };

    let item = |status, evaluator_ids, message: Option<String>| SubmissionCommitResult {
        submission_id: binding.submission_id,
        status,
        evaluator_ids,
        message,
    };

    let mut attempt = 0;
    loop {
        match storage.commit_submission_binding(write.clone()).await {
            Ok(BindingOutcome::Assigned(evaluator_ids)) => {
                return item(CommitItemStatus::Assigned, evaluator_ids, None);
            }
            Ok(BindingOutcome::AlreadyCovered(coverage)) => {
                return item(
                    CommitItemStatus::Skipped,
                    Vec::new(),
                    Some(format!("Already covered by {coverage} evaluator(s)")),
                );
            }
            Ok(BindingOutcome::Ineligible(reason)) => {
                return item(CommitItemStatus::Failed, Vec::new(), Some(reason));
            }
            Ok(BindingOutcome::VersionConflict) if attempt < settings.max_commit_retries => {
                attempt += 1;
                debug!(
                    submission_id = binding.submission_id,
                    attempt, "分配版本冲突，重试"
                );
            }
            Ok(BindingOutcome::VersionConflict) => {
                return item(
                    CommitItemStatus::Conflict,
                    Vec::new(),
                    Some(format!(
                        "Submission was modified concurrently, gave up after {} attempt(s)",
                        attempt + 1
                    )),
                );
            }
            Err(e) => {
                return item(CommitItemStatus::Failed, Vec::new(), Some(e.to_string()));
            }
        }
    }
}
