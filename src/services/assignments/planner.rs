//! 分配规划器
//!
//! 纯函数实现，不访问存储。检查顺序：
//! 选择为空 -> 评委有效性 -> 每个作品的评委数 k -> 名额 -> 总量校验 -> 收窄 -> 分配 -> 容量提醒。
//! 任何一步失败都不会产生写入。

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::errors::{HackathonError, Result};
use crate::models::{
    assignments::{
        entities::AssignmentMode,
        requests::BulkAssignRequest,
        responses::{AssignmentOverview, AssignmentPlan, PlannedEvaluator, SubmissionBinding},
    },
    evaluators::entities::Evaluator,
};

/// 去重后的选择
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub evaluator_ids: Vec<i64>,
    pub submission_ids: Vec<i64>,
}

impl Selection {
    pub fn selected_count(&self) -> usize {
        self.submission_ids.len()
    }
}

/// 收窄结果
#[derive(Debug, Clone, PartialEq)]
pub struct Narrowed {
    pub kept: Vec<i64>,
    pub excluded: Vec<i64>,
}

/// 规划所需的全部输入，由调用方从存储读取后传入
pub struct PlanningInput<'a> {
    pub hackathon_id: i64,
    pub round_index: i32,
    pub request: &'a BulkAssignRequest,
    /// 黑客松的全部评委
    pub evaluators: &'a [Evaluator],
    /// 刚刚重新计算的概览
    pub overview: &'a AssignmentOverview,
}

fn dedup_in_order(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn ceil_div(numerator: usize, denominator: usize) -> usize {
    numerator.div_ceil(denominator)
}

/// 校验选择本身，不需要任何存储数据
pub fn validate_selection(request: &BulkAssignRequest) -> Result<Selection> {
    let evaluator_ids = dedup_in_order(&request.evaluator_ids);
    if evaluator_ids.is_empty() {
        if request.multiple_judges_mode && request.judges_per_project > 0 {
            warn!(
                judges_per_project = request.judges_per_project,
                "已设置每个作品的评委数，但没有选择任何评委"
            );
        }
        return Err(HackathonError::validation("No evaluators selected"));
    }

    let submission_ids = dedup_in_order(&request.submission_ids);
    if submission_ids.is_empty() {
        return Err(HackathonError::validation("No submissions selected"));
    }

    if let Some((evaluator_id, count)) = request.assign_counts.iter().find(|(_, c)| **c < 0) {
        return Err(HackathonError::validation(format!(
            "Assign count for evaluator {evaluator_id} must not be negative, got {count}"
        )));
    }

    Ok(Selection {
        evaluator_ids,
        submission_ids,
    })
}

/// 选中的评委必须属于该黑客松且已接受邀请，返回顺序与选择顺序一致
pub fn resolve_evaluators<'a>(
    selection: &Selection,
    evaluators: &'a [Evaluator],
) -> Result<Vec<&'a Evaluator>> {
    let by_id: HashMap<i64, &Evaluator> = evaluators.iter().map(|e| (e.id, e)).collect();

    selection
        .evaluator_ids
        .iter()
        .map(|id| match by_id.get(id) {
            None => Err(HackathonError::validation(format!(
                "Evaluator {id} does not belong to this hackathon"
            ))),
            Some(evaluator) if !evaluator.is_active() => Err(HackathonError::validation(format!(
                "Evaluator {} ({}) is {} and cannot be assigned",
                evaluator.id, evaluator.email, evaluator.status
            ))),
            Some(evaluator) => Ok(*evaluator),
        })
        .collect()
}

/// 每个作品需要的评委数 k
pub fn resolve_judges_per_project(
    request: &BulkAssignRequest,
    evaluator_count: usize,
    selected_count: usize,
) -> Result<usize> {
    if !request.multiple_judges_mode {
        return Ok(1);
    }

    let k = match request.judges_per_project_mode {
        AssignmentMode::Manual => {
            if request.judges_per_project < 1 {
                return Err(HackathonError::validation(format!(
                    "Judges per project must be at least 1, got {}",
                    request.judges_per_project
                )));
            }
            request.judges_per_project as usize
        }
        AssignmentMode::Equal => ceil_div(evaluator_count, selected_count).max(1),
    };

    if k > evaluator_count {
        return Err(HackathonError::validation(format!(
            "Judges per project ({k}) exceeds the number of selected evaluators ({evaluator_count})"
        )));
    }

    Ok(k)
}

/// 每位评委的名额，顺序与评委顺序一致
pub fn compute_quotas(
    request: &BulkAssignRequest,
    evaluator_ids: &[i64],
    selected_count: usize,
    judges_per_project: usize,
) -> Vec<usize> {
    match request.assignment_mode {
        AssignmentMode::Equal => {
            let per_evaluator =
                ceil_div(selected_count * judges_per_project, evaluator_ids.len());
            vec![per_evaluator; evaluator_ids.len()]
        }
        AssignmentMode::Manual => evaluator_ids
            .iter()
            .map(|id| request.assign_counts.get(id).copied().unwrap_or(0).max(0) as usize)
            .collect(),
    }
}

/// 名额总数必须足够覆盖全部选择
pub fn check_capacity_gate(
    quotas: &[usize],
    selected_count: usize,
    judges_per_project: usize,
) -> Result<()> {
    let total: usize = quotas.iter().sum();
    let required = selected_count * judges_per_project;
    if total < required {
        return Err(HackathonError::validation(format!(
            "Insufficient assignments: {total} assignment(s) planned for {selected_count} submission(s), {required} required"
        )));
    }
    Ok(())
}

/// 用最新概览收窄选择，只保留仍未分配的作品
pub fn narrow_selection(
    submission_ids: &[i64],
    overview: &AssignmentOverview,
) -> Result<Narrowed> {
    let unassigned = overview.unassigned_ids();
    let (kept, excluded): (Vec<i64>, Vec<i64>) = submission_ids
        .iter()
        .copied()
        .partition(|id| unassigned.contains(id));

    if kept.is_empty() {
        let assigned = overview.assigned_ids();
        let covered = submission_ids
            .iter()
            .filter(|id| assigned.contains(id))
            .count();
        return Err(HackathonError::stale_selection(format!(
            "No unassigned submissions: {covered} of {} selected submission(s) are already assigned",
            submission_ids.len()
        )));
    }

    Ok(Narrowed { kept, excluded })
}

/// 把每个作品绑定到 k 位不同的评委
///
/// 评委按顺序填满名额后再轮到下一位；第 p 遍时每个作品取下一位仍有名额且尚未绑定的评委。
pub fn distribute(
    submission_ids: &[i64],
    evaluator_ids: &[i64],
    quotas: &[usize],
    judges_per_project: usize,
) -> Result<Vec<SubmissionBinding>> {
    let mut remaining = quotas.to_vec();
    let mut bindings: Vec<SubmissionBinding> = submission_ids
        .iter()
        .map(|&submission_id| SubmissionBinding {
            submission_id,
            evaluator_ids: Vec::with_capacity(judges_per_project),
        })
        .collect();

    let evaluator_count = evaluator_ids.len();
    let mut cursor = 0;
    for pass in 0..judges_per_project {
        for binding in bindings.iter_mut() {
            let pick = (0..evaluator_count)
                .map(|offset| (cursor + offset) % evaluator_count)
                .find(|&j| remaining[j] > 0 && !binding.evaluator_ids.contains(&evaluator_ids[j]));

            let Some(j) = pick else {
                return Err(HackathonError::validation(format!(
                    "Cannot assign {judges_per_project} distinct evaluator(s) to submission {} within the given counts (pass {})",
                    binding.submission_id,
                    pass + 1
                )));
            };

            binding.evaluator_ids.push(evaluator_ids[j]);
            remaining[j] -= 1;
            if remaining[j] == 0 {
                cursor = (j + 1) % evaluator_count;
            }
        }
    }

    Ok(bindings)
}

/// 生成完整的分配计划
pub fn build_plan(input: PlanningInput<'_>) -> Result<AssignmentPlan> {
    let request = input.request;
    let selection = validate_selection(request)?;
    let selected_count = selection.selected_count();

    let mut evaluators = resolve_evaluators(&selection, input.evaluators)?;
    let judges_per_project =
        resolve_judges_per_project(request, evaluators.len(), selected_count)?;

    if request.shuffle {
        evaluators.shuffle(&mut rand::rng());
    }
    let evaluator_ids: Vec<i64> = evaluators.iter().map(|e| e.id).collect();

    let quotas = compute_quotas(request, &evaluator_ids, selected_count, judges_per_project);
    check_capacity_gate(&quotas, selected_count, judges_per_project)?;

    let narrowed = narrow_selection(&selection.submission_ids, input.overview)?;
    let bindings = distribute(&narrowed.kept, &evaluator_ids, &quotas, judges_per_project)?;

    let mut planned: HashMap<i64, Vec<i64>> = HashMap::new();
    for binding in &bindings {
        for &evaluator_id in &binding.evaluator_ids {
            planned
                .entry(evaluator_id)
                .or_default()
                .push(binding.submission_id);
        }
    }

    let judge_loads = input.overview.judges_by_id();
    let mut warnings = Vec::new();
    let evaluator_assignments: Vec<PlannedEvaluator> = evaluators
        .iter()
        .zip(&quotas)
        .map(|(evaluator, quota)| {
            let assigned_submission_ids = planned.remove(&evaluator.id).unwrap_or_default();
            let round_capacity = judge_loads
                .get(&evaluator.id)
                .map_or(0, |j| j.remaining_capacity);
            if assigned_submission_ids.len() as i32 > round_capacity {
                warn!(
                    hackathon_id = input.hackathon_id,
                    round_index = input.round_index,
                    evaluator_id = evaluator.id,
                    planned = assigned_submission_ids.len(),
                    round_capacity,
                    "计划分配数量超过评委剩余容量"
                );
                warnings.push(format!(
                    "Evaluator {} ({}) is planned for {} submission(s) but has {} remaining capacity",
                    evaluator.name,
                    evaluator.email,
                    assigned_submission_ids.len(),
                    round_capacity
                ));
            }
            PlannedEvaluator {
                evaluator_id: evaluator.id,
                evaluator_name: evaluator.name.clone(),
                evaluator_email: evaluator.email.clone(),
                max_submissions: *quota as i32,
                round_capacity,
                assigned_submission_ids,
            }
        })
        .collect();

    debug!(
        hackathon_id = input.hackathon_id,
        round_index = input.round_index,
        selected_count,
        narrowed = narrowed.kept.len(),
        judges_per_project,
        "分配计划已生成"
    );

    Ok(AssignmentPlan {
        hackathon_id: input.hackathon_id,
        round_index: input.round_index,
        assignment_mode: request.assignment_mode,
        multiple_judges_mode: request.multiple_judges_mode,
        judges_per_project: judges_per_project as i32,
        judges_per_project_mode: request.judges_per_project_mode,
        selected_count: selected_count as i32,
        submission_ids: narrowed.kept,
        excluded_submission_ids: narrowed.excluded,
        evaluator_assignments,
        bindings,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        assignments::responses::{JudgeLoad, SubmissionOverviewItem},
        evaluators::entities::{EvaluatorStatus, EvaluatorType},
        submissions::entities::SubmissionLifecycle,
    };

    fn request(submissions: &[i64], evaluators: &[i64]) -> BulkAssignRequest {
        BulkAssignRequest {
            submission_ids: submissions.to_vec(),
            evaluator_ids: evaluators.to_vec(),
            assign_counts: HashMap::new(),
            assignment_mode: AssignmentMode::Equal,
            multiple_judges_mode: false,
            judges_per_project: 1,
            judges_per_project_mode: AssignmentMode::Manual,
            shuffle: false,
        }
    }

    fn evaluator(id: i64, status: EvaluatorStatus) -> Evaluator {
        Evaluator {
            id,
            hackathon_id: 1,
            user_id: None,
            name: format!("judge-{id}"),
            email: format!("judge-{id}@hackjudge.dev"),
            evaluator_type: EvaluatorType::Hybrid,
            status,
            sponsor_company: None,
            can_judge_sponsored_ps: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn item(id: i64, coverage: i32) -> SubmissionOverviewItem {
        SubmissionOverviewItem {
            submission_id: id,
            status: "submitted".to_string(),
            project_id: Some(id),
            presentation_url: None,
            submitted_at: chrono::Utc::now(),
            coverage,
            evaluator_ids: Vec::new(),
            state: if coverage > 0 {
                SubmissionLifecycle::Assigned
            } else {
                SubmissionLifecycle::Submitted
            },
        }
    }

    fn overview(unassigned: &[i64], assigned: &[i64], evaluators: &[i64]) -> AssignmentOverview {
        AssignmentOverview {
            round_index: 0,
            total_eligible: (unassigned.len() + assigned.len()) as i32,
            unassigned_submissions: unassigned.iter().map(|id| item(*id, 0)).collect(),
            assigned_submissions: assigned.iter().map(|id| item(*id, 1)).collect(),
            judges: evaluators
                .iter()
                .map(|id| JudgeLoad {
                    evaluator_id: *id,
                    name: format!("judge-{id}"),
                    email: format!("judge-{id}@hackjudge.dev"),
                    evaluator_type: EvaluatorType::Hybrid,
                    current_load: 0,
                    max_submissions: 10,
                    remaining_capacity: 10,
                })
                .collect(),
        }
    }

    fn plan(req: &BulkAssignRequest, pool: &[Evaluator], view: &AssignmentOverview) -> Result<AssignmentPlan> {
        build_plan(PlanningInput {
            hackathon_id: 1,
            round_index: 0,
            request: req,
            evaluators: pool,
            overview: view,
        })
    }

    #[test]
    fn test_equal_mode_ten_over_three() {
        let submissions: Vec<i64> = (1..=10).collect();
        let pool: Vec<Evaluator> = (100..103).map(|id| evaluator(id, EvaluatorStatus::Active)).collect();
        let req = request(&submissions, &[100, 101, 102]);
        let view = overview(&submissions, &[], &[100, 101, 102]);

        let result = plan(&req, &pool, &view).unwrap();
        let counts: Vec<usize> = result
            .evaluator_assignments
            .iter()
            .map(|e| e.assigned_submission_ids.len())
            .collect();
        assert_eq!(counts, vec![4, 4, 2]);
        assert!(result.evaluator_assignments.iter().all(|e| e.max_submissions == 4));
        let quota_total: i32 = result.evaluator_assignments.iter().map(|e| e.max_submissions).sum();
        assert!(quota_total >= 10);
        assert!(result.bindings.iter().all(|b| b.evaluator_ids.len() == 1));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_evaluators_fail_validation() {
        let mut req = request(&[1, 2], &[]);
        req.multiple_judges_mode = true;
        req.judges_per_project = 2;
        let err = validate_selection(&req).unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("No evaluators selected"));
    }

    #[test]
    fn test_manual_counts_below_selection_are_insufficient() {
        let submissions = [1, 2, 3, 4, 5];
        let pool = vec![evaluator(7, EvaluatorStatus::Active), evaluator(8, EvaluatorStatus::Active)];
        let mut req = request(&submissions, &[7, 8]);
        req.assignment_mode = AssignmentMode::Manual;
        req.assign_counts = HashMap::from([(7, 2), (8, 1)]);
        let view = overview(&submissions, &[], &[7, 8]);

        let err = plan(&req, &pool, &view).unwrap_err();
        assert_eq!(err.code(), "E007");
        assert!(err.message().contains("Insufficient assignments"));
    }

    #[test]
    fn test_manual_counts_drive_distribution() {
        let submissions = [1, 2, 3];
        let pool = vec![evaluator(7, EvaluatorStatus::Active), evaluator(8, EvaluatorStatus::Active)];
        let mut req = request(&submissions, &[7, 8]);
        req.assignment_mode = AssignmentMode::Manual;
        // 未设置的评委按 0 处理
        req.assign_counts = HashMap::from([(8, 3)]);
        let view = overview(&submissions, &[], &[7, 8]);

        let result = plan(&req, &pool, &view).unwrap();
        assert!(result.evaluator_assignments[0].assigned_submission_ids.is_empty());
        assert_eq!(
            result.evaluator_assignments[1].assigned_submission_ids,
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_narrowing_drops_assigned_submissions() {
        let pool = vec![evaluator(7, EvaluatorStatus::Active)];
        let req = request(&[1, 2, 3], &[7]);
        let view = overview(&[1, 3], &[2], &[7]);

        let result = plan(&req, &pool, &view).unwrap();
        assert_eq!(result.submission_ids, vec![1, 3]);
        assert_eq!(result.excluded_submission_ids, vec![2]);
        assert_eq!(result.selected_count, 3);
    }

    #[test]
    fn test_narrow_selection_on_large_round_keeps_order() {
        // 奇数未分配，偶数已分配
        let all: Vec<i64> = (1..=5_000).collect();
        let unassigned: Vec<i64> = all.iter().copied().filter(|id| id % 2 == 1).collect();
        let assigned: Vec<i64> = all.iter().copied().filter(|id| id % 2 == 0).collect();
        let view = overview(&unassigned, &assigned, &[7]);

        let selection: Vec<i64> = all.iter().rev().copied().collect();
        let narrowed = narrow_selection(&selection, &view).unwrap();
        assert_eq!(narrowed.kept.len(), 2_500);
        assert_eq!(narrowed.kept.first(), Some(&4_999));
        assert_eq!(narrowed.excluded.first(), Some(&5_000));
        assert!(narrowed.kept.iter().all(|id| id % 2 == 1));
    }

    #[test]
    fn test_fully_covered_selection_is_stale() {
        let pool = vec![evaluator(7, EvaluatorStatus::Active)];
        let req = request(&[1, 2, 3], &[7]);
        let view = overview(&[9], &[1, 2, 3], &[7]);

        let err = plan(&req, &pool, &view).unwrap_err();
        assert_eq!(err.code(), "E014");
        assert!(err.message().contains("3 of 3"));
    }

    #[test]
    fn test_inactive_or_foreign_evaluator_is_rejected() {
        let pool = vec![
            evaluator(7, EvaluatorStatus::Active),
            evaluator(8, EvaluatorStatus::Pending),
        ];
        let view = overview(&[1], &[], &[7]);

        let pending = plan(&request(&[1], &[7, 8]), &pool, &view).unwrap_err();
        assert!(pending.message().contains("pending"));

        let foreign = plan(&request(&[1], &[7, 99]), &pool, &view).unwrap_err();
        assert!(foreign.message().contains("does not belong"));
    }

    #[test]
    fn test_multiple_judges_bind_distinct_evaluators() {
        let submissions = [1, 2, 3, 4];
        let pool: Vec<Evaluator> = (10..13).map(|id| evaluator(id, EvaluatorStatus::Active)).collect();
        let mut req = request(&submissions, &[10, 11, 12]);
        req.multiple_judges_mode = true;
        req.judges_per_project = 2;
        let view = overview(&submissions, &[], &[10, 11, 12]);

        let result = plan(&req, &pool, &view).unwrap();
        assert_eq!(result.judges_per_project, 2);
        for binding in &result.bindings {
            assert_eq!(binding.evaluator_ids.len(), 2);
            assert_ne!(binding.evaluator_ids[0], binding.evaluator_ids[1]);
        }
        // 名额 ceil(4 * 2 / 3) = 3
        assert!(
            result
                .evaluator_assignments
                .iter()
                .all(|e| e.max_submissions == 3 && e.assigned_submission_ids.len() <= 3)
        );
    }

    #[test]
    fn test_equal_judges_per_project_mode() {
        let mut req = request(&[1, 2], &[1, 2, 3, 4, 5, 6]);
        req.multiple_judges_mode = true;
        req.judges_per_project_mode = AssignmentMode::Equal;
        assert_eq!(resolve_judges_per_project(&req, 6, 2).unwrap(), 3);

        req.judges_per_project_mode = AssignmentMode::Manual;
        req.judges_per_project = 7;
        assert!(resolve_judges_per_project(&req, 6, 2).is_err());
    }

    #[test]
    fn test_distribution_fails_when_counts_cannot_cover_distinctly() {
        // 名额总数足够，但只有一位评委有名额，无法做到每个作品两位不同评委
        let err = distribute(&[1, 2], &[7, 8], &[4, 0], 2).unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[test]
    fn test_capacity_overflow_is_a_warning() {
        let submissions = [1, 2, 3];
        let pool = vec![evaluator(7, EvaluatorStatus::Active)];
        let req = request(&submissions, &[7]);
        let mut view = overview(&submissions, &[], &[7]);
        view.judges[0].remaining_capacity = 1;

        let result = plan(&req, &pool, &view).unwrap();
        assert_eq!(result.bindings.len(), 3);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_and_negative_counts() {
        let mut req = request(&[1, 1, 2], &[7, 7]);
        let selection = validate_selection(&req).unwrap();
        assert_eq!(selection.submission_ids, vec![1, 2]);
        assert_eq!(selection.evaluator_ids, vec![7]);

        req.assign_counts = HashMap::from([(7, -1)]);
        assert!(validate_selection(&req).is_err());
    }

    #[test]
    fn test_shuffle_keeps_plan_valid() {
        let submissions: Vec<i64> = (1..=6).collect();
        let pool: Vec<Evaluator> = (20..24).map(|id| evaluator(id, EvaluatorStatus::Active)).collect();
        let mut req = request(&submissions, &[20, 21, 22, 23]);
        req.shuffle = true;
        let view = overview(&submissions, &[], &[20, 21, 22, 23]);

        let result = plan(&req, &pool, &view).unwrap();
        let total: usize = result
            .evaluator_assignments
            .iter()
            .map(|e| e.assigned_submission_ids.len())
            .sum();
        assert_eq!(total, 6);
        assert!(
            result
                .evaluator_assignments
                .iter()
                .all(|e| e.assigned_submission_ids.len() <= 2)
        );
    }
}
