use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::classifier::{CoverageIndex, classify_with_index};
use super::{AssignmentService, ensure_round, error_response};
use crate::config::AssignmentConfig;
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    assignments::{
        entities::{JudgeAssignment, JudgeAssignmentBuckets},
        responses::{AssignmentOverview, JudgeLoad, SubmissionOverviewItem},
    },
    evaluators::{
        entities::{Evaluator, EvaluatorStatus},
        requests::EvaluatorListQuery,
    },
    submissions::entities::{Submission, SubmissionLifecycle},
};
use crate::storage::Storage;

pub async fn get_overview(
    service: &AssignmentService,
    request: &HttpRequest,
    hackathon_id: i64,
    round_index: i32,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(e) = ensure_round(&storage, hackathon_id, round_index).await {
        return Ok(error_response(&e));
    }

    match compute_overview(&storage, hackathon_id, round_index, service.settings()).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Assignment overview retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 从当前存储状态重新计算概览，不使用任何缓存
pub async fn compute_overview(
    storage: &Arc<dyn Storage>,
    hackathon_id: i64,
    round_index: i32,
    settings: &AssignmentConfig,
) -> Result<AssignmentOverview> {
    let submissions = storage
        .list_round_submissions(hackathon_id, round_index)
        .await?;
    let judges = storage.list_judge_assignments(hackathon_id).await?;
    let evaluators = storage
        .list_evaluators(
            hackathon_id,
            EvaluatorListQuery {
                status: Some(EvaluatorStatus::Active),
                evaluator_type: None,
            },
        )
        .await?;
    let scored = storage
        .list_scored_submission_ids(hackathon_id, round_index)
        .await?;

    let buckets = JudgeAssignmentBuckets::from_assignments(judges);
    let overview = build_overview(
        round_index,
        &submissions,
        &buckets,
        &evaluators,
        &scored,
        settings.default_max_submissions,
    );

    debug!(
        hackathon_id,
        round_index,
        unassigned = overview.unassigned_submissions.len(),
        assigned = overview.assigned_submissions.len(),
        "分配概览已重新计算"
    );

    Ok(overview)
}

pub fn build_overview(
    round_index: i32,
    submissions: &[Submission],
    buckets: &JudgeAssignmentBuckets,
    evaluators: &[Evaluator],
    scored: &HashSet<i64>,
    default_max_submissions: i32,
) -> AssignmentOverview {
    let index = CoverageIndex::build(buckets, round_index);
    let classification = classify_with_index(submissions, &index, round_index);

    let to_item = |submission: Submission| {
        let coverage = index.coverage(submission.id);
        SubmissionOverviewItem {
            submission_id: submission.id,
            state: SubmissionLifecycle::derive(
                &submission,
                coverage,
                scored.contains(&submission.id),
            ),
            status: submission.status,
            project_id: submission.project_id,
            presentation_url: submission.presentation_url,
            submitted_at: submission.submitted_at,
            coverage: coverage as i32,
            evaluator_ids: index.evaluators(submission.id).to_vec(),
        }
    };

    let unassigned_submissions: Vec<_> = classification.unassigned.into_iter().map(to_item).collect();
    let assigned_submissions: Vec<_> = classification.assigned.into_iter().map(to_item).collect();

    let by_evaluator: HashMap<i64, &JudgeAssignment> =
        buckets.iter().map(|j| (j.evaluator_id, j)).collect();
    let judges = evaluators
        .iter()
        .filter(|e| e.is_active())
        .map(|evaluator| {
            let round = by_evaluator
                .get(&evaluator.id)
                .and_then(|j| j.round(round_index));
            let current_load = round.map_or(0, |r| r.assigned_submissions.len() as i32);
            let max_submissions = round.map_or(default_max_submissions, |r| r.max_submissions);
            JudgeLoad {
                evaluator_id: evaluator.id,
                name: evaluator.name.clone(),
                email: evaluator.email.clone(),
                evaluator_type: evaluator.evaluator_type,
                current_load,
                max_submissions,
                remaining_capacity: (max_submissions - current_load).max(0),
            }
        })
        .collect();

    AssignmentOverview {
        round_index,
        total_eligible: (unassigned_submissions.len() + assigned_submissions.len()) as i32,
        unassigned_submissions,
        assigned_submissions,
        judges,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::models::{
        assignments::entities::RoundAssignment, evaluators::entities::EvaluatorType,
    };
    use crate::storage::sea_orm_storage::testing;

    fn submission(id: i64, status: &str) -> Submission {
        Submission {
            id,
            hackathon_id: 1,
            round_index: 0,
            status: status.to_string(),
            project_id: Some(id * 3),
            presentation_url: None,
            submitted_at: chrono::Utc::now(),
        }
    }

    fn evaluator(id: i64, status: EvaluatorStatus) -> Evaluator {
        Evaluator {
            id,
            hackathon_id: 1,
            user_id: None,
            name: format!("judge-{id}"),
            email: format!("judge-{id}@hackjudge.dev"),
            evaluator_type: EvaluatorType::Platform,
            status,
            sponsor_company: None,
            can_judge_sponsored_ps: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_build_overview_reports_coverage_state_and_load() {
        let submissions = vec![
            submission(1, "submitted"),
            submission(2, "submitted"),
            submission(3, "submitted"),
            submission(4, "draft"),
        ];
        let buckets = JudgeAssignmentBuckets::from_assignments(vec![JudgeAssignment {
            id: 1,
            hackathon_id: 1,
            evaluator_id: 10,
            evaluator_type: EvaluatorType::Platform,
            rounds: vec![RoundAssignment {
                round_index: 0,
                assigned_submissions: BTreeSet::from([1, 2]),
                max_submissions: 3,
            }],
        }]);
        let evaluators = vec![
            evaluator(10, EvaluatorStatus::Active),
            evaluator(11, EvaluatorStatus::Active),
            evaluator(12, EvaluatorStatus::Declined),
        ];
        let scored = HashSet::from([2]);

        let overview = build_overview(0, &submissions, &buckets, &evaluators, &scored, 5);

        assert_eq!(overview.total_eligible, 3);
        assert_eq!(overview.unassigned_ids(), HashSet::from([3]));
        assert_eq!(overview.assigned_ids(), HashSet::from([1, 2]));
        let states: Vec<_> = overview
            .assigned_submissions
            .iter()
            .map(|s| (s.submission_id, s.state, s.coverage))
            .collect();
        assert_eq!(
            states,
            vec![
                (1, SubmissionLifecycle::Assigned, 1),
                (2, SubmissionLifecycle::Evaluated, 1)
            ]
        );

        assert_eq!(overview.judges.len(), 2);
        let loads = overview.judges_by_id();
        assert!(!loads.contains_key(&12));
        let busy = loads[&10];
        assert_eq!((busy.current_load, busy.remaining_capacity), (2, 1));
        let idle = loads[&11];
        assert_eq!((idle.current_load, idle.max_submissions), (0, 5));
    }

    #[tokio::test]
    async fn test_compute_overview_reads_store() {
        let storage = testing::memory_storage().await;
        let hackathon = testing::seed_hackathon(&storage, 1).await;
        testing::seed_evaluator(&storage, hackathon, "a@judge.dev", "platform", "active").await;
        testing::seed_evaluator(&storage, hackathon, "b@judge.dev", "sponsor", "pending").await;
        let s1 = testing::seed_submission(&storage, hackathon, 0, "submitted").await;
        testing::seed_submission(&storage, hackathon, 0, "draft").await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let overview = compute_overview(&storage, hackathon, 0, &AssignmentConfig::default())
            .await
            .unwrap();
        assert_eq!(overview.total_eligible, 1);
        assert_eq!(overview.unassigned_submissions[0].submission_id, s1);
        assert_eq!(
            overview.unassigned_submissions[0].state,
            SubmissionLifecycle::Submitted
        );
        assert_eq!(overview.judges.len(), 1);
        assert_eq!(overview.judges[0].max_submissions, 10);
    }
}
