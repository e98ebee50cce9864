//! 作品分类：按评委覆盖情况把本轮作品分为已分配与未分配

use std::collections::HashMap;

use crate::models::{
    assignments::entities::JudgeAssignmentBuckets, submissions::entities::Submission,
};

/// 作品 ID 到本轮覆盖评委的索引，每个规划周期只构建一次
#[derive(Debug, Default, Clone)]
pub struct CoverageIndex {
    by_submission: HashMap<i64, Vec<i64>>,
}

impl CoverageIndex {
    /// 只统计目标轮次的分配记录
    pub fn build(buckets: &JudgeAssignmentBuckets, round_index: i32) -> Self {
        let mut by_submission: HashMap<i64, Vec<i64>> = HashMap::new();
        for judge in buckets.iter() {
            let Some(round) = judge.round(round_index) else {
                continue;
            };
            for &submission_id in &round.assigned_submissions {
                by_submission
                    .entry(submission_id)
                    .or_default()
                    .push(judge.evaluator_id);
            }
        }
        for evaluators in by_submission.values_mut() {
            evaluators.sort_unstable();
            evaluators.dedup();
        }
        Self { by_submission }
    }

    pub fn coverage(&self, submission_id: i64) -> usize {
        self.by_submission
            .get(&submission_id)
            .map_or(0, |evaluators| evaluators.len())
    }

    pub fn evaluators(&self, submission_id: i64) -> &[i64] {
        self.by_submission
            .get(&submission_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// 分类结果，保持输入顺序
#[derive(Debug, Default, Clone)]
pub struct Classification {
    pub assigned: Vec<Submission>,
    pub unassigned: Vec<Submission>,
}

/// 本轮可参与分配的作品，其余作品直接排除
pub fn eligible_submissions(
    submissions: &[Submission],
    round_index: i32,
) -> impl Iterator<Item = &Submission> {
    submissions
        .iter()
        .filter(move |s| s.is_eligible_for_round(round_index))
}

pub fn classify(
    submissions: &[Submission],
    buckets: &JudgeAssignmentBuckets,
    round_index: i32,
) -> Classification {
    let index = CoverageIndex::build(buckets, round_index);
    classify_with_index(submissions, &index, round_index)
}

pub fn classify_with_index(
    submissions: &[Submission],
    index: &CoverageIndex,
    round_index: i32,
) -> Classification {
    let mut classification = Classification::default();
    for submission in eligible_submissions(submissions, round_index) {
        if index.coverage(submission.id) > 0 {
            classification.assigned.push(submission.clone());
        } else {
            classification.unassigned.push(submission.clone());
        }
    }
    classification
}
